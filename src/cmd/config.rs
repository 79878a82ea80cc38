//! Configuration view and validation commands — `mission-control config`.

use anyhow::Result;
use std::path::PathBuf;

use super::super::{Cli, ConfigCommands};

pub fn cmd_config(cli: &Cli, command: Option<ConfigCommands>) -> Result<()> {
    use mission_control::config::{CONFIG_FILE, MissionConfig, MissionToml};

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    // Only the implicit ./mission-control.toml may be absent.
    let explicit = cli.config.is_some();

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Mission Control Configuration");
            println!("=============================");
            println!();

            let toml = if explicit {
                MissionToml::load(&config_path)?
            } else {
                MissionToml::load_or_default(&config_path)?
            };
            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No config file found at {}", config_path.display());
                println!("Using default configuration.");
            }
            println!();

            println!("[session]");
            match toml.session.seed {
                Some(seed) => println!("  seed = {}", seed),
                None => println!("  seed = (random)"),
            }
            println!("  log_lines = {}", toml.session.log_lines);
            println!("  log_capacity = {}", toml.session.log_capacity);
            println!();

            println!("[quest]");
            println!("  title = \"{}\"", toml.quest.title);
            println!("  description = \"{}\"", toml.quest.description);
            println!("  goal = {}", toml.quest.goal);
            println!();

            println!("[ranges]");
            let r = &toml.ranges;
            for (name, (min, max)) in [
                ("security", r.security),
                ("docs", r.docs),
                ("velocity", r.velocity),
                ("community", r.community),
                ("vulnerabilities", r.vulnerabilities),
                ("last_scan_days", r.last_scan_days),
            ] {
                println!("  {} = [{}, {}]", name, min, max);
            }
            println!("  license_odds = {}/{}", r.license_odds.0, r.license_odds.1);
            println!();

            println!("Teams{}:", if toml.teams.is_empty() { " (built-in)" } else { "" });
            match toml.roster() {
                Ok(roster) => {
                    for team in roster.teams() {
                        println!("  {} ({})", team.name, team.repositories.join(", "));
                    }
                }
                Err(e) => println!("  invalid: {}", e),
            }
            println!();

            // Show effective values (including env/CLI overrides)
            let effective = MissionConfig {
                source: Some(config_path.clone()),
                toml,
                cli_seed: cli.seed,
            };
            println!("Effective values (with env/CLI overrides):");
            match effective.seed()? {
                Some(seed) => println!("  seed = {}", seed),
                None => println!("  seed = (random)"),
            }
            println!();
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !explicit && !config_path.exists() {
                println!("No config file found. Using defaults (valid).");
                return Ok(());
            }

            let toml = MissionToml::load(&config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("Config already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            MissionToml::default().save(&config_path)?;

            println!("Created {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [session] seed, log_lines, log_capacity");
            println!("  - [quest] title, description, goal");
            println!("  - [ranges] the draw ranges for generated data");
            println!("  - [[teams]] to replace the built-in roster");
            println!();
        }
    }

    Ok(())
}
