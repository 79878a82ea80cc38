use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "mission-control")]
#[command(version, about = "Gamified compliance dashboard for research software teams")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Seed for the synthetic data. Overrides MISSION_CONTROL_SEED and the config file.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Path to the config file (defaults to ./mission-control.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive command center (default)
    Play,
    /// Render the dashboard once and exit
    Show {
        /// Panel to render: radar, leaderboard, deep-dive, all
        #[arg(long, default_value = "all")]
        tab: String,

        /// Team shown on the radar panel
        #[arg(long)]
        team: Option<String>,

        /// Print a JSON snapshot instead of the dashboard
        #[arg(long)]
        json: bool,
    },
    /// Apply a sequence of actions to a fresh session
    Act {
        /// Actions to perform in order: fix-vuln, docs, social, hackathon
        #[arg(required = true, num_args = 1..)]
        actions: Vec<String>,

        /// Target team (defaults to all teams). Hackathons always hit every team.
        #[arg(short, long)]
        team: Option<String>,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Write a default mission-control.toml file
    Init,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "mission_control=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        None | Some(Commands::Play) => cmd::cmd_play(&cli)?,
        Some(Commands::Show { tab, team, json }) => {
            cmd::cmd_show(&cli, tab, team.as_deref(), *json)?
        }
        Some(Commands::Act { actions, team }) => cmd::cmd_act(&cli, actions, team.as_deref())?,
        Some(Commands::Config { command }) => cmd::cmd_config(&cli, command.clone())?,
    }

    Ok(())
}
