//! One-shot dashboard render — `mission-control show`.

use anyhow::{Context, Result};
use console::style;

use mission_control::session::Target;
use mission_control::ui::{DashboardUI, ScanProgress, Tab};

use super::super::Cli;

pub fn cmd_show(cli: &Cli, tab: &str, team: Option<&str>, json: bool) -> Result<()> {
    let tab: Tab = tab.parse()?;
    let (config, session, seed) = super::build_session(cli)?;

    let radar_team = match super::resolve_target(&session, team)? {
        Target::Team(name) => Some(name),
        Target::AllTeams => None,
    };

    if json {
        let snapshot = serde_json::to_string_pretty(&session.snapshot())
            .context("Failed to serialize session snapshot")?;
        println!("{}", snapshot);
        return Ok(());
    }

    ScanProgress::new(session.records().len() as u64).run(&session);
    DashboardUI::new(config.log_lines()).show(&session, tab, radar_team.as_deref());
    println!("{}", style(format!("Seed: {}", seed)).dim());

    Ok(())
}
