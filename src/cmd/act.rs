//! Scripted actions — `mission-control act`.

use anyhow::Result;
use console::style;

use mission_control::session::{ActionKind, Target};
use mission_control::ui::DashboardUI;

use super::super::Cli;

pub fn cmd_act(cli: &Cli, actions: &[String], team: Option<&str>) -> Result<()> {
    // Parse everything before touching the session so a typo fails fast.
    let kinds = actions
        .iter()
        .map(|a| a.parse::<ActionKind>())
        .collect::<Result<Vec<_>>>()?;

    let (config, mut session, seed) = super::build_session(cli)?;
    let target = super::resolve_target(&session, team)?;
    let ui = DashboardUI::new(config.log_lines());

    println!("{}", style(format!("Seed: {}", seed)).dim());
    println!();
    for kind in kinds {
        let scope = if kind.forces_all_teams() {
            Target::AllTeams
        } else {
            target.clone()
        };
        let outcome = session.perform_action(&scope, kind);
        ui.toast(&outcome);
    }
    println!();

    ui.show_hud(&session);
    println!();
    ui.show_sidebar(&session);

    Ok(())
}
