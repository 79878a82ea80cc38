//! Interactive command center — `mission-control play`.

use anyhow::{Result, bail};
use console::{Term, style};
use dialoguer::{Select, theme::ColorfulTheme};

use mission_control::roster::ALL_TEAMS;
use mission_control::session::{ActionKind, Session, Target};
use mission_control::ui::{DashboardUI, ScanProgress, Tab};

use super::super::Cli;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Action(ActionKind),
    ChangeTarget,
    ChangeView,
    AnalyseTeam,
    Quit,
}

const MENU: [MenuChoice; 8] = [
    MenuChoice::Action(ActionKind::FixVulnerability),
    MenuChoice::Action(ActionKind::UpdateDocs),
    MenuChoice::Action(ActionKind::SocialEvent),
    MenuChoice::Action(ActionKind::Hackathon),
    MenuChoice::ChangeTarget,
    MenuChoice::ChangeView,
    MenuChoice::AnalyseTeam,
    MenuChoice::Quit,
];

fn menu_items(target: &Target, tab: Tab) -> Vec<String> {
    MENU.iter()
        .map(|choice| match choice {
            MenuChoice::Action(ActionKind::Hackathon) => {
                format!("{} ({})", ActionKind::Hackathon.label(), ALL_TEAMS)
            }
            MenuChoice::Action(kind) => kind.label().to_string(),
            MenuChoice::ChangeTarget => format!("Change target team (current: {})", target),
            MenuChoice::ChangeView => format!("Switch view (current: {})", tab.label()),
            MenuChoice::AnalyseTeam => "Analyse a team on the radar".to_string(),
            MenuChoice::Quit => "Quit".to_string(),
        })
        .collect()
}

/// Target options: every roster team followed by the all-teams sentinel.
fn target_options(session: &Session) -> Vec<String> {
    session
        .roster()
        .team_names()
        .map(String::from)
        .chain(std::iter::once(ALL_TEAMS.to_string()))
        .collect()
}

/// The target behind `target_options(session)[index]`; the last entry is every team.
fn target_at(session: &Session, index: usize) -> Target {
    session
        .roster()
        .team_names()
        .nth(index)
        .map_or(Target::AllTeams, |name| Target::Team(name.to_string()))
}

/// Sessions start aimed at the first roster team.
fn initial_target(session: &Session) -> Target {
    target_at(session, 0)
}

fn select(prompt: &str, items: &[String], default: usize) -> Result<usize> {
    Ok(Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()?)
}

pub fn cmd_play(cli: &Cli) -> Result<()> {
    if !Term::stdout().is_term() {
        bail!(
            "Interactive mode needs a terminal. \
             Use 'mission-control show' or 'mission-control act' instead."
        );
    }

    let (config, mut session, seed) = super::build_session(cli)?;
    ScanProgress::new(session.records().len() as u64).run(&session);

    let ui = DashboardUI::new(config.log_lines());
    let mut target = initial_target(&session);
    let mut tab = Tab::Radar;
    let mut radar_team: Option<String> = None;
    let mut cursor = 0;

    loop {
        ui.show(&session, tab, radar_team.as_deref());
        println!(
            "{}  {}",
            style(format!("Target: {}", target)).yellow(),
            style(format!("Seed: {}", seed)).dim()
        );

        cursor = select("Command Center", &menu_items(&target, tab), cursor)?;
        match MENU[cursor] {
            MenuChoice::Action(kind) => {
                let scope = if kind.forces_all_teams() {
                    Target::AllTeams
                } else {
                    target.clone()
                };
                let outcome = session.perform_action(&scope, kind);
                ui.toast(&outcome);
            }
            MenuChoice::ChangeTarget => {
                let options = target_options(&session);
                let current = options
                    .iter()
                    .position(|o| matches!(&target, Target::Team(name) if name == o))
                    .unwrap_or(options.len() - 1);
                target = target_at(&session, select("Target team", &options, current)?);
            }
            MenuChoice::ChangeView => {
                let labels: Vec<String> = Tab::ALL.iter().map(|t| t.label().to_string()).collect();
                let current = Tab::ALL.iter().position(|t| *t == tab).unwrap_or(0);
                tab = Tab::ALL[select("View", &labels, current)?];
            }
            MenuChoice::AnalyseTeam => {
                let teams: Vec<String> = session.roster().team_names().map(String::from).collect();
                let current = radar_team
                    .as_ref()
                    .and_then(|t| teams.iter().position(|n| n == t))
                    .unwrap_or(0);
                radar_team = Some(teams[select("Team for analysis", &teams, current)?].clone());
                if !matches!(tab, Tab::Radar | Tab::All) {
                    tab = Tab::Radar;
                }
            }
            MenuChoice::Quit => break,
        }
    }

    println!(
        "{} {} actions, total XP {}",
        style("Session over:").bold(),
        session.actions_taken(),
        session.total_score()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mission_control::generator::SeededSource;
    use mission_control::session::SessionSetup;

    #[test]
    fn test_menu_items_match_choices() {
        let items = menu_items(&Target::Team("Tools".into()), Tab::Leaderboard);
        assert_eq!(items.len(), MENU.len());
        assert_eq!(items[0], "Patch Vulnerability");
        assert_eq!(items[3], "Hackathon (All teams)");
        assert!(items[4].contains("Tools"));
        assert!(items[5].contains("Leaderboard"));
        assert_eq!(MENU[7], MenuChoice::Quit);
    }

    #[test]
    fn test_menu_offers_every_action() {
        for kind in ActionKind::ALL {
            assert!(MENU.contains(&MenuChoice::Action(kind)));
        }
    }

    #[test]
    fn test_target_options_end_with_all_teams() {
        let session =
            Session::generate(SessionSetup::default(), &mut SeededSource::new(1)).unwrap();
        let options = target_options(&session);
        assert_eq!(options.len(), 5);
        assert_eq!(options[0], "Welfare State Analytics");
        assert_eq!(options[4], ALL_TEAMS);
        assert_eq!(target_at(&session, 4), Target::AllTeams);
    }

    #[test]
    fn test_target_at_follows_option_index() {
        let session =
            Session::generate(SessionSetup::default(), &mut SeededSource::new(1)).unwrap();
        let options = target_options(&session);
        for (index, option) in options.iter().enumerate().take(options.len() - 1) {
            assert_eq!(target_at(&session, index), Target::Team(option.clone()));
        }
    }

    #[test]
    fn test_initial_target_is_first_team() {
        let session =
            Session::generate(SessionSetup::default(), &mut SeededSource::new(1)).unwrap();
        assert_eq!(
            initial_target(&session),
            Target::Team("Welfare State Analytics".to_string())
        );
    }
}
