//! CLI command implementations.
//!
//! Each submodule owns one `Commands` variant:
//!
//! | Module   | Commands handled |
//! |----------|------------------|
//! | `play`   | `Play` (default) |
//! | `show`   | `Show`           |
//! | `act`    | `Act`            |
//! | `config` | `Config`         |

pub mod act;
pub mod config;
pub mod play;
pub mod show;

pub use act::cmd_act;
pub use config::cmd_config;
pub use play::cmd_play;
pub use show::cmd_show;

use anyhow::{Context, Result};
use tracing::info;

use mission_control::config::MissionConfig;
use mission_control::errors::DashboardError;
use mission_control::generator::SeededSource;
use mission_control::session::{Session, Target};

use super::Cli;

/// Load configuration and generate a fresh session from it.
pub(crate) fn build_session(cli: &Cli) -> Result<(MissionConfig, Session, u64)> {
    let config = MissionConfig::load(cli.config.as_deref(), cli.seed)
        .context("Failed to load configuration")?;

    let mut source = match config.seed()? {
        Some(seed) => SeededSource::new(seed),
        None => SeededSource::from_entropy(),
    };
    let seed = source.seed();
    info!(seed, "generating session");

    let setup = config.setup()?;
    let session = Session::generate(setup, &mut source)?;
    Ok((config, session, seed))
}

/// Turn a `--team` value into a target, rejecting names outside the roster.
pub(crate) fn resolve_target(session: &Session, team: Option<&str>) -> Result<Target> {
    let Some(name) = team else {
        return Ok(Target::AllTeams);
    };
    if session.roster().contains(name) {
        return Ok(Target::Team(name.to_string()));
    }
    match Target::parse(name) {
        Target::AllTeams => Ok(Target::AllTeams),
        Target::Team(name) => Err(DashboardError::UnknownTeam {
            name,
            known: session.roster().team_names().collect::<Vec<_>>().join(", "),
        }
        .into()),
    }
}
