//! Typed error hierarchy for Mission Control.
//!
//! Two leaf enums cover the two places a session can be misconfigured:
//! - `RosterError` — the team → repository table
//! - `ConfigError` — the `mission-control.toml` file
//!
//! `DashboardError` wraps both for callers that build a whole session.

use thiserror::Error;

/// Errors from validating the team → repository roster.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Roster contains no teams")]
    Empty,

    #[error("Team '{team}' has no repositories")]
    EmptyTeam { team: String },

    #[error("Team '{team}' is listed more than once")]
    DuplicateTeam { team: String },

    #[error("Repository '{repository}' appears in both '{first}' and '{second}'")]
    DuplicateRepository {
        repository: String,
        first: String,
        second: String,
    },

    #[error("Team name '{0}' is reserved")]
    ReservedName(String),
}

/// Errors from loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    ReadFailed {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    WriteFailed {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidOverride { key: String, value: String },
}

/// Errors from building a dashboard session.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown team '{name}'. Known teams: {known}")]
    UnknownTeam { name: String, known: String },

    #[error("Invalid generation ranges: {}", .0.join("; "))]
    InvalidRanges(Vec<String>),

    #[error("Quest goal must be at least 1")]
    ZeroQuestGoal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_error_empty_team_carries_name() {
        let err = RosterError::EmptyTeam {
            team: "Infrastructure".to_string(),
        };
        match &err {
            RosterError::EmptyTeam { team } => assert_eq!(team, "Infrastructure"),
            _ => panic!("Expected EmptyTeam"),
        }
        assert!(err.to_string().contains("Infrastructure"));
    }

    #[test]
    fn roster_error_duplicate_repository_names_both_teams() {
        let err = RosterError::DuplicateRepository {
            repository: "penelope".to_string(),
            first: "Tools".to_string(),
            second: "Digital Humanities".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("penelope"));
        assert!(msg.contains("Tools"));
        assert!(msg.contains("Digital Humanities"));
    }

    #[test]
    fn dashboard_error_converts_from_roster_error() {
        let err: DashboardError = RosterError::Empty.into();
        assert!(matches!(err, DashboardError::Roster(RosterError::Empty)));
    }

    #[test]
    fn config_error_read_failed_carries_path() {
        use std::path::PathBuf;
        let path = PathBuf::from("/tmp/mission-control.toml");
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = ConfigError::ReadFailed {
            path: path.clone(),
            source: io_err,
        };
        match &err {
            ConfigError::ReadFailed { path: p, source: s } => {
                assert_eq!(p, &path);
                assert_eq!(s.kind(), std::io::ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected ReadFailed"),
        }
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&RosterError::Empty);
        assert_std_error(&ConfigError::InvalidOverride {
            key: "seed".into(),
            value: "x".into(),
        });
        assert_std_error(&DashboardError::UnknownTeam {
            name: "x".into(),
            known: "y".into(),
        });
    }
}
