//! Configuration for Mission Control.
//!
//! Settings are read from `mission-control.toml` in the working directory (or
//! the file passed with `--config`). Every section is optional; a missing file
//! means the built-in defaults.
//!
//! Layering for the generation seed is file → environment
//! (`MISSION_CONTROL_SEED`) → CLI (`--seed`).
//!
//! # Configuration File Format
//!
//! ```toml
//! [session]
//! seed = 42
//! log_lines = 3
//! log_capacity = 50
//!
//! [quest]
//! title = "Operation: Open Science"
//! description = "Publish 5 datasets or repositories openly."
//! goal = 5
//!
//! [ranges]
//! security = [40, 90]
//! docs = [30, 95]
//! velocity = [20, 100]
//! community = [10, 80]
//! vulnerabilities = [0, 5]
//! last_scan_days = [1, 200]
//! license_odds = [3, 4]
//!
//! [[teams]]
//! name = "Tools"
//! repositories = ["amazon-scraper", "excel-translator"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, DashboardError};
use crate::generator::GenerationRanges;
use crate::roster::{Roster, Team};
use crate::session::{Quest, SessionSetup};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "mission-control.toml";

/// Environment variable overriding `[session] seed`.
pub const SEED_ENV: &str = "MISSION_CONTROL_SEED";

/// `[session]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSection {
    /// Fixed seed for reproducible sessions. Random when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Entries shown in the live log panel
    #[serde(default = "default_log_lines")]
    pub log_lines: usize,
    /// Entries retained in memory
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
}

fn default_log_lines() -> usize {
    3
}

fn default_log_capacity() -> usize {
    crate::session::log::DEFAULT_CAPACITY
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            seed: None,
            log_lines: default_log_lines(),
            log_capacity: default_log_capacity(),
        }
    }
}

/// `[quest]` settings. Progress always starts at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestSection {
    #[serde(default = "default_quest_title")]
    pub title: String,
    #[serde(default = "default_quest_description")]
    pub description: String,
    #[serde(default = "default_quest_goal")]
    pub goal: u32,
}

fn default_quest_title() -> String {
    Quest::default().title
}

fn default_quest_description() -> String {
    Quest::default().description
}

fn default_quest_goal() -> u32 {
    Quest::default().goal
}

impl Default for QuestSection {
    fn default() -> Self {
        Self {
            title: default_quest_title(),
            description: default_quest_description(),
            goal: default_quest_goal(),
        }
    }
}

impl QuestSection {
    pub fn to_quest(&self) -> Quest {
        Quest::new(self.title.clone(), self.description.clone(), self.goal)
    }
}

/// Contents of `mission-control.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionToml {
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub quest: QuestSection,
    #[serde(default)]
    pub ranges: GenerationRanges,
    /// Roster override. Empty means the built-in roster.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<Team>,
}

impl MissionToml {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path` if it exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The validated roster: `[[teams]]` if given, else the built-in table.
    pub fn roster(&self) -> Result<Roster, DashboardError> {
        if self.teams.is_empty() {
            Ok(Roster::default())
        } else {
            Ok(Roster::new(self.teams.clone())?)
        }
    }

    /// Collect configuration warnings. Empty means the file is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = self.ranges.validate();

        if self.quest.goal == 0 {
            warnings.push("Invalid quest goal 0: must be at least 1".to_string());
        }
        if self.session.log_lines == 0 {
            warnings.push("session.log_lines is 0: the live log will be hidden".to_string());
        }
        if !self.teams.is_empty()
            && let Err(e) = Roster::new(self.teams.clone())
        {
            warnings.push(format!("Invalid teams: {}", e));
        }

        warnings
    }
}

/// Resolved runtime configuration: file contents plus env/CLI overrides.
#[derive(Debug, Clone)]
pub struct MissionConfig {
    /// File the settings came from, if one existed
    pub source: Option<PathBuf>,
    pub toml: MissionToml,
    /// CLI override for the seed
    pub cli_seed: Option<u64>,
}

impl MissionConfig {
    /// Load from `path`, or from [`CONFIG_FILE`] in the working directory.
    ///
    /// An explicit path that does not exist is an error; a missing default file
    /// is not.
    pub fn load(path: Option<&Path>, cli_seed: Option<u64>) -> Result<Self, ConfigError> {
        let (source, toml) = match path {
            Some(path) => (Some(path.to_path_buf()), MissionToml::load(path)?),
            None => {
                let default = PathBuf::from(CONFIG_FILE);
                if default.exists() {
                    let toml = MissionToml::load(&default)?;
                    (Some(default), toml)
                } else {
                    (None, MissionToml::default())
                }
            }
        };
        Ok(Self {
            source,
            toml,
            cli_seed,
        })
    }

    #[cfg(test)]
    pub fn from_toml(toml: MissionToml) -> Self {
        Self {
            source: None,
            toml,
            cli_seed: None,
        }
    }

    /// Seed for the session (CLI → env → file), `None` for a random one.
    pub fn seed(&self) -> Result<Option<u64>, ConfigError> {
        resolve_seed(
            self.cli_seed,
            std::env::var(SEED_ENV).ok(),
            self.toml.session.seed,
        )
    }

    pub fn log_lines(&self) -> usize {
        self.toml.session.log_lines
    }

    /// Everything [`crate::session::Session::generate`] needs.
    pub fn setup(&self) -> Result<SessionSetup, DashboardError> {
        Ok(SessionSetup {
            roster: self.toml.roster()?,
            ranges: self.toml.ranges.clone(),
            quest: self.toml.quest.to_quest(),
            log_capacity: Some(self.toml.session.log_capacity),
        })
    }
}

fn resolve_seed(
    cli: Option<u64>,
    env: Option<String>,
    file: Option<u64>,
) -> Result<Option<u64>, ConfigError> {
    if cli.is_some() {
        return Ok(cli);
    }
    if let Some(value) = env {
        let seed = value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidOverride {
                key: SEED_ENV.to_string(),
                value,
            })?;
        return Ok(Some(seed));
    }
    Ok(file)
}
