//! Actions a player can take and who they apply to.

use serde::{Deserialize, Serialize};

use crate::roster::{ALL_TEAMS, is_all_teams};

/// The four dashboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    FixVulnerability,
    UpdateDocs,
    SocialEvent,
    Hackathon,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::FixVulnerability,
        ActionKind::UpdateDocs,
        ActionKind::SocialEvent,
        ActionKind::Hackathon,
    ];

    /// Compliance points added to every row in scope.
    pub fn score_delta(self) -> u8 {
        match self {
            ActionKind::FixVulnerability => 10,
            ActionKind::UpdateDocs => 5,
            ActionKind::SocialEvent => 5,
            ActionKind::Hackathon => 20,
        }
    }

    /// Hackathons ignore the selected team and hit every repository.
    pub fn forces_all_teams(self) -> bool {
        matches!(self, ActionKind::Hackathon)
    }

    /// Button label shown in menus.
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::FixVulnerability => "Patch Vulnerability",
            ActionKind::UpdateDocs => "Update Docs",
            ActionKind::SocialEvent => "Team Social Event",
            ActionKind::Hackathon => "Hackathon",
        }
    }

    /// Effect description returned to the caller after the action ran.
    pub fn effect_message(self) -> &'static str {
        match self {
            ActionKind::FixVulnerability => "Security hole patched! The system stabilises.",
            ActionKind::UpdateDocs => "Documentation updated. Knowledge secured.",
            ActionKind::SocialEvent => "Coffee consumed. Morale is rising!",
            ActionKind::Hackathon => "HACKATHON! Velocity and Community maxed out!",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::FixVulnerability => "fix-vuln",
            ActionKind::UpdateDocs => "docs",
            ActionKind::SocialEvent => "social",
            ActionKind::Hackathon => "hackathon",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fix-vuln" | "fix_vuln" | "patch" => Ok(ActionKind::FixVulnerability),
            "docs" | "update-docs" => Ok(ActionKind::UpdateDocs),
            "social" | "fika" => Ok(ActionKind::SocialEvent),
            "hackathon" => Ok(ActionKind::Hackathon),
            _ => anyhow::bail!(
                "Invalid action '{}'. Valid values: fix-vuln, docs, social, hackathon",
                s
            ),
        }
    }
}

/// Which repositories an action applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    AllTeams,
    Team(String),
}

impl Target {
    /// Parse a user-supplied team name; the `ALL_TEAMS` label (or `all`) selects every team.
    pub fn parse(name: &str) -> Self {
        if is_all_teams(name) {
            Target::AllTeams
        } else {
            Target::Team(name.to_string())
        }
    }

    pub fn includes(&self, team: &str) -> bool {
        match self {
            Target::AllTeams => true,
            Target::Team(name) => name == team,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::AllTeams => f.write_str(ALL_TEAMS),
            Target::Team(name) => f.write_str(name),
        }
    }
}

/// What a single `perform_action` call did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub target: Target,
    pub message: String,
    pub rows_affected: usize,
    /// Set only on the call that brought the quest to its goal.
    pub quest_completed: bool,
}

/// Per-kind tallies shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionCounters {
    pub vulns_fixed: u32,
    pub fikas: u32,
    pub hackathons: u32,
}
