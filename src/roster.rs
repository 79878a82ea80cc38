//! The team → repository table.
//!
//! The default roster is compiled in. A config file may replace it with its own
//! `[[teams]]` entries; either way the table is validated before any records are
//! generated, so display code can rely on every team having at least one row.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::errors::RosterError;

/// Display name of the "every team" target.
pub const ALL_TEAMS: &str = "All teams";

/// Short alias accepted wherever `ALL_TEAMS` is.
pub const ALL_TEAMS_ALIAS: &str = "all";

/// True for any spelling that selects every team. Such names can't be team names.
pub fn is_all_teams(name: &str) -> bool {
    name.eq_ignore_ascii_case(ALL_TEAMS) || name.eq_ignore_ascii_case(ALL_TEAMS_ALIAS)
}

/// A team and the repositories it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub repositories: Vec<String>,
}

impl Team {
    pub fn new(name: impl Into<String>, repositories: &[&str]) -> Self {
        Self {
            name: name.into(),
            repositories: repositories.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Ordered, validated list of teams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    teams: Vec<Team>,
}

impl Roster {
    /// Validate and wrap a list of teams.
    ///
    /// Rejects an empty roster, a team with no repositories, a team listed twice,
    /// a repository owned by two teams, and the reserved `ALL_TEAMS` name or its alias.
    pub fn new(teams: Vec<Team>) -> Result<Self, RosterError> {
        if teams.is_empty() {
            return Err(RosterError::Empty);
        }

        let mut seen_teams = HashSet::new();
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for team in &teams {
            if is_all_teams(&team.name) {
                return Err(RosterError::ReservedName(team.name.clone()));
            }
            if !seen_teams.insert(team.name.as_str()) {
                return Err(RosterError::DuplicateTeam {
                    team: team.name.clone(),
                });
            }
            if team.repositories.is_empty() {
                return Err(RosterError::EmptyTeam {
                    team: team.name.clone(),
                });
            }
            for repo in &team.repositories {
                if let Some(first) = owners.insert(repo.as_str(), team.name.as_str()) {
                    return Err(RosterError::DuplicateRepository {
                        repository: repo.clone(),
                        first: first.to_string(),
                        second: team.name.clone(),
                    });
                }
            }
        }

        Ok(Self { teams })
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team_names(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(|t| t.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.iter().any(|t| t.name == name)
    }

    pub fn repository_count(&self) -> usize {
        self.teams.iter().map(|t| t.repositories.len()).sum()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            teams: default_teams(),
        }
    }
}

/// The built-in four-team, twelve-repository table.
pub fn default_teams() -> Vec<Team> {
    vec![
        Team::new(
            "Welfare State Analytics",
            &["penelope", "welfare-state-analytics", "retriever"],
        ),
        Team::new(
            "Digital Humanities",
            &[
                "humlab-sead",
                "the_culture_of_international_relations",
                "disutrano",
            ],
        ),
        Team::new("Infrastructure", &["cwb-container", "neatline-deployment"]),
        Team::new(
            "Tools",
            &["amazon-scraper", "excel-translator", "excel-translator-client"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_is_valid() {
        let roster = Roster::new(default_teams()).unwrap();
        assert_eq!(roster.teams().len(), 4);
        assert_eq!(roster.repository_count(), 12);
        assert_eq!(roster, Roster::default());
    }

    #[test]
    fn test_default_roster_order() {
        let roster = Roster::default();
        let names: Vec<_> = roster.team_names().collect();
        assert_eq!(
            names,
            vec![
                "Welfare State Analytics",
                "Digital Humanities",
                "Infrastructure",
                "Tools"
            ]
        );
    }

    #[test]
    fn test_empty_team_rejected() {
        let teams = vec![Team::new("Tools", &["a"]), Team::new("Ghosts", &[])];
        let err = Roster::new(teams).unwrap_err();
        assert!(matches!(err, RosterError::EmptyTeam { team } if team == "Ghosts"));
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert!(matches!(Roster::new(vec![]), Err(RosterError::Empty)));
    }

    #[test]
    fn test_duplicate_team_rejected() {
        let teams = vec![Team::new("Tools", &["a"]), Team::new("Tools", &["b"])];
        assert!(matches!(
            Roster::new(teams),
            Err(RosterError::DuplicateTeam { .. })
        ));
    }

    #[test]
    fn test_duplicate_repository_rejected() {
        let teams = vec![Team::new("Tools", &["a"]), Team::new("Infra", &["a"])];
        match Roster::new(teams) {
            Err(RosterError::DuplicateRepository {
                repository,
                first,
                second,
            }) => {
                assert_eq!(repository, "a");
                assert_eq!(first, "Tools");
                assert_eq!(second, "Infra");
            }
            other => panic!("Expected DuplicateRepository, got {:?}", other),
        }
    }

    #[test]
    fn test_reserved_name_rejected() {
        let teams = vec![Team::new("all teams", &["a"])];
        assert!(matches!(
            Roster::new(teams),
            Err(RosterError::ReservedName(_))
        ));
    }

    #[test]
    fn test_all_alias_is_reserved() {
        for name in ["All", "all", "ALL"] {
            let teams = vec![Team::new(name, &["a"]), Team::new("Core", &["b", "c"])];
            match Roster::new(teams) {
                Err(RosterError::ReservedName(reserved)) => assert_eq!(reserved, name),
                other => panic!("expected ReservedName for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_is_all_teams() {
        assert!(is_all_teams("All teams"));
        assert!(is_all_teams("ALL"));
        assert!(!is_all_teams("Allies"));
        assert!(!is_all_teams("Tools"));
    }

    #[test]
    fn test_contains() {
        let roster = Roster::default();
        assert!(roster.contains("Tools"));
        assert!(!roster.contains("tools"));
        assert!(!roster.contains(ALL_TEAMS));
    }
}
