//! Session state machine.
//!
//! A [`Session`] owns the generated repository table and every counter the
//! dashboard shows. It is created once per run and threaded by `&mut` through
//! the command that drives it; [`Session::perform_action`] is the only
//! operation that mutates it.

pub mod action;
pub mod log;
pub mod quest;

pub use action::{ActionCounters, ActionKind, ActionOutcome, Target};
pub use log::{ActivityLog, LogEntry};
pub use quest::Quest;

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::DashboardError;
use crate::generator::{GenerationRanges, StatSource, generate};
use crate::model::{RepositoryRecord, TeamStats};
use crate::roster::Roster;

/// Everything needed to build a session besides the random source.
#[derive(Debug, Clone, Default)]
pub struct SessionSetup {
    pub roster: Roster,
    pub ranges: GenerationRanges,
    pub quest: Quest,
    pub log_capacity: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Session {
    roster: Roster,
    records: Vec<RepositoryRecord>,
    total_score: u32,
    actions_taken: u32,
    counters: ActionCounters,
    quest: Quest,
    log: ActivityLog,
}

/// Average score of one team, as shown on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStanding {
    pub team: String,
    pub average_score: f64,
    pub repositories: usize,
}

/// Aggregate numbers for the top-of-dashboard HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthSummary {
    /// Mean compliance score, truncated.
    pub system_health: u32,
    pub active_repos: usize,
    pub vulnerabilities: u32,
    pub actions_taken: u32,
    pub total_score: u32,
}

/// Serializable view of the whole session.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub health: HealthSummary,
    pub counters: &'a ActionCounters,
    pub quest: &'a Quest,
    pub leaderboard: Vec<TeamStanding>,
    pub repositories: Vec<RepositoryView<'a>>,
    pub log: &'a ActivityLog,
}

#[derive(Debug, Serialize)]
pub struct RepositoryView<'a> {
    #[serde(flatten)]
    pub record: &'a RepositoryRecord,
    pub status: crate::model::Status,
}

impl Session {
    /// Generate the repository table and start a fresh session.
    pub fn generate(
        setup: SessionSetup,
        source: &mut impl StatSource,
    ) -> Result<Self, DashboardError> {
        let warnings = setup.ranges.validate();
        if !warnings.is_empty() {
            return Err(DashboardError::InvalidRanges(warnings));
        }
        if setup.quest.goal == 0 {
            return Err(DashboardError::ZeroQuestGoal);
        }

        let records = generate(&setup.roster, &setup.ranges, source);
        Ok(Self::from_records(
            setup.roster,
            records,
            setup.quest,
            setup
                .log_capacity
                .map(ActivityLog::with_capacity)
                .unwrap_or_default(),
        ))
    }

    fn from_records(
        roster: Roster,
        records: Vec<RepositoryRecord>,
        quest: Quest,
        log: ActivityLog,
    ) -> Self {
        let mut session = Self {
            roster,
            records,
            total_score: 0,
            actions_taken: 0,
            counters: ActionCounters::default(),
            quest,
            log,
        };
        session.recompute_total();
        session.log.push(format!(
            "Scanned {} repositories across {} teams",
            session.records.len(),
            session.roster.teams().len()
        ));
        session
    }

    /// Apply `kind` to the repositories selected by `target`.
    ///
    /// A team name that is not in the roster matches no rows; the counters and
    /// quest still advance.
    pub fn perform_action(&mut self, target: &Target, kind: ActionKind) -> ActionOutcome {
        let scope = if kind.forces_all_teams() {
            Target::AllTeams
        } else {
            target.clone()
        };

        match kind {
            ActionKind::FixVulnerability => {
                self.counters.vulns_fixed += 1;
                self.bump_team_stats(&scope, |s| s.security += 5);
            }
            ActionKind::UpdateDocs => {
                self.bump_team_stats(&scope, |s| s.docs += 5);
            }
            ActionKind::SocialEvent => {
                self.counters.fikas += 1;
                self.bump_team_stats(&scope, |s| s.community += 5);
            }
            ActionKind::Hackathon => {
                self.counters.hackathons += 1;
                for rec in &mut self.records {
                    rec.stats.velocity += 10;
                    rec.stats.community += 10;
                }
            }
        }

        let delta = kind.score_delta();
        let mut rows_affected = 0;
        for rec in self.records.iter_mut().filter(|r| scope.includes(&r.team)) {
            rec.boost(delta);
            rows_affected += 1;
        }

        self.actions_taken += 1;
        self.recompute_total();
        debug!(
            action = %kind,
            target = %scope,
            rows_affected,
            total_score = self.total_score,
            "performed action"
        );

        let quest_completed = self.quest.advance();
        self.log.push(format!("{} on {}: {}", kind.label(), scope, kind.effect_message()));
        if quest_completed {
            info!(quest = %self.quest.title, "quest complete");
            self.log.push(format!("QUEST COMPLETE: {}", self.quest.title));
        }

        ActionOutcome {
            kind,
            target: scope,
            message: kind.effect_message().to_string(),
            rows_affected,
            quest_completed,
        }
    }

    /// Side stats move only when a single team is targeted.
    fn bump_team_stats(&mut self, scope: &Target, bump: impl Fn(&mut TeamStats)) {
        let Target::Team(name) = scope else {
            return;
        };
        for rec in self.records.iter_mut().filter(|r| &r.team == name) {
            bump(&mut rec.stats);
        }
    }

    fn recompute_total(&mut self) {
        self.total_score = self
            .records
            .iter()
            .map(|r| r.compliance_score as u32)
            .sum();
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    pub fn team_records<'a>(&'a self, team: &'a str) -> impl Iterator<Item = &'a RepositoryRecord> {
        self.records.iter().filter(move |r| r.team == team)
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn actions_taken(&self) -> u32 {
        self.actions_taken
    }

    pub fn counters(&self) -> &ActionCounters {
        &self.counters
    }

    pub fn quest(&self) -> &Quest {
        &self.quest
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Radar values for a team, read from its first repository.
    pub fn team_stats(&self, team: &str) -> Option<TeamStats> {
        self.team_records(team).next().map(|r| r.stats)
    }

    pub fn health(&self) -> HealthSummary {
        let active_repos = self.records.len();
        let system_health = if active_repos == 0 {
            0
        } else {
            self.total_score / active_repos as u32
        };
        HealthSummary {
            system_health,
            active_repos,
            vulnerabilities: self.records.iter().map(|r| r.vulnerabilities).sum(),
            actions_taken: self.actions_taken,
            total_score: self.total_score,
        }
    }

    /// Team averages, lowest first.
    pub fn leaderboard(&self) -> Vec<TeamStanding> {
        let mut standings: Vec<TeamStanding> = self
            .roster
            .team_names()
            .map(|team| {
                let scores: Vec<u32> = self
                    .team_records(team)
                    .map(|r| r.compliance_score as u32)
                    .collect();
                let average_score = if scores.is_empty() {
                    0.0
                } else {
                    scores.iter().sum::<u32>() as f64 / scores.len() as f64
                };
                TeamStanding {
                    team: team.to_string(),
                    average_score,
                    repositories: scores.len(),
                }
            })
            .collect();
        standings.sort_by(|a, b| a.average_score.total_cmp(&b.average_score));
        standings
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            health: self.health(),
            counters: &self.counters,
            quest: &self.quest,
            leaderboard: self.leaderboard(),
            repositories: self
                .records
                .iter()
                .map(|record| RepositoryView {
                    record,
                    status: record.status(),
                })
                .collect(),
            log: &self.log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SeededSource;
    use crate::generator::tests::ScriptedSource;
    use crate::model::MAX_SCORE;
    use crate::roster::Team;

    const WSA: &str = "Welfare State Analytics";

    fn seeded(seed: u64) -> Session {
        Session::generate(SessionSetup::default(), &mut SeededSource::new(seed)).unwrap()
    }

    fn scores(session: &Session) -> Vec<u8> {
        session.records().iter().map(|r| r.compliance_score).collect()
    }

    #[test]
    fn test_initial_total_is_sum_of_scores() {
        let session = seeded(11);
        assert_eq!(session.records().len(), 12);
        let sum: u32 = scores(&session).iter().map(|&s| s as u32).sum();
        assert_eq!(session.total_score(), sum);
        assert_eq!(session.actions_taken(), 0);
        assert_eq!(session.quest().current, 0);
    }

    #[test]
    fn test_fix_vulnerability_on_single_team() {
        let mut session = seeded(3);
        let before: Vec<_> = session.team_records(WSA).cloned().collect();
        assert_eq!(before.len(), 3);

        let outcome =
            session.perform_action(&Target::Team(WSA.into()), ActionKind::FixVulnerability);

        assert_eq!(outcome.rows_affected, 3);
        assert_eq!(session.actions_taken(), 1);
        assert_eq!(session.counters().vulns_fixed, 1);
        for (old, new) in before.iter().zip(session.team_records(WSA)) {
            let expected = (old.compliance_score as u32 + 10).min(100) as u8;
            assert_eq!(new.compliance_score, expected);
            assert_eq!(new.stats.security, old.stats.security + 5);
            assert_eq!(new.stats.docs, old.stats.docs);
        }
        let sum: u32 = scores(&session).iter().map(|&s| s as u32).sum();
        assert_eq!(session.total_score(), sum);
    }

    #[test]
    fn test_fix_vulnerability_exact_delta_below_clamp() {
        let roster = Roster::new(vec![
            Team::new(WSA, &["a", "b", "c"]),
            Team::new("Tools", &["d"]),
        ])
        .unwrap();
        // WSA baseline 60/50 -> base 55; Tools baseline 40/30 -> base 35
        let mut source = ScriptedSource::new(&[
            60, 50, 50, 40, 1, 0, 1, 1, 1, 1, 1, 2, 1, //
            40, 30, 20, 10, 1, 0, 1,
        ]);
        let setup = SessionSetup {
            roster,
            ..Default::default()
        };
        let mut session = Session::generate(setup, &mut source).unwrap();
        assert_eq!(scores(&session), vec![55, 50, 45, 35]);
        assert_eq!(session.total_score(), 185);

        session.perform_action(&Target::Team(WSA.into()), ActionKind::FixVulnerability);
        assert_eq!(scores(&session), vec![65, 60, 55, 35]);
        assert_eq!(session.total_score(), 215);
        assert_eq!(session.actions_taken(), 1);
    }

    #[test]
    fn test_fix_vulnerability_all_teams_skips_security_stat() {
        let mut session = seeded(8);
        let before = session.records().to_vec();
        session.perform_action(&Target::AllTeams, ActionKind::FixVulnerability);
        for (old, new) in before.iter().zip(session.records()) {
            assert_eq!(new.stats, old.stats);
            assert_eq!(
                new.compliance_score,
                (old.compliance_score + 10).min(MAX_SCORE)
            );
        }
        assert_eq!(session.counters().vulns_fixed, 1);
    }

    #[test]
    fn test_update_docs_and_social_event() {
        let mut session = seeded(21);
        let before = session.records().to_vec();
        session.perform_action(&Target::Team("Tools".into()), ActionKind::UpdateDocs);
        session.perform_action(&Target::Team("Tools".into()), ActionKind::SocialEvent);

        for (old, new) in before.iter().zip(session.records()) {
            if old.team == "Tools" {
                assert_eq!(new.stats.docs, old.stats.docs + 5);
                assert_eq!(new.stats.community, old.stats.community + 5);
                assert_eq!(
                    new.compliance_score,
                    (old.compliance_score + 10).min(MAX_SCORE)
                );
            } else {
                assert_eq!(new, old);
            }
        }
        assert_eq!(session.counters().fikas, 1);
        assert_eq!(session.counters().vulns_fixed, 0);
        assert_eq!(session.counters().hackathons, 0);
        assert_eq!(session.actions_taken(), 2);
    }

    #[test]
    fn test_hackathon_ignores_target() {
        let mut session = seeded(5);
        let before = session.records().to_vec();

        let outcome = session.perform_action(&Target::Team(WSA.into()), ActionKind::Hackathon);

        assert_eq!(outcome.target, Target::AllTeams);
        assert_eq!(outcome.rows_affected, 12);
        for (old, new) in before.iter().zip(session.records()) {
            assert_eq!(new.stats.velocity, old.stats.velocity + 10);
            assert_eq!(new.stats.community, old.stats.community + 10);
            assert_eq!(new.stats.security, old.stats.security);
            assert_eq!(
                new.compliance_score,
                (old.compliance_score + 20).min(MAX_SCORE)
            );
        }
        assert_eq!(session.counters().hackathons, 1);
    }

    #[test]
    fn test_unknown_team_is_noop_on_rows() {
        let mut session = seeded(9);
        let before = session.records().to_vec();
        let total = session.total_score();

        let outcome =
            session.perform_action(&Target::Team("Marketing".into()), ActionKind::UpdateDocs);

        assert_eq!(outcome.rows_affected, 0);
        assert_eq!(session.records(), before.as_slice());
        assert_eq!(session.total_score(), total);
        assert_eq!(session.actions_taken(), 1);
        assert_eq!(session.quest().current, 1);
    }

    #[test]
    fn test_scores_stay_clamped() {
        let mut session = seeded(1);
        let kinds = ActionKind::ALL;
        let teams: Vec<String> = session.roster().team_names().map(String::from).collect();
        for i in 0..60 {
            let target = if i % 5 == 0 {
                Target::AllTeams
            } else {
                Target::Team(teams[i % teams.len()].clone())
            };
            session.perform_action(&target, kinds[i % kinds.len()]);
            assert!(session.records().iter().all(|r| r.compliance_score <= MAX_SCORE));
        }
        assert!(session.records().iter().all(|r| r.compliance_score == MAX_SCORE));
        assert_eq!(session.total_score(), 1200);
        // Side stats are allowed past 100.
        assert!(session.records().iter().any(|r| r.stats.community > 100));
    }

    #[test]
    fn test_quest_completes_exactly_once() {
        let mut session = seeded(2);
        let target = Target::Team("Infrastructure".into());
        let fired: Vec<bool> = (0..6)
            .map(|_| session.perform_action(&target, ActionKind::UpdateDocs).quest_completed)
            .collect();
        assert_eq!(fired, vec![false, false, false, false, true, false]);
        assert_eq!(session.quest().current, 5);
        assert_eq!(session.actions_taken(), 6);
    }

    #[test]
    fn test_status_is_live_after_actions() {
        let mut session = seeded(4);
        for _ in 0..5 {
            session.perform_action(&Target::AllTeams, ActionKind::Hackathon);
        }
        for rec in session.records() {
            assert_eq!(rec.compliance_score, 100);
            assert_eq!(rec.status(), crate::model::Status::Stable);
        }
    }

    #[test]
    fn test_action_outcome_message() {
        let mut session = seeded(6);
        let outcome = session.perform_action(&Target::AllTeams, ActionKind::SocialEvent);
        assert_eq!(outcome.message, ActionKind::SocialEvent.effect_message());
        assert!(!outcome.quest_completed);
    }

    #[test]
    fn test_log_records_actions_and_completion() {
        let setup = SessionSetup {
            quest: Quest {
                goal: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut session = Session::generate(setup, &mut SeededSource::new(1)).unwrap();
        assert_eq!(session.log().len(), 1);
        session.perform_action(&Target::AllTeams, ActionKind::Hackathon);
        let latest: Vec<_> = session.log().recent(2).map(|e| e.message.clone()).collect();
        assert!(latest[0].starts_with("QUEST COMPLETE"));
        assert!(latest[1].starts_with("Hackathon on All teams"));
    }

    #[test]
    fn test_health_and_leaderboard() {
        let session = seeded(10);
        let health = session.health();
        assert_eq!(health.active_repos, 12);
        assert_eq!(health.system_health, session.total_score() / 12);

        let board = session.leaderboard();
        assert_eq!(board.len(), 4);
        assert!(board.windows(2).all(|w| w[0].average_score <= w[1].average_score));
        let infra = board.iter().find(|s| s.team == "Infrastructure").unwrap();
        assert_eq!(infra.repositories, 2);
    }

    #[test]
    fn test_team_stats_reads_first_row() {
        let session = seeded(12);
        let first = session.team_records("Tools").next().unwrap().stats;
        assert_eq!(session.team_stats("Tools"), Some(first));
        assert_eq!(session.team_stats("Nobody"), None);
    }

    #[test]
    fn test_invalid_setup_rejected() {
        let setup = SessionSetup {
            ranges: GenerationRanges {
                security: (90, 40),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            Session::generate(setup, &mut SeededSource::new(0)),
            Err(DashboardError::InvalidRanges(_))
        ));

        let setup = SessionSetup {
            quest: Quest {
                goal: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            Session::generate(setup, &mut SeededSource::new(0)),
            Err(DashboardError::ZeroQuestGoal)
        ));
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = seeded(13);
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["health"]["active_repos"], 12);
        assert_eq!(json["repositories"].as_array().unwrap().len(), 12);
        assert!(json["repositories"][0]["status"].is_string());
        assert_eq!(json["quest"]["goal"], 5);
    }
}
