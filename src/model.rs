//! Repository records and the values derived from them.

use serde::{Deserialize, Serialize};

/// Score below which a repository is `Critical`.
pub const CRITICAL_BELOW: u8 = 50;
/// Score below which a repository is `Warning` (and at or above `CRITICAL_BELOW`).
pub const WARNING_BELOW: u8 = 80;
/// Upper bound of the compliance score.
pub const MAX_SCORE: u8 = 100;

/// Health label of a repository, always derived from its current score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Critical,
    Warning,
    Stable,
}

impl Status {
    /// Derive the status for a compliance score.
    pub fn from_score(score: u8) -> Self {
        if score < CRITICAL_BELOW {
            Status::Critical
        } else if score < WARNING_BELOW {
            Status::Warning
        } else {
            Status::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Critical => "Critical",
            Status::Warning => "Warning",
            Status::Stable => "Stable",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// The four radar axes of a team.
///
/// Every repository row carries a copy of its team's baseline. Values are not
/// clamped; actions may push them past 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamStats {
    pub security: u32,
    pub docs: u32,
    pub velocity: u32,
    pub community: u32,
}

impl TeamStats {
    /// Axis labels paired with values, in display order.
    pub fn axes(&self) -> [(&'static str, u32); 4] {
        [
            ("Security", self.security),
            ("Documentation", self.docs),
            ("Velocity", self.velocity),
            ("Community", self.community),
        ]
    }
}

/// One synthetic repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub team: String,
    pub repository: String,
    pub compliance_score: u8,
    pub vulnerabilities: u32,
    pub has_license: bool,
    pub last_scan_days: u32,
    pub stats: TeamStats,
}

impl RepositoryRecord {
    /// Current status, recomputed from the live score.
    pub fn status(&self) -> Status {
        Status::from_score(self.compliance_score)
    }

    /// Raise the score by `delta`, saturating at `MAX_SCORE`.
    pub fn boost(&mut self, delta: u8) {
        self.compliance_score = self.compliance_score.saturating_add(delta).min(MAX_SCORE);
    }

    pub fn last_scan_label(&self) -> String {
        format!("{}d ago", self.last_scan_days)
    }
}

/// Initial compliance score for a repository.
///
/// The mean of security and documentation, minus 5 per vulnerability and 20
/// more when unlicensed, clamped to `[0, 100]` and truncated.
pub fn initial_score(stats: &TeamStats, vulnerabilities: u32, has_license: bool) -> u8 {
    let base = (stats.security as f64 + stats.docs as f64) / 2.0;
    let mut score = base - 5.0 * vulnerabilities as f64;
    if !has_license {
        score -= 20.0;
    }
    score.clamp(0.0, MAX_SCORE as f64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: u8) -> RepositoryRecord {
        RepositoryRecord {
            team: "Tools".to_string(),
            repository: "excel-translator".to_string(),
            compliance_score: score,
            vulnerabilities: 0,
            has_license: true,
            last_scan_days: 12,
            stats: TeamStats::default(),
        }
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(Status::from_score(45), Status::Critical);
        assert_eq!(Status::from_score(65), Status::Warning);
        assert_eq!(Status::from_score(85), Status::Stable);
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(Status::from_score(0), Status::Critical);
        assert_eq!(Status::from_score(49), Status::Critical);
        assert_eq!(Status::from_score(50), Status::Warning);
        assert_eq!(Status::from_score(79), Status::Warning);
        assert_eq!(Status::from_score(80), Status::Stable);
        assert_eq!(Status::from_score(100), Status::Stable);
    }

    #[test]
    fn test_status_follows_score_after_boost() {
        let mut rec = record(65);
        assert_eq!(rec.status(), Status::Warning);
        rec.boost(30);
        assert_eq!(rec.compliance_score, 95);
        assert_eq!(rec.status(), Status::Stable);
    }

    #[test]
    fn test_boost_saturates_at_max() {
        let mut rec = record(95);
        rec.boost(20);
        assert_eq!(rec.compliance_score, 100);
        rec.boost(u8::MAX);
        assert_eq!(rec.compliance_score, 100);
    }

    #[test]
    fn test_initial_score_truncates_half_points() {
        let stats = TeamStats {
            security: 71,
            docs: 60,
            ..Default::default()
        };
        // (71 + 60) / 2 = 65.5, minus 2 * 5
        assert_eq!(initial_score(&stats, 2, true), 55);
    }

    #[test]
    fn test_initial_score_license_penalty() {
        let stats = TeamStats {
            security: 80,
            docs: 80,
            ..Default::default()
        };
        assert_eq!(initial_score(&stats, 0, true), 80);
        assert_eq!(initial_score(&stats, 0, false), 60);
    }

    #[test]
    fn test_initial_score_clamps_to_zero() {
        let stats = TeamStats {
            security: 40,
            docs: 30,
            ..Default::default()
        };
        // 35 - 25 - 20 = -10
        assert_eq!(initial_score(&stats, 5, false), 0);
    }

    #[test]
    fn test_last_scan_label() {
        assert_eq!(record(50).last_scan_label(), "12d ago");
    }
}
