//! Synthetic repository data.
//!
//! [`generate`] walks the roster once and draws every random attribute through a
//! [`StatSource`], so tests can swap the RNG for a scripted or seeded source.
//!
//! Draw order is fixed: per team the four baseline stats (security, docs,
//! velocity, community), then per repository the license flag, the
//! vulnerability count and the days since the last scan.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{RepositoryRecord, TeamStats, initial_score};
use crate::roster::Roster;

/// Source of the random draws used by [`generate`].
pub trait StatSource {
    /// Uniform integer in `min..=max`.
    fn draw(&mut self, min: u32, max: u32) -> u32;

    /// `true` with probability `numerator / denominator`.
    fn chance(&mut self, numerator: u32, denominator: u32) -> bool;
}

/// ChaCha8-backed source; identical seeds give identical sessions.
pub struct SeededSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy. The chosen seed is kept so it can be reported.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl StatSource for SeededSource {
    fn draw(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }

    fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        self.rng.gen_ratio(numerator, denominator)
    }
}

/// Inclusive `[min, max]` range, written as a two-element array in TOML.
pub type Span = (u32, u32);

/// The ranges every random attribute is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRanges {
    #[serde(default = "default_security")]
    pub security: Span,
    #[serde(default = "default_docs")]
    pub docs: Span,
    #[serde(default = "default_velocity")]
    pub velocity: Span,
    #[serde(default = "default_community")]
    pub community: Span,
    #[serde(default = "default_vulnerabilities")]
    pub vulnerabilities: Span,
    #[serde(default = "default_last_scan_days")]
    pub last_scan_days: Span,
    /// Odds of a repository carrying a license, as `(numerator, denominator)`.
    #[serde(default = "default_license_odds")]
    pub license_odds: Span,
}

fn default_security() -> Span {
    (40, 90)
}

fn default_docs() -> Span {
    (30, 95)
}

fn default_velocity() -> Span {
    (20, 100)
}

fn default_community() -> Span {
    (10, 80)
}

fn default_vulnerabilities() -> Span {
    (0, 5)
}

fn default_last_scan_days() -> Span {
    (1, 200)
}

fn default_license_odds() -> Span {
    (3, 4)
}

impl Default for GenerationRanges {
    fn default() -> Self {
        Self {
            security: default_security(),
            docs: default_docs(),
            velocity: default_velocity(),
            community: default_community(),
            vulnerabilities: default_vulnerabilities(),
            last_scan_days: default_last_scan_days(),
            license_odds: default_license_odds(),
        }
    }
}

impl GenerationRanges {
    /// Human-readable problems with the ranges. Empty means usable.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let spans = [
            ("security", self.security),
            ("docs", self.docs),
            ("velocity", self.velocity),
            ("community", self.community),
            ("vulnerabilities", self.vulnerabilities),
            ("last_scan_days", self.last_scan_days),
        ];
        for (name, (min, max)) in spans {
            if min > max {
                warnings.push(format!(
                    "Invalid range for {}: min {} is greater than max {}",
                    name, min, max
                ));
            }
        }
        let (num, den) = self.license_odds;
        if den == 0 || num > den {
            warnings.push(format!(
                "Invalid license_odds {}/{}: need numerator <= denominator and denominator > 0",
                num, den
            ));
        }
        warnings
    }
}

fn draw_span(source: &mut impl StatSource, (min, max): Span) -> u32 {
    source.draw(min, max)
}

/// Produce one record per repository in `roster`.
///
/// `ranges` must have passed [`GenerationRanges::validate`].
pub fn generate(
    roster: &Roster,
    ranges: &GenerationRanges,
    source: &mut impl StatSource,
) -> Vec<RepositoryRecord> {
    let mut records = Vec::with_capacity(roster.repository_count());

    for team in roster.teams() {
        let stats = TeamStats {
            security: draw_span(source, ranges.security),
            docs: draw_span(source, ranges.docs),
            velocity: draw_span(source, ranges.velocity),
            community: draw_span(source, ranges.community),
        };
        debug!(team = %team.name, ?stats, "drew team baseline");

        for repo in &team.repositories {
            let (num, den) = ranges.license_odds;
            let has_license = source.chance(num, den);
            let vulnerabilities = draw_span(source, ranges.vulnerabilities);
            let last_scan_days = draw_span(source, ranges.last_scan_days);
            let compliance_score = initial_score(&stats, vulnerabilities, has_license);

            records.push(RepositoryRecord {
                team: team.name.clone(),
                repository: repo.clone(),
                compliance_score,
                vulnerabilities,
                has_license,
                last_scan_days,
                stats,
            });
        }
    }

    debug!(records = records.len(), "generated repository records");
    records
}
