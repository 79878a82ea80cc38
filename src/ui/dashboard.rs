use console::{Emoji, Term, style};

use crate::model::{MAX_SCORE, RepositoryRecord, Status};
use crate::session::{
    ActionCounters, ActionKind, ActionOutcome, ActivityLog, HealthSummary, Quest, Session,
};
use crate::ui::icons::{
    COFFEE, CRITICAL, FOLDER, HACK, LICENSED, LOG, MEMO, QUEST, RADAR, ROCKET, SHIELD, SPARKLE,
    STABLE, TROPHY, UNLICENSED, WARNING,
};

const BAR_WIDTH: usize = 30;
const RADAR_AXIS_MAX: u32 = 100;

/// Which dashboard panel to render below the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Radar,
    Leaderboard,
    DeepDive,
    All,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Radar, Tab::Leaderboard, Tab::DeepDive, Tab::All];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Radar => "Team Radar",
            Tab::Leaderboard => "Leaderboard",
            Tab::DeepDive => "Deep Dive",
            Tab::All => "Everything",
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "radar" => Ok(Tab::Radar),
            "leaderboard" => Ok(Tab::Leaderboard),
            "deep-dive" | "deepdive" => Ok(Tab::DeepDive),
            "all" => Ok(Tab::All),
            _ => anyhow::bail!(
                "Invalid tab '{}'. Valid values: radar, leaderboard, deep-dive, all",
                s
            ),
        }
    }
}

/// Horizontal bar for `value` out of `max`, `width` cells wide.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    let fraction = if max <= 0.0 {
        0.0
    } else {
        (value / max).clamp(0.0, 1.0)
    };
    let filled = (fraction * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn status_icon(status: Status) -> &'static Emoji<'static, 'static> {
    match status {
        Status::Critical => &CRITICAL,
        Status::Warning => &WARNING,
        Status::Stable => &STABLE,
    }
}

fn action_icon(kind: ActionKind) -> &'static Emoji<'static, 'static> {
    match kind {
        ActionKind::FixVulnerability => &SHIELD,
        ActionKind::UpdateDocs => &MEMO,
        ActionKind::SocialEvent => &COFFEE,
        ActionKind::Hackathon => &HACK,
    }
}

/// Short confirmation shown after an action button is pressed.
pub fn toast_text(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::FixVulnerability => "Security Patch Deployed!",
        ActionKind::UpdateDocs => "Knowledge Base Updated!",
        ActionKind::SocialEvent => "Morale Boosted!",
        ActionKind::Hackathon => "Velocity Maxed Out!",
    }
}

fn section(icon: &Emoji<'_, '_>, title: &str) -> String {
    format!("{}{}", icon, style(title).bold().underlined())
}

pub fn render_hud(health: &HealthSummary) -> Vec<String> {
    let cell = |label: &str, value: String| format!("{} {}", style(label).dim(), value);
    vec![
        format!(
            "{}  {}  {}  {}",
            cell(
                "SYSTEM HEALTH",
                style(format!("{}%", health.system_health))
                    .green()
                    .bold()
                    .to_string()
            ),
            cell(
                "ACTIVE REPOS",
                style(health.active_repos).cyan().bold().to_string()
            ),
            cell(
                "VULNERABILITIES",
                style(health.vulnerabilities).red().bold().to_string()
            ),
            cell(
                "OPS PERFORMED",
                style(health.actions_taken).cyan().bold().to_string()
            ),
        ),
        cell("TOTAL XP", style(health.total_score).yellow().to_string()),
    ]
}

/// Four-axis breakdown for one team. Bars are capped at 100; the raw value is printed.
pub fn render_radar(session: &Session, team: &str) -> Vec<String> {
    let mut lines = vec![section(&RADAR, &format!("Team Capabilities: {}", team))];
    let Some(stats) = session.team_stats(team) else {
        lines.push(format!("  {}", style("No repositories for this team").dim()));
        return lines;
    };
    for (axis, value) in stats.axes() {
        lines.push(format!(
            "  {:<14} {} {}",
            axis,
            style(bar(
                value.min(RADAR_AXIS_MAX) as f64,
                RADAR_AXIS_MAX as f64,
                BAR_WIDTH
            ))
            .cyan(),
            value
        ));
    }
    lines
}

/// Average score per team, best first.
pub fn render_leaderboard(session: &Session) -> Vec<String> {
    let mut lines = vec![section(&TROPHY, "Team Leaderboard")];
    let width = session
        .roster()
        .team_names()
        .map(str::len)
        .max()
        .unwrap_or(0);
    for standing in session.leaderboard().iter().rev() {
        let avg = standing.average_score;
        let rendered = bar(avg, MAX_SCORE as f64, BAR_WIDTH);
        let colored = match Status::from_score(avg as u8) {
            Status::Critical => style(rendered).red(),
            Status::Warning => style(rendered).yellow(),
            Status::Stable => style(rendered).green(),
        };
        lines.push(format!(
            "  {:<width$} {} {:.1}",
            standing.team,
            colored,
            avg,
            width = width
        ));
    }
    lines
}

fn render_repository(record: &RepositoryRecord) -> String {
    let status = record.status();
    let license = if record.has_license {
        &LICENSED
    } else {
        &UNLICENSED
    };
    format!(
        "    {:<40} {}{:<8} license {}  {} {:>3}  {}",
        style(&record.repository).bold(),
        status_icon(status),
        status,
        license,
        bar(record.compliance_score as f64, MAX_SCORE as f64, 20),
        record.compliance_score,
        style(format!("last scan {}", record.last_scan_label())).dim()
    )
}

pub fn render_deep_dive(session: &Session) -> Vec<String> {
    let mut lines = vec![section(&FOLDER, "Repository Deep Dive")];
    for team in session.roster().team_names() {
        lines.push(format!("  {}{}", FOLDER, style(team).yellow().bold()));
        lines.extend(session.team_records(team).map(render_repository));
    }
    lines
}

pub fn render_quest(quest: &Quest) -> Vec<String> {
    let progress = bar(quest.fraction(), 1.0, BAR_WIDTH);
    let progress = if quest.is_complete() {
        style(progress).green()
    } else {
        style(progress).magenta()
    };
    vec![
        section(&QUEST, "Active Quest"),
        format!("  {}", style(&quest.title).bold()),
        format!("  {}", quest.description),
        format!("  {} {}/{}", progress, quest.current, quest.goal),
    ]
}

pub fn render_counters(counters: &ActionCounters) -> String {
    format!(
        "  {}{} fixed  {}{} fikas  {}{} hackathons",
        SHIELD, counters.vulns_fixed, COFFEE, counters.fikas, HACK, counters.hackathons
    )
}

/// The `lines` most recent log entries, newest first.
pub fn render_log(log: &ActivityLog, lines: usize) -> Vec<String> {
    if lines == 0 {
        return Vec::new();
    }
    let mut out = vec![section(&LOG, "Live Log")];
    out.extend(log.recent(lines).map(|entry| {
        format!(
            "  {} {}",
            style(format!("[{}]", entry.at.format("%H:%M:%S"))).dim(),
            entry.message
        )
    }));
    out
}

/// Terminal front-end for a session.
pub struct DashboardUI {
    term: Term,
    log_lines: usize,
}

impl DashboardUI {
    pub fn new(log_lines: usize) -> Self {
        Self {
            term: Term::stdout(),
            log_lines,
        }
    }

    /// Write a line to stdout, falling back to `println!` if the terminal handle fails.
    fn print_line(&self, msg: impl AsRef<str>) {
        if self.term.write_line(msg.as_ref()).is_err() {
            println!("{}", msg.as_ref());
        }
    }

    fn print_lines(&self, lines: impl IntoIterator<Item = String>) {
        for line in lines {
            self.print_line(line);
        }
    }

    pub fn print_separator(&self) {
        self.print_line(format!("{}", style("═".repeat(70)).cyan()));
    }

    pub fn print_title(&self) {
        self.print_line("");
        self.print_line(format!(
            "{}{}",
            ROCKET,
            style("Humlab Mission Control").bold().cyan()
        ));
        self.print_line(format!(
            "{}",
            style("Digital Research Infrastructure Status").italic().dim()
        ));
        self.print_separator();
    }

    /// Render the HUD, the selected tab, the quest tracker and the live log.
    ///
    /// `radar_team` picks the team for the radar panel; the first roster team is
    /// used when it is `None`.
    pub fn show(&self, session: &Session, tab: Tab, radar_team: Option<&str>) {
        self.print_title();
        self.print_lines(render_hud(&session.health()));
        self.print_separator();

        let radar_team = radar_team
            .or_else(|| session.roster().team_names().next())
            .unwrap_or_default();
        if matches!(tab, Tab::Radar | Tab::All) {
            self.print_lines(render_radar(session, radar_team));
            self.print_line("");
        }
        if matches!(tab, Tab::Leaderboard | Tab::All) {
            self.print_lines(render_leaderboard(session));
            self.print_line("");
        }
        if matches!(tab, Tab::DeepDive | Tab::All) {
            self.print_lines(render_deep_dive(session));
            self.print_line("");
        }

        self.show_sidebar(session);
    }

    /// Quest tracker, action tallies and live log.
    pub fn show_sidebar(&self, session: &Session) {
        self.print_lines(render_quest(session.quest()));
        self.print_line(render_counters(session.counters()));
        self.print_line("");
        self.print_lines(render_log(session.log(), self.log_lines));
        self.print_separator();
    }

    pub fn show_hud(&self, session: &Session) {
        self.print_lines(render_hud(&session.health()));
    }

    /// Print the transient notification for an action, plus the quest banner if it fired.
    pub fn toast(&self, outcome: &ActionOutcome) {
        self.print_line(format!(
            "{}{} {}",
            action_icon(outcome.kind),
            style(toast_text(outcome.kind)).green().bold(),
            style(format!("({}, {} repos)", outcome.target, outcome.rows_affected)).dim()
        ));
        self.print_line(format!("  {}", outcome.message));
        if outcome.quest_completed {
            self.quest_complete_banner();
        }
    }

    fn quest_complete_banner(&self) {
        self.print_line("");
        self.print_line(format!(
            "{}{} {}",
            SPARKLE,
            style("QUEST COMPLETE!").yellow().bold(),
            SPARKLE
        ));
        self.print_line("");
    }
}
