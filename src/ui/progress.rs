use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::session::Session;
use crate::ui::icons::SPARKLE;

/// Start-of-session "scan" bar, rendered via `indicatif` on stderr.
///
/// One tick per repository record; the bar is hidden when stderr is not a
/// terminal.
pub struct ScanProgress {
    bar: ProgressBar,
}

impl ScanProgress {
    pub fn new(total_repositories: u64) -> Self {
        let scan_style = ProgressStyle::default_bar()
            .template("{prefix:.bold.dim} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is a valid static string")
            .progress_chars("█▓▒░");

        let bar =
            ProgressBar::with_draw_target(Some(total_repositories), ProgressDrawTarget::stderr());
        bar.set_style(scan_style);
        bar.set_prefix("Scanning");

        Self { bar }
    }

    /// Walk the session's records, ticking once per repository.
    pub fn run(&self, session: &Session) {
        for record in session.records() {
            self.bar.set_message(format!(
                "{} {}",
                style(&record.team).dim(),
                style(&record.repository).yellow()
            ));
            self.bar.inc(1);
        }
        self.bar.finish_with_message(format!(
            "{}{} repositories online",
            SPARKLE,
            style(session.records().len()).green().bold()
        ));
    }
}
