//! Notice reporting during exam assembly

use colored::Colorize;
use exambank_application::AssemblyNotifier;
use exambank_domain::{QuestionId, QuotaFill, Shortfall};

/// Prints assembly notices to stderr, keeping stdout for results.
pub struct ConsoleAssemblyReporter {
    /// Also report per-quota results, not just warnings.
    verbose: bool,
}

impl ConsoleAssemblyReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn fill_line(fill: &QuotaFill) -> String {
        let mut line = format!(
            "{} {} {}/{}",
            "v".green(),
            fill.quota.label().bold(),
            fill.filled(),
            fill.quota.count
        );
        if fill.preselected > 0 {
            line.push_str(&format!(" ({} picked)", fill.preselected).dimmed().to_string());
        }
        line
    }
}

impl AssemblyNotifier for ConsoleAssemblyReporter {
    fn on_duplicate_pick(&self, question_id: &QuestionId) {
        eprintln!(
            "{} question {} was picked more than once; keeping one",
            "!".yellow(),
            question_id
        );
    }

    fn on_quota_filled(&self, fill: &QuotaFill) {
        if self.verbose {
            eprintln!("  {}", Self::fill_line(fill));
        }
    }

    fn on_quota_short(&self, shortfall: &Shortfall) {
        if self.verbose {
            eprintln!("  {} {}", "x".red(), shortfall);
        }
    }

    fn on_kept_question_missing(&self, question_id: &QuestionId) {
        eprintln!(
            "{} question {} no longer exists and was dropped from the exam",
            "!".yellow(),
            question_id
        );
    }
}
