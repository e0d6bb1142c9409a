//! Assembly notification port
//!
//! Defines the interface for reporting what happened while an exam was
//! being assembled: informational notices that are not errors.

use exambank_domain::{QuestionId, QuotaFill, Shortfall};

/// Callback for notices during exam generation
///
/// Implementations live in the presentation layer and can display
/// notices in various ways (console, JSON log, etc.)
pub trait AssemblyNotifier: Send + Sync {
    /// A question id was picked more than once; the repeat was ignored.
    fn on_duplicate_pick(&self, question_id: &QuestionId);

    /// A quota was filled completely.
    fn on_quota_filled(&self, fill: &QuotaFill);

    /// A quota came up short. Generation fails afterwards.
    fn on_quota_short(&self, shortfall: &Shortfall);

    /// A kept question no longer exists in the bank and was dropped.
    fn on_kept_question_missing(&self, _question_id: &QuestionId) {}
}

/// No-op notifier for when notices are not needed
pub struct NoAssemblyProgress;

impl AssemblyNotifier for NoAssemblyProgress {
    fn on_duplicate_pick(&self, _question_id: &QuestionId) {}
    fn on_quota_filled(&self, _fill: &QuotaFill) {}
    fn on_quota_short(&self, _shortfall: &Shortfall) {}
}
