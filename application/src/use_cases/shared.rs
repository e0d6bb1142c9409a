//! Lookups shared by several use cases.

use crate::ports::record_store::{RecordStore, StoreResult};
use exambank_domain::{Subject, SubjectId};

/// Fetch a subject, `None` when the id is unknown.
pub(crate) fn find_subject(
    subjects: &dyn RecordStore<Subject>,
    id: &SubjectId,
) -> StoreResult<Option<Subject>> {
    subjects.get(id.as_str())
}
