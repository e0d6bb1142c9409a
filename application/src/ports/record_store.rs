//! Record store port
//!
//! Defines how use cases read and replace whole records in a named
//! collection. Adapters decide where the collection lives; the in-memory
//! [`InMemoryStore`] here backs tests and throwaway sessions.

use exambank_domain::{ExamRecord, MonthlyGoal, Question, StudySession, Subject};
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur while reading or writing a collection
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt '{collection}' collection: {message}")]
    Corrupt {
        collection: &'static str,
        message: String,
    },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A record that lives in a keyed collection.
pub trait StoredRecord: Clone + Send + Sync + 'static {
    /// Storage key of the collection (`subjects`, `questions`, `exams`, ...).
    const COLLECTION: &'static str;

    /// Unique id of this record within its collection.
    fn record_id(&self) -> &str;
}

impl StoredRecord for Subject {
    const COLLECTION: &'static str = "subjects";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl StoredRecord for Question {
    const COLLECTION: &'static str = "questions";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl StoredRecord for ExamRecord {
    const COLLECTION: &'static str = "exams";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl StoredRecord for StudySession {
    const COLLECTION: &'static str = "sessions";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Goals are keyed by their subject.
impl StoredRecord for MonthlyGoal {
    const COLLECTION: &'static str = "goals";

    fn record_id(&self) -> &str {
        self.subject_id.as_str()
    }
}

/// Store for one collection of records
///
/// Every mutation replaces whole records; there are no partial updates.
pub trait RecordStore<R: StoredRecord>: Send + Sync {
    /// Snapshot of the whole collection, in insertion order.
    fn list(&self) -> StoreResult<Vec<R>>;

    /// Look up a single record by id.
    fn get(&self, id: &str) -> StoreResult<Option<R>> {
        Ok(self.list()?.into_iter().find(|r| r.record_id() == id))
    }

    /// Insert the record, or replace the one with the same id in place.
    fn save(&self, record: R) -> StoreResult<()>;

    /// Remove by id; returns whether a record was removed.
    fn delete(&self, id: &str) -> StoreResult<bool>;
}

/// Replace-or-append by id, shared by store adapters.
pub fn upsert<R: StoredRecord>(records: &mut Vec<R>, record: R) {
    match records
        .iter_mut()
        .find(|r| r.record_id() == record.record_id())
    {
        Some(slot) => *slot = record,
        None => records.push(record),
    }
}

/// Remove by id, shared by store adapters. Returns whether anything went.
pub fn remove<R: StoredRecord>(records: &mut Vec<R>, id: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.record_id() != id);
    records.len() != before
}

/// Volatile store backed by a `Vec`.
#[derive(Debug)]
pub struct InMemoryStore<R> {
    records: Mutex<Vec<R>>,
}

impl<R> InMemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: StoredRecord> RecordStore<R> for InMemoryStore<R> {
    fn list(&self) -> StoreResult<Vec<R>> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }

    fn save(&self, record: R) -> StoreResult<()> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        upsert(&mut records, record);
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(remove(&mut records, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exambank_domain::{Difficulty, DifficultyQuota, ExamId, QuestionId, SubjectId};

    fn subject(id: &str, name: &str) -> Subject {
        Subject {
            id: SubjectId::new(id),
            name: name.to_string(),
            credits: 3,
            knowledge_domains: vec![],
        }
    }

    #[test]
    fn test_save_then_list_contains_record() {
        let store = InMemoryStore::new();
        let exam = ExamRecord {
            id: ExamId::new("exam_1"),
            subject_id: SubjectId::new("s"),
            name: "Final".to_string(),
            question_distribution: vec![DifficultyQuota::new(Difficulty::Easy, 1)],
            questions: vec![Question {
                id: QuestionId::new("q"),
                subject_id: SubjectId::new("s"),
                content: "c".to_string(),
                answer: "a".to_string(),
                difficulty: Difficulty::Easy,
                knowledge_domain: String::new(),
            }],
        };
        store.save(exam.clone()).unwrap();
        assert!(store.list().unwrap().contains(&exam));
    }

    #[test]
    fn test_save_replaces_in_place() {
        let store = InMemoryStore::with_records(vec![subject("a", "Math"), subject("b", "Art")]);
        store.save(subject("a", "Algebra")).unwrap();

        let names: Vec<_> = store.list().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Algebra", "Art"]);
    }

    #[test]
    fn test_get_and_delete() {
        let store = InMemoryStore::with_records(vec![subject("a", "Math")]);
        assert_eq!(store.get("a").unwrap().unwrap().name, "Math");
        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn test_collection_keys() {
        assert_eq!(<Subject as StoredRecord>::COLLECTION, "subjects");
        assert_eq!(<Question as StoredRecord>::COLLECTION, "questions");
        assert_eq!(<ExamRecord as StoredRecord>::COLLECTION, "exams");
        assert_eq!(<StudySession as StoredRecord>::COLLECTION, "sessions");
        assert_eq!(<MonthlyGoal as StoredRecord>::COLLECTION, "goals");
    }

    #[test]
    fn test_goals_upsert_by_subject() {
        let store = InMemoryStore::new();
        store
            .save(MonthlyGoal::new(SubjectId::new("math"), 10, 0).unwrap())
            .unwrap();
        store
            .save(MonthlyGoal::new(SubjectId::new("math"), 12, 4).unwrap())
            .unwrap();

        let goals = store.list().unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].target, 12);
    }
}
