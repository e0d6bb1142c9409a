//! Subject catalog use case
//!
//! Create, rename, list and delete subjects.

use crate::config::CatalogPolicy;
use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::record_store::{RecordStore, StoreError};
use crate::use_cases::shared::find_subject;
use exambank_domain::{DomainError, Subject, SubjectId};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while managing subjects
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Subject not found: {0}")]
    UnknownSubject(SubjectId),

    #[error("A subject named '{0}' already exists")]
    DuplicateName(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Input for creating a subject
#[derive(Debug, Clone, Default)]
pub struct NewSubject {
    pub name: String,
    pub credits: u32,
    pub knowledge_domains: Vec<String>,
}

/// Fields to change on an existing subject; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct SubjectChanges {
    pub name: Option<String>,
    pub credits: Option<u32>,
    pub knowledge_domains: Option<Vec<String>>,
}

/// Use case for managing subjects
pub struct SubjectCatalogUseCase {
    subjects: Arc<dyn RecordStore<Subject>>,
    policy: CatalogPolicy,
    activity: Arc<dyn ActivityLogger>,
}

impl SubjectCatalogUseCase {
    pub fn new(subjects: Arc<dyn RecordStore<Subject>>) -> Self {
        Self {
            subjects,
            policy: CatalogPolicy::default(),
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_policy(mut self, policy: CatalogPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_activity_logger(mut self, activity: Arc<dyn ActivityLogger>) -> Self {
        self.activity = activity;
        self
    }

    pub fn list(&self) -> Result<Vec<Subject>, CatalogError> {
        Ok(self.subjects.list()?)
    }

    pub fn get(&self, id: &SubjectId) -> Result<Subject, CatalogError> {
        find_subject(self.subjects.as_ref(), id)?
            .ok_or_else(|| CatalogError::UnknownSubject(id.clone()))
    }

    /// Create a subject. Names must be unique across the catalog.
    pub fn create(&self, input: NewSubject) -> Result<Subject, CatalogError> {
        let subject = Subject::new(input.name, input.credits, input.knowledge_domains)?;
        self.ensure_name_free(&subject.name, None)?;

        self.subjects.save(subject.clone())?;
        info!("Created subject {} ({})", subject.name, subject.id);
        self.log("subject_saved", &subject);
        Ok(subject)
    }

    /// Apply `changes` to an existing subject.
    ///
    /// Name uniqueness is only checked here when
    /// [`CatalogPolicy::unique_names_on_edit`] is set.
    pub fn update(
        &self,
        id: &SubjectId,
        changes: SubjectChanges,
    ) -> Result<Subject, CatalogError> {
        let mut subject = self.get(id)?;

        if let Some(name) = changes.name {
            subject.rename(name)?;
            if self.policy.unique_names_on_edit {
                self.ensure_name_free(&subject.name, Some(id))?;
            }
        }
        if let Some(credits) = changes.credits {
            subject.credits = credits;
        }
        if let Some(domains) = changes.knowledge_domains {
            subject.set_knowledge_domains(domains);
        }

        self.subjects.save(subject.clone())?;
        info!("Updated subject {}", subject.id);
        self.log("subject_saved", &subject);
        Ok(subject)
    }

    /// Delete a subject. Its questions and exams are left untouched.
    pub fn delete(&self, id: &SubjectId) -> Result<(), CatalogError> {
        if !self.subjects.delete(id.as_str())? {
            return Err(CatalogError::UnknownSubject(id.clone()));
        }
        info!("Deleted subject {}", id);
        self.activity.log(ActivityEvent::new(
            "subject_deleted",
            serde_json::json!({ "id": id.as_str() }),
        ));
        Ok(())
    }

    fn ensure_name_free(&self, name: &str, except: Option<&SubjectId>) -> Result<(), CatalogError> {
        let taken = self
            .subjects
            .list()?
            .iter()
            .any(|s| s.has_name(name) && Some(&s.id) != except);
        if taken {
            return Err(CatalogError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn log(&self, event_type: &'static str, subject: &Subject) {
        self.activity.log(ActivityEvent::new(
            event_type,
            serde_json::json!({ "id": subject.id.as_str(), "name": subject.name }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::record_store::InMemoryStore;

    fn catalog() -> SubjectCatalogUseCase {
        SubjectCatalogUseCase::new(Arc::new(InMemoryStore::<Subject>::new()))
    }

    fn new_subject(name: &str) -> NewSubject {
        NewSubject {
            name: name.to_string(),
            credits: 3,
            knowledge_domains: vec!["Core".to_string()],
        }
    }

    #[test]
    fn test_create_and_get() {
        let catalog = catalog();
        let created = catalog.create(new_subject("Math")).unwrap();
        assert_eq!(catalog.get(&created.id).unwrap(), created);
        assert_eq!(catalog.list().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_name_on_create() {
        let catalog = catalog();
        catalog.create(new_subject("Math")).unwrap();
        let err = catalog.create(new_subject(" Math ")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName(name) if name == "Math"));
    }

    #[test]
    fn test_invalid_name() {
        let err = catalog().create(new_subject("Math!")).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(DomainError::InvalidSubject(_))));
    }

    #[test]
    fn test_rename_to_taken_name_allowed_by_default() {
        let catalog = catalog();
        catalog.create(new_subject("Math")).unwrap();
        let art = catalog.create(new_subject("Art")).unwrap();

        let changes = SubjectChanges {
            name: Some("Math".to_string()),
            ..Default::default()
        };
        let renamed = catalog.update(&art.id, changes).unwrap();
        assert_eq!(renamed.name, "Math");
    }

    #[test]
    fn test_rename_to_taken_name_rejected_by_policy() {
        let catalog = catalog().with_policy(CatalogPolicy {
            unique_names_on_edit: true,
        });
        catalog.create(new_subject("Math")).unwrap();
        let art = catalog.create(new_subject("Art")).unwrap();

        let err = catalog
            .update(
                &art.id,
                SubjectChanges {
                    name: Some("Math".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName(_)));

        // Keeping its own name is not a conflict.
        let same = SubjectChanges {
            name: Some("Art".to_string()),
            credits: Some(5),
            ..Default::default()
        };
        assert_eq!(catalog.update(&art.id, same).unwrap().credits, 5);
    }

    #[test]
    fn test_unknown_subject() {
        let catalog = catalog();
        let id = SubjectId::new("subj_missing");
        assert!(matches!(catalog.get(&id), Err(CatalogError::UnknownSubject(_))));
        assert!(matches!(catalog.delete(&id), Err(CatalogError::UnknownSubject(_))));
        assert!(matches!(
            catalog.update(&id, SubjectChanges::default()),
            Err(CatalogError::UnknownSubject(_))
        ));
    }

    #[test]
    fn test_delete() {
        let catalog = catalog();
        let s = catalog.create(new_subject("Math")).unwrap();
        catalog.delete(&s.id).unwrap();
        assert!(catalog.list().unwrap().is_empty());
    }
}
