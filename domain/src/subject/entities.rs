//! Subject entity

use crate::core::error::DomainError;
use crate::core::ids::SubjectId;
use serde::{Deserialize, Serialize};

/// A subject with its credit weight and the knowledge domains its
/// questions are grouped into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub credits: u32,
    #[serde(default)]
    pub knowledge_domains: Vec<String>,
}

impl Subject {
    /// Create a subject with a freshly generated id.
    pub fn new(
        name: impl Into<String>,
        credits: u32,
        knowledge_domains: Vec<String>,
    ) -> Result<Self, DomainError> {
        let name = Self::normalize_name(name.into())?;
        Ok(Self {
            id: SubjectId::generate(),
            name,
            credits,
            knowledge_domains: normalize_domains(knowledge_domains),
        })
    }

    /// Validate and trim a subject name.
    ///
    /// Names must be non-blank and contain only letters, digits and whitespace.
    pub fn normalize_name(name: String) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidSubject(
                "name cannot be empty".to_string(),
            ));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_alphanumeric() || c.is_whitespace()))
        {
            return Err(DomainError::InvalidSubject(format!(
                "name may only contain letters, digits and spaces (found '{}')",
                bad
            )));
        }
        Ok(trimmed.to_string())
    }

    /// Rename the subject, validating the new name.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        self.name = Self::normalize_name(name.into())?;
        Ok(())
    }

    /// Replace the knowledge domain list.
    pub fn set_knowledge_domains(&mut self, domains: Vec<String>) {
        self.knowledge_domains = normalize_domains(domains);
    }

    /// Whether `name` refers to this subject (exact match after trimming).
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name.trim()
    }

    pub fn has_domain(&self, domain: &str) -> bool {
        self.knowledge_domains.iter().any(|d| d == domain)
    }
}

/// Trim, drop blanks and de-duplicate while keeping first-seen order.
fn normalize_domains(domains: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(domains.len());
    for d in domains {
        let d = d.trim();
        if !d.is_empty() && !out.iter().any(|existing| existing == d) {
            out.push(d.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_creation() {
        let s = Subject::new("  Toán cao cấp ", 3, vec!["Đại số".into()]).unwrap();
        assert_eq!(s.name, "Toán cao cấp");
        assert_eq!(s.credits, 3);
        assert!(s.id.as_str().starts_with("subj_"));
        assert!(s.has_domain("Đại số"));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Subject::new("", 1, vec![]).is_err());
        assert!(Subject::new("   ", 1, vec![]).is_err());
    }

    #[test]
    fn test_punctuation_rejected() {
        let err = Subject::new("C++", 2, vec![]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidSubject(_)));
        assert!(err.to_string().contains("'+'"));
    }

    #[test]
    fn test_domains_are_normalized() {
        let s = Subject::new(
            "Physics",
            4,
            vec![" Optics ".into(), "".into(), "Optics".into(), "Mechanics".into()],
        )
        .unwrap();
        assert_eq!(s.knowledge_domains, vec!["Optics", "Mechanics"]);
    }

    #[test]
    fn test_has_name_trims_input() {
        let s = Subject::new("History", 2, vec![]).unwrap();
        assert!(s.has_name(" History "));
        assert!(!s.has_name("history"));
    }

    #[test]
    fn test_deserialize_stored_document() {
        let json = r#"{"id":"subj_1","name":"Văn","credits":2,"knowledgeDomains":["Thơ"]}"#;
        let s: Subject = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, SubjectId::new("subj_1"));
        assert_eq!(s.knowledge_domains, vec!["Thơ"]);
    }
}
