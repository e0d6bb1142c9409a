//! Difficulty quota value object

use crate::core::error::DomainError;
use crate::question::difficulty::Difficulty;
use crate::question::entities::Question;
use serde::{Deserialize, Serialize};

/// A requested number of questions of one difficulty tier, optionally
/// restricted to a knowledge domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyQuota {
    pub difficulty: Difficulty,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_domain: Option<String>,
}

impl DifficultyQuota {
    pub fn new(difficulty: Difficulty, count: usize) -> Self {
        Self {
            difficulty,
            count,
            knowledge_domain: None,
        }
    }

    /// Restrict the quota to a knowledge domain. A blank domain clears it.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        let domain = domain.trim();
        self.knowledge_domain = (!domain.is_empty()).then(|| domain.to_string());
        self
    }

    /// Whether `question` can fill this quota (subject is not checked here).
    pub fn accepts(&self, question: &Question) -> bool {
        question.difficulty == self.difficulty
            && self
                .knowledge_domain
                .as_deref()
                .is_none_or(|d| question.knowledge_domain == d)
    }

    /// Short label such as `Medium` or `Medium [Graphs]`.
    pub fn label(&self) -> String {
        match &self.knowledge_domain {
            Some(domain) => format!("{} [{}]", self.difficulty, domain),
            None => self.difficulty.to_string(),
        }
    }
}

/// Sum of requested counts across a distribution, saturating at `usize::MAX`.
pub fn total_requested(quotas: &[DifficultyQuota]) -> usize {
    quotas
        .iter()
        .fold(0usize, |total, q| total.saturating_add(q.count))
}

impl std::str::FromStr for DifficultyQuota {
    type Err = DomainError;

    /// Parses `DIFFICULTY:COUNT` or `DIFFICULTY:COUNT:DOMAIN`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(difficulty), Some(count)) = (parts.next(), parts.next()) else {
            return Err(DomainError::InvalidQuota(format!(
                "'{}' should look like DIFFICULTY:COUNT[:DOMAIN]",
                s
            )));
        };
        let difficulty: Difficulty = difficulty.parse()?;
        let count: usize = count.trim().parse().map_err(|_| {
            DomainError::InvalidQuota(format!("'{}' is not a non-negative count", count.trim()))
        })?;
        let quota = Self::new(difficulty, count);
        Ok(match parts.next() {
            Some(domain) => quota.with_domain(domain),
            None => quota,
        })
    }
}

impl std::fmt::Display for DifficultyQuota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{}", self.label(), self.count)
    }
}
