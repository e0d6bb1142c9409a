//! Use case policies.

use exambank_domain::AssemblyOptions;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Exam generation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamPolicy {
    /// Reject hand-picked questions from another subject.
    pub strict_preselection: bool,
    /// Fixed RNG seed. Every generation with the same pool then draws the
    /// same questions.
    pub seed: Option<u64>,
}

impl Default for ExamPolicy {
    fn default() -> Self {
        Self {
            strict_preselection: true,
            seed: None,
        }
    }
}

impl ExamPolicy {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_strict_preselection(mut self, strict: bool) -> Self {
        self.strict_preselection = strict;
        self
    }

    pub fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions {
            strict_preselection: self.strict_preselection,
        }
    }

    /// RNG for one generation run.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Subject catalog policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogPolicy {
    /// Also enforce unique names when renaming. Creation always does.
    pub unique_names_on_edit: bool,
}
