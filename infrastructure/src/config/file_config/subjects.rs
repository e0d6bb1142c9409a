//! Subject catalog configuration from TOML (`[subjects]` section)

use exambank_application::CatalogPolicy;
use serde::{Deserialize, Serialize};

/// Raw subject catalog configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSubjectsConfig {
    /// Also require unique names when a subject is renamed
    pub unique_names_on_edit: bool,
}

impl FileSubjectsConfig {
    pub fn to_policy(&self) -> CatalogPolicy {
        CatalogPolicy {
            unique_names_on_edit: self.unique_names_on_edit,
        }
    }
}
