//! Diagnosis reference data.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A diagnosis code with its name and optional Latin name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Diagnosis {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}

/// Immutable, seeded list of diagnoses.
#[derive(Clone, Debug, Default)]
pub struct DiagnosisRegistry {
    diagnoses: Vec<Diagnosis>,
}

impl DiagnosisRegistry {
    pub fn new(diagnoses: Vec<Diagnosis>) -> Self {
        Self { diagnoses }
    }

    pub fn list(&self) -> &[Diagnosis] {
        &self.diagnoses
    }

    pub fn find(&self, code: &str) -> Option<&Diagnosis> {
        self.diagnoses.iter().find(|d| d.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.find(code).is_some()
    }
}
