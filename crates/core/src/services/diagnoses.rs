use crate::diagnoses::{Diagnosis, DiagnosisRegistry};
use std::sync::Arc;

/// Read-only access to the diagnosis reference data.
#[derive(Clone, Debug)]
pub struct DiagnosisService {
    registry: Arc<DiagnosisRegistry>,
}

impl DiagnosisService {
    pub fn new(registry: Arc<DiagnosisRegistry>) -> Self {
        Self { registry }
    }

    pub fn list(&self) -> Vec<Diagnosis> {
        self.registry.list().to_vec()
    }
}
