//! Services orchestrating parsers, the record store and the diagnosis registry.
//!
//! **No API concerns**: HTTP routing and response shapes belong in `api-rest`.

pub mod diagnoses;
pub mod patients;

pub use diagnoses::DiagnosisService;
pub use patients::PatientService;

use crate::config::CoreConfig;
use crate::diagnoses::DiagnosisRegistry;
use crate::error::PatientResult;
use crate::seed::load_seed;
use crate::store::{InMemoryStore, RecordStore};
use std::sync::Arc;

/// Every service a front end needs, wired to one shared store.
#[derive(Clone)]
pub struct Services {
    pub patients: PatientService,
    pub diagnoses: DiagnosisService,
}

impl Services {
    /// Load seed data per `cfg` and build services over a fresh in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if the seed data cannot be loaded.
    pub fn from_config(cfg: Arc<CoreConfig>) -> PatientResult<Self> {
        let seed = load_seed(&cfg)?;
        let store: Arc<dyn RecordStore> = Arc::new(InMemoryStore::with_patients(seed.patients));
        let registry = Arc::new(DiagnosisRegistry::new(seed.diagnoses));
        Ok(Self::new(cfg, store, registry))
    }

    pub fn new(
        cfg: Arc<CoreConfig>,
        store: Arc<dyn RecordStore>,
        registry: Arc<DiagnosisRegistry>,
    ) -> Self {
        Self {
            patients: PatientService::new(cfg, store, registry.clone()),
            diagnoses: DiagnosisService::new(registry),
        }
    }
}
