//! Record store.
//!
//! The store owns identity: it assigns ids to new patients and entries and is the only code that
//! mutates the patient list. Services receive it as an `Arc<dyn RecordStore>`, so tests and
//! alternative backends can inject their own implementation.

use crate::entry::{Entry, NewEntry};
use crate::error::{PatientError, PatientResult};
use crate::patient::{NewPatient, Patient};
use patientor_uuid::RecordId;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Storage operations available to the services.
pub trait RecordStore: Send + Sync {
    /// Stores a new patient under a fresh id with an empty entry list.
    fn append(&self, patient: NewPatient) -> PatientResult<Patient>;

    /// Appends an entry under a fresh id to the given patient's entries.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::PatientNotFound` if no patient has `patient_id`.
    fn append_entry(&self, patient_id: &RecordId, entry: NewEntry) -> PatientResult<Entry>;

    /// All patients, in insertion order.
    fn list(&self) -> PatientResult<Vec<Patient>>;

    /// The patient with `id`, if any.
    fn get(&self, id: &RecordId) -> PatientResult<Option<Patient>>;
}

/// In-process store backed by a vector behind a single lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    patients: RwLock<Vec<Patient>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `patients` (typically seed data).
    pub fn with_patients(patients: Vec<Patient>) -> Self {
        Self {
            patients: RwLock::new(patients),
        }
    }

    fn read(&self) -> PatientResult<RwLockReadGuard<'_, Vec<Patient>>> {
        self.patients
            .read()
            .map_err(|_| PatientError::StoreUnavailable)
    }

    fn write(&self) -> PatientResult<RwLockWriteGuard<'_, Vec<Patient>>> {
        self.patients
            .write()
            .map_err(|_| PatientError::StoreUnavailable)
    }
}

impl RecordStore for InMemoryStore {
    fn append(&self, patient: NewPatient) -> PatientResult<Patient> {
        let patient = patient.into_patient(RecordId::new());
        self.write()?.push(patient.clone());
        Ok(patient)
    }

    fn append_entry(&self, patient_id: &RecordId, entry: NewEntry) -> PatientResult<Entry> {
        let mut patients = self.write()?;
        let patient = patients
            .iter_mut()
            .find(|p| p.id == *patient_id)
            .ok_or_else(|| PatientError::PatientNotFound(patient_id.to_string()))?;

        let entry = entry.into_entry(RecordId::new());
        patient.entries.push(entry.clone());
        Ok(entry)
    }

    fn list(&self) -> PatientResult<Vec<Patient>> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: &RecordId) -> PatientResult<Option<Patient>> {
        Ok(self.read()?.iter().find(|p| p.id == *id).cloned())
    }
}
