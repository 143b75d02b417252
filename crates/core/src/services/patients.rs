//! Patient service.
//!
//! Pure patient data operations: it runs the parsers over client payloads and hands the typed
//! result to the record store. Logging happens here so every front end gets the same audit
//! trail. National ids are never logged.

use crate::config::CoreConfig;
use crate::diagnoses::DiagnosisRegistry;
use crate::entry::{Entry, NewEntry};
use crate::error::{PatientError, PatientResult, ValidationError};
use crate::parse::{parse_new_entry, parse_new_patient};
use crate::patient::{NonSensitivePatient, Patient};
use crate::store::RecordStore;
use patientor_uuid::RecordId;
use serde_json::Value;
use std::sync::Arc;

/// Patient operations over an injected record store.
#[derive(Clone)]
pub struct PatientService {
    cfg: Arc<CoreConfig>,
    store: Arc<dyn RecordStore>,
    diagnoses: Arc<DiagnosisRegistry>,
}

impl PatientService {
    /// Creates a new instance of PatientService.
    ///
    /// # Arguments
    ///
    /// * `cfg` - Core configuration (diagnosis-code enforcement).
    /// * `store` - Record store holding the patients.
    /// * `diagnoses` - Registry used when diagnosis codes are enforced.
    pub fn new(
        cfg: Arc<CoreConfig>,
        store: Arc<dyn RecordStore>,
        diagnoses: Arc<DiagnosisRegistry>,
    ) -> Self {
        Self {
            cfg,
            store,
            diagnoses,
        }
    }

    /// Lists every patient without national ids or entries.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::StoreUnavailable` if the store lock is poisoned.
    pub fn list_non_sensitive(&self) -> PatientResult<Vec<NonSensitivePatient>> {
        Ok(self
            .store
            .list()?
            .iter()
            .map(Patient::non_sensitive)
            .collect())
    }

    /// Fetches the full record of the patient with `id`.
    ///
    /// The result holds zero or one patients. An `id` that is not a canonical record id
    /// matches nothing.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::StoreUnavailable` if the store lock is poisoned.
    pub fn get_patient(&self, id: &str) -> PatientResult<Vec<Patient>> {
        let Ok(id) = RecordId::parse(id) else {
            tracing::debug!("lookup with non-canonical patient id: {id}");
            return Ok(Vec::new());
        };
        Ok(self.store.get(&id)?.into_iter().collect())
    }

    /// Validates `payload` as a new patient and stores it.
    ///
    /// # Returns
    ///
    /// The stored patient, including its assigned id and an empty entry list.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::Validation` with the first failing field's message, or
    /// `PatientError::StoreUnavailable`.
    pub fn add_patient(&self, payload: &Value) -> PatientResult<Patient> {
        let new_patient = parse_new_patient(payload).map_err(|e| {
            tracing::warn!("rejected patient payload: {e}");
            e
        })?;

        let patient = self.store.append(new_patient)?;
        tracing::info!("created patient {}", patient.id);
        Ok(patient)
    }

    /// Validates `payload` as a new entry and appends it to the patient with `patient_id`.
    ///
    /// The patient is looked up before the payload is parsed, so an unknown patient is reported
    /// even when the payload is also invalid.
    ///
    /// # Returns
    ///
    /// The stored entry, including its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - no patient has `patient_id` (`PatientNotFound`),
    /// - the payload fails validation (`Validation`),
    /// - diagnosis codes are enforced and one is unknown (`Validation`),
    /// - the store lock is poisoned (`StoreUnavailable`).
    pub fn add_entry(&self, patient_id: &str, payload: &Value) -> PatientResult<Entry> {
        let id = RecordId::parse(patient_id)
            .map_err(|_| PatientError::PatientNotFound(patient_id.to_string()))?;
        if self.store.get(&id)?.is_none() {
            return Err(PatientError::PatientNotFound(patient_id.to_string()));
        }

        let new_entry = parse_new_entry(payload).map_err(|e| {
            tracing::warn!("rejected entry payload for patient {id}: {e}");
            e
        })?;
        if self.cfg.enforce_diagnosis_codes() {
            self.check_diagnosis_codes(&new_entry)?;
        }

        let entry = self.store.append_entry(&id, new_entry)?;
        tracing::info!("added {} entry {} to patient {}", entry.kind(), entry.id, id);
        Ok(entry)
    }

    fn check_diagnosis_codes(&self, entry: &NewEntry) -> Result<(), ValidationError> {
        match entry
            .diagnosis_codes()
            .iter()
            .find(|code| !self.diagnoses.contains(code))
        {
            Some(code) => Err(ValidationError::new(format!(
                "Unknown diagnosis code: {code}"
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnoses::Diagnosis;
    use crate::entry::{EntryDetails, EntryKind};
    use crate::patient::Gender;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn service(enforce_diagnosis_codes: bool) -> PatientService {
        let cfg = CoreConfig::new(None, enforce_diagnosis_codes).expect("cfg");
        let registry = DiagnosisRegistry::new(vec![Diagnosis {
            code: "J03.0".into(),
            name: "Streptococcal tonsillitis".into(),
            latin: Some("Tonsillitis (palatina) streptococcica".into()),
        }]);
        PatientService::new(
            Arc::new(cfg),
            Arc::new(InMemoryStore::new()),
            Arc::new(registry),
        )
    }

    fn patient_payload() -> Value {
        json!({
            "name": "Hans Gruber",
            "dateOfBirth": "1970-04-25",
            "ssn": "250470-555L",
            "gender": "other",
            "occupation": "Technician"
        })
    }

    fn hospital_entry(codes: Value) -> Value {
        json!({
            "type": "Hospital",
            "description": "Tonsils removed.",
            "date": "2020-01-01",
            "specialist": "MD House",
            "diagnosisCodes": codes,
            "discharge": { "date": "2020-01-03", "criteria": "recovered" }
        })
    }

    #[test]
    fn test_add_patient_assigns_id_and_empty_entries() {
        let service = service(false);
        let patient = service.add_patient(&patient_payload()).expect("created");
        assert!(patient.entries.is_empty());
        assert_eq!(patient.gender, Gender::Other);

        let found = service.get_patient(&patient.id.to_string()).expect("get");
        assert_eq!(found, vec![patient]);
    }

    #[test]
    fn test_add_patient_rejects_invalid_payload_and_stores_nothing() {
        let service = service(false);
        let mut payload = patient_payload();
        payload["gender"] = json!("robot");

        let err = service.add_patient(&payload).expect_err("invalid gender");
        assert!(
            matches!(err, PatientError::Validation(ref e) if e.message() == "Incorrect or missing gender: robot")
        );
        assert!(service.list_non_sensitive().expect("list").is_empty());
    }

    #[test]
    fn test_list_non_sensitive_omits_ssn() {
        let service = service(false);
        service.add_patient(&patient_payload()).expect("created");
        let listed = service.list_non_sensitive().expect("list");
        assert_eq!(listed.len(), 1);
        let json = serde_json::to_value(&listed[0]).expect("serialize");
        assert!(json.get("ssn").is_none());
        assert_eq!(json["name"], json!("Hans Gruber"));
    }

    #[test]
    fn test_get_patient_with_unknown_or_malformed_id_is_empty() {
        let service = service(false);
        assert!(service
            .get_patient(&RecordId::new().to_string())
            .expect("get")
            .is_empty());
        assert!(service.get_patient("not-an-id").expect("get").is_empty());
    }

    #[test]
    fn test_add_entry_appends_to_patient() {
        let service = service(false);
        let patient = service.add_patient(&patient_payload()).expect("created");
        let entry = service
            .add_entry(&patient.id.to_string(), &hospital_entry(json!(["J03.0"])))
            .expect("entry added");
        assert_eq!(entry.kind(), EntryKind::Hospital);

        let stored = service.get_patient(&patient.id.to_string()).expect("get");
        assert_eq!(stored[0].entries, vec![entry]);
    }

    #[test]
    fn test_add_entry_unknown_patient_is_not_found_even_with_bad_payload() {
        let service = service(false);
        let missing = RecordId::new().to_string();
        let err = service
            .add_entry(&missing, &json!({ "type": "Surgery" }))
            .expect_err("unknown patient");
        assert!(matches!(err, PatientError::PatientNotFound(ref id) if *id == missing));

        let err = service
            .add_entry("not-an-id", &hospital_entry(json!([])))
            .expect_err("malformed id");
        assert!(matches!(err, PatientError::PatientNotFound(_)));
    }

    #[test]
    fn test_add_entry_invalid_payload_is_validation_error() {
        let service = service(false);
        let patient = service.add_patient(&patient_payload()).expect("created");
        let err = service
            .add_entry(&patient.id.to_string(), &json!({ "type": "Surgery" }))
            .expect_err("unknown type");
        assert!(
            matches!(err, PatientError::Validation(ref e) if e.message() == "Incorrect or missing type")
        );
        let stored = service.get_patient(&patient.id.to_string()).expect("get");
        assert!(stored[0].entries.is_empty());
    }

    #[test]
    fn test_unknown_diagnosis_codes_are_accepted_by_default() {
        let service = service(false);
        let patient = service.add_patient(&patient_payload()).expect("created");
        let entry = service
            .add_entry(&patient.id.to_string(), &hospital_entry(json!(["X99.9"])))
            .expect("permissive by default");
        assert!(matches!(entry.entry.details, EntryDetails::Hospital { .. }));
    }

    #[test]
    fn test_unknown_diagnosis_codes_are_rejected_when_enforced() {
        let service = service(true);
        let patient = service.add_patient(&patient_payload()).expect("created");

        let err = service
            .add_entry(&patient.id.to_string(), &hospital_entry(json!(["J03.0", "X99.9"])))
            .expect_err("unknown code");
        assert!(
            matches!(err, PatientError::Validation(ref e) if e.message() == "Unknown diagnosis code: X99.9")
        );

        service
            .add_entry(&patient.id.to_string(), &hospital_entry(json!(["J03.0"])))
            .expect("known code");
    }
}
