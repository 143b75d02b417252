//! Seed data.
//!
//! The service starts from a fixed set of patients and diagnoses. A copy is compiled into the
//! crate; [`CoreConfig::seed_dir`] can point at a directory holding replacement
//! `patients.json` and `diagnoses.json` files.

use crate::config::CoreConfig;
use crate::constants::{DIAGNOSES_SEED_FILENAME, PATIENTS_SEED_FILENAME};
use crate::diagnoses::Diagnosis;
use crate::error::{PatientError, PatientResult};
use crate::patient::Patient;
use std::collections::HashSet;
use std::path::Path;

const EMBEDDED_PATIENTS: &str = include_str!("../data/patients.json");
const EMBEDDED_DIAGNOSES: &str = include_str!("../data/diagnoses.json");

/// Initial contents of the record store and the diagnosis registry.
#[derive(Clone, Debug)]
pub struct SeedData {
    pub patients: Vec<Patient>,
    pub diagnoses: Vec<Diagnosis>,
}

/// Load seed data from the configured seed directory, or the embedded copy.
///
/// # Errors
///
/// Returns `PatientError` if:
/// - a seed file cannot be read (`SeedRead`),
/// - a seed file is not valid patient/diagnosis JSON (`SeedParse`),
/// - two patients or two entries share an id (`InvalidInput`).
pub fn load_seed(cfg: &CoreConfig) -> PatientResult<SeedData> {
    let seed = match cfg.seed_dir() {
        Some(dir) => {
            tracing::info!("loading seed data from {}", dir.display());
            SeedData {
                patients: parse_patients(&read_seed_file(dir, PATIENTS_SEED_FILENAME)?)?,
                diagnoses: parse_diagnoses(&read_seed_file(dir, DIAGNOSES_SEED_FILENAME)?)?,
            }
        }
        None => SeedData {
            patients: parse_patients(EMBEDDED_PATIENTS)?,
            diagnoses: parse_diagnoses(EMBEDDED_DIAGNOSES)?,
        },
    };

    tracing::debug!(
        patients = seed.patients.len(),
        diagnoses = seed.diagnoses.len(),
        "seed data loaded"
    );
    Ok(seed)
}

/// Parse a JSON array of stored patients and check that ids are unique.
pub fn parse_patients(json: &str) -> PatientResult<Vec<Patient>> {
    let patients: Vec<Patient> = serde_json::from_str(json).map_err(PatientError::SeedParse)?;

    let mut seen = HashSet::new();
    let ids = patients
        .iter()
        .map(|p| p.id)
        .chain(patients.iter().flat_map(|p| p.entries.iter().map(|e| e.id)));
    for id in ids {
        if !seen.insert(id) {
            return Err(PatientError::InvalidInput(format!(
                "duplicate id in seed data: {id}"
            )));
        }
    }

    Ok(patients)
}

/// Parse a JSON array of diagnoses.
pub fn parse_diagnoses(json: &str) -> PatientResult<Vec<Diagnosis>> {
    serde_json::from_str(json).map_err(PatientError::SeedParse)
}

fn read_seed_file(dir: &Path, filename: &str) -> PatientResult<String> {
    std::fs::read_to_string(dir.join(filename)).map_err(PatientError::SeedRead)
}
