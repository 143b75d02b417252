//! Constants used throughout the Patientor core crate.

/// Default bind address for the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3001";

/// Filename of the patient seed file inside a seed directory.
pub const PATIENTS_SEED_FILENAME: &str = "patients.json";

/// Filename of the diagnosis seed file inside a seed directory.
pub const DIAGNOSES_SEED_FILENAME: &str = "diagnoses.json";

/// Environment variable naming the REST bind address.
pub const REST_ADDR_ENV: &str = "PATIENTOR_REST_ADDR";

/// Environment variable naming an optional seed directory.
pub const SEED_DIR_ENV: &str = "PATIENTOR_SEED_DIR";

/// Environment variable toggling diagnosis-code enforcement on new entries.
pub const ENFORCE_DIAGNOSIS_CODES_ENV: &str = "PATIENTOR_ENFORCE_DIAGNOSIS_CODES";
