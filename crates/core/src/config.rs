//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Environment variables are read by the binaries only; the helpers here take the raw values so
//! request handling and tests never touch process-wide state.

use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    seed_dir: Option<PathBuf>,
    enforce_diagnosis_codes: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if `seed_dir` is set but is not a directory.
    pub fn new(seed_dir: Option<PathBuf>, enforce_diagnosis_codes: bool) -> PatientResult<Self> {
        if let Some(dir) = &seed_dir {
            if !dir.is_dir() {
                return Err(PatientError::InvalidInput(format!(
                    "seed directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        Ok(Self {
            seed_dir,
            enforce_diagnosis_codes,
        })
    }

    /// Directory to load seed files from, or `None` for the embedded seed.
    pub fn seed_dir(&self) -> Option<&Path> {
        self.seed_dir.as_deref()
    }

    /// Whether new entries must only reference known diagnosis codes.
    pub fn enforce_diagnosis_codes(&self) -> bool {
        self.enforce_diagnosis_codes
    }
}

/// Turn an optional seed-directory value into a path. Blank values mean "unset".
pub fn seed_dir_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Parse the diagnosis-code enforcement flag from an optional string value.
///
/// Accepts `true`/`false`, `1`/`0` and `yes`/`no` in any case. `None` or blank is `false`.
pub fn enforce_diagnosis_codes_from_env_value(value: Option<String>) -> PatientResult<bool> {
    let Some(raw) = value.map(|v| v.trim().to_ascii_lowercase()) else {
        return Ok(false);
    };

    match raw.as_str() {
        "" | "false" | "0" | "no" => Ok(false),
        "true" | "1" | "yes" => Ok(true),
        other => Err(PatientError::InvalidInput(format!(
            "diagnosis code enforcement flag must be true or false, got '{other}'"
        ))),
    }
}
