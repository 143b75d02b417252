use serde_json::Value;

/// Rejection raised by the field validators and the patient/entry parsers.
///
/// The message names the offending field and, where useful, the offending value. It is the
/// exact text returned to HTTP clients in a `400` response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `Incorrect or missing <field>`
    pub fn missing(field: &str) -> Self {
        Self::new(format!("Incorrect or missing {field}"))
    }

    /// `Incorrect or missing <field>: <value>`
    pub fn invalid(field: &str, value: Option<&Value>) -> Self {
        Self::new(format!(
            "Incorrect or missing {field}: {}",
            describe_value(value)
        ))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Renders an offending value for an error message.
///
/// Strings are shown verbatim, other JSON compactly, and an absent key as `undefined`.
pub fn describe_value(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Patient not found: {0}")]
    PatientNotFound(String),
    #[error("record store is unavailable (lock poisoned)")]
    StoreUnavailable,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read seed file: {0}")]
    SeedRead(std::io::Error),
    #[error("failed to parse seed data: {0}")]
    SeedParse(serde_json::Error),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
