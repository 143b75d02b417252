//! Record identifiers.
//!
//! Patients and entries are identified by an id the store assigns on insertion. Callers never
//! choose ids. Patientor uses a *canonical* UUID representation for these identifiers:
//! **32 lowercase hexadecimal characters** (no hyphens).
//!
//! ## Canonical UUID form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `d2773336f72311e98f0b362b9e155667`
//!
//! Notes:
//! - This is the same value you would get from `Uuid::new_v4().simple().to_string()`.
//! - Externally supplied identifiers (route parameters, CLI arguments, seed files) must already be
//!   canonical. Use [`RecordId::parse`] to validate an input string.
//! - Non-canonical values (uppercase, hyphenated, wrong length, non-hex) are rejected.

mod service;

pub use service::RecordId;

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
