//! # Patientor Core
//!
//! Core business logic for the Patientor patient record service.
//!
//! This crate contains pure data operations:
//! - Field validators and the patient/entry parsers that turn untyped JSON into typed values
//! - The domain model (patients, the three entry kinds, diagnoses)
//! - The record store abstraction and its in-memory implementation
//! - Seed data loading and startup configuration
//!
//! **No API concerns**: HTTP servers and routing belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod diagnoses;
pub mod entry;
pub mod error;
pub mod parse;
pub mod patient;
pub mod seed;
pub mod services;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use diagnoses::{Diagnosis, DiagnosisRegistry};
pub use entry::{
    BaseEntry, Discharge, Entry, EntryDetails, EntryKind, HealthCheckRating, NewEntry, SickLeave,
};
pub use error::{PatientError, PatientResult, ValidationError, ValidationResult};
pub use parse::{parse_new_entry, parse_new_patient};
pub use patient::{Gender, NewPatient, NonSensitivePatient, Patient};
pub use services::{DiagnosisService, PatientService, Services};
pub use store::{InMemoryStore, RecordStore};

pub use patientor_uuid::RecordId;
