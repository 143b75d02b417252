//! Patient and entry parsers.
//!
//! These turn an untyped JSON request body into a typed [`NewPatient`] or [`NewEntry`].
//! Fields are checked in a fixed order and the first failure aborts the parse, so the caller
//! either gets a fully valid value or a single [`ValidationError`].

use crate::entry::{BaseEntry, Discharge, EntryDetails, EntryKind, NewEntry, SickLeave};
use crate::error::{ValidationError, ValidationResult};
use crate::patient::NewPatient;
use crate::validation::{
    validate_date_string, validate_enum_member, validate_string, validate_string_array,
    validate_structural,
};
use serde_json::Value;

/// Parse a new-patient payload.
///
/// Checks `name`, `dateOfBirth`, `ssn`, `gender` and `occupation` in that order. Any `id` or
/// `entries` supplied by the client is ignored; the store assigns both.
pub fn parse_new_patient(payload: &Value) -> ValidationResult<NewPatient> {
    let date_of_birth = payload.get("dateOfBirth");

    Ok(NewPatient {
        name: validate_string("name", payload.get("name"))?,
        date_of_birth: validate_date_string("date of birth", date_of_birth)
            .map_err(|_| ValidationError::invalid("date of birth", date_of_birth))?,
        ssn: validate_string("ssn", payload.get("ssn"))?,
        gender: validate_enum_member("gender", payload.get("gender"))?,
        occupation: validate_string("occupation", payload.get("occupation"))?,
    })
}

/// Parse a new-entry payload into one of the three entry kinds.
///
/// The `type` tag is checked first, then the shared fields, then the fields of that kind only.
pub fn parse_new_entry(payload: &Value) -> ValidationResult<NewEntry> {
    let kind = parse_kind(payload.get("type"))?;

    let base = BaseEntry {
        description: validate_string("description", payload.get("description"))?,
        date: validate_date_string("date", payload.get("date"))?,
        specialist: validate_string("specialist", payload.get("specialist"))?,
        diagnosis_codes: present(payload.get("diagnosisCodes"))
            .map(|codes| validate_string_array("diagnosisCodes", Some(codes)))
            .transpose()?,
    };

    let details = match kind {
        EntryKind::HealthCheck => EntryDetails::HealthCheck {
            health_check_rating: validate_enum_member(
                "health check rating",
                payload.get("healthCheckRating"),
            )?,
        },
        EntryKind::Hospital => EntryDetails::Hospital {
            discharge: parse_discharge(payload.get("discharge"))?,
        },
        EntryKind::OccupationalHealthcare => EntryDetails::OccupationalHealthcare {
            employer_name: validate_string("employerName", payload.get("employerName"))?,
            sick_leave: present(payload.get("sickLeave"))
                .map(|leave| parse_sick_leave(Some(leave)))
                .transpose()?,
        },
    };

    Ok(NewEntry { base, details })
}

fn parse_kind(value: Option<&Value>) -> ValidationResult<EntryKind> {
    value
        .and_then(Value::as_str)
        .and_then(EntryKind::from_wire)
        .ok_or_else(|| ValidationError::missing("type"))
}

fn parse_discharge(value: Option<&Value>) -> ValidationResult<Discharge> {
    let fields = validate_structural("discharge", value, &["date", "criteria"])?;
    let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

    match (text("date"), text("criteria")) {
        (Some(date), Some(criteria)) => Ok(Discharge { date, criteria }),
        _ => Err(ValidationError::invalid("discharge", value)),
    }
}

fn parse_sick_leave(value: Option<&Value>) -> ValidationResult<SickLeave> {
    let fields = validate_structural("sickLeave", value, &["startDate", "endDate"])?;
    let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

    match (text("startDate"), text("endDate")) {
        (Some(start_date), Some(end_date)) => Ok(SickLeave {
            start_date,
            end_date,
        }),
        _ => Err(ValidationError::invalid("sickLeave", value)),
    }
}

/// Optional keys count as absent when missing or explicitly `null`.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}
