//! Field validators.
//!
//! Each validator takes the raw value found under one key of an untyped JSON payload
//! (`None` when the key is absent) and either narrows it to a typed value or fails with a
//! [`ValidationError`] naming the field. They are pure and never look at other fields.

use crate::error::{ValidationError, ValidationResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

/// Local date-time forms accepted alongside RFC 3339.
const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// A closed set of values accepted for an enumerated field.
pub trait EnumMember: Sized {
    /// Returns the member whose wire value equals `value` exactly.
    fn from_value(value: &Value) -> Option<Self>;
}

/// Accepts any non-empty JSON string, returned exactly as sent.
///
/// Fails with `Incorrect or missing <field>`.
pub fn validate_string(field: &str, value: Option<&Value>) -> ValidationResult<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ValidationError::missing(field))
}

/// Returns true if `text` is an ISO 8601 calendar date or date-time.
///
/// Accepted: `YYYY-MM-DD`, RFC 3339, local `YYYY-MM-DDTHH:MM[:SS[.fff]]`, and the reduced
/// precision forms `YYYY-MM` and `YYYY`.
pub fn is_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(text).is_ok()
        || LOCAL_DATE_TIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
        || is_reduced_precision_date(text)
}

fn is_reduced_precision_date(text: &str) -> bool {
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    match text.split_once('-') {
        None => digits(text, 4),
        Some((year, month)) => {
            digits(year, 4)
                && digits(month, 2)
                && NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").is_ok()
        }
    }
}

/// Accepts a JSON string that parses as a date. The original text is returned unchanged.
///
/// Fails with `Incorrect or missing <field>`.
pub fn validate_date_string(field: &str, value: Option<&Value>) -> ValidationResult<String> {
    match value.and_then(Value::as_str) {
        Some(text) if is_date(text) => Ok(text.to_string()),
        _ => Err(ValidationError::missing(field)),
    }
}

/// Accepts exactly one of `E`'s wire values.
///
/// Fails with `Incorrect or missing <field>: <value>`.
pub fn validate_enum_member<E: EnumMember>(field: &str, value: Option<&Value>) -> ValidationResult<E> {
    value
        .and_then(E::from_value)
        .ok_or_else(|| ValidationError::invalid(field, value))
}

/// Accepts an array whose elements are all JSON strings. An empty array is valid.
///
/// Fails with `Incorrect or missing <field>`.
pub fn validate_string_array(field: &str, value: Option<&Value>) -> ValidationResult<Vec<String>> {
    let items = value
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::missing(field))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ValidationError::missing(field))
        })
        .collect()
}

/// Accepts an object in which every key of `required_keys` is present and non-null.
///
/// Fails with `Incorrect or missing <field>: <value>`.
pub fn validate_structural<'a>(
    field: &str,
    value: Option<&'a Value>,
    required_keys: &[&str],
) -> ValidationResult<&'a Map<String, Value>> {
    let object = value
        .and_then(Value::as_object)
        .ok_or_else(|| ValidationError::invalid(field, value))?;

    let complete = required_keys
        .iter()
        .all(|key| object.get(*key).is_some_and(|v| !v.is_null()));
    if !complete {
        return Err(ValidationError::invalid(field, value));
    }

    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::HealthCheckRating;
    use crate::patient::Gender;
    use serde_json::json;

    #[test]
    fn test_validate_string_accepts_text() {
        let v = json!("Martin Riggs");
        assert_eq!(validate_string("name", Some(&v)).expect("valid"), "Martin Riggs");
    }

    #[test]
    fn test_validate_string_rejects_empty_string() {
        let v = json!("");
        let err = validate_string("name", Some(&v)).expect_err("empty is rejected");
        assert_eq!(err.message(), "Incorrect or missing name");
    }

    #[test]
    fn test_validate_string_keeps_text_as_sent() {
        let v = json!("   ");
        assert_eq!(validate_string("name", Some(&v)).expect("non-empty"), "   ");

        let v = json!("  Dana Scully ");
        assert_eq!(validate_string("name", Some(&v)).expect("valid"), "  Dana Scully ");
    }

    #[test]
    fn test_validate_string_rejects_non_strings() {
        for v in [json!(null), json!(0), json!(42), json!(true), json!(["a"]), json!({"a": "b"})] {
            let err = validate_string("occupation", Some(&v)).expect_err("non-string is rejected");
            assert_eq!(err.message(), "Incorrect or missing occupation");
        }
        assert!(validate_string("occupation", None).is_err());
    }

    #[test]
    fn test_validate_date_string_accepts_dates() {
        for text in [
            "2019-10-20",
            "1979-01-30",
            "2020-02-29",
            "2019-08-05T10:00:00Z",
            "2019-08-05T10:00:00+02:00",
            "2019-08-05T10:00:00",
            "2019-08-05T10:00:00.000",
            "2019-08-05T10:00",
            "2019-08",
            "2019",
        ] {
            let v = json!(text);
            assert_eq!(validate_date_string("date", Some(&v)).expect("valid date"), text);
        }
    }

    #[test]
    fn test_validate_date_string_rejects_non_dates() {
        for v in [
            json!("not-a-date"),
            json!("2019-02-30"),
            json!("2019-13"),
            json!("2019-1"),
            json!("201"),
            json!("2019-08-05T25:00:00"),
            json!(""),
            json!(20191020),
            json!(null),
        ] {
            let err = validate_date_string("date", Some(&v)).expect_err("should reject");
            assert_eq!(err.message(), "Incorrect or missing date");
        }
        assert!(validate_date_string("date", None).is_err());
    }

    #[test]
    fn test_validate_enum_member_accepts_every_gender() {
        for gender in Gender::ALL {
            let v = json!(gender.as_str());
            let parsed: Gender = validate_enum_member("gender", Some(&v)).expect("valid gender");
            assert_eq!(parsed, gender);
        }
    }

    #[test]
    fn test_validate_enum_member_rejects_other_genders() {
        for text in ["Male", "robot", "", " male"] {
            let v = json!(text);
            let err = validate_enum_member::<Gender>("gender", Some(&v)).expect_err("should reject");
            assert_eq!(err.message(), format!("Incorrect or missing gender: {text}"));
        }
        let err = validate_enum_member::<Gender>("gender", None).expect_err("missing");
        assert_eq!(err.message(), "Incorrect or missing gender: undefined");
    }

    #[test]
    fn test_validate_enum_member_health_check_rating() {
        for code in 0..=3u64 {
            let v = json!(code);
            let rating: HealthCheckRating =
                validate_enum_member("health check rating", Some(&v)).expect("valid rating");
            assert_eq!(u64::from(rating.code()), code);
        }
        for v in [json!(1.0), json!(3.0)] {
            let rating: HealthCheckRating =
                validate_enum_member("health check rating", Some(&v)).expect("integral float");
            assert_eq!(Some(f64::from(rating.code())), v.as_f64());
        }
        for v in [json!(4), json!(4.0), json!(-1), json!(1.5), json!("1"), json!("Healthy")] {
            assert!(validate_enum_member::<HealthCheckRating>("health check rating", Some(&v)).is_err());
        }
    }

    #[test]
    fn test_validate_string_array() {
        let v = json!(["M24.2", "M51.2"]);
        assert_eq!(
            validate_string_array("diagnosisCodes", Some(&v)).expect("valid"),
            vec!["M24.2".to_string(), "M51.2".to_string()]
        );

        let empty = json!([]);
        assert!(validate_string_array("diagnosisCodes", Some(&empty))
            .expect("empty is valid")
            .is_empty());

        for v in [json!(["M24.2", 7]), json!("M24.2"), json!({"0": "M24.2"})] {
            let err = validate_string_array("diagnosisCodes", Some(&v)).expect_err("should reject");
            assert_eq!(err.message(), "Incorrect or missing diagnosisCodes");
        }
    }

    #[test]
    fn test_validate_structural_requires_every_key() {
        let v = json!({ "date": "2015-01-16", "criteria": "Thumb has healed." });
        let object = validate_structural("discharge", Some(&v), &["date", "criteria"]).expect("valid");
        assert_eq!(object["criteria"], json!("Thumb has healed."));

        let missing = json!({ "date": "2015-01-16" });
        let err = validate_structural("discharge", Some(&missing), &["date", "criteria"])
            .expect_err("criteria is required");
        assert_eq!(
            err.message(),
            r#"Incorrect or missing discharge: {"date":"2015-01-16"}"#
        );

        let null_value = json!({ "date": "2015-01-16", "criteria": null });
        assert!(validate_structural("discharge", Some(&null_value), &["date", "criteria"]).is_err());
    }

    #[test]
    fn test_validate_structural_rejects_non_objects() {
        for v in [json!("2015-01-16"), json!(["2015-01-16"]), json!(null)] {
            assert!(validate_structural("sickLeave", Some(&v), &["startDate", "endDate"]).is_err());
        }
        assert!(validate_structural("sickLeave", None, &["startDate", "endDate"]).is_err());
    }
}
