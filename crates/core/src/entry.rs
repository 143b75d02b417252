//! Medical entries.
//!
//! An entry is one clinical encounter attached to a patient. Every entry shares a
//! [`BaseEntry`] and carries exactly one kind of [`EntryDetails`]. On the wire an entry is a
//! flat JSON object discriminated by its `"type"` field:
//!
//! ```json
//! {
//!   "id": "b4f4eca1284d4e8da87b93cd93c0d1f4",
//!   "description": "Yearly control visit.",
//!   "date": "2019-10-20",
//!   "specialist": "MD House",
//!   "type": "HealthCheck",
//!   "healthCheckRating": 0
//! }
//! ```

use patientor_uuid::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of entry kinds, as named by the `"type"` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    HealthCheck,
    Hospital,
    OccupationalHealthcare,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [
        EntryKind::HealthCheck,
        EntryKind::Hospital,
        EntryKind::OccupationalHealthcare,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::HealthCheck => "HealthCheck",
            EntryKind::Hospital => "Hospital",
            EntryKind::OccupationalHealthcare => "OccupationalHealthcare",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        EntryKind::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a health check, serialised as its integer code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HealthCheckRating {
    Healthy = 0,
    LowRisk = 1,
    HighRisk = 2,
    CriticalRisk = 3,
}

impl HealthCheckRating {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(HealthCheckRating::Healthy),
            1 => Some(HealthCheckRating::LowRisk),
            2 => Some(HealthCheckRating::HighRisk),
            3 => Some(HealthCheckRating::CriticalRisk),
            _ => None,
        }
    }
}

impl crate::validation::EnumMember for HealthCheckRating {
    fn from_value(value: &Value) -> Option<Self> {
        let code = value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && (0.0..=3.0).contains(f))
                .map(|f| f as u64)
        })?;
        HealthCheckRating::from_code(code)
    }
}

impl Serialize for HealthCheckRating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for HealthCheckRating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        HealthCheckRating::from_code(u64::from(code)).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid health check rating: {code}"))
        })
    }
}

/// Hospital release record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discharge {
    pub date: String,
    pub criteria: String,
}

/// Sick leave date range for an occupational healthcare entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeave {
    pub start_date: String,
    pub end_date: String,
}

/// Fields common to every entry kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseEntry {
    pub description: String,
    pub date: String,
    pub specialist: String,
    /// Absent and empty are distinct: `None` is omitted from JSON entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<String>>,
}

/// Kind-specific part of an entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntryDetails {
    #[serde(rename_all = "camelCase")]
    HealthCheck {
        health_check_rating: HealthCheckRating,
    },
    Hospital {
        discharge: Discharge,
    },
    #[serde(rename_all = "camelCase")]
    OccupationalHealthcare {
        employer_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sick_leave: Option<SickLeave>,
    },
}

impl EntryDetails {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryDetails::HealthCheck { .. } => EntryKind::HealthCheck,
            EntryDetails::Hospital { .. } => EntryKind::Hospital,
            EntryDetails::OccupationalHealthcare { .. } => EntryKind::OccupationalHealthcare,
        }
    }
}

/// Validated entry payload, before the store assigns an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    #[serde(flatten)]
    pub base: BaseEntry,
    #[serde(flatten)]
    pub details: EntryDetails,
}

impl NewEntry {
    pub fn kind(&self) -> EntryKind {
        self.details.kind()
    }

    pub fn diagnosis_codes(&self) -> &[String] {
        self.base.diagnosis_codes.as_deref().unwrap_or_default()
    }

    /// Attach a store-assigned id.
    pub fn into_entry(self, id: RecordId) -> Entry {
        Entry { id, entry: self }
    }
}

/// A stored entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: RecordId,
    #[serde(flatten)]
    pub entry: NewEntry,
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        self.entry.kind()
    }
}
