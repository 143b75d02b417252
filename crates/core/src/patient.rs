//! Patient records.
//!
//! A patient is created from a [`NewPatient`] (the validated client payload) when the record
//! store assigns it an id. Entries are only ever appended by the store.

use crate::entry::Entry;
use patientor_uuid::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Administrative gender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Every accepted gender, in wire order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl crate::validation::EnumMember for Gender {
    fn from_value(value: &Value) -> Option<Self> {
        let s = value.as_str()?;
        Gender::ALL.into_iter().find(|g| g.as_str() == s)
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored patient with its full entry history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[schema(value_type = String)]
    pub id: RecordId,
    pub name: String,
    pub date_of_birth: String,
    pub ssn: String,
    pub gender: Gender,
    pub occupation: String,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub entries: Vec<Entry>,
}

impl Patient {
    /// Projection without the national id and the entry history.
    pub fn non_sensitive(&self) -> NonSensitivePatient {
        NonSensitivePatient {
            id: self.id,
            name: self.name.clone(),
            date_of_birth: self.date_of_birth.clone(),
            gender: self.gender,
            occupation: self.occupation.clone(),
        }
    }
}

/// Validated patient payload, before the store assigns an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub date_of_birth: String,
    pub ssn: String,
    pub gender: Gender,
    pub occupation: String,
}

impl NewPatient {
    /// Attach a store-assigned id. The entry history always starts empty.
    pub fn into_patient(self, id: RecordId) -> Patient {
        Patient {
            id,
            name: self.name,
            date_of_birth: self.date_of_birth,
            ssn: self.ssn,
            gender: self.gender,
            occupation: self.occupation,
            entries: Vec::new(),
        }
    }
}

/// Patient listing shape that omits `ssn` and `entries`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NonSensitivePatient {
    #[schema(value_type = String)]
    pub id: RecordId,
    pub name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub occupation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_patient() -> NewPatient {
        NewPatient {
            name: "Dana Scully".into(),
            date_of_birth: "1974-01-05".into(),
            ssn: "050174-432N".into(),
            gender: Gender::Female,
            occupation: "Forensic Pathologist".into(),
        }
    }

    #[test]
    fn test_into_patient_starts_with_no_entries() {
        let id = RecordId::new();
        let patient = new_patient().into_patient(id);
        assert_eq!(patient.id, id);
        assert!(patient.entries.is_empty());
        assert_eq!(patient.name, "Dana Scully");
    }

    #[test]
    fn test_non_sensitive_drops_ssn_and_entries() {
        let patient = new_patient().into_patient(RecordId::new());
        let json = serde_json::to_value(patient.non_sensitive()).expect("serialize");
        let obj = json.as_object().expect("object");
        assert!(!obj.contains_key("ssn"));
        assert!(!obj.contains_key("entries"));
        assert_eq!(obj["dateOfBirth"], json!("1974-01-05"));
        assert_eq!(obj["gender"], json!("female"));
    }

    #[test]
    fn test_patient_serializes_camel_case() {
        let patient = new_patient().into_patient(RecordId::new());
        let json = serde_json::to_value(&patient).expect("serialize");
        assert_eq!(json["dateOfBirth"], json!("1974-01-05"));
        assert_eq!(json["ssn"], json!("050174-432N"));
        assert_eq!(json["entries"], json!([]));
    }

    #[test]
    fn test_gender_display_matches_wire_value() {
        for gender in Gender::ALL {
            let wire = serde_json::to_value(gender).expect("serialize");
            assert_eq!(wire, json!(gender.to_string()));
        }
    }
}
