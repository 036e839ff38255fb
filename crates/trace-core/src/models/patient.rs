use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Full patient record as returned by `/patient/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: String,
    #[serde(rename = "fName")]
    pub first_name: String,
    #[serde(rename = "lName")]
    pub last_name: String,
    #[serde(rename = "birthDate", default)]
    pub birth_date: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "phoneNum", default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "contactName", default)]
    pub contact_name: String,
    #[serde(rename = "contactPhone", default)]
    pub contact_phone: String,
    #[serde(default)]
    pub diagnosis: String,
    /// Free-form label assigned by the backend ("Mild", "Moderate", "Severe").
    #[serde(default)]
    pub severity: String,
    #[serde(rename = "medHist", default)]
    pub medical_history: String,
    #[serde(default)]
    pub medication: Vec<Treatment>,
    #[serde(default)]
    pub assessment_ids: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The short form used by patient pickers and listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientSummary {
    pub id: String,
    #[serde(rename = "fName")]
    pub first_name: String,
    #[serde(rename = "lName")]
    pub last_name: String,
}

/// Payload for `/add_patient`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewPatient {
    #[serde(rename = "fName")]
    pub first_name: String,
    #[serde(rename = "lName")]
    pub last_name: String,
    #[serde(rename = "bDate")]
    pub birth_date: jiff::civil::Date,
    pub gender: String,
    pub email: String,
    #[serde(rename = "phoneNum")]
    pub phone: String,
    pub address: String,
    #[serde(rename = "contactName")]
    pub contact_name: String,
    #[serde(rename = "contactNum")]
    pub contact_phone: String,
    pub diagnosis: String,
    /// New patients always start unscored.
    pub severity: u8,
    #[serde(rename = "medHist")]
    pub medical_history: String,
    pub medication: String,
}

impl NewPatient {
    /// A payload with the required fields set and everything else blank.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: jiff::civil::Date,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date,
            gender: gender.into(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            contact_name: String::new(),
            contact_phone: String::new(),
            diagnosis: String::new(),
            severity: 0,
            medical_history: String::new(),
            medication: String::new(),
        }
    }

    /// Names and gender must be non-blank before submitting.
    pub fn missing_required(&self) -> Option<&'static str> {
        if self.first_name.trim().is_empty() {
            Some("fName")
        } else if self.last_name.trim().is_empty() {
            Some("lName")
        } else if self.gender.trim().is_empty() {
            Some("gender")
        } else {
            None
        }
    }
}

/// A treatment/medication entry on a patient's record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Treatment {
    pub date: jiff::civil::Date,
    pub t_desc: String,
    pub provider: String,
}
