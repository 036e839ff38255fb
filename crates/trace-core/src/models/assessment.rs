use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The reference shape a patient is asked to trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TemplateKind {
    #[default]
    Spiral,
    Meander,
    #[serde(rename = "line")]
    StraightLine,
    Text,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Spiral,
        TemplateKind::Meander,
        TemplateKind::Text,
        TemplateKind::StraightLine,
    ];

    /// Wire identifier, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Spiral => "spiral",
            TemplateKind::Meander => "meander",
            TemplateKind::StraightLine => "line",
            TemplateKind::Text => "text",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownTemplateKind(s.to_string()))
    }
}

/// One stored assessment row as returned by `/assessments/{patient_id}`.
///
/// Score fields are optional because older rows predate server scoring.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub patient_id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub date: String,
    #[serde(default)]
    pub severity: Option<f64>,
    #[serde(default)]
    pub tremor: Option<f64>,
    #[serde(default)]
    pub dtw_distance: Option<f64>,
}

/// An entry of the dashboard's recent-assessment feed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecentAssessment {
    pub patient: RecentPatient,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecentPatient {
    pub id: String,
    #[serde(rename = "fName")]
    pub first_name: String,
    #[serde(rename = "lName")]
    pub last_name: String,
    pub date: String,
}
