use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Rasterized trace and template sent to the backend for scoring.
///
/// Both images are `data:` URLs so the backend can decode them without
/// a multipart upload.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ImageSubmission {
    pub trace_image: String,
    pub template_image: String,
    pub age: u32,
    pub patient_name: String,
}

/// Server-side scores. These, not the local heuristics, are what gets
/// persisted on the patient's record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScoringResult {
    pub severity_score: f64,
    pub mean_tremor: f64,
    pub dtw_distance: f64,
}

/// Narrative report generated by the backend for one patient.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeneratedReport {
    pub report: String,
}
