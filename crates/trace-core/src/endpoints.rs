//! Backend path conventions.
//!
//! Pure string functions with no HTTP dependency. These define the routes
//! exposed by the scoring/persistence backend, relative to its base URL.

use urlencoding::encode;

pub const PATIENTS: &str = "/patient";

pub const ADD_PATIENT: &str = "/add_patient";

pub const ADD_NOTE: &str = "/add_note";

pub const ADD_TREATMENT: &str = "/add_treatment";

pub const RECENT_ASSESSMENTS: &str = "/recent-assessments";

pub const SUBMIT_IMAGES: &str = "/submit-images";

pub fn patient(id: &str) -> String {
    format!("/patient/{}", encode(id))
}

/// Lookup by full name. Both segments are percent-encoded so names with
/// spaces or slashes stay within their path segment.
pub fn patient_by_name(first_name: &str, last_name: &str) -> String {
    format!(
        "/patient/name/{}/{}",
        encode(first_name),
        encode(last_name)
    )
}

pub fn patient_assessments(patient_id: &str) -> String {
    format!("/assessments/{}", encode(patient_id))
}

pub fn generated_report(patient_id: &str) -> String {
    format!("/gemini_report/{}", encode(patient_id))
}

/// Join a base URL and an endpoint path without doubling the slash.
pub fn url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
