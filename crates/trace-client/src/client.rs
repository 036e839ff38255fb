use std::time::Duration;

use serde::de::DeserializeOwned;
use ureq::http::Response;
use ureq::{Agent, Body};

use trace_core::endpoints;
use trace_core::models::assessment::{AssessmentRecord, RecentAssessment};
use trace_core::models::envelope::ApiEnvelope;
use trace_core::models::patient::{NewPatient, Patient, PatientSummary, Treatment};
use trace_core::models::scoring::{GeneratedReport, ImageSubmission, ScoringResult};

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Client for one backend instance.
#[derive(Clone)]
pub struct BackendClient {
    agent: Agent,
    base_url: String,
}

impl BackendClient {
    /// No request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        // Non-2xx statuses are returned as responses so their error body can be read.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();
        Self {
            agent: Agent::new_with_config(config),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_patients(&self) -> Result<Vec<PatientSummary>, ClientError> {
        self.get_data(endpoints::PATIENTS)
    }

    pub fn get_patient(&self, id: &str) -> Result<Patient, ClientError> {
        self.get_data(&endpoints::patient(id))
    }

    pub fn find_patient(&self, first_name: &str, last_name: &str) -> Result<Patient, ClientError> {
        self.get_data(&endpoints::patient_by_name(first_name, last_name))
    }

    pub fn add_patient(&self, patient: &NewPatient) -> Result<(), ClientError> {
        if let Some(field) = patient.missing_required() {
            return Err(ClientError::InvalidRequest(format!("{field} is required")));
        }
        let body = serde_json::to_vec(patient).map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        let url = self.url(endpoints::ADD_PATIENT);
        tracing::debug!(%url, "POST");
        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send(&body[..])
            .map_err(|e| transport(&url, e))?;
        self.expect_success(&url, response)?;
        tracing::info!(first_name = %patient.first_name, last_name = %patient.last_name, "patient added");
        Ok(())
    }

    pub fn add_note(&self, patient_id: &str, note: &str) -> Result<(), ClientError> {
        if note.trim().is_empty() {
            return Err(ClientError::InvalidRequest("note is empty".to_string()));
        }
        self.post_query(endpoints::ADD_NOTE, &[("id", patient_id), ("note", note)])
    }

    pub fn add_treatment(&self, patient_id: &str, treatment: &Treatment) -> Result<(), ClientError> {
        if treatment.t_desc.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "treatment description is empty".to_string(),
            ));
        }
        let date = treatment.date.to_string();
        self.post_query(
            endpoints::ADD_TREATMENT,
            &[
                ("id", patient_id),
                ("date", &date),
                ("t_desc", &treatment.t_desc),
                ("provider", &treatment.provider),
            ],
        )
    }

    pub fn list_assessments(&self, patient_id: &str) -> Result<Vec<AssessmentRecord>, ClientError> {
        self.get_data(&endpoints::patient_assessments(patient_id))
    }

    pub fn recent_assessments(&self) -> Result<Vec<RecentAssessment>, ClientError> {
        self.get_data(endpoints::RECENT_ASSESSMENTS)
    }

    /// Hand the rasterized trace and template to the backend for scoring.
    pub fn submit_images(&self, submission: &ImageSubmission) -> Result<ScoringResult, ClientError> {
        let body = serde_json::to_vec(submission).map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        let url = self.url(endpoints::SUBMIT_IMAGES);
        tracing::debug!(%url, bytes = body.len(), "POST");
        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send(&body[..])
            .map_err(|e| transport(&url, e))?;
        let result: ScoringResult = read_json(&url, response)?;
        tracing::info!(
            patient = %submission.patient_name,
            severity_score = result.severity_score,
            mean_tremor = result.mean_tremor,
            dtw_distance = result.dtw_distance,
            "assessment scored"
        );
        Ok(result)
    }

    pub fn generate_report(&self, patient_id: &str) -> Result<GeneratedReport, ClientError> {
        self.get_data(&endpoints::generated_report(patient_id))
    }

    fn url(&self, path: &str) -> String {
        endpoints::url(&self.base_url, path)
    }

    fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.agent.get(&url).call().map_err(|e| transport(&url, e))?;
        let envelope: ApiEnvelope<T> = read_json(&url, response)?;
        envelope.into_data().map_err(|e| {
            tracing::error!(%url, error = %e, "backend rejected request");
            ClientError::from(e)
        })
    }

    fn post_query(&self, path: &str, query: &[(&str, &str)]) -> Result<(), ClientError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let mut request = self.agent.post(&url);
        for (key, value) in query {
            request = request.query(*key, *value);
        }
        let response = request.send_empty().map_err(|e| transport(&url, e))?;
        self.expect_success(&url, response)
    }

    fn expect_success(&self, url: &str, response: Response<Body>) -> Result<(), ClientError> {
        let envelope: ApiEnvelope<serde_json::Value> = read_json(url, response)?;
        envelope.into_optional().map(|_| ()).map_err(|e| {
            tracing::error!(%url, error = %e, "backend rejected request");
            ClientError::from(e)
        })
    }
}

fn transport(url: &str, e: ureq::Error) -> ClientError {
    tracing::error!(%url, error = %e, "request failed");
    ClientError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    }
}

fn read_json<T: DeserializeOwned>(url: &str, mut response: Response<Body>) -> Result<T, ClientError> {
    let status = response.status();
    let text = response
        .body_mut()
        .read_to_string()
        .map_err(|e| transport(url, e))?;

    if !status.is_success() {
        let message = error_message(&text)
            .unwrap_or_else(|| format!("API error: {}", status.as_u16()));
        tracing::error!(%url, status = status.as_u16(), %message, "backend returned error status");
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|source| {
        tracing::error!(%url, error = %source, "undecodable response");
        ClientError::Decode {
            url: url.to_string(),
            source,
        }
    })
}

/// The backend reports failures as `{"error": ...}` or `{"message": ...}`.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key)?.as_str().map(str::to_string))
}
