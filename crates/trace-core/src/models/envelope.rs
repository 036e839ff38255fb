use serde::Deserialize;

use crate::error::CoreError;

/// The `{success, data, error}` wrapper most backend routes respond with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning `success: false` into [`CoreError::Rejected`].
    pub fn into_data(self) -> Result<T, CoreError> {
        self.into_optional()?
            .ok_or_else(|| CoreError::MissingField("data".to_string()))
    }

    /// Like [`ApiEnvelope::into_data`] for routes that may omit `data`.
    pub fn into_optional(self) -> Result<Option<T>, CoreError> {
        if !self.success {
            return Err(CoreError::Rejected(
                self.error
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        Ok(self.data)
    }
}
