use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("backend rejected request: {0}")]
    Rejected(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("unknown template kind: {0}")]
    UnknownTemplateKind(String),
}
