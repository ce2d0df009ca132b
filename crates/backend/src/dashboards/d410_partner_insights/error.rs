use thiserror::Error;

/// Errors of the partner insights endpoints
#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),

    #[error("Unknown link doctype: {0}")]
    UnknownLinkDoctype(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl InsightsError {
    /// Caller mistakes, as opposed to failures on our side
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            InsightsError::UnknownDocumentType(_) | InsightsError::UnknownLinkDoctype(_)
        )
    }
}
