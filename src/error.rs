//! Error type for the analysis pipeline.

use thiserror::Error;

/// Everything that can go wrong during one analysis action.
///
/// Input problems are caught before any network activity. Anything the
/// remote side or the transport raises is a `RemoteFailure` carrying the
/// underlying message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    RemoteFailure(String),
}

impl AnalyzeError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AnalyzeError::InvalidInput(_))
    }

    /// Machine-readable kind for the JSON API.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzeError::InvalidInput(_) => "invalid_input",
            AnalyzeError::RemoteFailure(_) => "remote_failure",
        }
    }
}

impl From<reqwest::Error> for AnalyzeError {
    fn from(e: reqwest::Error) -> Self {
        AnalyzeError::RemoteFailure(e.to_string())
    }
}

impl From<serde_json::Error> for AnalyzeError {
    fn from(e: serde_json::Error) -> Self {
        AnalyzeError::RemoteFailure(format!("Failed to parse response: {}", e))
    }
}
