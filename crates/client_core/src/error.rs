use std::time::Duration;

use shared::domain::ClientVariant;
use thiserror::Error;

/// Fixed notice shown by the basic variant for every failed submission.
pub const BASIC_ALERT_MESSAGE: &str =
    "Error connecting to the analysis server. Make sure the backend is running.";

/// Inline message for transport failures that are not timeouts.
pub const CONNECTIVITY_MESSAGE: &str =
    "Failed to connect to the analysis service. Check that it is running and try again.";

pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "The analysis service returned a response that could not be read.";

/// Failure of a single analysis round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error("analysis request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("failed to connect to analysis service: {0}")]
    Connect(String),
    #[error("analysis service responded with HTTP {status}{}", detail_suffix(.detail))]
    HttpStatus { status: u16, detail: Option<String> },
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) if !detail.trim().is_empty() => format!(": {detail}"),
        _ => String::new(),
    }
}

impl AnalyzeError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, AnalyzeError::Timeout(_))
    }

    /// Text surfaced to the user for this failure under `variant`.
    pub fn user_message(&self, variant: ClientVariant) -> String {
        if variant == ClientVariant::Basic {
            return BASIC_ALERT_MESSAGE.to_string();
        }
        match self {
            AnalyzeError::Timeout(limit) => format!(
                "The analysis timed out after {} seconds. The service may be busy; please try again.",
                limit.as_secs()
            ),
            AnalyzeError::Connect(_) => CONNECTIVITY_MESSAGE.to_string(),
            AnalyzeError::HttpStatus { status, detail } => format!(
                "Analysis failed: the server responded with status {status}{}",
                detail_suffix(detail)
            ),
            AnalyzeError::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE.to_string(),
        }
    }
}
