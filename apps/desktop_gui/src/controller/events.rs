//! UI/backend events and error modeling for the claim checker GUI.

use client_core::{AnalyzeError, EncodedImage};
use shared::{domain::SubmissionId, protocol::AnalysisResult};

use crate::media::PreviewImage;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    ImageEncoded {
        image: EncodedImage,
        preview: Option<PreviewImage>,
    },
    AnalysisFinished {
        id: SubmissionId,
        outcome: Result<AnalysisResult, AnalyzeError>,
    },
    ServiceStatus {
        online: bool,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Io,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    ImageCapture,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("failed to read")
            || message_lower.contains("no such file")
            || message_lower.contains("permission denied")
        {
            UiErrorCategory::Io
        } else if message_lower.contains("unsupported")
            || message_lower.contains("invalid")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connect")
            || message_lower.contains("disconnect")
            || message_lower.contains("unavailable")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status-line text, prefixed by where the failure happened.
    pub fn status_text(&self) -> String {
        let prefix = match self.context {
            UiErrorContext::BackendStartup => "Backend startup failed",
            UiErrorContext::ImageCapture => "Image could not be loaded",
        };
        format!("{prefix}: {}", self.message)
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Io => "File error",
        UiErrorCategory::Transport => "Transport error",
        UiErrorCategory::Validation => "Validation error",
        UiErrorCategory::Unknown => "Unexpected error",
    }
}
