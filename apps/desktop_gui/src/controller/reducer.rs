//! Applies backend events to the GUI state.

use chrono::{DateTime, Local};
use client_core::SubmissionController;
use shared::domain::ClientVariant;

use crate::controller::events::{err_label, UiEvent};
use crate::media::{human_readable_bytes, PreviewImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceHealth {
    Unknown,
    Online(String),
    Offline(String),
}

pub struct AppState {
    pub submission: SubmissionController,
    pub status: String,
    pub service: ServiceHealth,
    pub image_preview: Option<PreviewImage>,
    /// Bumped whenever `image_preview` changes so the view can refresh its texture.
    pub preview_revision: u64,
    pub last_completed_at: Option<DateTime<Local>>,
}

impl AppState {
    pub fn new(variant: ClientVariant) -> Self {
        Self {
            submission: SubmissionController::new(variant),
            status: "Starting backend worker...".to_string(),
            service: ServiceHealth::Unknown,
            image_preview: None,
            preview_revision: 0,
            last_completed_at: None,
        }
    }
}

pub fn apply_event(state: &mut AppState, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            state.status = message;
        }
        UiEvent::Error(err) => {
            tracing::warn!(
                context = ?err.context(),
                category = err_label(err.category()),
                "{}",
                err.message()
            );
            state.status = err.status_text();
        }
        UiEvent::ImageEncoded { image, preview } => {
            state.status = match image.file_name() {
                Some(name) => format!(
                    "Image ready: {name} ({})",
                    human_readable_bytes(image.byte_len() as u64)
                ),
                None => "Image ready".to_string(),
            };
            state.submission.attach_image(image);
            state.image_preview = preview;
            state.preview_revision = state.preview_revision.wrapping_add(1);
        }
        UiEvent::AnalysisFinished { id, outcome } => {
            let succeeded = outcome.is_ok();
            if !state.submission.complete_submission(id, outcome) {
                return;
            }
            state.last_completed_at = Some(Local::now());
            state.status = if succeeded {
                "Analysis complete".to_string()
            } else {
                "Analysis failed".to_string()
            };
        }
        UiEvent::ServiceStatus { online, message } => {
            state.service = if online {
                ServiceHealth::Online(message)
            } else {
                ServiceHealth::Offline(message)
            };
        }
    }
}
