//! Claim submission state: input, the single in-flight request, and the last
//! outcome. Transitions are plain methods so front ends and tests drive them
//! the same way.

use shared::{
    domain::{ClientVariant, SubmissionId},
    protocol::{AnalysisRequest, AnalysisResult},
};
use tracing::{debug, info};

use crate::{client::ClaimAnalyzer, error::AnalyzeError, image::EncodedImage};

/// Seeded into an empty claim when an image finishes encoding.
pub const IMAGE_PLACEHOLDER_TEXT: &str = "Image uploaded";
pub const SUBMIT_LABEL_IDLE: &str = "Verify Claim";
pub const SUBMIT_LABEL_BUSY: &str = "Analyzing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight(SubmissionId),
}

/// A request accepted by [`SubmissionController::begin_submission`].
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionTicket {
    pub id: SubmissionId,
    pub request: AnalysisRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Refused,
    Succeeded,
    Failed(AnalyzeError),
}

#[derive(Debug, Clone)]
pub struct SubmissionController {
    variant: ClientVariant,
    claim_text: String,
    image: Option<EncodedImage>,
    state: SubmissionState,
    result: Option<AnalysisResult>,
    error: Option<String>,
    alert: Option<String>,
    last_id: SubmissionId,
}

impl SubmissionController {
    pub fn new(variant: ClientVariant) -> Self {
        Self {
            variant,
            claim_text: String::new(),
            image: None,
            state: SubmissionState::Idle,
            result: None,
            error: None,
            alert: None,
            last_id: SubmissionId(0),
        }
    }

    pub fn variant(&self) -> ClientVariant {
        self.variant
    }

    pub fn claim_text(&self) -> &str {
        &self.claim_text
    }

    /// Editable claim buffer for text widgets.
    pub fn claim_text_mut(&mut self) -> &mut String {
        &mut self.claim_text
    }

    pub fn set_claim_text(&mut self, text: impl Into<String>) {
        self.claim_text = text.into();
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        self.image.as_ref()
    }

    /// Attaches an encoded image. Variants without image support ignore it, so
    /// the placeholder text never stands in for a missing claim.
    pub fn attach_image(&mut self, image: EncodedImage) {
        if !self.variant.supports_images() {
            debug!(variant = %self.variant, "ignoring image for variant without image support");
            return;
        }
        debug!(bytes = image.byte_len(), "image attached to claim");
        self.image = Some(image);
        if self.claim_text.is_empty() {
            self.claim_text = IMAGE_PLACEHOLDER_TEXT.to_string();
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, SubmissionState::InFlight(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn has_input(&self) -> bool {
        match self.variant {
            ClientVariant::Basic => !self.claim_text.is_empty() || self.image.is_some(),
            ClientVariant::Hardened => !self.claim_text.is_empty(),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.is_in_flight() && self.has_input()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_in_flight() {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL_IDLE
        }
    }

    /// Starts a submission, or returns `None` without touching any state when
    /// there is nothing to send or a request is already outstanding.
    pub fn begin_submission(&mut self) -> Option<SubmissionTicket> {
        if !self.can_submit() {
            return None;
        }

        let id = self.last_id.next();
        self.last_id = id;
        self.state = SubmissionState::InFlight(id);
        self.result = None;
        self.error = None;
        self.alert = None;

        let image_base64 = if self.variant.supports_images() {
            self.image.as_ref().map(|image| image.data_uri().to_string())
        } else {
            None
        };
        info!(submission_id = id.0, variant = %self.variant, "submission started");
        Some(SubmissionTicket {
            id,
            request: AnalysisRequest {
                text: self.claim_text.clone(),
                image_base64,
            },
        })
    }

    /// Applies the outcome of submission `id`. Returns `false` when `id` is not
    /// the outstanding submission, in which case nothing changes.
    pub fn complete_submission(
        &mut self,
        id: SubmissionId,
        outcome: Result<AnalysisResult, AnalyzeError>,
    ) -> bool {
        if self.state != SubmissionState::InFlight(id) {
            debug!(submission_id = id.0, "ignoring stale submission outcome");
            return false;
        }

        self.state = SubmissionState::Idle;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
                self.alert = None;
            }
            Err(err) => {
                let message = err.user_message(self.variant);
                self.result = None;
                match self.variant {
                    ClientVariant::Basic => self.alert = Some(message),
                    ClientVariant::Hardened => self.error = Some(message),
                }
            }
        }
        true
    }

    /// Runs one full submission against `analyzer`.
    pub async fn analyze(&mut self, analyzer: &dyn ClaimAnalyzer) -> SubmissionOutcome {
        let Some(ticket) = self.begin_submission() else {
            return SubmissionOutcome::Refused;
        };
        let outcome = analyzer.analyze(&ticket.request).await;
        let reported = match &outcome {
            Ok(_) => SubmissionOutcome::Succeeded,
            Err(err) => SubmissionOutcome::Failed(err.clone()),
        };
        self.complete_submission(ticket.id, outcome);
        reported
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
