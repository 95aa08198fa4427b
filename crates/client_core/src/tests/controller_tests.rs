use super::*;

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;

struct FakeAnalyzer {
    outcome: Result<AnalysisResult, AnalyzeError>,
    calls: AtomicUsize,
    requests: Mutex<Vec<AnalysisRequest>>,
}

impl FakeAnalyzer {
    fn ok(result: AnalysisResult) -> Self {
        Self::with_outcome(Ok(result))
    }

    fn failing(err: AnalyzeError) -> Self {
        Self::with_outcome(Err(err))
    }

    fn with_outcome(outcome: Result<AnalysisResult, AnalyzeError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClaimAnalyzer for FakeAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.outcome.clone()
    }
}

fn lemon_water_verdict() -> AnalysisResult {
    AnalysisResult {
        verdict: "False".to_string(),
        confidence: 0.95,
        explanation: "No evidence...".to_string(),
        corrective_information: None,
        sources: vec!["WHO".to_string()],
    }
}

fn png() -> EncodedImage {
    EncodedImage::from_bytes(b"png-bytes", "image/png")
}

fn assert_exclusive(controller: &SubmissionController) {
    let populated = [
        controller.result().is_some(),
        controller.error().is_some(),
        controller.alert().is_some(),
    ];
    assert!(populated.iter().filter(|set| **set).count() <= 1);
}

#[tokio::test]
async fn empty_claim_without_image_makes_no_call() {
    for variant in [ClientVariant::Basic, ClientVariant::Hardened] {
        let analyzer = FakeAnalyzer::ok(lemon_water_verdict());
        let mut controller = SubmissionController::new(variant);

        let outcome = controller.analyze(&analyzer).await;

        assert_eq!(outcome, SubmissionOutcome::Refused);
        assert_eq!(analyzer.calls(), 0);
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert!(controller.result().is_none());
        assert!(controller.error().is_none());
        assert_eq!(controller.submit_label(), SUBMIT_LABEL_IDLE);
    }
}

#[tokio::test]
async fn false_verdict_scenario_populates_result() {
    let analyzer = FakeAnalyzer::ok(lemon_water_verdict());
    let mut controller = SubmissionController::new(ClientVariant::Hardened);
    controller.set_claim_text("Drinking lemon water cures cancer");

    let outcome = controller.analyze(&analyzer).await;

    assert_eq!(outcome, SubmissionOutcome::Succeeded);
    assert_eq!(analyzer.calls(), 1);
    assert!(!controller.is_in_flight());
    let view = crate::render::ResultView::from_result(controller.result().expect("result"));
    assert_eq!(view.severity, crate::render::Severity::Danger);
    assert_eq!(view.confidence_percent, 95);
    assert_eq!(view.sources.len(), 1);
    assert_exclusive(&controller);
}

#[tokio::test]
async fn unreachable_service_sets_connectivity_message() {
    let analyzer = FakeAnalyzer::failing(AnalyzeError::Connect("connection refused".to_string()));
    let mut controller = SubmissionController::new(ClientVariant::Hardened);
    controller.set_claim_text("Garlic replaces antibiotics");

    let outcome = controller.analyze(&analyzer).await;

    assert!(matches!(outcome, SubmissionOutcome::Failed(AnalyzeError::Connect(_))));
    assert_eq!(controller.error(), Some(crate::error::CONNECTIVITY_MESSAGE));
    assert!(controller.result().is_none());
    assert!(!controller.is_in_flight());
}

#[tokio::test]
async fn timeout_sets_timeout_message_not_connectivity() {
    let analyzer = FakeAnalyzer::failing(AnalyzeError::Timeout(Duration::from_secs(120)));
    let mut controller = SubmissionController::new(ClientVariant::Hardened);
    controller.set_claim_text("x");

    controller.analyze(&analyzer).await;

    let error = controller.error().expect("error");
    assert!(error.contains("timed out"));
    assert_ne!(error, crate::error::CONNECTIVITY_MESSAGE);
    assert!(!controller.is_in_flight());
}

#[tokio::test]
async fn server_error_status_is_embedded() {
    let analyzer = FakeAnalyzer::failing(AnalyzeError::HttpStatus {
        status: 500,
        detail: None,
    });
    let mut controller = SubmissionController::new(ClientVariant::Hardened);
    controller.set_claim_text("x");

    controller.analyze(&analyzer).await;

    assert!(controller.error().expect("error").contains("500"));
    assert!(controller.result().is_none());
}

#[tokio::test]
async fn basic_variant_raises_alert_instead_of_error_panel() {
    let analyzer = FakeAnalyzer::failing(AnalyzeError::Connect("refused".to_string()));
    let mut controller = SubmissionController::new(ClientVariant::Basic);
    controller.set_claim_text("x");

    controller.analyze(&analyzer).await;

    assert_eq!(controller.alert(), Some(crate::error::BASIC_ALERT_MESSAGE));
    assert!(controller.error().is_none());
    controller.dismiss_alert();
    assert!(controller.alert().is_none());
}

#[test]
fn loading_flag_spans_the_request_and_clears_on_completion() {
    let mut controller = SubmissionController::new(ClientVariant::Hardened);
    controller.set_claim_text("x");

    let ticket = controller.begin_submission().expect("accepted");
    assert_eq!(controller.state(), SubmissionState::InFlight(ticket.id));
    assert_eq!(controller.submit_label(), SUBMIT_LABEL_BUSY);
    assert!(!controller.can_submit());
    assert!(controller.begin_submission().is_none(), "no overlapping submissions");

    assert!(controller.complete_submission(
        ticket.id,
        Err(AnalyzeError::MalformedResponse("eof".to_string()))
    ));
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.submit_label(), SUBMIT_LABEL_IDLE);
}

#[test]
fn new_submission_clears_previous_outcome() {
    let mut controller = SubmissionController::new(ClientVariant::Hardened);
    controller.set_claim_text("x");

    let first = controller.begin_submission().expect("first");
    controller.complete_submission(first.id, Err(AnalyzeError::Connect("down".to_string())));
    assert!(controller.error().is_some());

    let second = controller.begin_submission().expect("second");
    assert!(controller.error().is_none());
    assert!(controller.result().is_none());

    controller.complete_submission(second.id, Ok(lemon_water_verdict()));
    assert!(controller.result().is_some());
    assert_exclusive(&controller);
    assert_eq!(controller.claim_text(), "x", "claim text persists");
}

#[test]
fn stale_outcome_is_ignored() {
    let mut controller = SubmissionController::new(ClientVariant::Hardened);
    controller.set_claim_text("x");
    let first = controller.begin_submission().expect("first");
    controller.complete_submission(first.id, Ok(lemon_water_verdict()));
    let second = controller.begin_submission().expect("second");

    assert!(!controller.complete_submission(first.id, Ok(lemon_water_verdict())));
    assert_eq!(controller.state(), SubmissionState::InFlight(second.id));
    assert!(controller.result().is_none());
}

#[test]
fn basic_variant_accepts_image_only_submission() {
    let mut controller = SubmissionController::new(ClientVariant::Basic);
    controller.attach_image(png());
    controller.set_claim_text("");

    let ticket = controller.begin_submission().expect("image alone is enough");
    assert_eq!(ticket.request.text, "");
    assert_eq!(
        ticket.request.image_base64.as_deref(),
        Some(png().data_uri())
    );
}

#[test]
fn hardened_variant_requires_text_and_drops_image() {
    let mut controller = SubmissionController::new(ClientVariant::Hardened);
    controller.attach_image(png());
    assert!(controller.image().is_none());
    assert_eq!(controller.claim_text(), "");
    assert!(controller.begin_submission().is_none());
    assert!(!controller.is_in_flight());

    controller.set_claim_text("Label says it detoxes the liver");
    let ticket = controller.begin_submission().expect("text present");
    assert_eq!(ticket.request.image_base64, None);
}

#[test]
fn attaching_image_seeds_placeholder_only_when_claim_is_empty() {
    let mut controller = SubmissionController::new(ClientVariant::Basic);
    controller.attach_image(png());
    assert_eq!(controller.claim_text(), IMAGE_PLACEHOLDER_TEXT);

    let mut typed = SubmissionController::new(ClientVariant::Basic);
    typed.set_claim_text("my own words");
    typed.attach_image(png());
    assert_eq!(typed.claim_text(), "my own words");
}

#[tokio::test]
async fn hardened_image_only_submission_makes_no_call() {
    let analyzer = FakeAnalyzer::ok(lemon_water_verdict());
    let mut controller = SubmissionController::new(ClientVariant::Hardened);
    controller.attach_image(png());

    let outcome = controller.analyze(&analyzer).await;

    assert_eq!(outcome, SubmissionOutcome::Refused);
    assert_eq!(analyzer.calls(), 0);
    assert!(controller.result().is_none());
    assert!(controller.error().is_none());
}

#[tokio::test]
async fn each_accepted_submit_makes_exactly_one_call() {
    let analyzer = FakeAnalyzer::ok(lemon_water_verdict());
    let mut controller = SubmissionController::new(ClientVariant::Basic);
    controller.set_claim_text("a");

    controller.analyze(&analyzer).await;
    controller.analyze(&analyzer).await;

    assert_eq!(analyzer.calls(), 2);
    let requests = analyzer.requests.lock().expect("requests lock");
    assert!(requests.iter().all(|req| req.text == "a"));
}
