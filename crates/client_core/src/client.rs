use std::{
    future::Future,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::ClientVariant,
    error::ServiceErrorBody,
    protocol::{AnalysisRequest, AnalysisResult, ServiceStatus},
};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    config::{Settings, SettingsError},
    error::AnalyzeError,
};

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// One analysis round trip. The controller only depends on this seam.
#[async_trait]
pub trait ClaimAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError>;
}

/// HTTP client for the analysis service.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: Client,
    endpoint: Url,
    variant: ClientVariant,
    timeout: Option<Duration>,
}

impl AnalysisClient {
    pub fn new(endpoint: Url, variant: ClientVariant) -> Self {
        let timeout = variant
            .enforces_timeout()
            .then_some(Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECONDS));
        Self {
            http: Client::new(),
            endpoint,
            variant,
            timeout,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        let endpoint = settings.endpoint_url()?;
        Ok(Self::new(endpoint, settings.variant).with_timeout(settings.timeout()))
    }

    /// Overrides the wait limit. The basic variant never applies one.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = if self.variant.enforces_timeout() {
            timeout
        } else {
            None
        };
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn variant(&self) -> ClientVariant {
        self.variant
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Checks that the service answers on its root route.
    pub async fn probe(&self) -> Result<ServiceStatus, AnalyzeError> {
        let root = self
            .endpoint
            .join("/")
            .map_err(|err| AnalyzeError::Connect(err.to_string()))?;
        bounded_wait(Some(PROBE_TIMEOUT), async {
            let response = self
                .http
                .get(root)
                .send()
                .await
                .map_err(|err| AnalyzeError::Connect(err.to_string()))?;
            let status = response.status();
            let body = response
                .bytes()
                .await
                .map_err(|err| AnalyzeError::Connect(err.to_string()))?;
            if !status.is_success() {
                return Err(status_error(status, &body));
            }
            serde_json::from_slice::<ServiceStatus>(&body)
                .map_err(|err| AnalyzeError::MalformedResponse(err.to_string()))
        })
        .await
    }

    async fn post_claim(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| AnalyzeError::Connect(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| AnalyzeError::Connect(err.to_string()))?;

        if !status.is_success() {
            if self.variant.rejects_error_status() {
                return Err(status_error(status, &body));
            }
            warn!(
                status = status.as_u16(),
                "non-success status; decoding body as a result"
            );
        }

        serde_json::from_slice::<AnalysisResult>(&body)
            .map_err(|err| AnalyzeError::MalformedResponse(err.to_string()))
    }
}

#[async_trait]
impl ClaimAnalyzer for AnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
        let started = Instant::now();
        debug!(
            endpoint = %self.endpoint,
            variant = %self.variant,
            text_len = request.text.len(),
            has_image = request.image_base64.is_some(),
            "sending analysis request"
        );

        let outcome = bounded_wait(self.timeout, self.post_claim(request)).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(result) => info!(elapsed_ms, verdict = %result.verdict, "analysis completed"),
            Err(err) => warn!(elapsed_ms, "analysis failed: {err}"),
        }
        outcome
    }
}

/// Awaits `fut`, dropping it once `limit` elapses.
pub async fn bounded_wait<T, F>(limit: Option<Duration>, fut: F) -> Result<T, AnalyzeError>
where
    F: Future<Output = Result<T, AnalyzeError>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| AnalyzeError::Timeout(limit))?,
        None => fut.await,
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> AnalyzeError {
    let detail = serde_json::from_slice::<ServiceErrorBody>(body)
        .ok()
        .map(|body| body.detail_text());
    AnalyzeError::HttpStatus {
        status: status.as_u16(),
        detail,
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
