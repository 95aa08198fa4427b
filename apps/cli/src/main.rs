use std::{path::PathBuf, process::ExitCode};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    encode_image_file, load_settings, render_text_report, AnalysisClient, ClaimAnalyzer,
    ResultView, Settings, SubmissionController, SubmissionOutcome,
};
use shared::domain::ClientVariant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "veritas", version, about = "Check a health claim against the Veritas analysis service")]
struct Args {
    /// Config file (defaults to ./veritas.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Analysis endpoint, e.g. http://localhost:8000/analyze
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Client behaviour: basic or hardened
    #[arg(long, global = true)]
    variant: Option<ClientVariant>,
    /// Request timeout for the hardened variant; 0 disables it
    #[arg(long, global = true)]
    timeout_seconds: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a claim and print the verdict
    Analyze {
        #[arg(long)]
        text: Option<String>,
        /// Image to embed in the request (basic variant only)
        #[arg(long)]
        image: Option<PathBuf>,
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether the analysis service is reachable
    Status,
}

fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(endpoint) = &args.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(variant) = args.variant {
        settings.variant = variant;
    }
    if let Some(timeout_seconds) = args.timeout_seconds {
        settings.timeout_seconds = timeout_seconds;
    }
    Ok(settings)
}

async fn run_analyze(
    variant: ClientVariant,
    analyzer: &dyn ClaimAnalyzer,
    text: Option<String>,
    image: Option<PathBuf>,
    json: bool,
) -> Result<ExitCode> {
    let mut controller = SubmissionController::new(variant);
    if let Some(text) = text {
        controller.set_claim_text(text);
    }
    if let Some(path) = image {
        if !variant.supports_images() {
            bail!("--image is not supported by the {variant} variant; use --variant basic");
        }
        controller.attach_image(encode_image_file(&path).await?);
    }

    match controller.analyze(analyzer).await {
        SubmissionOutcome::Refused => {
            let hint = if variant == ClientVariant::Basic {
                "--text or --image"
            } else {
                "--text"
            };
            bail!("nothing to analyze; provide {hint}");
        }
        SubmissionOutcome::Succeeded => {
            let result = controller
                .result()
                .context("submission succeeded without a result")?;
            let view = ResultView::from_result(result);
            tracing::debug!(severity = view.severity.label(), "rendering verdict");
            if json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                print!("{}", render_text_report(&view));
            }
            Ok(ExitCode::SUCCESS)
        }
        SubmissionOutcome::Failed(err) => {
            tracing::debug!("analysis error: {err}");
            let message = controller
                .error()
                .or(controller.alert())
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_status(client: &AnalysisClient) -> ExitCode {
    match client.probe().await {
        Ok(status) => {
            println!("online ({}): {}", client.endpoint(), status.message);
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("offline ({}): {err}", client.endpoint());
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = resolve_settings(&args)?;
    let client = AnalysisClient::from_settings(&settings)?;
    tracing::info!(
        endpoint = %client.endpoint(),
        variant = %settings.variant,
        timeout_seconds = client.timeout().map(|t| t.as_secs()),
        "client configured"
    );

    match args.command {
        Command::Analyze { text, image, json } => {
            run_analyze(settings.variant, &client, text, image, json).await
        }
        Command::Status => Ok(run_status(&client).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::{routing::get, Json, Router};
    use client_core::AnalyzeError;
    use shared::protocol::{AnalysisRequest, AnalysisResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;
    use url::Url;

    struct CannedAnalyzer {
        outcome: Result<AnalysisResult, AnalyzeError>,
        calls: AtomicUsize,
    }

    impl CannedAnalyzer {
        fn new(outcome: Result<AnalysisResult, AnalyzeError>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ClaimAnalyzer for CannedAnalyzer {
        async fn analyze(
            &self,
            _request: &AnalysisRequest,
        ) -> Result<AnalysisResult, AnalyzeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn false_verdict() -> AnalysisResult {
        AnalysisResult {
            verdict: "False".to_string(),
            confidence: 0.95,
            explanation: "No evidence...".to_string(),
            corrective_information: None,
            sources: vec!["WHO".to_string()],
        }
    }

    fn text(claim: &str) -> Option<String> {
        Some(claim.to_string())
    }

    async fn spawn_root_stub() -> Url {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let app = Router::new().route(
            "/",
            get(|| async { Json(serde_json::json!({ "message": "Veritas Health Agent API is running" })) }),
        );
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Url::parse(&format!("http://{addr}/analyze")).expect("url")
    }

    #[tokio::test]
    async fn verdict_exits_successfully() {
        let analyzer = CannedAnalyzer::new(Ok(false_verdict()));
        let code = run_analyze(
            ClientVariant::Hardened,
            &analyzer,
            text("Drinking lemon water cures cancer"),
            None,
            false,
        )
        .await
        .expect("analysis ran");
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_analysis_exits_with_failure() {
        for (variant, err) in [
            (
                ClientVariant::Hardened,
                AnalyzeError::HttpStatus {
                    status: 500,
                    detail: None,
                },
            ),
            (
                ClientVariant::Basic,
                AnalyzeError::Connect("connection refused".to_string()),
            ),
        ] {
            let analyzer = CannedAnalyzer::new(Err(err));
            let code = run_analyze(variant, &analyzer, text("x"), None, true)
                .await
                .expect("analysis ran");
            assert_eq!(code, ExitCode::FAILURE);
        }
    }

    #[tokio::test]
    async fn empty_claim_is_an_error_without_a_call() {
        let analyzer = CannedAnalyzer::new(Ok(false_verdict()));
        let err = run_analyze(ClientVariant::Hardened, &analyzer, None, None, false)
            .await
            .expect_err("nothing to analyze");
        assert!(err.to_string().contains("--text"));
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn hardened_variant_refuses_image_flag() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("label.png");
        std::fs::write(&path, b"png").expect("write image");
        let analyzer = CannedAnalyzer::new(Ok(false_verdict()));

        let err = run_analyze(ClientVariant::Hardened, &analyzer, None, Some(path), false)
            .await
            .expect_err("image needs basic variant");
        assert!(err.to_string().contains("--variant basic"));
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn status_reports_online_service() {
        let endpoint = spawn_root_stub().await;
        let client = AnalysisClient::new(endpoint, ClientVariant::Hardened);
        assert_eq!(run_status(&client).await, ExitCode::SUCCESS);
    }

    #[tokio::test]
    async fn status_reports_unreachable_service() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let endpoint = Url::parse(&format!("http://{addr}/analyze")).expect("url");
        let client = AnalysisClient::new(endpoint, ClientVariant::Hardened);
        assert_eq!(run_status(&client).await, ExitCode::FAILURE);
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "veritas",
            "analyze",
            "--text",
            "Lemon water cures cancer",
            "--variant",
            "basic",
            "--timeout-seconds",
            "5",
        ])
        .expect("parse");
        assert_eq!(args.variant, Some(ClientVariant::Basic));
        assert_eq!(args.timeout_seconds, Some(5));
        assert!(matches!(args.command, Command::Analyze { text: Some(_), .. }));
    }

    #[test]
    fn rejects_unknown_variant() {
        assert!(Args::try_parse_from(["veritas", "status", "--variant", "strict"]).is_err());
    }
}
