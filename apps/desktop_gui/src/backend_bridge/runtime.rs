//! Backend worker: owns a tokio runtime and turns queued commands into UI events.

use std::{path::Path, thread};

use anyhow::Context;
use client_core::{AnalysisClient, ClaimAnalyzer, EncodedImage};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::media::decode_preview_image;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, client: AnalysisClient) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let client = client.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(handle_command(cmd, client, ui_tx));
            }
            tracing::info!("ui command queue closed; backend worker stopping");
        });
    });
}

async fn handle_command(cmd: BackendCommand, client: AnalysisClient, ui_tx: Sender<UiEvent>) {
    match cmd {
        BackendCommand::Analyze { id, request } => {
            tracing::info!(submission_id = id.0, "backend: analyze");
            let outcome = client.analyze(&request).await;
            // The UI keeps its loading state until this event arrives.
            if !deliver_to_ui(ui_tx, UiEvent::AnalysisFinished { id, outcome }).await {
                tracing::warn!(submission_id = id.0, "ui gone before analysis finished");
            }
        }
        BackendCommand::EncodeImage { path } => {
            tracing::info!(path = %path.display(), "backend: encode_image");
            let event = match encode_with_preview(&path).await {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(path = %path.display(), "image encoding failed: {err:#}");
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::ImageCapture,
                        format!("{err:#}"),
                    ))
                }
            };
            let _ = ui_tx.try_send(event);
        }
        BackendCommand::ProbeService => {
            let event = match client.probe().await {
                Ok(status) => UiEvent::ServiceStatus {
                    online: true,
                    message: status.message,
                },
                Err(err) => {
                    tracing::debug!("service probe failed: {err}");
                    UiEvent::ServiceStatus {
                        online: false,
                        message: err.to_string(),
                    }
                }
            };
            let _ = ui_tx.try_send(event);
        }
    }
}

/// Waits for room on the UI queue off the runtime's worker threads.
async fn deliver_to_ui(ui_tx: Sender<UiEvent>, event: UiEvent) -> bool {
    match tokio::task::spawn_blocking(move || ui_tx.send(event).is_ok()).await {
        Ok(sent) => sent,
        Err(err) => {
            tracing::error!("ui delivery task failed: {err}");
            false
        }
    }
}

async fn encode_with_preview(path: &Path) -> anyhow::Result<UiEvent> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image '{}'", path.display()))?;
    let image = EncodedImage::from_file_bytes(path, &bytes);
    let preview = decode_preview_image(&bytes)
        .map_err(|err| tracing::debug!(path = %path.display(), "no preview: {err}"))
        .ok();
    Ok(UiEvent::ImageEncoded { image, preview })
}
