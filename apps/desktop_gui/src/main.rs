use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod media;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, AnalysisClient, Settings};
use crossbeam_channel::bounded;
use eframe::egui;
use shared::domain::ClientVariant;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::reducer::AppState;
use crate::ui::ClaimCheckerApp;

const WINDOW_TITLE: &str = "Veritas Health";

#[derive(Parser, Debug)]
#[command(name = "veritas-gui", version, about = "Desktop claim checker for the Veritas analysis service")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    variant: Option<ClientVariant>,
    #[arg(long)]
    timeout_seconds: Option<u64>,
}

impl Args {
    fn resolve_settings(&self) -> Result<Settings> {
        let mut settings =
            load_settings(self.config.as_deref()).context("failed to load settings")?;
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(variant) = self.variant {
            settings.variant = variant;
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            settings.timeout_seconds = timeout_seconds;
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = args.resolve_settings()?;
    let client = AnalysisClient::from_settings(&settings)?;
    tracing::info!(
        endpoint = %client.endpoint(),
        variant = %settings.variant,
        timeout_seconds = client.timeout().map(|t| t.as_secs()),
        "starting desktop client"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let endpoint_label = client.endpoint().to_string();
    backend_bridge::runtime::launch(cmd_rx, ui_tx, client);

    let state = AppState::new(settings.variant);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ClaimCheckerApp::new(
                cmd_tx,
                ui_rx,
                state,
                endpoint_label,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop window failed: {err}"))
}
