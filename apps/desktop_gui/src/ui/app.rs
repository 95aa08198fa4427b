use std::time::Duration;

use arboard::Clipboard;
use client_core::{render_text_report, ResultView};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::{
    dispatch_backend_command, request_image_encoding, submit_claim,
};
use crate::controller::reducer::{apply_event, AppState};
use crate::ui::panels::{self, ClaimInputAction};

const MAX_EVENTS_PER_FRAME: usize = 64;
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

pub struct ClaimCheckerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: AppState,
    endpoint_label: String,
    preview_texture: Option<TextureHandle>,
    preview_revision: u64,
}

impl ClaimCheckerApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        state: AppState,
        endpoint_label: String,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state,
            endpoint_label,
            preview_texture: None,
            preview_revision: 0,
        };
        dispatch_backend_command(
            &app.cmd_tx,
            BackendCommand::ProbeService,
            &mut app.state.status,
        );
        app
    }

    fn process_ui_events(&mut self) {
        for event in self.ui_rx.try_iter().take(MAX_EVENTS_PER_FRAME) {
            apply_event(&mut self.state, event);
        }
    }

    fn sync_preview_texture(&mut self, ctx: &egui::Context) {
        if self.preview_revision == self.state.preview_revision {
            return;
        }
        self.preview_revision = self.state.preview_revision;
        self.preview_texture = self.state.image_preview.as_ref().map(|preview| {
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [preview.width, preview.height],
                &preview.rgba,
            );
            ctx.load_texture(
                format!("claim-image:{}", self.preview_revision),
                color_image,
                egui::TextureOptions::LINEAR,
            )
        });
    }

    fn pick_image(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        request_image_encoding(&mut self.state, &self.cmd_tx, path);
    }

    fn copy_report(&mut self, report: String) {
        let copied = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(report));
        self.state.status = match copied {
            Ok(()) => "Copied report to clipboard".to_string(),
            Err(err) => format!("Failed to copy report: {err}"),
        };
    }

    fn show_main_panel(&mut self, ctx: &egui::Context) {
        let mut action = ClaimInputAction::None;
        let mut copy_report = None;

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            panels::show_status_line(ui, &self.state);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.set_max_width(720.0);
                    panels::show_header(ui, &self.state, &self.endpoint_label);
                    ui.separator();

                    action = panels::show_claim_input(
                        ui,
                        &mut self.state,
                        self.preview_texture.as_ref(),
                    );

                    ui.add_space(12.0);
                    if let Some(message) = self.state.submission.error() {
                        panels::show_error_panel(ui, message);
                    }
                    if let Some(result) = self.state.submission.result() {
                        let view = ResultView::from_result(result);
                        if panels::show_result_panel(ui, &view, self.state.last_completed_at) {
                            copy_report = Some(render_text_report(&view));
                        }
                    }
                });
        });

        match action {
            ClaimInputAction::None => {}
            ClaimInputAction::PickImage => self.pick_image(),
            ClaimInputAction::Submit => {
                submit_claim(&mut self.state, &self.cmd_tx);
            }
        }
        if let Some(report) = copy_report {
            self.copy_report(report);
        }
    }
}

impl eframe::App for ClaimCheckerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.sync_preview_texture(ctx);

        self.show_main_panel(ctx);

        let alert = self.state.submission.alert().map(str::to_string);
        if let Some(message) = alert {
            if panels::show_alert_modal(ctx, &message) {
                self.state.submission.dismiss_alert();
            }
        }

        if self.state.submission.is_in_flight() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
