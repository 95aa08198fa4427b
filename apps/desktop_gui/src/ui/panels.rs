//! Panels drawn by the claim checker window.

use chrono::{DateTime, Local};
use client_core::ResultView;
use eframe::egui;
use shared::domain::ClientVariant;

use crate::controller::reducer::{AppState, ServiceHealth};
use crate::media::human_readable_bytes;
use crate::ui::theme::{error_palette, severity_palette, PanelPalette};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimInputAction {
    None,
    PickImage,
    Submit,
}

fn framed(ui: &mut egui::Ui, palette: PanelPalette, add: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::new()
        .fill(palette.fill)
        .stroke(egui::Stroke::new(1.0, palette.stroke))
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add(ui);
        });
}

pub fn show_header(ui: &mut egui::Ui, state: &AppState, endpoint: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("🩺").size(26.0));
        ui.vertical(|ui| {
            ui.heading("Veritas Health");
            ui.weak("Check a health claim against the analysis service.");
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let (dot, text) = match &state.service {
                ServiceHealth::Unknown => (egui::Color32::GRAY, "checking service".to_string()),
                ServiceHealth::Online(_) => (egui::Color32::from_rgb(90, 200, 120), "online".to_string()),
                ServiceHealth::Offline(_) => (egui::Color32::from_rgb(230, 110, 110), "offline".to_string()),
            };
            let hover = match &state.service {
                ServiceHealth::Online(message) | ServiceHealth::Offline(message) => {
                    format!("{endpoint}\n{message}")
                }
                ServiceHealth::Unknown => endpoint.to_string(),
            };
            ui.label(egui::RichText::new(text).small().weak())
                .on_hover_text(hover);
            ui.label(egui::RichText::new("●").color(dot));
        });
    });
}

pub fn show_claim_input(
    ui: &mut egui::Ui,
    state: &mut AppState,
    preview: Option<&egui::TextureHandle>,
) -> ClaimInputAction {
    let mut action = ClaimInputAction::None;
    let in_flight = state.submission.is_in_flight();
    let variant = state.submission.variant();

    ui.label(egui::RichText::new("Claim").strong());
    let edit = egui::TextEdit::multiline(state.submission.claim_text_mut())
        .hint_text("e.g. Drinking lemon water cures cancer")
        .desired_rows(5)
        .desired_width(f32::INFINITY);
    let response = ui.add_enabled(!in_flight, edit);
    let submit_shortcut = response.has_focus()
        && ui.input(|i| i.key_pressed(egui::Key::Enter) && i.modifiers.command);

    if variant.supports_images() {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!in_flight, egui::Button::new("📷 Attach image…"))
                .clicked()
            {
                action = ClaimInputAction::PickImage;
            }
            if let Some(image) = state.submission.image() {
                let name = image.file_name().unwrap_or("image");
                ui.weak(format!(
                    "{name} · {} · {}",
                    image.mime_type(),
                    human_readable_bytes(image.byte_len() as u64)
                ));
            }
        });
        if let Some(texture) = preview {
            ui.add(
                egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                    .max_width(240.0)
                    .max_height(180.0),
            );
        }
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        let label = egui::RichText::new(state.submission.submit_label())
            .strong()
            .size(16.0);
        let button = egui::Button::new(label).min_size(egui::vec2(160.0, 36.0));
        if ui.add_enabled(!in_flight, button).clicked() || (submit_shortcut && !in_flight) {
            action = ClaimInputAction::Submit;
        }
        if in_flight {
            ui.spinner();
        }
    });

    action
}

/// Draws the verdict card. Returns `true` when "Copy report" was clicked.
pub fn show_result_panel(
    ui: &mut egui::Ui,
    view: &ResultView,
    completed_at: Option<DateTime<Local>>,
) -> bool {
    let palette = severity_palette(view.severity);
    let mut copy_clicked = false;
    framed(ui, palette, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(view.severity.icon()).size(22.0));
            ui.label(
                egui::RichText::new(view.verdict.as_str())
                    .strong()
                    .size(22.0)
                    .color(palette.accent),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(view.confidence_label()).strong());
            });
        });
        ui.add(
            egui::ProgressBar::new(view.confidence_percent as f32 / 100.0)
                .desired_height(6.0)
                .fill(palette.stroke),
        );

        ui.add_space(8.0);
        ui.label(egui::RichText::new("Explanation").strong());
        ui.label(view.explanation.as_str());

        if let Some(corrective) = &view.corrective_information {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Corrective information").strong());
            ui.label(corrective.as_str());
        }

        if !view.sources.is_empty() {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Sources").strong());
            for source in &view.sources {
                ui.horizontal_wrapped(|ui| {
                    ui.label("•");
                    if source.starts_with("http://") || source.starts_with("https://") {
                        ui.hyperlink_to(source.as_str(), source.as_str());
                    } else {
                        ui.label(source.as_str());
                    }
                });
            }
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.small_button("Copy report").clicked() {
                copy_clicked = true;
            }
            if let Some(at) = completed_at {
                ui.weak(format!("Checked at {}", at.format("%H:%M:%S")));
            }
        });
    });
    copy_clicked
}

pub fn show_error_panel(ui: &mut egui::Ui, message: &str) {
    framed(ui, error_palette(), |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("⚠").color(egui::Color32::WHITE));
            ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
        });
    });
}

/// Blocking notice used by the basic variant. Returns `true` once dismissed.
pub fn show_alert_modal(ctx: &egui::Context, message: &str) -> bool {
    let mut dismissed = false;
    let modal = egui::Modal::new(egui::Id::new("submission_alert")).show(ctx, |ui| {
        ui.set_max_width(360.0);
        ui.heading("Notice");
        ui.add_space(6.0);
        ui.label(message);
        ui.add_space(10.0);
        if ui.button("OK").clicked() {
            dismissed = true;
        }
    });
    dismissed || modal.should_close()
}

pub fn show_status_line(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal_wrapped(|ui| {
        ui.small("Status:");
        ui.small(egui::RichText::new(state.status.as_str()).weak());
        if state.submission.variant() == ClientVariant::Basic {
            ui.small(egui::RichText::new("· basic mode").weak());
        }
    });
}
