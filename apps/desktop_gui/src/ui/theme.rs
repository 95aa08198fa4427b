use client_core::Severity;
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPalette {
    pub fill: egui::Color32,
    pub stroke: egui::Color32,
    pub accent: egui::Color32,
}

pub fn severity_palette(severity: Severity) -> PanelPalette {
    match severity {
        Severity::Success => PanelPalette {
            fill: egui::Color32::from_rgb(30, 70, 45),
            stroke: egui::Color32::from_rgb(76, 160, 104),
            accent: egui::Color32::from_rgb(120, 220, 150),
        },
        Severity::Danger => PanelPalette {
            fill: egui::Color32::from_rgb(111, 53, 53),
            stroke: egui::Color32::from_rgb(175, 96, 96),
            accent: egui::Color32::from_rgb(255, 140, 140),
        },
        Severity::Warning => PanelPalette {
            fill: egui::Color32::from_rgb(92, 74, 30),
            stroke: egui::Color32::from_rgb(180, 145, 60),
            accent: egui::Color32::from_rgb(250, 205, 100),
        },
    }
}

pub fn error_palette() -> PanelPalette {
    let danger = severity_palette(Severity::Danger);
    PanelPalette {
        fill: lighten_color(danger.fill, 0.05),
        ..danger
    }
}

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_severity_has_its_own_palette() {
        let success = severity_palette(Severity::Success);
        let danger = severity_palette(Severity::Danger);
        let warning = severity_palette(Severity::Warning);
        assert_ne!(success, danger);
        assert_ne!(danger, warning);
        assert_ne!(success, warning);
    }

    #[test]
    fn lighten_moves_channels_toward_white() {
        let c = egui::Color32::from_rgb(0, 100, 255);
        assert_eq!(lighten_color(c, 0.0), c);
        assert_eq!(lighten_color(c, 1.0), egui::Color32::from_rgb(255, 255, 255));
        assert_eq!(lighten_color(c, 0.5), egui::Color32::from_rgb(128, 178, 255));
    }
}
