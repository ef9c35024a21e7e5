use bevy_egui::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
pub const MUTED: egui::Color32 = egui::Color32::from_rgb(120, 120, 140);
pub const ERROR: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
pub const OCCUPIED: egui::Color32 = egui::Color32::from_rgb(210, 180, 140);
pub const EMPTY: egui::Color32 = egui::Color32::from_rgb(229, 231, 235);

pub fn panel_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 220))
        .inner_margin(egui::Margin::same(12))
}

pub fn apply_panel_style(ui: &mut egui::Ui) {
    ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
    ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));
}

pub fn heading(ui: &mut egui::Ui, text: impl Into<String>) {
    ui.label(egui::RichText::new(text).size(16.0).color(ACCENT));
}

pub fn hint(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).size(11.0).color(MUTED));
}
