//! Reusable UI components
//!
//! Standalone painters and widgets used by the capture screen.

use crate::theme;
use eframe::egui;

/// Button caption with a leading Phosphor icon
pub fn icon_label(icon: &str, label: &str) -> String {
    format!("{}  {}", icon, label)
}

/// "Samples collected: 12 / 100"
pub fn progress_text(count: usize, target: usize) -> String {
    format!("Samples collected: {} / {}", count, target)
}

/// Paint one grid cell. Hovered cells get an accent outline.
pub fn paint_cell(painter: &egui::Painter, rect: egui::Rect, painted: bool, hovered: bool) {
    let fill = if painted { theme::CELL_PAINTED } else { theme::CELL_EMPTY };
    painter.rect_filled(rect, theme::RADIUS_SMALL, fill);

    let stroke = if hovered {
        egui::Stroke::new(theme::STROKE_MEDIUM, theme::CELL_HOVER_BORDER)
    } else {
        egui::Stroke::new(theme::STROKE_DEFAULT, theme::CELL_BORDER)
    };
    painter.rect_stroke(rect, theme::RADIUS_SMALL, stroke, egui::StrokeKind::Inside);
}

/// Thin progress bar towards the target sample count
pub fn progress_bar(ui: &mut egui::Ui, count: usize, target: usize, width: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 4.0), egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, theme::RADIUS_SMALL, theme::BG_SURFACE);

    let fraction = if target == 0 { 1.0 } else { (count as f32 / target as f32).min(1.0) };
    if fraction > 0.0 {
        let mut filled = rect;
        filled.set_width(rect.width() * fraction);
        painter.rect_filled(filled, theme::RADIUS_SMALL, theme::ACCENT);
    }
}
