//! Toast notification (bottom-right, 3s visible then fade, pause on hover)

use super::App;
use crate::theme;
use eframe::egui;

const VISIBLE_SECS: f32 = 3.0;
const FADE_SECS: f32 = 0.5;

/// Opacity of a toast `elapsed` seconds after it appeared
pub(crate) fn toast_alpha(elapsed: f32) -> f32 {
    if elapsed <= VISIBLE_SECS {
        1.0
    } else {
        ((VISIBLE_SECS + FADE_SECS - elapsed) / FADE_SECS).clamp(0.0, 1.0)
    }
}

impl App {
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let Some(msg) = self.toast_message.clone() else {
            return;
        };
        let margin = theme::SPACING_LG;
        let screen = ctx.screen_rect();
        let toast_pos = egui::pos2(
            screen.right() - margin,
            screen.bottom() - theme::STATUS_BAR_HEIGHT - margin,
        );

        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        let alpha = toast_alpha(elapsed);

        let response = egui::Area::new(egui::Id::new("export_toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0x1a, 0x1a, 0x1e, (230.0 * alpha) as u8))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(
                        theme::ACCENT.r(), theme::ACCENT.g(), theme::ACCENT.b(), (100.0 * alpha) as u8,
                    )))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(msg).color(
                            egui::Color32::from_rgba_unmultiplied(255, 255, 255, (255.0 * alpha) as u8),
                        ));
                    });
            });

        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        if elapsed >= VISIBLE_SECS + FADE_SECS {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_fades_after_visible_window() {
        assert_eq!(toast_alpha(0.0), 1.0);
        assert_eq!(toast_alpha(3.0), 1.0);
        assert!((toast_alpha(3.25) - 0.5).abs() < 1e-5);
        assert_eq!(toast_alpha(10.0), 0.0);
    }
}
