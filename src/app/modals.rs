//! Modal dialogs (blocking alerts, export settings)

use super::App;
use crate::theme;
use crate::types::ExportPolicy;
use crate::ui::components::icon_label;
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AlertKind {
    Info,
    Success,
    Warning,
    Error,
}

impl AlertKind {
    fn icon(self) -> &'static str {
        match self {
            AlertKind::Info => egui_phosphor::regular::INFO,
            AlertKind::Success => egui_phosphor::regular::CHECK_CIRCLE,
            AlertKind::Warning => egui_phosphor::regular::WARNING,
            AlertKind::Error => egui_phosphor::regular::X_CIRCLE,
        }
    }

    fn color(self) -> egui::Color32 {
        match self {
            AlertKind::Info => theme::ACCENT,
            AlertKind::Success => theme::STATUS_SUCCESS,
            AlertKind::Warning => theme::STATUS_WARNING,
            AlertKind::Error => theme::STATUS_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Alert {
    pub kind: AlertKind,
    pub message: String,
    /// Write the dataset to the export folder once this alert is dismissed
    pub export_on_dismiss: bool,
}

impl App {
    /// Front alert of the queue; OK, Enter or Escape dismisses it.
    pub(crate) fn render_alert_modal(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.alerts.front().cloned() else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("alert_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(160))
            .frame(theme::modal_frame());
        let modal_response = modal.show(ctx, |ui| {
            ui.set_min_width(theme::MODAL_WIDTH);
            ui.set_max_width(theme::MODAL_WIDTH);
            let mut dismissed = false;
            ui.vertical_centered(|ui| {
                ui.add_space(theme::SPACING_SM);
                ui.label(egui::RichText::new(alert.kind.icon()).size(36.0).color(alert.kind.color()));
                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new(&alert.message).size(theme::FONT_BODY).color(theme::TEXT_PRIMARY));
                ui.add_space(theme::SPACING_XL);
                let ok = ui.add(theme::button_accent(icon_label(egui_phosphor::regular::CHECK, "OK")));
                dismissed = ok.clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter));
            });
            dismissed
        });

        if modal_response.inner || modal_response.should_close() {
            self.dismiss_alert();
        }
    }

    pub(crate) fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings || !self.alerts.is_empty() {
            return;
        }

        let modal = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame());
        let modal_response = modal.show(ctx, |ui| {
            ui.set_width(theme::MODAL_WIDTH);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Settings").size(theme::FONT_HEADING).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(egui::Button::new(egui_phosphor::regular::X).frame(false)).clicked() {
                        self.show_settings = false;
                    }
                });
            });
            ui.add_space(theme::SPACING_MD);

            ui.label(egui::RichText::new("EXPORT FOLDER").size(theme::FONT_SMALL).color(theme::TEXT_DIM));
            let path_committed = ui
                .horizontal(|ui| {
                    let te = ui.add(
                        egui::TextEdit::singleline(&mut self.export_dir_str)
                            .desired_width(theme::MODAL_WIDTH - 44.0),
                    );
                    if ui.add(theme::button(egui_phosphor::regular::FOLDER_OPEN)).clicked() {
                        self.browse_export_dir();
                    }
                    te.lost_focus()
                })
                .inner;
            if path_committed && self.export_dir_str.trim() != self.export_dir.to_string_lossy() {
                let path = std::path::PathBuf::from(self.export_dir_str.trim());
                self.set_export_dir(path);
            }

            ui.add_space(theme::SPACING_LG);
            ui.label(egui::RichText::new("AUTOMATIC EXPORT").size(theme::FONT_SMALL).color(theme::TEXT_DIM));
            let mut once = self.session.export_policy() == ExportPolicy::Once;
            if theme::segmented_toggle(
                ui,
                ExportPolicy::Once.label(),
                ExportPolicy::EverySave.label(),
                &mut once,
            ) {
                let policy = if once { ExportPolicy::Once } else { ExportPolicy::EverySave };
                self.set_export_policy(policy);
            }
            ui.add_space(theme::SPACING_SM);
            let hint = format!(
                "Writes dataset.json when {} samples are collected.",
                self.session.target_count()
            );
            ui.label(egui::RichText::new(hint).size(theme::FONT_SMALL).color(theme::TEXT_MUTED));
        });

        if modal_response.should_close() {
            self.show_settings = false;
        }
    }
}
