//! App module - contains the main application state and logic

mod canvas;
mod exporting;
mod modals;
mod toast;

use crate::session::CaptureSession;
use crate::settings::Settings;
use crate::theme;
use crate::types::ExportPolicy;
use eframe::egui;
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::{debug, warn};

pub(crate) use modals::{Alert, AlertKind};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) session: CaptureSession,
    // Export target
    pub(crate) export_dir: PathBuf,
    pub(crate) export_dir_str: String,
    pub(crate) last_export: Option<(PathBuf, chrono::DateTime<chrono::Local>)>,
    // Blocking alerts, shown one at a time in order
    pub(crate) alerts: VecDeque<Alert>,
    pub(crate) show_settings: bool,
    pub(crate) input_blocked: bool,
    pub(crate) focus_label: bool,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Window
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons as Proportional fallback
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self::with_settings(settings, data_dir)
    }

    /// State without any egui context attached
    pub(crate) fn with_settings(settings: Settings, data_dir: PathBuf) -> Self {
        let export_dir = settings.export_dir_or_default(&data_dir);
        debug!(export_dir = %export_dir.display(), policy = ?settings.export_policy, "Capture session ready");

        Self {
            session: CaptureSession::new(settings.export_policy),
            export_dir_str: export_dir.to_string_lossy().to_string(),
            export_dir,
            last_export: None,
            alerts: VecDeque::new(),
            show_settings: false,
            input_blocked: false,
            focus_label: true,
            toast_message: None,
            toast_start: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            export_dir: Some(self.export_dir_str.clone()),
            export_policy: self.session.export_policy(),
        };
        settings.save(&self.data_dir);
    }

    pub(crate) fn set_export_policy(&mut self, policy: ExportPolicy) {
        self.session.set_export_policy(policy);
        self.save_settings();
    }

    /// A blocking alert or the settings dialog is on screen
    pub(crate) fn modal_open(&self) -> bool {
        !self.alerts.is_empty() || self.show_settings
    }

    /// Grid and label input are ignored this frame
    pub(crate) fn input_blocked(&self) -> bool {
        self.input_blocked || self.modal_open()
    }

    pub(crate) fn push_alert(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.queue_alert(Alert { kind, message: message.into(), export_on_dismiss: false });
    }

    fn queue_alert(&mut self, alert: Alert) {
        // A blocking dialog swallows the rest of any stroke in progress
        self.session.end_stroke();
        self.alerts.push_back(alert);
    }

    /// Close the front alert, running its export if it announced one.
    pub(crate) fn dismiss_alert(&mut self) {
        let Some(alert) = self.alerts.pop_front() else {
            return;
        };
        self.focus_label = true;
        if alert.export_on_dismiss {
            self.export_to_folder();
        }
    }

    pub(crate) fn show_sample_count(&mut self) {
        let count = self.session.sample_count();
        self.push_alert(AlertKind::Info, format!("Current samples: {}", count));
    }

    /// Save the painted grid with the current label, exporting when the
    /// target count is reached.
    pub(crate) fn save_current_sample(&mut self) {
        match self.session.save_sample() {
            Ok(outcome) => {
                debug!(count = outcome.count, "Sample collected");
                self.focus_label = true;
                if outcome.export_due {
                    let target = self.session.target_count();
                    self.queue_alert(Alert {
                        kind: AlertKind::Success,
                        message: format!("You reached {} samples! Saving file...", target),
                        export_on_dismiss: true,
                    });
                }
            }
            Err(e) => {
                warn!(error = %e, "Sample not saved");
                self.push_alert(AlertKind::Warning, e.to_string());
            }
        }
    }

    /// Called once when the window closes. Exports still waiting on an
    /// unread alert are written now.
    pub(crate) fn shutdown(&mut self) {
        self.session.end_stroke();
        if self.alerts.iter().any(|a| a.export_on_dismiss) {
            self.alerts.clear();
            self.export_to_folder();
        }
        self.save_settings();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TARGET_COUNT;
    use tempfile::tempdir;

    fn app_in(dir: &std::path::Path) -> App {
        let settings = Settings {
            export_dir: Some(dir.join("out").to_string_lossy().to_string()),
            ..Settings::default()
        };
        App::with_settings(settings, dir.to_path_buf())
    }

    #[test]
    fn empty_label_raises_warning_alert() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.session.begin_stroke(4);
        app.save_current_sample();

        assert_eq!(app.session.sample_count(), 0);
        let alert = app.alerts.front().unwrap();
        assert_eq!(alert.kind, AlertKind::Warning);
        assert_eq!(alert.message, "Enter a label first!");
        assert!(app.modal_open());
        assert!(!app.session.is_drawing());
    }

    #[test]
    fn count_alert_reports_dataset_length() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.session.set_label("2");
        app.save_current_sample();
        app.show_sample_count();
        assert_eq!(app.alerts.back().unwrap().message, "Current samples: 1");
    }

    #[test]
    fn reaching_target_writes_dataset_file_once() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        let file = dir.path().join("out").join("dataset.json");

        for i in 0..TARGET_COUNT - 1 {
            app.session.set_label(i.to_string());
            app.save_current_sample();
        }
        assert!(!file.exists());
        assert!(app.alerts.is_empty());

        app.session.begin_stroke(0);
        app.session.set_label("9");
        app.save_current_sample();
        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.alerts[0].message, "You reached 100 samples! Saving file...");
        assert!(!file.exists());
        assert!(app.last_export.is_none());

        app.dismiss_alert();
        assert!(app.alerts.is_empty());
        assert!(file.exists());
        let written: Vec<crate::types::Sample> =
            serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(written.len(), TARGET_COUNT);
        assert!(app.last_export.is_some());

        std::fs::remove_file(&file).unwrap();
        app.session.set_label("1");
        app.save_current_sample();
        assert!(!file.exists());
    }

    #[test]
    fn export_waits_behind_earlier_alerts() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        let file = dir.path().join("out").join("dataset.json");
        for i in 0..TARGET_COUNT - 1 {
            app.session.set_label(i.to_string());
            app.save_current_sample();
        }
        app.show_sample_count();
        app.session.set_label("7");
        app.save_current_sample();

        app.dismiss_alert();
        assert!(!file.exists());
        app.dismiss_alert();
        assert!(file.exists());
    }

    #[test]
    fn shutdown_flushes_pending_export() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        let file = dir.path().join("out").join("dataset.json");
        for i in 0..TARGET_COUNT {
            app.session.set_label(i.to_string());
            app.save_current_sample();
        }
        assert!(!file.exists());

        app.shutdown();
        assert!(file.exists());
        assert!(app.alerts.is_empty());
    }

    #[test]
    fn shutdown_persists_export_policy() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.set_export_policy(ExportPolicy::EverySave);
        app.shutdown();
        let saved = Settings::load(dir.path());
        assert_eq!(saved.export_policy, ExportPolicy::EverySave);
        assert_eq!(saved.export_dir, Some(app.export_dir_str.clone()));
    }
}
