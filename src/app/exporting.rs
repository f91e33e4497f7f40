//! Export actions: automatic folder export, save dialog, open folder

use super::{AlertKind, App};
use crate::constants::EXPORT_FILE_NAME;
use crate::export;
use crate::settings::Settings;
use crate::utils::short_path;
use std::path::PathBuf;
use tracing::{error, info, warn};

impl App {
    /// Write `dataset.json` into the configured export folder.
    pub(crate) fn export_to_folder(&mut self) {
        match self.session.export_dataset(&self.export_dir) {
            Ok(path) => self.on_exported(path),
            Err(e) => {
                error!(error = %e, dir = %self.export_dir.display(), "Export failed");
                self.push_alert(AlertKind::Error, e.to_string());
            }
        }
    }

    /// Manual export through a native save dialog
    pub(crate) fn export_with_dialog(&mut self) {
        self.ensure_export_dir();
        let Some(path) = rfd::FileDialog::new()
            .set_directory(&self.export_dir)
            .set_file_name(EXPORT_FILE_NAME)
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };

        match export::write_dataset_to(&path, self.session.dataset()) {
            Ok(path) => self.on_exported(path),
            Err(e) => {
                error!(error = %e, "Export failed");
                self.push_alert(AlertKind::Error, e.to_string());
            }
        }
    }

    pub(crate) fn open_export_folder(&mut self) {
        self.ensure_export_dir();
        if let Err(e) = open::that(&self.export_dir) {
            warn!(error = %e, dir = %self.export_dir.display(), "Failed to open export folder");
        }
    }

    pub(crate) fn browse_export_dir(&mut self) {
        self.ensure_export_dir();
        if let Some(path) = rfd::FileDialog::new()
            .set_directory(&self.export_dir)
            .pick_folder()
        {
            self.set_export_dir(path);
        }
    }

    /// Create the export folder if missing. Failures are logged; the
    /// following write or dialog reports its own error.
    pub(crate) fn ensure_export_dir(&self) -> bool {
        match std::fs::create_dir_all(&self.export_dir) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, dir = %self.export_dir.display(), "Failed to create export folder");
                false
            }
        }
    }

    /// Blank input resets to the default folder, the same one a restart
    /// would pick.
    pub(crate) fn set_export_dir(&mut self, path: PathBuf) {
        let path = if path.to_string_lossy().trim().is_empty() {
            Settings::default_export_dir(&self.data_dir)
        } else {
            path
        };
        info!(dir = %path.display(), "Export folder changed");
        self.export_dir_str = path.to_string_lossy().to_string();
        self.export_dir = path;
        self.save_settings();
    }

    fn on_exported(&mut self, path: PathBuf) {
        self.toast_message = Some(format!(
            "Saved {} samples to {}",
            self.session.sample_count(),
            short_path(&path, 2)
        ));
        self.toast_start = Some(std::time::Instant::now());
        self.last_export = Some((path, chrono::Local::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn blank_export_dir_matches_reloaded_settings() {
        let dir = tempdir().unwrap();
        let mut app = App::with_settings(Settings::default(), dir.path().to_path_buf());
        app.set_export_dir(PathBuf::from("  "));

        let reloaded = Settings::load(dir.path()).export_dir_or_default(dir.path());
        assert_eq!(app.export_dir, reloaded);
        assert_eq!(app.export_dir_str, reloaded.to_string_lossy());
        assert!(!app.export_dir_str.trim().is_empty());
    }

    #[test]
    fn export_dir_blocked_by_file_is_reported() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, "x").unwrap();
        let mut app = App::with_settings(Settings::default(), dir.path().to_path_buf());

        app.set_export_dir(blocker);
        assert!(!app.ensure_export_dir());

        app.set_export_dir(dir.path().join("fresh"));
        assert!(app.ensure_export_dir());
        assert!(dir.path().join("fresh").is_dir());
    }
}
