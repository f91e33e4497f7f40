//! Capture session: the grid being painted, the pending label and the
//! collected dataset.

use crate::constants::TARGET_COUNT;
use crate::export::{self, ExportError};
use crate::types::{ExportPolicy, Grid, Label, Sample};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SaveError {
    #[error("Enter a label first!")]
    EmptyLabel,
}

/// Result of a successful save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub count: usize,
    /// The dataset reached the target and should be written out now
    pub export_due: bool,
}

pub struct CaptureSession {
    grid: Grid,
    label_text: String,
    dataset: Vec<Sample>,
    drawing: bool,
    target_count: usize,
    export_policy: ExportPolicy,
    auto_exported: bool,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new(ExportPolicy::default())
    }
}

impl CaptureSession {
    pub fn new(export_policy: ExportPolicy) -> Self {
        Self {
            grid: Grid::default(),
            label_text: String::new(),
            dataset: Vec::new(),
            drawing: false,
            target_count: TARGET_COUNT,
            export_policy,
            auto_exported: false,
        }
    }

    pub fn begin_stroke(&mut self, cell: usize) {
        self.drawing = true;
        self.grid.paint(cell);
    }

    pub fn continue_stroke(&mut self, cell: usize) {
        if self.drawing {
            self.grid.paint(cell);
        }
    }

    pub fn end_stroke(&mut self) {
        self.drawing = false;
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn set_label(&mut self, text: impl Into<String>) {
        self.label_text = text.into();
    }

    pub fn label_text(&self) -> &str {
        &self.label_text
    }

    /// Mutable access for text widgets bound directly to the label
    pub fn label_text_mut(&mut self) -> &mut String {
        &mut self.label_text
    }

    /// Append the current grid with the parsed label, then reset the grid
    /// and label. Nothing changes when the label is empty.
    pub fn save_sample(&mut self) -> Result<SaveOutcome, SaveError> {
        if self.label_text.is_empty() {
            debug!("Save rejected, label is empty");
            return Err(SaveError::EmptyLabel);
        }

        let label = Label::parse(&self.label_text);
        let grid = std::mem::take(&mut self.grid);
        debug!(label = %label, painted = grid.painted_count(), "Sample saved");
        self.dataset.push(Sample { grid, label });
        self.label_text.clear();

        let count = self.dataset.len();
        let export_due = self.take_export_trigger();
        if export_due {
            info!(count, target = self.target_count, "Target sample count reached");
        }
        Ok(SaveOutcome { count, export_due })
    }

    fn take_export_trigger(&mut self) -> bool {
        if self.dataset.len() < self.target_count {
            return false;
        }
        let fire = match self.export_policy {
            ExportPolicy::EverySave => true,
            ExportPolicy::Once => !self.auto_exported,
        };
        // Any threshold export counts, whichever policy fired it
        self.auto_exported |= fire;
        fire
    }

    /// Write the whole dataset to `dataset.json` inside `dir`.
    pub fn export_dataset(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        export::write_dataset(dir, &self.dataset)
    }

    pub fn set_export_policy(&mut self, policy: ExportPolicy) {
        self.export_policy = policy;
    }

    pub fn export_policy(&self) -> ExportPolicy {
        self.export_policy
    }

    pub fn sample_count(&self) -> usize {
        self.dataset.len()
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dataset(&self) -> &[Sample] {
        &self.dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRID_CELLS;

    fn save_with_label(session: &mut CaptureSession, label: &str) -> SaveOutcome {
        session.set_label(label);
        session.save_sample().unwrap()
    }

    #[test]
    fn paint_and_save_scenario() {
        let mut session = CaptureSession::default();
        session.begin_stroke(0);
        session.continue_stroke(5);
        session.continue_stroke(99);
        session.end_stroke();
        session.set_label("3");

        let outcome = session.save_sample().unwrap();
        assert_eq!(outcome, SaveOutcome { count: 1, export_due: false });

        let sample = &session.dataset()[0];
        assert_eq!(sample.label, Label(Some(3)));
        for (i, &cell) in sample.grid.cells().iter().enumerate() {
            let expected = u8::from(matches!(i, 0 | 5 | 99));
            assert_eq!(cell, expected, "cell {i}");
        }
        assert_eq!(session.grid().painted_count(), 0);
        assert_eq!(session.label_text(), "");
    }

    #[test]
    fn continue_without_begin_is_noop() {
        let mut session = CaptureSession::default();
        session.continue_stroke(7);
        assert_eq!(session.grid().painted_count(), 0);

        session.begin_stroke(1);
        session.end_stroke();
        session.continue_stroke(2);
        assert!(session.grid().is_painted(1));
        assert!(!session.grid().is_painted(2));
        assert!(!session.is_drawing());
    }

    #[test]
    fn strokes_keep_grid_shape() {
        let mut session = CaptureSession::default();
        for i in 0..300 {
            if i % 17 == 0 {
                session.begin_stroke(i);
            } else if i % 5 == 0 {
                session.end_stroke();
            } else {
                session.continue_stroke(i * 3);
            }
            let cells = session.grid().cells();
            assert_eq!(cells.len(), GRID_CELLS);
            assert!(cells.iter().all(|&c| c <= 1));
        }
    }

    #[test]
    fn empty_label_leaves_state_unchanged() {
        let mut session = CaptureSession::default();
        session.begin_stroke(12);
        assert_eq!(session.save_sample(), Err(SaveError::EmptyLabel));
        assert_eq!(session.sample_count(), 0);
        assert!(session.grid().is_painted(12));
        assert!(session.is_drawing());
    }

    #[test]
    fn non_numeric_label_is_kept_as_nan() {
        let mut session = CaptureSession::default();
        save_with_label(&mut session, "abc");
        assert_eq!(session.dataset()[0].label, Label(None));
    }

    #[test]
    fn export_fires_once_at_target() {
        let mut session = CaptureSession::new(ExportPolicy::Once);
        let mut fired = 0;
        for i in 0..TARGET_COUNT {
            let outcome = save_with_label(&mut session, &i.to_string());
            if outcome.export_due {
                fired += 1;
                assert_eq!(outcome.count, TARGET_COUNT);
            }
        }
        assert_eq!(fired, 1);

        let more = save_with_label(&mut session, "1");
        assert!(!more.export_due);
        assert_eq!(session.sample_count(), TARGET_COUNT + 1);
    }

    #[test]
    fn every_save_policy_repeats_export() {
        let mut session = CaptureSession::new(ExportPolicy::EverySave);
        for i in 0..TARGET_COUNT - 1 {
            assert!(!save_with_label(&mut session, &i.to_string()).export_due);
        }
        assert!(save_with_label(&mut session, "0").export_due);
        assert!(save_with_label(&mut session, "0").export_due);
    }

    #[test]
    fn switching_to_once_after_threshold_does_not_refire() {
        let mut session = CaptureSession::new(ExportPolicy::EverySave);
        let mut fired_at = Vec::new();
        for i in 0..TARGET_COUNT + 1 {
            let outcome = save_with_label(&mut session, &i.to_string());
            if outcome.export_due {
                fired_at.push(outcome.count);
            }
        }
        session.set_export_policy(ExportPolicy::Once);
        for _ in 0..3 {
            let outcome = save_with_label(&mut session, "5");
            if outcome.export_due {
                fired_at.push(outcome.count);
            }
        }
        assert_eq!(fired_at, vec![TARGET_COUNT, TARGET_COUNT + 1]);
    }

    #[test]
    fn dataset_entries_are_snapshots() {
        let mut session = CaptureSession::default();
        session.begin_stroke(3);
        save_with_label(&mut session, "1");
        session.begin_stroke(4);
        save_with_label(&mut session, "2");

        assert!(session.dataset()[0].grid.is_painted(3));
        assert!(!session.dataset()[0].grid.is_painted(4));
        assert!(session.dataset()[1].grid.is_painted(4));
        assert!(!session.dataset()[1].grid.is_painted(3));
    }
}
