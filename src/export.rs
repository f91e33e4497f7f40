//! Dataset export to `dataset.json`

use crate::constants::EXPORT_FILE_NAME;
use crate::types::Sample;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to create export folder {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Pretty-printed JSON array of `{ grid, label }` objects
pub fn to_json(samples: &[Sample]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(samples)?)
}

/// Write `dataset.json` into `dir`, creating the folder if needed.
pub fn write_dataset(dir: &Path, samples: &[Sample]) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    write_dataset_to(&dir.join(EXPORT_FILE_NAME), samples)
}

/// Write the dataset to an explicit file path (used by the save dialog).
pub fn write_dataset_to(path: &Path, samples: &[Sample]) -> Result<PathBuf, ExportError> {
    let json = to_json(samples)?;
    debug!(path = %path.display(), bytes = json.len(), "Writing dataset");
    std::fs::write(path, json).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), count = samples.len(), "Dataset exported");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Grid, Label};
    use tempfile::tempdir;

    fn sample(painted: &[usize], label: Option<i64>) -> Sample {
        let mut grid = Grid::default();
        for &i in painted {
            grid.paint(i);
        }
        Sample { grid, label: Label(label) }
    }

    #[test]
    fn writes_pretty_json_into_nested_folder() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("out");
        let samples = vec![sample(&[0, 5, 99], Some(3)), sample(&[], None)];

        let path = write_dataset(&target, &samples).unwrap();
        assert_eq!(path, target.join("dataset.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {\n    \"grid\": [\n"));
        assert!(text.contains("\"label\": 3"));
        assert!(text.contains("\"label\": null"));

        let back: Vec<Sample> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, samples);
    }

    #[test]
    fn overwrites_previous_export() {
        let dir = tempdir().unwrap();
        write_dataset(dir.path(), &[sample(&[1], Some(1))]).unwrap();
        let path = write_dataset(dir.path(), &[]).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }

    #[test]
    fn reports_unwritable_target() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let err = write_dataset(&blocker, &[]).unwrap_err();
        assert!(matches!(err, ExportError::CreateDir { .. }));
        assert!(err.to_string().contains("Failed to create export folder"));
    }
}
