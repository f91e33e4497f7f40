//! Common types and data structures

use crate::constants::GRID_CELLS;
use serde::{Deserialize, Serialize};

/// Row-major N×N grid of binary cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Grid {
    cells: Vec<u8>,
}

impl Default for Grid {
    fn default() -> Self {
        Self { cells: vec![0; GRID_CELLS] }
    }
}

impl Grid {
    /// Set a cell to 1. Returns false if the index is outside the grid.
    pub fn paint(&mut self, index: usize) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = 1;
                true
            }
            None => false,
        }
    }

    pub fn is_painted(&self, index: usize) -> bool {
        self.cells.get(index).is_some_and(|&c| c == 1)
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }
}

impl TryFrom<Vec<u8>> for Grid {
    type Error = String;

    fn try_from(cells: Vec<u8>) -> Result<Self, Self::Error> {
        if cells.len() != GRID_CELLS {
            return Err(format!("grid must have {} cells, got {}", GRID_CELLS, cells.len()));
        }
        if let Some(bad) = cells.iter().find(|&&c| c > 1) {
            return Err(format!("grid cells must be 0 or 1, got {}", bad));
        }
        Ok(Self { cells })
    }
}

impl From<Grid> for Vec<u8> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

/// Numeric label attached to a sample. `None` when the entered text had no
/// leading integer; serialized as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub Option<i64>);

impl Label {
    /// Parse the leading integer of `text`: optional whitespace, optional
    /// sign, then digits. Anything after the digits is ignored.
    pub fn parse(text: &str) -> Self {
        let s = text.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let digits = &rest[..digits_end];
        if digits.is_empty() {
            return Self(None);
        }
        // Runs that overflow i64 have no exact value and become None,
        // exported as null rather than a rounded float
        let value = if negative {
            format!("-{}", digits).parse::<i64>().ok()
        } else {
            digits.parse::<i64>().ok()
        };
        Self(value)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "NaN"),
        }
    }
}

/// One labeled grid snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub grid: Grid,
    pub label: Label,
}

/// When the automatic export fires once the dataset reaches the target count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPolicy {
    /// Only on the save that first reaches the target
    #[default]
    Once,
    /// On every save at or above the target
    EverySave,
}

impl ExportPolicy {
    pub fn label(self) -> &'static str {
        match self {
            ExportPolicy::Once => "Export once",
            ExportPolicy::EverySave => "Export on every save",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_parses_leading_integer() {
        assert_eq!(Label::parse("3"), Label(Some(3)));
        assert_eq!(Label::parse("  42"), Label(Some(42)));
        assert_eq!(Label::parse("-7"), Label(Some(-7)));
        assert_eq!(Label::parse("+8"), Label(Some(8)));
        assert_eq!(Label::parse("3.9"), Label(Some(3)));
        assert_eq!(Label::parse("12abc"), Label(Some(12)));
    }

    #[test]
    fn label_without_digits_is_nan() {
        assert_eq!(Label::parse("abc"), Label(None));
        assert_eq!(Label::parse("-"), Label(None));
        assert_eq!(Label::parse(" "), Label(None));
        assert_eq!(Label::parse("99999999999999999999999"), Label(None));
        assert_eq!(Label(None).to_string(), "NaN");
    }

    #[test]
    fn grid_paint_ignores_out_of_range() {
        let mut grid = Grid::default();
        assert!(grid.paint(0));
        assert!(grid.paint(0));
        assert!(!grid.paint(GRID_CELLS));
        assert_eq!(grid.cells().len(), GRID_CELLS);
        assert_eq!(grid.painted_count(), 1);
        assert!(grid.is_painted(0));
        assert!(!grid.is_painted(GRID_CELLS));
    }

    #[test]
    fn grid_rejects_wrong_shape() {
        assert!(Grid::try_from(vec![0; 3]).is_err());
        let mut cells = vec![0; GRID_CELLS];
        cells[4] = 2;
        assert!(Grid::try_from(cells).is_err());
    }

    #[test]
    fn sample_serializes_like_the_export_format() {
        let mut grid = Grid::default();
        grid.paint(1);
        let sample = Sample { grid, label: Label(None) };
        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["label"], serde_json::Value::Null);
        assert_eq!(value["grid"].as_array().unwrap().len(), GRID_CELLS);
        assert_eq!(value["grid"][1], 1);
    }

    #[test]
    fn export_policy_uses_snake_case() {
        let json = serde_json::to_string(&ExportPolicy::EverySave).unwrap();
        assert_eq!(json, "\"every_save\"");
        assert_eq!(ExportPolicy::default(), ExportPolicy::Once);
    }
}
