//! Utility functions

use crate::constants::APP_NAME;
use std::path::{Path, PathBuf};

/// Get the per-user data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Shorten a path for status lines, keeping the last `keep` components.
pub fn short_path(path: &Path, keep: usize) -> String {
    let parts: Vec<_> = path.components().collect();
    if parts.len() <= keep {
        return path.display().to_string();
    }
    let tail: PathBuf = parts[parts.len() - keep..].iter().collect();
    format!("…{}{}", std::path::MAIN_SEPARATOR, tail.display())
}

/// Window/taskbar icon: a small painted grid, drawn in code.
pub fn grid_icon_rgba(size: u32) -> (Vec<u8>, u32, u32) {
    const PATTERN: [&str; 5] = ["#...#", ".#.#.", "..#..", ".#.#.", "#...#"];
    let cell = (size / PATTERN.len() as u32).max(1);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let row = (y / cell) as usize;
            let col = (x / cell) as usize;
            let inked = PATTERN
                .get(row)
                .and_then(|r| r.as_bytes().get(col))
                .is_some_and(|&b| b == b'#');
            let border = x % cell == 0 || y % cell == 0;
            let px = if inked {
                [0x2d, 0xd4, 0xbf, 0xff]
            } else if border {
                [0x3f, 0x3f, 0x46, 0xff]
            } else {
                [0x18, 0x18, 0x1b, 0xff]
            };
            pixels.extend_from_slice(&px);
        }
    }
    (pixels, size, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_path_keeps_tail() {
        let path = Path::new("a").join("b").join("c").join("dataset.json");
        let short = short_path(&path, 2);
        assert!(short.starts_with('…'));
        assert!(short.ends_with(&Path::new("c").join("dataset.json").display().to_string()));
        assert_eq!(short_path(Path::new("dataset.json"), 2), "dataset.json");
    }

    #[test]
    fn icon_has_rgba_for_every_pixel() {
        let (pixels, w, h) = grid_icon_rgba(40);
        assert_eq!((w, h), (40, 40));
        assert_eq!(pixels.len(), 40 * 40 * 4);
        // top-left cell is inked
        let px = 41 * 4;
        assert_eq!(&pixels[px..px + 4], &[0x2d, 0xd4, 0xbf, 0xff]);
    }
}
