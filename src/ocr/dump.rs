//! Already-recognized line dumps.
//!
//! Lets the pipeline consume lines produced by any external OCR tool:
//! `.txt` files hold one line per row, `.json` files an array of strings or nulls.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// Returns true if the path is a line dump rather than an image.
pub fn is_line_dump(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "txt" | "json"))
        .unwrap_or(false)
}

/// Reads the ordered lines of a dump file.
pub fn read_line_dump(path: &Path) -> Result<Vec<Option<String>>> {
    let contents = fs::read_to_string(path)
        .context(format!("Failed to read line dump: {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str::<Vec<Option<String>>>(&contents)
            .map_err(|e| anyhow!("Invalid JSON line dump {}: {}", path.display(), e))
    } else {
        Ok(contents.lines().map(|l| Some(l.to_string())).collect())
    }
}
