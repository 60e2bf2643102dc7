//! End-to-end run: inputs → lines → per-image records → merged roster.
//!
//! A failing input is logged and skipped so one bad screenshot never aborts
//! the rest of the batch.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::log;
use crate::ocr::{is_line_dump, read_line_dump, OcrEngine};
use crate::roster::{merge_images, parse_optional_lines, ImageParse, Roster};

/// Returns true if any input needs an OCR engine (is not a line dump).
pub fn needs_ocr(inputs: &[PathBuf]) -> bool {
    inputs.iter().any(|p| !is_line_dump(p))
}

/// Loads the recognized lines for one input.
fn load_lines(path: &Path, engine: Option<&dyn OcrEngine>) -> Result<Vec<Option<String>>> {
    if is_line_dump(path) {
        return read_line_dump(path);
    }
    match engine {
        Some(engine) => engine.recognize(path),
        None => Err(anyhow!("No OCR engine available for image {}", path.display())),
    }
}

/// Processes every input and merges the results.
pub fn run(inputs: &[PathBuf], config: &AppConfig, engine: Option<&dyn OcrEngine>) -> Result<Roster> {
    if inputs.is_empty() {
        return Err(anyhow!("No input files given"));
    }
    if inputs.len() > config.max_images {
        return Err(anyhow!(
            "Please provide no more than {} images (got {})",
            config.max_images,
            inputs.len()
        ));
    }

    let mut images: Vec<ImageParse> = Vec::with_capacity(inputs.len());

    for (idx, path) in inputs.iter().enumerate() {
        log(&format!(
            "Processing {}/{}: {}",
            idx + 1,
            inputs.len(),
            path.display()
        ));

        let lines = match load_lines(path, engine) {
            Ok(lines) => lines,
            Err(e) => {
                log(&format!("Error processing {}: {:#}", path.display(), e));
                continue;
            }
        };

        let parsed = parse_optional_lines(lines, &config.parser);
        log(&format!(
            "{}: {} players, {} suspects",
            path.display(),
            parsed.players.len(),
            parsed.suspects.len()
        ));
        images.push(parsed);
    }

    let roster = merge_images(images);
    if roster.is_empty() {
        return Err(anyhow!("No valid player data could be extracted from the inputs"));
    }

    log(&format!(
        "Merged {} unique players, {} suspects",
        roster.players.len(),
        roster.suspects.len()
    ));
    Ok(roster)
}
