use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::process::Command;

use crate::config::TesseractConfig;
use crate::log;

#[cfg(windows)]
const TESSERACT_EXE: &str = "tesseract.exe";
#[cfg(not(windows))]
const TESSERACT_EXE: &str = "tesseract";

/// Returns the directory for a locally installed Tesseract.
pub fn get_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("club-roster")
        .join("tesseract")
}

/// Candidate executables in lookup order: configured path, local install, PATH.
fn candidates(config: &TesseractConfig) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Some(exe) = &config.executable {
        out.push(PathBuf::from(exe));
    }
    out.push(get_tesseract_dir().join(TESSERACT_EXE));
    out.push(PathBuf::from(TESSERACT_EXE));
    out
}

/// Finds a working Tesseract executable.
///
/// Each candidate is run with `--version`; the first that runs wins.
pub fn find_tesseract_executable(config: &TesseractConfig) -> Result<PathBuf> {
    for candidate in candidates(config) {
        let runs = Command::new(&candidate)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false);
        if runs {
            log(&format!("Tesseract found at: {}", candidate.display()));
            return Ok(candidate);
        }
    }

    Err(anyhow!(
        "Tesseract not found. Install it, add it to PATH, set tesseract.executable in config.json, or copy it to: {}",
        get_tesseract_dir().display()
    ))
}
