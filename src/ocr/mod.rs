pub mod dump;
pub mod engine;
pub mod preprocess;
pub mod setup;

pub use dump::{is_line_dump, read_line_dump};
pub use engine::{OcrEngine, TesseractEngine};
pub use setup::find_tesseract_executable;

use anyhow::Result;

use crate::config::AppConfig;

/// Builds the Tesseract engine from configuration, failing if the executable
/// cannot be found.
pub fn tesseract_from_config(config: &AppConfig) -> Result<TesseractEngine> {
    let executable = find_tesseract_executable(&config.tesseract)?;
    Ok(TesseractEngine::new(
        executable,
        config.tesseract.clone(),
        config.crop,
    ))
}
