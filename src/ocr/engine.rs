use anyhow::{anyhow, Context, Result};
use image::{ImageBuffer, Rgba};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

use crate::config::{PixelRect, TesseractConfig};
use super::preprocess::crop_pixels;

/// A line of OCR text with the average confidence of its words
#[derive(Debug, Clone)]
pub struct OcrLine {
    pub text: String,
    pub confidence: f32,
}

/// Something that turns one screenshot into an ordered sequence of text lines.
///
/// Lines may be absent (`None`) when the engine reports an unreadable entry.
pub trait OcrEngine {
    fn recognize(&self, image_path: &Path) -> Result<Vec<Option<String>>>;
}

/// Tesseract run as an external process.
pub struct TesseractEngine {
    executable: PathBuf,
    config: TesseractConfig,
    crop: Option<PixelRect>,
}

impl TesseractEngine {
    pub fn new(executable: PathBuf, config: TesseractConfig, crop: Option<PixelRect>) -> Self {
        Self {
            executable,
            config,
            crop,
        }
    }

    /// Runs Tesseract on an RGBA image and returns structured lines.
    fn recognize_image(&self, img: &ImageBuffer<Rgba<u8>, Vec<u8>>) -> Result<Vec<OcrLine>> {
        // Save image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")?;
        img.save(temp_input.path())
            .context("Failed to write temporary OCR input")?;

        // Tesseract adds the .tsv extension itself
        let temp_output = NamedTempFile::new()?;
        let output_base = temp_output.path().to_string_lossy().to_string();

        let mut command = Command::new(&self.executable);
        command.arg(temp_input.path()).arg(&output_base);
        if let Some(tessdata) = &self.config.tessdata_dir {
            command.arg("--tessdata-dir").arg(tessdata);
        }
        let output = command
            .arg("-l")
            .arg(&self.config.language)
            .arg("--psm")
            .arg(self.config.psm.to_string())
            .arg("tsv")
            .output()
            .with_context(|| format!("Failed to run {}", self.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        let tsv_path = format!("{}.tsv", output_base);
        let tsv_content = std::fs::read_to_string(&tsv_path)
            .map_err(|e| anyhow!("Failed to read Tesseract output: {}", e))?;
        let _ = std::fs::remove_file(&tsv_path);

        Ok(parse_tsv_output(&tsv_content))
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image_path: &Path) -> Result<Vec<Option<String>>> {
        let img = image::open(image_path)
            .with_context(|| format!("Failed to load image {}", image_path.display()))?
            .to_rgba8();

        let img = match &self.crop {
            Some(rect) => crop_pixels(&img, rect),
            None => img,
        };
        if img.width() == 0 || img.height() == 0 {
            return Err(anyhow!(
                "Crop region is outside image {}",
                image_path.display()
            ));
        }

        let lines = self.recognize_image(&img)?;
        crate::log(&format!(
            "Recognized {} lines in {}",
            lines.len(),
            image_path.display()
        ));

        Ok(lines
            .into_iter()
            .filter(|line| line.confidence >= self.config.min_confidence)
            .map(|line| Some(line.text))
            .collect())
    }
}

/// Parses Tesseract TSV output into structured OcrLine data.
///
/// Words are grouped by (block, paragraph, line) so line numbers that restart
/// in a new block do not merge.
fn parse_tsv_output(tsv: &str) -> Vec<OcrLine> {
    let mut lines: Vec<OcrLine> = Vec::new();
    let mut current_key: Option<(i32, i32, i32)> = None;
    // (word text, word confidence) for the line being built
    let mut current_words: Vec<(String, f32)> = Vec::new();

    fn flush(words: &mut Vec<(String, f32)>, lines: &mut Vec<OcrLine>) {
        if words.is_empty() {
            return;
        }
        let words = std::mem::take(words);
        let confidence = words.iter().map(|(_, conf)| conf).sum::<f32>() / words.len() as f32;
        let text = words
            .iter()
            .map(|(text, _)| text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(OcrLine { text, confidence });
    }

    for row in tsv.lines().skip(1) {
        // TSV fields: level, page_num, block_num, par_num, line_num, word_num,
        //             left, top, width, height, conf, text
        let fields: Vec<&str> = row.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        let level: i32 = fields[0].parse().unwrap_or(-1);
        // Level 5 = word
        if level != 5 {
            continue;
        }

        let text = fields[11].trim();
        let conf: f32 = fields[10].parse().unwrap_or(-1.0);
        if text.is_empty() || conf < 0.0 {
            continue;
        }

        let key = (
            fields[2].parse().unwrap_or(-1),
            fields[3].parse().unwrap_or(-1),
            fields[4].parse().unwrap_or(-1),
        );
        if current_key != Some(key) {
            flush(&mut current_words, &mut lines);
            current_key = Some(key);
        }

        current_words.push((text.to_string(), conf));
    }

    flush(&mut current_words, &mut lines);
    lines
}
