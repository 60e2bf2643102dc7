//! Club Roster Tool
//!
//! Extracts player names and power scores from OCR'd club member-list
//! screenshots, merges duplicates across screenshots and flags suspect
//! entries for manual review.

mod config;
mod export;
mod ocr;
mod paths;
mod pipeline;
mod report;
mod roster;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{load_config, AppConfig};
use crate::ocr::OcrEngine;
use crate::roster::{classify_line, parse_optional_lines, LineKind};

/// Logs a message to stderr and the log file with timestamp.
///
/// Stdout is reserved for the report and copy-paste output.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    eprint!("{}", line);
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths::get_log_file())
    {
        let _ = file.write_all(line.as_bytes());
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "club-roster",
    version,
    about = "Extract player names and power from club screenshots"
)]
struct Cli {
    /// Path to config.json (defaults to the one next to the executable)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// OCR screenshots (or read line dumps) and print the merged roster
    Process {
        /// Screenshots (.png/.jpg) or line dumps (.txt/.json)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Write the roster as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the roster and suspects as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Also print `name,power` lines for copy-paste
        #[arg(long, default_value_t = false)]
        copy: bool,
        /// OCR the whole screenshot instead of the configured region
        #[arg(long, default_value_t = false)]
        no_crop: bool,
        /// Minimum digit count for a power value
        #[arg(long)]
        min_digits: Option<usize>,
        /// Powers below this are reported as suspects
        #[arg(long, conflicts_with = "no_floor")]
        min_power: Option<u64>,
        /// Disable the minimum power floor
        #[arg(long, default_value_t = false)]
        no_floor: bool,
    },
    /// Show how each line of a line dump is classified
    Classify {
        /// Line dump (.txt or .json)
        dump: PathBuf,
    },
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths::get_log_file())
        {
            let _ = file.write_all(log_msg.as_bytes());
        }
    }));

    let cli = Cli::parse();

    // Ensure output directories exist
    paths::ensure_directories()?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(paths::get_default_config_path);
    let mut config = load_config(&config_path);

    match cli.command {
        Commands::Process {
            inputs,
            csv,
            json,
            copy,
            no_crop,
            min_digits,
            min_power,
            no_floor,
        } => {
            if let Some(n) = min_digits {
                config.parser.min_digits = n;
            }
            if let Some(floor) = min_power {
                config.parser.strict_min_power = Some(floor);
            }
            if no_floor {
                config.parser.strict_min_power = None;
            }
            if no_crop {
                config.crop = None;
            }
            run_process(&inputs, &config, csv, json, copy)
        }
        Commands::Classify { dump } => run_classify(&dump, &config),
    }
}

fn run_process(
    inputs: &[PathBuf],
    config: &AppConfig,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
    copy: bool,
) -> Result<()> {
    let engine = if pipeline::needs_ocr(inputs) {
        Some(ocr::tesseract_from_config(config)?)
    } else {
        None
    };

    let roster = pipeline::run(
        inputs,
        config,
        engine.as_ref().map(|e| e as &dyn OcrEngine),
    )?;

    println!();
    print!("{}", report::render(&roster));

    if copy {
        println!("\nPlayer list (Name,Power)");
        println!("{}", export::roster_to_copy_text(&roster));
    }

    if let Some(path) = csv {
        export::export_to_csv(&roster, &path)?;
        log(&format!("CSV saved: {}", path.display()));
    }
    if let Some(path) = json {
        export::export_to_json(&roster, &path)?;
        log(&format!("JSON saved: {}", path.display()));
    }

    Ok(())
}

fn run_classify(dump: &Path, config: &AppConfig) -> Result<()> {
    let lines = ocr::read_line_dump(dump)
        .with_context(|| format!("Cannot classify {}", dump.display()))?;

    for (idx, line) in lines.iter().enumerate() {
        let text = line.as_deref().unwrap_or("");
        let kind = match classify_line(text, &config.parser) {
            LineKind::Blank => "blank".to_string(),
            LineKind::Power(token) => format!("power {}", token.digits()),
            LineKind::Drop => "drop".to_string(),
            LineKind::Fragment => "name".to_string(),
        };
        println!("{:>4}  {:<16} {}", idx + 1, kind, text);
    }

    let parsed = parse_optional_lines(lines, &config.parser);
    println!();
    for p in &parsed.players {
        println!("record   {} = {}", p.name, p.power);
    }
    for s in &parsed.suspects {
        println!("suspect  {} num='{}' -> {}", s.name, s.raw_power_text, s.reason);
    }

    Ok(())
}
