//! Line aggregation state machine.
//!
//! Walks one image's OCR lines in order, collecting name fragments until a
//! power line closes them into a player record or a suspect.

use serde::Serialize;

use super::drop_line::is_drop_line;
use super::name::clean_name;
use super::power::{parse_power, PowerToken};
use crate::config::ParserConfig;
use crate::log;

/// A player name with its power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub name: String,
    pub power: u64,
}

/// A candidate held back for manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuspectRecord {
    pub name: String,
    /// Power line exactly as recognized (trimmed)
    pub raw_power_text: String,
    /// e.g. `power<3000000 (999999)` or `malformed_digits(123)`
    pub reason: String,
}

/// Output of one aggregation pass over a single image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageParse {
    pub players: Vec<PlayerRecord>,
    pub suspects: Vec<SuspectRecord>,
}

/// How a single line is treated by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Power(PowerToken),
    Drop,
    Fragment,
}

/// Classifies one line. Power detection runs before drop detection.
pub fn classify_line(line: &str, config: &ParserConfig) -> LineKind {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }
    if let Some(token) = parse_power(line, config) {
        return LineKind::Power(token);
    }
    if is_drop_line(line, config) {
        return LineKind::Drop;
    }
    LineKind::Fragment
}

/// Accumulator for one image's line sequence.
///
/// Holds the name fragments seen since the last power boundary. A power line
/// resets it; anything still pending at `finish` is discarded.
pub struct LineAggregator<'a> {
    config: &'a ParserConfig,
    pending: Vec<String>,
    output: ImageParse,
}

impl<'a> LineAggregator<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            pending: Vec::new(),
            output: ImageParse::default(),
        }
    }

    /// Name fragments waiting for a power line.
    #[cfg(test)]
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Feeds one recognized line. Absent lines are ignored like blank ones.
    pub fn feed<'l>(&mut self, line: impl Into<Option<&'l str>>) {
        let Some(line) = line.into() else {
            return;
        };
        let line = line.trim();

        match classify_line(line, self.config) {
            LineKind::Blank | LineKind::Drop => {}
            LineKind::Power(token) => self.close_boundary(line, token),
            // Names can span multiple lines
            LineKind::Fragment => self.pending.push(line.to_string()),
        }
    }

    /// Ends the pass. Pending fragments without a power line are dropped.
    pub fn finish(self) -> ImageParse {
        if !self.pending.is_empty() {
            log(&format!(
                "Discarding trailing name fragments without power: {:?}",
                self.pending
            ));
        }
        self.output
    }

    fn close_boundary(&mut self, raw: &str, token: PowerToken) {
        let fragments = std::mem::take(&mut self.pending);
        let name = clean_name(&fragments.join(" "), self.config);

        if name.is_empty() {
            if !fragments.is_empty() {
                log(&format!(
                    "Power line '{}' has no usable name (fragments: {:?})",
                    raw, fragments
                ));
            }
            return;
        }

        let reason = match token {
            PowerToken::Valid(value) => match self.config.strict_min_power {
                Some(floor) if value < floor => format!("power<{} ({})", floor, value),
                _ => {
                    self.output.players.push(PlayerRecord { name, power: value });
                    return;
                }
            },
            PowerToken::Malformed(digits) => format!("malformed_digits({})", digits),
        };

        log(&format!("Suspect: {} num='{}' -> {}", name, raw, reason));
        self.output.suspects.push(SuspectRecord {
            name,
            raw_power_text: raw.to_string(),
            reason,
        });
    }
}

/// Runs one aggregation pass over an image's lines.
pub fn parse_ocr_lines<I, S>(lines: I, config: &ParserConfig) -> ImageParse
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .fold(LineAggregator::new(config), |mut agg, line| {
            let line: &str = line.as_ref();
            agg.feed(line);
            agg
        })
        .finish()
}

/// Same as [`parse_ocr_lines`] for sequences that may contain absent lines.
///
/// Absent lines change no state, so they are skipped before the fold.
pub fn parse_optional_lines<I, S>(lines: I, config: &ParserConfig) -> ImageParse
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    parse_ocr_lines(lines.into_iter().flatten(), config)
}
