use regex::Regex;
use std::sync::OnceLock;

use crate::config::ParserConfig;

/// A line made only of digits and separators, starting with a digit.
const POWER_PATTERN: &str = r"^[0-9][0-9,.\s]*$";

fn power_regex() -> &'static Regex {
    static POWER_REGEX: OnceLock<Regex> = OnceLock::new();
    POWER_REGEX.get_or_init(|| Regex::new(POWER_PATTERN).expect("power pattern is valid"))
}

/// Result of reading a line as a power value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowerToken {
    /// Structurally valid power.
    Valid(u64),
    /// Enough digits, but the digit run does not fit in a power value.
    Malformed(String),
}

impl PowerToken {
    /// Digit string as it would appear in a suspect reason.
    pub fn digits(&self) -> String {
        match self {
            PowerToken::Valid(value) => value.to_string(),
            PowerToken::Malformed(digits) => digits.clone(),
        }
    }
}

/// Parses a single OCR line as a power value.
///
/// Returns `None` for anything that is not strictly a number with separators,
/// including numeric tokens shorter than `min_digits` (those are level/rank
/// noise and fall through to name handling upstream).
pub fn parse_power(line: &str, config: &ParserConfig) -> Option<PowerToken> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Thin and narrow no-break spaces are removed rather than turned into
    // spaces; either way they never reach the digit string.
    let normalized: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '\u{2009}' | '\u{202F}'))
        .map(|c| match c {
            '\u{00A0}' => ' ',
            '|' => '1',
            other => other,
        })
        .collect();

    if !power_regex().is_match(&normalized) {
        return None;
    }

    let digits: String = normalized.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < config.min_digits {
        return None;
    }

    Some(match digits.parse::<u64>() {
        Ok(value) => PowerToken::Valid(value),
        Err(_) => PowerToken::Malformed(digits),
    })
}
