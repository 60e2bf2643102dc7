use crate::config::ParserConfig;

/// Role/tag words that mark a line as noise wherever they appear in it.
const ROLE_SUBSTRINGS: [&str; 9] = [
    "member",
    "elite",
    "officer",
    "president",
    "hardcore",
    "casual",
    "active",
    "online",
    "vice",
];

/// Returns true if the character is trailing punctuation stripped before matching.
fn is_trailing_punct(c: char) -> bool {
    matches!(c, ':' | ';' | ',' | '-' | '\u{2013}' | '\u{2014}')
}

/// Returns true if the line is organizational noise (rank or role tag)
/// rather than part of a player name.
pub fn is_drop_line(line: &str, config: &ParserConfig) -> bool {
    let normalized = line.trim().trim_end_matches(is_trailing_punct).to_lowercase();

    if normalized.is_empty() {
        return true;
    }
    if config.drop_tokens.contains(&normalized) {
        return true;
    }

    // Substring match catches compound phrasing like "Active at night!"
    ROLE_SUBSTRINGS.iter().any(|role| normalized.contains(role))
}
