use crate::config::ParserConfig;

/// Minimum share of alphabetic characters for a token to count as part of a name.
const MIN_ALPHA_FRACTION: f32 = 0.35;

/// Returns true for short all-digit tokens like "170" (level/rank noise).
fn is_level_noise(token: &str) -> bool {
    let len = token.chars().count();
    (2..=4).contains(&len) && token.chars().all(|c| c.is_ascii_digit())
}

/// Returns true if the token is mostly punctuation or symbols.
fn is_symbol_noise(token: &str) -> bool {
    let total = token.chars().count();
    let letters = token.chars().filter(|c| c.is_alphabetic()).count();
    letters == 0 || (letters as f32 / total as f32) < MIN_ALPHA_FRACTION
}

/// Cleans accumulated name fragments into a display name.
///
/// Drops role tokens, short numeric level noise and symbol-heavy junk, then
/// trims trailing punctuation. An empty result means no usable name.
pub fn clean_name(raw: &str, config: &ParserConfig) -> String {
    let kept: Vec<&str> = raw
        .split_whitespace()
        .filter(|token| !config.drop_tokens.contains(&token.to_lowercase()))
        .filter(|token| !is_level_noise(token))
        .filter(|token| !is_symbol_noise(token))
        .collect();

    let joined = kept.join(" ");
    let trimmed = joined.trim_end_matches(['-', '_', '.', ';', ':']);

    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Grouping key for a player name: case-insensitive, ignoring trailing
/// punctuation and whitespace. Never displayed.
pub fn normalize_name_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .trim_end_matches(|c: char| matches!(c, '-' | '_' | '.' | ':' | ';') || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name_plain() {
        let cfg = ParserConfig::default();
        assert_eq!(clean_name("PlayerOne", &cfg), "PlayerOne");
        assert_eq!(clean_name("  Dark   Knight ", &cfg), "Dark Knight");
    }

    #[test]
    fn test_clean_name_drops_role_tokens_and_levels() {
        let cfg = ParserConfig::default();
        assert_eq!(clean_name("Elite PlayerTwo 170", &cfg), "PlayerTwo");
        assert_eq!(clean_name("NM- Rambo 42 Club", &cfg), "Rambo");
    }

    #[test]
    fn test_clean_name_keeps_longer_numbers_attached_to_letters() {
        let cfg = ParserConfig::default();
        assert_eq!(clean_name("Marco99", &cfg), "Marco99");
        // 5+ digit tokens are not level noise, but have no letters
        assert_eq!(clean_name("Tarma 12345", &cfg), "Tarma");
    }

    #[test]
    fn test_clean_name_symbol_noise() {
        let cfg = ParserConfig::default();
        assert_eq!(clean_name("\u{2019} Fio", &cfg), "Fio");
        // 1 letter of 4 chars is below the threshold
        assert_eq!(clean_name("Eri a#$%", &cfg), "Eri");
        // 1 letter of 2 chars passes
        assert_eq!(clean_name("Eri a.", &cfg), "Eri a");
    }

    #[test]
    fn test_clean_name_trailing_punctuation() {
        let cfg = ParserConfig::default();
        assert_eq!(clean_name("Ralf_", &cfg), "Ralf");
        assert_eq!(clean_name("Clark:;", &cfg), "Clark");
        assert_eq!(clean_name("Leona-.", &cfg), "Leona");
    }

    #[test]
    fn test_clean_name_only_noise_is_empty() {
        let cfg = ParserConfig::default();
        assert_eq!(clean_name("Member 170 Elite 12", &cfg), "");
        assert_eq!(clean_name("", &cfg), "");
        assert_eq!(clean_name("!!! ...", &cfg), "");
    }

    #[test]
    fn test_normalize_name_key() {
        assert_eq!(normalize_name_key("Foo"), "foo");
        assert_eq!(normalize_name_key("  FOO.  "), "foo");
        assert_eq!(normalize_name_key("Foo Bar_-:;"), "foo bar");
        assert_eq!(normalize_name_key("foo"), normalize_name_key("Foo."));
    }
}
