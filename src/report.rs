//! Console rendering of a merged roster.

use crate::roster::Roster;

/// Formats a number with comma thousands separators.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Renders summary, ranked table and suspect list.
pub fn render(roster: &Roster) -> String {
    let ranked = roster.ranked();
    let flagged = ranked.iter().filter(|p| p.suspected_malformed).count();

    let name_w = ranked
        .iter()
        .map(|p| p.name.chars().count())
        .chain(std::iter::once("Player Name".len()))
        .max()
        .unwrap_or(0);
    let power_w = ranked
        .iter()
        .map(|p| format_thousands(p.power).len())
        .chain(std::iter::once("Power".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("Total Players: {}\n", ranked.len()));
    out.push_str(&format!("Suspected Issues: {}\n", flagged));
    if let Some(max) = roster.highest_power() {
        out.push_str(&format!("Highest Power: {}\n", format_thousands(max)));
    }
    out.push('\n');

    out.push_str(&format!("{:<name_w$} | {:>power_w$}\n", "Player Name", "Power"));
    out.push_str(&format!("{}-+-{}\n", "-".repeat(name_w), "-".repeat(power_w)));
    for player in &ranked {
        let marker = if player.suspected_malformed { " *" } else { "" };
        out.push_str(&format!(
            "{:<name_w$} | {:>power_w$}{}\n",
            player.name,
            format_thousands(player.power),
            marker
        ));
    }

    if !roster.suspects.is_empty() {
        out.push_str("\nSuspects (malformed or below threshold):\n");
        for s in &roster.suspects {
            out.push_str(&format!(
                "  - {:<25}  num='{}'  -> {}\n",
                s.name, s.raw_power_text, s.reason
            ));
        }
    }

    out
}
