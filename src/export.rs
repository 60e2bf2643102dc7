//! Roster export: CSV, copy-paste text and JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::roster::{RankedPlayer, Roster, SuspectRecord};

/// CSV header row.
const CSV_HEADER: &str = "Player Name,Power,Suspected Malformed";

/// Quotes a CSV field if it contains a separator, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders the ranked roster as CSV (header included).
pub fn roster_to_csv(roster: &Roster) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');
    for player in roster.ranked() {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(&player.name),
            player.power,
            if player.suspected_malformed { "True" } else { "False" }
        ));
    }
    out
}

/// One `name,power` line per player, for pasting into a spreadsheet or chat.
pub fn roster_to_copy_text(roster: &Roster) -> String {
    roster
        .players
        .iter()
        .map(|p| format!("{},{}", p.name, p.power))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the roster CSV to a file, replacing any existing content.
pub fn export_to_csv(roster: &Roster, output_path: &Path) -> Result<()> {
    let mut file = File::create(output_path)
        .context(format!("Failed to create CSV file: {}", output_path.display()))?;

    file.write_all(roster_to_csv(roster).as_bytes())
        .context("Failed to write CSV data")?;

    Ok(())
}

#[derive(Serialize)]
struct RosterJson<'a> {
    players: Vec<RankedPlayer>,
    suspects: &'a [SuspectRecord],
}

/// Export the roster to a JSON file.
///
/// The output is pretty-printed for human readability.
pub fn export_to_json(roster: &Roster, output_path: &Path) -> Result<()> {
    let doc = RosterJson {
        players: roster.ranked(),
        suspects: &roster.suspects,
    };
    let json = serde_json::to_string_pretty(&doc).context("Failed to serialize roster to JSON")?;

    let mut file = File::create(output_path)
        .context(format!("Failed to create JSON file: {}", output_path.display()))?;

    file.write_all(json.as_bytes())
        .context("Failed to write JSON data")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::aggregate::PlayerRecord;
    use tempfile::tempdir;

    fn sample_roster() -> Roster {
        Roster {
            players: vec![
                PlayerRecord { name: "Marco, Rossi".to_string(), power: 7_000_000 },
                PlayerRecord { name: "Fio".to_string(), power: 5_000_000 },
            ],
            suspects: vec![SuspectRecord {
                name: "fio".to_string(),
                raw_power_text: "999,999".to_string(),
                reason: "power<3000000 (999999)".to_string(),
            }],
        }
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Fio"), "Fio");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_roster_to_csv() {
        let csv = roster_to_csv(&sample_roster());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "\"Marco, Rossi\",7000000,False");
        assert_eq!(lines[2], "Fio,5000000,True");
    }

    #[test]
    fn test_roster_to_copy_text() {
        assert_eq!(
            roster_to_copy_text(&sample_roster()),
            "Marco, Rossi,7000000\nFio,5000000"
        );
    }

    #[test]
    fn test_export_to_csv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("players.csv");

        export_to_csv(&sample_roster(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(CSV_HEADER));
        assert!(content.contains("Fio,5000000,True"));
    }

    #[test]
    fn test_export_to_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.json");

        export_to_json(&sample_roster(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"power\": 7000000"));
        assert!(content.contains("\"suspected_malformed\": true"));
        assert!(content.contains("\"reason\": \"power<3000000 (999999)\""));
    }
}
