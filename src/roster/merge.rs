//! Cross-image merge of player records.

use serde::Serialize;
use std::collections::HashMap;
use std::collections::HashSet;

use super::aggregate::{ImageParse, PlayerRecord, SuspectRecord};
use super::name::normalize_name_key;

/// A merged player with its review flag for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPlayer {
    pub name: String,
    pub power: u64,
    /// Some image produced a suspect under the same name key
    pub suspected_malformed: bool,
}

/// Canonical result of a run: unique players ranked by power, plus every
/// suspect from every image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub players: Vec<PlayerRecord>,
    pub suspects: Vec<SuspectRecord>,
}

impl Roster {
    /// Players annotated with whether a suspect shares their name key.
    pub fn ranked(&self) -> Vec<RankedPlayer> {
        let suspect_keys: HashSet<String> = self
            .suspects
            .iter()
            .map(|s| normalize_name_key(&s.name))
            .collect();

        self.players
            .iter()
            .map(|p| RankedPlayer {
                name: p.name.clone(),
                power: p.power,
                suspected_malformed: suspect_keys.contains(&normalize_name_key(&p.name)),
            })
            .collect()
    }

    /// Highest power in the roster.
    pub fn highest_power(&self) -> Option<u64> {
        self.players.iter().map(|p| p.power).max()
    }

    /// True when there is nothing to show: no players and no suspects.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.suspects.is_empty()
    }
}

/// Deduplicates records by normalized name key, keeping the highest power.
///
/// On a power tie the first-seen record (and its display name) is kept.
/// Output is sorted by power descending; equal powers keep first-seen order.
pub fn dedup_players<I>(records: I) -> Vec<PlayerRecord>
where
    I: IntoIterator<Item = PlayerRecord>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut best: Vec<PlayerRecord> = Vec::new();

    for record in records {
        let key = normalize_name_key(&record.name);
        match slots.get(&key) {
            Some(&idx) => {
                if record.power > best[idx].power {
                    best[idx] = record;
                }
            }
            None => {
                slots.insert(key, best.len());
                best.push(record);
            }
        }
    }

    // Stable sort keeps first-seen order among equal powers
    best.sort_by(|a, b| b.power.cmp(&a.power));
    best
}

/// Merges per-image results into one roster.
pub fn merge_images<I>(images: I) -> Roster
where
    I: IntoIterator<Item = ImageParse>,
{
    let (players, suspects) = images.into_iter().fold(
        (Vec::new(), Vec::new()),
        |(mut players, mut suspects), image| {
            players.extend(image.players);
            suspects.extend(image.suspects);
            (players, suspects)
        },
    );

    Roster {
        players: dedup_players(players),
        suspects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, power: u64) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            power,
        }
    }

    fn suspect(name: &str) -> SuspectRecord {
        SuspectRecord {
            name: name.to_string(),
            raw_power_text: "999999".to_string(),
            reason: "power<3000000 (999999)".to_string(),
        }
    }

    #[test]
    fn test_merge_keeps_max_power_per_key() {
        let roster = merge_images(vec![
            ImageParse {
                players: vec![player("Foo", 5_000_000)],
                suspects: vec![],
            },
            ImageParse {
                players: vec![player("foo", 7_000_000)],
                suspects: vec![],
            },
        ]);

        assert_eq!(roster.players, vec![player("foo", 7_000_000)]);
    }

    #[test]
    fn test_dedup_tie_keeps_first_seen() {
        let merged = dedup_players(vec![player("Foo.", 5_000_000), player("FOO", 5_000_000)]);
        assert_eq!(merged, vec![player("Foo.", 5_000_000)]);
    }

    #[test]
    fn test_dedup_sorted_descending_and_stable() {
        let merged = dedup_players(vec![
            player("Alpha", 4_000_000),
            player("Bravo", 6_000_000),
            player("Charlie", 4_000_000),
            player("alpha", 3_000_000),
        ]);

        assert_eq!(
            merged,
            vec![
                player("Bravo", 6_000_000),
                player("Alpha", 4_000_000),
                player("Charlie", 4_000_000),
            ]
        );
    }

    #[test]
    fn test_merge_each_key_once() {
        let images = vec![
            ImageParse {
                players: vec![player("A", 1), player("b", 2), player("a_", 3)],
                suspects: vec![],
            },
            ImageParse {
                players: vec![player("B ", 4), player("c", 5), player("A", 1)],
                suspects: vec![],
            },
        ];
        let roster = merge_images(images);

        let keys: Vec<String> = roster.players.iter().map(|p| normalize_name_key(&p.name)).collect();
        let unique: HashSet<&String> = keys.iter().collect();
        assert_eq!(keys.len(), unique.len());
        assert_eq!(keys, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_suspects_concatenated_in_order() {
        let roster = merge_images(vec![
            ImageParse {
                players: vec![],
                suspects: vec![suspect("X"), suspect("X")],
            },
            ImageParse {
                players: vec![],
                suspects: vec![suspect("Y")],
            },
        ]);

        let names: Vec<&str> = roster.suspects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["X", "X", "Y"]);
    }

    #[test]
    fn test_ranked_flags_suspected_names() {
        let roster = merge_images(vec![
            ImageParse {
                players: vec![],
                suspects: vec![suspect("alpha.")],
            },
            ImageParse {
                players: vec![player("Alpha", 5_000_000), player("Bravo", 4_000_000)],
                suspects: vec![],
            },
        ]);

        let ranked = roster.ranked();
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].suspected_malformed);
        assert!(!ranked[1].suspected_malformed);
        assert_eq!(roster.highest_power(), Some(5_000_000));
    }

    #[test]
    fn test_suspects_only_roster_is_not_empty() {
        let roster = merge_images(vec![ImageParse {
            players: vec![],
            suspects: vec![suspect("Alpha")],
        }]);
        assert!(!roster.is_empty());
        assert_eq!(roster.highest_power(), None);
        assert!(roster.ranked().is_empty());
    }

    #[test]
    fn test_empty_roster() {
        let roster = merge_images(Vec::new());
        assert!(roster.is_empty());
        assert_eq!(roster.highest_power(), None);
    }
}
