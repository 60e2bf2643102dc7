//! Player roster extraction from recognized text lines.
//!
//! - `power`: decides whether a line is a power value
//! - `drop_line`: filters rank/role tag lines
//! - `name`: cleans multi-line name fragments and derives grouping keys
//! - `aggregate`: per-image state machine turning lines into records and suspects
//! - `merge`: cross-image dedup and ranking

pub mod aggregate;
pub mod drop_line;
pub mod merge;
pub mod name;
pub mod power;

pub use aggregate::{
    classify_line, parse_optional_lines, ImageParse, LineKind, SuspectRecord,
};
pub use merge::{merge_images, RankedPlayer, Roster};
