//! Issues raised for screenshots with black areas in the game view.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::detection::Region;

/// Issue severity. Every game-view intrusion is currently HIGH.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "HIGH"),
        }
    }
}

/// One screenshot whose black area reaches into the game view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Screenshot file name (no directory)
    pub file: String,
    /// Share of black pixels in the whole frame
    pub black_percentage: f64,
    /// Bounding box of the black pixels
    pub region: Region,
    pub severity: Severity,
    /// Pattern tags derived from the file name
    pub tags: BTreeSet<String>,
}

/// Orders issues by descending black percentage.
///
/// The sort is stable, so issues with equal percentages keep scan order.
pub fn rank_issues(issues: &mut [Issue]) {
    issues.sort_by(|a, b| b.black_percentage.total_cmp(&a.black_percentage));
}
