//! Line clear records and score accounting

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// One line clear: how many rows, and whether it was a T-spin
///
/// Only the 7 combinations that can happen in play can be constructed:
/// 1 to 4 lines, and T-spins of 1 to 3 lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawLineClear", into = "RawLineClear")]
pub struct LineClear {
    // Field order gives plain clears before T-spins, then by line count
    tspin: bool,
    lines: u8,
}

#[derive(Serialize, Deserialize)]
struct RawLineClear {
    lines: u8,
    tspin: bool,
}

impl TryFrom<RawLineClear> for LineClear {
    type Error = RulesError;

    fn try_from(raw: RawLineClear) -> Result<Self, Self::Error> {
        LineClear::new(raw.lines, raw.tspin)
    }
}

impl From<LineClear> for RawLineClear {
    fn from(clear: LineClear) -> Self {
        Self {
            lines: clear.lines,
            tspin: clear.tspin,
        }
    }
}

impl LineClear {
    /// Every reachable line clear, plain ones first
    pub const ALL: [LineClear; 7] = [
        LineClear { tspin: false, lines: 1 },
        LineClear { tspin: false, lines: 2 },
        LineClear { tspin: false, lines: 3 },
        LineClear { tspin: false, lines: 4 },
        LineClear { tspin: true, lines: 1 },
        LineClear { tspin: true, lines: 2 },
        LineClear { tspin: true, lines: 3 },
    ];

    pub fn new(lines: u8, tspin: bool) -> Result<Self, RulesError> {
        let max = if tspin { 3 } else { 4 };
        if !(1..=max).contains(&lines) {
            return Err(RulesError::InvalidLineClear { lines, tspin });
        }
        Ok(Self { tspin, lines })
    }

    pub fn lines(&self) -> u8 {
        self.lines
    }

    pub fn is_tspin(&self) -> bool {
        self.tspin
    }

    /// Points awarded for this clear
    pub fn score(&self) -> u32 {
        let lines = u32::from(self.lines);
        match (self.tspin, lines) {
            (true, _) => 200 * lines,
            (false, 4) => 400,
            (false, _) => 100 * (lines - 1),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match (self.tspin, self.lines) {
            (false, 1) => "Single",
            (false, 2) => "Double",
            (false, 3) => "Triple",
            (false, _) => "Tetris",
            (true, 1) => "T-Spin Single",
            (true, 2) => "T-Spin Double",
            (true, _) => "T-Spin Triple",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match (self.tspin, self.lines) {
            (false, 1) => "S",
            (false, 2) => "D",
            (false, 3) => "T",
            (false, _) => "Q",
            (true, 1) => "TSS",
            (true, 2) => "TSD",
            (true, _) => "TST",
        }
    }
}

impl fmt::Display for LineClear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Counts of each line clear over a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreHistory {
    counts: BTreeMap<LineClear, u32>,
    last: Option<LineClear>,
}

impl Default for ScoreHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self {
            counts: LineClear::ALL.iter().map(|&clear| (clear, 0)).collect(),
            last: None,
        }
    }

    pub fn record(&mut self, clear: LineClear) {
        *self.counts.entry(clear).or_insert(0) += 1;
        self.last = Some(clear);
    }

    pub fn count(&self, clear: LineClear) -> u32 {
        self.counts.get(&clear).copied().unwrap_or(0)
    }

    /// The most recent line clear, if any
    pub fn last(&self) -> Option<LineClear> {
        self.last
    }

    pub fn total_score(&self) -> u64 {
        self.counts
            .iter()
            .map(|(clear, &count)| u64::from(clear.score()) * u64::from(count))
            .sum()
    }

    pub fn total_lines(&self) -> u64 {
        self.counts
            .iter()
            .map(|(clear, &count)| u64::from(clear.lines()) * u64::from(count))
            .sum()
    }

    /// All reachable clears with their counts, zeros included
    pub fn iter(&self) -> impl Iterator<Item = (LineClear, u32)> + '_ {
        self.counts.iter().map(|(&clear, &count)| (clear, count))
    }
}

impl Serialize for ScoreHistory {
    /// Serialized as a map from display name to count
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (clear, count) in &self.counts {
            map.serialize_entry(clear.display_name(), count)?;
        }
        map.end()
    }
}
