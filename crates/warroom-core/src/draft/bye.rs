// Bye-week tally: how many rostered players share each bye week.

use std::collections::BTreeMap;

/// Severity of a bye-week pile-up on one roster.
///
/// Two players sharing a week is worth a glance, three hurts, four or more
/// can sink the week outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ByeConflict {
    Caution,
    Warning,
    Severe,
}

impl ByeConflict {
    /// Classify a per-week roster count. Counts below 2 are not conflicts.
    pub fn from_count(count: u32) -> Option<Self> {
        match count {
            0 | 1 => None,
            2 => Some(ByeConflict::Caution),
            3 => Some(ByeConflict::Warning),
            _ => Some(ByeConflict::Severe),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ByeConflict::Caution => "caution",
            ByeConflict::Warning => "warning",
            ByeConflict::Severe => "severe",
        }
    }
}

/// Per-week roster counts. Only weeks with at least one player are stored,
/// and counts only ever grow: drafting is one-way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByeWeekTally {
    counts: BTreeMap<u8, u32>,
}

impl ByeWeekTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more rostered player idle in `week`.
    pub fn increment(&mut self, week: u8) -> u32 {
        let count = self.counts.entry(week).or_insert(0);
        *count += 1;
        *count
    }

    /// Current count for `week`, 0 when nobody on the roster has that bye.
    pub fn count(&self, week: u8) -> u32 {
        self.counts.get(&week).copied().unwrap_or(0)
    }

    /// Iterate `(week, count)` pairs in ascending week order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts.iter().map(|(&w, &c)| (w, c))
    }

    /// Weeks whose count reaches a conflict level, ascending by week.
    pub fn conflicts(&self) -> Vec<(u8, ByeConflict)> {
        self.iter()
            .filter_map(|(week, count)| ByeConflict::from_count(count).map(|c| (week, c)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
