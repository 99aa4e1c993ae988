// Draft engine: available pool, roster in draft order, and bye-week tally.

use tracing::{debug, info};

use super::bye::{ByeConflict, ByeWeekTally};
use crate::catalog::{Catalog, CatalogError};
use crate::player::{PlayerId, PlayerRecord, Position};

/// Why a draft request left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotDraftedReason {
    /// The id is not in the catalog at all.
    UnknownPlayer,
    /// The player is already on the roster.
    AlreadyDrafted,
}

/// Result of a single `draft_player` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftOutcome {
    Drafted,
    NotDrafted(NotDraftedReason),
}

impl DraftOutcome {
    pub fn is_drafted(&self) -> bool {
        matches!(self, DraftOutcome::Drafted)
    }
}

/// Owns the catalog and all mutable draft state.
///
/// Each catalog id is in exactly one of `available` and `roster`. A player
/// moves from available to the roster once and never comes back.
#[derive(Debug, Clone)]
pub struct DraftEngine {
    catalog: Catalog,
    /// Undrafted ids in catalog order.
    available: Vec<PlayerId>,
    /// Snapshots of drafted players, in draft order.
    roster: Vec<PlayerRecord>,
    bye_tally: ByeWeekTally,
}

impl DraftEngine {
    /// Start a draft over the whole catalog: everyone available, empty roster.
    pub fn new(catalog: Catalog) -> Self {
        let available: Vec<PlayerId> = catalog.ids().collect();
        info!("Draft engine initialized with {} available players", available.len());
        DraftEngine {
            catalog,
            available,
            roster: Vec::new(),
            bye_tally: ByeWeekTally::new(),
        }
    }

    /// Move a player from the available pool onto the roster.
    ///
    /// Unknown and already-drafted ids are rejected without touching any
    /// state, so a repeated request (e.g. a double key press) is harmless.
    pub fn draft_player(&mut self, id: PlayerId) -> DraftOutcome {
        let Some(slot) = self.available.iter().position(|&a| a == id) else {
            let reason = if self.catalog.contains(id) {
                NotDraftedReason::AlreadyDrafted
            } else {
                NotDraftedReason::UnknownPlayer
            };
            debug!("Draft of player {} rejected: {:?}", id, reason);
            return DraftOutcome::NotDrafted(reason);
        };

        let Some(record) = self.catalog.mark_drafted(id).cloned() else {
            debug!("Draft of player {} rejected: not in catalog", id);
            return DraftOutcome::NotDrafted(NotDraftedReason::UnknownPlayer);
        };

        self.available.remove(slot);
        let bye_count = record.bye_week.map(|week| self.bye_tally.increment(week));

        info!(
            "Drafted #{} {} ({} {}) as pick {}{}",
            record.id,
            record.name,
            record.position,
            record.team,
            self.roster.len() + 1,
            match (record.bye_week, bye_count) {
                (Some(week), Some(count)) => format!(", bye {} now x{}", week, count),
                _ => String::new(),
            }
        );

        self.roster.push(record);
        DraftOutcome::Drafted
    }

    // --- Read accessors ---

    /// Undrafted players in catalog order.
    pub fn list_available(&self) -> Vec<&PlayerRecord> {
        self.available
            .iter()
            .filter_map(|&id| self.catalog.get(id).ok())
            .collect()
    }

    /// Drafted players in the order they were taken.
    pub fn list_roster(&self) -> &[PlayerRecord] {
        &self.roster
    }

    /// Number of rostered players whose bye falls in `week`.
    pub fn bye_week_count(&self, week: u8) -> u32 {
        self.bye_tally.count(week)
    }

    pub fn available_ids(&self) -> &[PlayerId] {
        &self.available
    }

    pub fn bye_tally(&self) -> &ByeWeekTally {
        &self.bye_tally
    }

    /// Weeks where the roster already has a bye pile-up.
    pub fn bye_conflicts(&self) -> Vec<(u8, ByeConflict)> {
        self.bye_tally.conflicts()
    }

    /// The count the player's bye week would reach if they were drafted now.
    ///
    /// `None` when the player has no bye week or is not available.
    pub fn bye_count_if_drafted(&self, id: PlayerId) -> Option<u32> {
        let player = self.catalog.get(id).ok().filter(|p| !p.drafted)?;
        let week = player.bye_week?;
        Some(self.bye_tally.count(week) + 1)
    }

    /// Whether drafting `id` would pair a QB with one of his pass catchers
    /// (WR or TE from the same team) already on the roster, or the reverse.
    pub fn stacks_with_roster(&self, id: PlayerId) -> bool {
        let Ok(candidate) = self.catalog.get(id) else {
            return false;
        };
        if candidate.drafted || candidate.team.is_empty() {
            return false;
        }
        self.roster
            .iter()
            .filter(|p| p.team == candidate.team)
            .any(|p| is_qb_stack(&candidate.position, &p.position))
    }

    /// Positional rank label such as "WR12", or the bare code when unranked.
    pub fn position_label(&self, id: PlayerId) -> Option<String> {
        let player = self.catalog.get(id).ok()?;
        Some(match self.catalog.position_rank(id) {
            Some(rank) => format!("{}{}", player.position, rank),
            None => player.position.to_string(),
        })
    }

    /// Look up any catalog player, drafted or not.
    pub fn player(&self, id: PlayerId) -> Result<&PlayerRecord, CatalogError> {
        self.catalog.get(id)
    }

    pub fn is_available(&self, id: PlayerId) -> bool {
        self.catalog.get(id).is_ok_and(|p| !p.drafted)
    }

    pub fn pick_count(&self) -> usize {
        self.roster.len()
    }

    /// True once every catalog player has been drafted.
    pub fn is_complete(&self) -> bool {
        self.available.is_empty()
    }

    /// Rostered players per position, positions in first-drafted order.
    pub fn roster_position_counts(&self) -> Vec<(Position, usize)> {
        let mut counts: Vec<(Position, usize)> = Vec::new();
        for p in &self.roster {
            match counts.iter_mut().find(|(pos, _)| *pos == p.position) {
                Some((_, n)) => *n += 1,
                None => counts.push((p.position.clone(), 1)),
            }
        }
        counts
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

fn is_qb_stack(a: &Position, b: &Position) -> bool {
    let pass_catcher = |p: &Position| matches!(p, Position::WideReceiver | Position::TightEnd);
    (*a == Position::Quarterback && pass_catcher(b))
        || (pass_catcher(a) && *b == Position::Quarterback)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
