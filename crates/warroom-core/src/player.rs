// Player records and position codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a player within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        PlayerId(id)
    }
}

/// Football positions. Codes outside the standard six are kept verbatim in
/// `Other` so the engine never rejects a record because of its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
    Other(String),
}

impl Position {
    /// Parse an already-normalized position code.
    ///
    /// "QB" -> Quarterback, "RB" -> RunningBack, "WR" -> WideReceiver,
    /// "TE" -> TightEnd, "K" -> Kicker, "DEF" -> Defense; anything else is
    /// preserved upper-cased in `Other`.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "QB" => Position::Quarterback,
            "RB" => Position::RunningBack,
            "WR" => Position::WideReceiver,
            "TE" => Position::TightEnd,
            "K" => Position::Kicker,
            "DEF" => Position::Defense,
            other => Position::Other(other.to_string()),
        }
    }

    /// Short display code for this position.
    pub fn code(&self) -> &str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
            Position::Other(code) => code,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for Position {
    fn from(s: String) -> Self {
        Position::from_code(&s)
    }
}

impl From<Position> for String {
    fn from(p: Position) -> Self {
        p.code().to_string()
    }
}

/// A single draftable player.
///
/// Core identity fields (`id`, `name`, `position`, `team`, `bye_week`) are
/// fixed once the record enters a catalog. Only the draft engine flips
/// `drafted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub team: String,
    /// Week the player's team is idle, if known.
    pub bye_week: Option<u8>,
    #[serde(default)]
    pub drafted: bool,
    /// Expert consensus rank.
    #[serde(default)]
    pub ecr: Option<f64>,
    /// Average draft position.
    #[serde(default)]
    pub adp: Option<f64>,
    #[serde(default)]
    pub tier: Option<u32>,
    /// Projected season points under PPR scoring.
    #[serde(default)]
    pub proj_ppr: Option<f64>,
}

impl PlayerRecord {
    /// Build an undrafted record with no ranking metadata.
    pub fn new(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        position: Position,
        team: impl Into<String>,
        bye_week: Option<u8>,
    ) -> Self {
        PlayerRecord {
            id: id.into(),
            name: name.into(),
            position,
            team: team.into(),
            bye_week,
            drafted: false,
            ecr: None,
            adp: None,
            tier: None,
            proj_ppr: None,
        }
    }
}
