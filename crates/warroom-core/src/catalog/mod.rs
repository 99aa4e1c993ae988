// Player catalog: the fixed universe of draftable players, indexed by id.
//
// A catalog is built once from a `CatalogSource` and is read-only afterwards,
// apart from the `drafted` flag which only the draft engine may set.

pub mod consensus;
pub mod fantasypros;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::player::{PlayerId, PlayerRecord, Position};

pub use consensus::ConsensusJsonSource;
pub use fantasypros::FantasyProsCsvSource;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog source produced no players")]
    Empty,

    #[error("no player with id {id} in catalog")]
    NotFound { id: PlayerId },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Descriptive information about where a catalog came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogMeta {
    /// Human-readable label of the data source (e.g. "FantasyPros CSV").
    pub source: Option<String>,
    /// When the rankings were generated, if the source says so.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Player records produced by a single source read.
#[derive(Debug, Clone, Default)]
pub struct LoadedPlayers {
    pub players: Vec<PlayerRecord>,
    pub meta: CatalogMeta,
}

/// Anything that can supply the initial player pool.
pub trait CatalogSource {
    fn load(&self) -> Result<LoadedPlayers, CatalogError>;
}

/// A hardcoded list of players.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    players: Vec<PlayerRecord>,
}

impl StaticSource {
    pub fn new(players: Vec<PlayerRecord>) -> Self {
        StaticSource { players }
    }
}

impl CatalogSource for StaticSource {
    fn load(&self) -> Result<LoadedPlayers, CatalogError> {
        Ok(LoadedPlayers {
            players: self.players.clone(),
            meta: CatalogMeta {
                source: Some("static".to_string()),
                updated_at: None,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The loaded player pool, in source order.
#[derive(Debug, Clone)]
pub struct Catalog {
    players: Vec<PlayerRecord>,
    index: HashMap<PlayerId, usize>,
    /// 1-based rank by ECR among players of the same position.
    position_ranks: HashMap<PlayerId, u32>,
    meta: CatalogMeta,
}

impl Catalog {
    /// Build a catalog from raw records.
    ///
    /// Every record starts undrafted. When two records share an id the first
    /// one wins and the later one is dropped with a warning.
    pub fn from_records(records: Vec<PlayerRecord>) -> Result<Self, CatalogError> {
        Self::build(records, CatalogMeta::default())
    }

    /// Load every record the source yields.
    pub fn load(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let loaded = source.load()?;
        Self::build(loaded.players, loaded.meta)
    }

    /// Load from a source, keeping only players whose position is in `allowed`.
    pub fn load_allowed(
        source: &dyn CatalogSource,
        allowed: &[Position],
    ) -> Result<Self, CatalogError> {
        let loaded = source.load()?;
        let before = loaded.players.len();
        let players: Vec<PlayerRecord> = loaded
            .players
            .into_iter()
            .filter(|p| allowed.contains(&p.position))
            .collect();
        if players.len() < before {
            info!(
                "Dropped {} players outside the allowed positions",
                before - players.len()
            );
        }
        Self::build(players, loaded.meta)
    }

    fn build(records: Vec<PlayerRecord>, meta: CatalogMeta) -> Result<Self, CatalogError> {
        let mut players = Vec::with_capacity(records.len());
        let mut seen = HashSet::new();
        for mut record in records {
            if !seen.insert(record.id) {
                warn!(
                    "skipping duplicate player id {} ('{}')",
                    record.id, record.name
                );
                continue;
            }
            record.drafted = false;
            players.push(record);
        }

        if players.is_empty() {
            return Err(CatalogError::Empty);
        }

        let index = players
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();
        let position_ranks = rank_by_position(&players);

        info!(
            "Catalog loaded: {} players from {}",
            players.len(),
            meta.source.as_deref().unwrap_or("unknown source")
        );

        Ok(Catalog {
            players,
            index,
            position_ranks,
            meta,
        })
    }

    /// Look up a player by id.
    pub fn get(&self, id: PlayerId) -> Result<&PlayerRecord, CatalogError> {
        self.index
            .get(&id)
            .map(|&i| &self.players[i])
            .ok_or(CatalogError::NotFound { id })
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.index.contains_key(&id)
    }

    /// Ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    /// Number of players. A catalog is never empty.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Positional rank ("WR12" -> 12), by ECR within the player's position.
    /// `None` for players without an ECR.
    pub fn position_rank(&self, id: PlayerId) -> Option<u32> {
        self.position_ranks.get(&id).copied()
    }

    pub fn meta(&self) -> &CatalogMeta {
        &self.meta
    }

    /// Flip the drafted flag and hand back the record. Only the draft engine
    /// calls this.
    pub(crate) fn mark_drafted(&mut self, id: PlayerId) -> Option<&PlayerRecord> {
        let &i = self.index.get(&id)?;
        let record = &mut self.players[i];
        record.drafted = true;
        Some(record)
    }
}

/// Rank ranked players within each position by ascending ECR. Ties keep
/// catalog order.
fn rank_by_position(players: &[PlayerRecord]) -> HashMap<PlayerId, u32> {
    let mut ranked: Vec<(&Position, f64, PlayerId)> = players
        .iter()
        .filter_map(|p| p.ecr.map(|ecr| (&p.position, ecr, p.id)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut next: HashMap<&Position, u32> = HashMap::new();
    let mut ranks = HashMap::with_capacity(ranked.len());
    for (position, _, id) in ranked {
        let rank = next.entry(position).or_insert(0);
        *rank += 1;
        ranks.insert(id, *rank);
    }
    ranks
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32, name: &str, pos: Position, bye: Option<u8>) -> PlayerRecord {
        PlayerRecord::new(id, name, pos, "KC", bye)
    }

    #[test]
    fn empty_records_rejected() {
        let err = Catalog::from_records(vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn get_known_and_unknown() {
        let catalog = Catalog::from_records(vec![
            player(1, "Patrick Mahomes", Position::Quarterback, Some(10)),
            player(2, "Travis Kelce", Position::TightEnd, Some(10)),
        ])
        .unwrap();

        assert_eq!(catalog.get(PlayerId(2)).unwrap().name, "Travis Kelce");
        let err = catalog.get(PlayerId(9)).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { id } if id == PlayerId(9)));
    }

    #[test]
    fn ids_preserve_source_order() {
        let catalog = Catalog::from_records(vec![
            player(30, "C", Position::WideReceiver, None),
            player(10, "A", Position::WideReceiver, None),
            player(20, "B", Position::WideReceiver, None),
        ])
        .unwrap();
        let ids: Vec<u32> = catalog.ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let catalog = Catalog::from_records(vec![
            player(1, "First", Position::RunningBack, None),
            player(1, "Second", Position::RunningBack, None),
            player(2, "Other", Position::RunningBack, None),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(PlayerId(1)).unwrap().name, "First");
    }

    #[test]
    fn drafted_flag_reset_on_load() {
        let mut p = player(1, "Already", Position::Kicker, None);
        p.drafted = true;
        let catalog = Catalog::from_records(vec![p]).unwrap();
        assert!(!catalog.get(PlayerId(1)).unwrap().drafted);
    }

    #[test]
    fn static_source_load() {
        let source = StaticSource::new(vec![player(1, "A", Position::Defense, Some(7))]);
        let catalog = Catalog::load(&source).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.meta().source.as_deref(), Some("static"));
    }

    #[test]
    fn load_allowed_filters_positions() {
        let source = StaticSource::new(vec![
            player(1, "QB", Position::Quarterback, None),
            player(2, "FB", Position::Other("FB".into()), None),
            player(3, "WR", Position::WideReceiver, None),
        ]);
        let catalog =
            Catalog::load_allowed(&source, &[Position::Quarterback, Position::WideReceiver])
                .unwrap();
        let ids: Vec<u32> = catalog.ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn load_allowed_everything_filtered_is_empty() {
        let source = StaticSource::new(vec![player(1, "FB", Position::Other("FB".into()), None)]);
        let err = Catalog::load_allowed(&source, &[Position::Quarterback]).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn position_rank_orders_by_ecr_within_position() {
        let ranked = |id, pos, ecr| {
            let mut p = player(id, "X", pos, None);
            p.ecr = ecr;
            p
        };
        let catalog = Catalog::from_records(vec![
            ranked(1, Position::WideReceiver, Some(9.5)),
            ranked(2, Position::RunningBack, Some(1.0)),
            ranked(3, Position::WideReceiver, Some(2.0)),
            ranked(4, Position::WideReceiver, None),
            ranked(5, Position::WideReceiver, Some(9.5)),
        ])
        .unwrap();
        assert_eq!(catalog.position_rank(PlayerId(3)), Some(1));
        assert_eq!(catalog.position_rank(PlayerId(1)), Some(2));
        assert_eq!(catalog.position_rank(PlayerId(5)), Some(3));
        assert_eq!(catalog.position_rank(PlayerId(2)), Some(1));
        assert_eq!(catalog.position_rank(PlayerId(4)), None);
    }

    #[test]
    fn mark_drafted_sets_flag() {
        let mut catalog =
            Catalog::from_records(vec![player(1, "A", Position::TightEnd, None)]).unwrap();
        assert!(catalog.mark_drafted(PlayerId(1)).unwrap().drafted);
        assert!(catalog.get(PlayerId(1)).unwrap().drafted);
        assert!(catalog.mark_drafted(PlayerId(2)).is_none());
    }
}
