// Consensus rankings JSON loader.
//
// Reads a `consensus.json` file of the form
// `{ "source": ..., "updated_at": ..., "players": [ ... ] }`. Player objects
// come from several exporters, so field names are accepted under their
// common aliases, and numbers may arrive as JSON numbers or as strings. A
// row that still cannot be read is skipped with a warning.

use std::io::Read;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::{CatalogError, CatalogMeta, CatalogSource, LoadedPlayers};
use crate::normalize::{normalize_bye, normalize_position, normalize_team, parse_number, whole_number};
use crate::player::{PlayerId, PlayerRecord, Position};

// ---------------------------------------------------------------------------
// Raw serde structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawConsensusFile {
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    players: Vec<serde_json::Value>,
}

/// One player object. Unknown keys (notes, risk, receptions, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RawConsensusPlayer {
    #[serde(default, deserialize_with = "lenient_number")]
    id: Option<f64>,
    #[serde(default, alias = "name", alias = "Player")]
    player: Option<String>,
    #[serde(default, alias = "position", alias = "Position")]
    pos: Option<String>,
    #[serde(default, alias = "Team")]
    team: Option<String>,
    #[serde(default, alias = "Bye", alias = "bye_week", deserialize_with = "lenient_number")]
    bye: Option<f64>,
    #[serde(default, alias = "rank", alias = "ECR", deserialize_with = "lenient_number")]
    ecr: Option<f64>,
    #[serde(default, alias = "ADP", deserialize_with = "lenient_number")]
    adp: Option<f64>,
    #[serde(default, alias = "Tier", deserialize_with = "lenient_number")]
    tier: Option<f64>,
    #[serde(
        default,
        alias = "Projection_PPR",
        alias = "proj",
        deserialize_with = "lenient_number"
    )]
    proj_ppr: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accept `10`, `10.0`, `"10"` or null. Unparsable text reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(v)) => Some(v).filter(|v| v.is_finite()),
        Some(NumberOrText::Text(s)) => parse_number(&s),
        None => None,
    })
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Loads players from a consensus JSON file on disk.
#[derive(Debug, Clone)]
pub struct ConsensusJsonSource {
    path: PathBuf,
}

impl ConsensusJsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConsensusJsonSource { path: path.into() }
    }
}

impl CatalogSource for ConsensusJsonSource {
    fn load(&self) -> Result<LoadedPlayers, CatalogError> {
        let path_str = self.path.display().to_string();
        let file = std::fs::File::open(&self.path).map_err(|e| CatalogError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        load_from_reader(std::io::BufReader::new(file)).map_err(|e| CatalogError::Json {
            path: path_str,
            source: e,
        })
    }
}

// ---------------------------------------------------------------------------
// Reader-based loader (enables testing without temp files)
// ---------------------------------------------------------------------------

fn load_from_reader<R: Read>(rdr: R) -> Result<LoadedPlayers, serde_json::Error> {
    let raw: RawConsensusFile = serde_json::from_reader(rdr)?;

    let updated_at = raw.updated_at.as_deref().and_then(parse_timestamp);

    let players = raw
        .players
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match RawConsensusPlayer::deserialize(value) {
            Ok(raw) => convert_player(i, raw),
            Err(e) => {
                warn!("skipping consensus row {}: {}", i + 1, e);
                None
            }
        })
        .collect();

    Ok(LoadedPlayers {
        players,
        meta: CatalogMeta {
            source: raw.source.or_else(|| Some("consensus.json".to_string())),
            updated_at,
        },
    })
}

fn convert_player(row: usize, raw: RawConsensusPlayer) -> Option<PlayerRecord> {
    let name = raw.player.unwrap_or_default().trim().to_string();
    if name.is_empty() {
        warn!("skipping consensus row {}: missing player name", row + 1);
        return None;
    }

    let id = raw
        .id
        .and_then(whole_number)
        .and_then(|id| u32::try_from(id).ok())
        .filter(|id| *id >= 1)
        .unwrap_or(row as u32 + 1);
    let position = Position::from_code(&normalize_position(raw.pos.as_deref().unwrap_or("")));

    Some(PlayerRecord {
        id: PlayerId(id),
        name,
        position,
        team: normalize_team(raw.team.as_deref().unwrap_or("")),
        bye_week: raw.bye.and_then(whole_number).and_then(normalize_bye),
        drafted: false,
        ecr: raw.ecr,
        adp: raw.adp,
        tier: raw
            .tier
            .and_then(whole_number)
            .and_then(|t| u32::try_from(t).ok())
            .filter(|t| *t > 0),
        proj_ppr: raw.proj_ppr,
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            warn!("ignoring unparsable updated_at '{}': {}", s, e);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn parses_converter_output() {
        let json = r#"{
            "source": "FantasyPros CSV (PPR Cheatsheet download)",
            "updated_at": "2025-08-20T14:03:11.512000Z",
            "players": [
                {"id": 1, "player": "Ja'Marr Chase", "pos": "WR", "team": "CIN", "bye": 10,
                 "ecr": 1, "adp": null, "proj_ppr": 0.0, "tier": 1,
                 "notes": {"ecr_vs_adp": null}},
                {"id": 2, "player": "Bijan Robinson", "pos": "RB", "team": "ATL", "bye": 5,
                 "ecr": 2, "tier": 1}
            ]
        }"#;
        let loaded = load_from_reader(json.as_bytes()).unwrap();
        assert_eq!(loaded.players.len(), 2);
        assert_eq!(
            loaded.meta.source.as_deref(),
            Some("FantasyPros CSV (PPR Cheatsheet download)")
        );
        assert_eq!(loaded.meta.updated_at.unwrap().year(), 2025);

        let chase = &loaded.players[0];
        assert_eq!(chase.id, PlayerId(1));
        assert_eq!(chase.position, Position::WideReceiver);
        assert_eq!(chase.bye_week, Some(10));
        assert_eq!(chase.ecr, Some(1.0));
        assert_eq!(chase.tier, Some(1));
        assert!(chase.adp.is_none());
    }

    #[test]
    fn accepts_field_aliases() {
        let json = r#"{"players": [
            {"name": "Josh Allen", "position": "QB1", "Team": "buf", "bye_week": 7, "rank": 20}
        ]}"#;
        let loaded = load_from_reader(json.as_bytes()).unwrap();
        let p = &loaded.players[0];
        assert_eq!(p.name, "Josh Allen");
        assert_eq!(p.position, Position::Quarterback);
        assert_eq!(p.team, "BUF");
        assert_eq!(p.bye_week, Some(7));
        assert_eq!(p.ecr, Some(20.0));
    }

    #[test]
    fn missing_id_defaults_to_row_number() {
        let json = r#"{"players": [
            {"player": "A", "pos": "RB"},
            {"player": "B", "pos": "RB"}
        ]}"#;
        let loaded = load_from_reader(json.as_bytes()).unwrap();
        let ids: Vec<u32> = loaded.players.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn zero_bye_and_tier_are_absent() {
        let json = r#"{"players": [{"player": "A", "pos": "K", "bye": 0, "tier": 0}]}"#;
        let loaded = load_from_reader(json.as_bytes()).unwrap();
        assert!(loaded.players[0].bye_week.is_none());
        assert!(loaded.players[0].tier.is_none());
    }

    #[test]
    fn normalizes_team_and_defense() {
        let json = r#"{"players": [{"player": "Jaguars", "pos": "DST", "team": "JAX", "bye": 8}]}"#;
        let loaded = load_from_reader(json.as_bytes()).unwrap();
        assert_eq!(loaded.players[0].position, Position::Defense);
        assert_eq!(loaded.players[0].team, "JAC");
    }

    #[test]
    fn nameless_rows_skipped() {
        let json = r#"{"players": [{"pos": "WR"}, {"player": "Real", "pos": "WR"}]}"#;
        let loaded = load_from_reader(json.as_bytes()).unwrap();
        assert_eq!(loaded.players.len(), 1);
        assert_eq!(loaded.players[0].id, PlayerId(2));
    }

    #[test]
    fn numbers_as_strings_and_floats() {
        let json = r#"{"players": [
            {"id": 1, "player": "A", "pos": "WR", "bye": 5},
            {"id": 2, "player": "B", "pos": "RB", "bye": "10"},
            {"id": 3.0, "player": "C", "pos": "TE", "bye": 7.0, "tier": "2", "ecr": "14.5"}
        ]}"#;
        let loaded = load_from_reader(json.as_bytes()).unwrap();
        let byes: Vec<Option<u8>> = loaded.players.iter().map(|p| p.bye_week).collect();
        assert_eq!(byes, vec![Some(5), Some(10), Some(7)]);
        let c = &loaded.players[2];
        assert_eq!(c.id, PlayerId(3));
        assert_eq!(c.tier, Some(2));
        assert_eq!(c.ecr, Some(14.5));
    }

    #[test]
    fn unreadable_row_skipped_not_fatal() {
        let json = r#"{"players": [
            {"player": "A", "pos": "WR", "bye": {"week": 5}},
            "not a player",
            {"player": "B", "pos": "RB", "bye": "n/a"}
        ]}"#;
        let loaded = load_from_reader(json.as_bytes()).unwrap();
        assert_eq!(loaded.players.len(), 1);
        assert_eq!(loaded.players[0].name, "B");
        assert_eq!(loaded.players[0].id, PlayerId(3));
        assert!(loaded.players[0].bye_week.is_none());
    }

    #[test]
    fn fractional_id_falls_back_to_row_number() {
        let json = r#"{"players": [{"id": 1.5, "player": "A", "pos": "QB"}]}"#;
        let loaded = load_from_reader(json.as_bytes()).unwrap();
        assert_eq!(loaded.players[0].id, PlayerId(1));
    }

    #[test]
    fn missing_players_array_is_error() {
        let json = r#"{"source": "x"}"#;
        assert!(load_from_reader(json.as_bytes()).is_err());
    }

    #[test]
    fn bad_timestamp_is_ignored() {
        let json = r#"{"updated_at": "yesterday", "players": []}"#;
        let loaded = load_from_reader(json.as_bytes()).unwrap();
        assert!(loaded.meta.updated_at.is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = ConsensusJsonSource::new("/nonexistent/consensus.json");
        assert!(matches!(source.load(), Err(CatalogError::Io { .. })));
    }
}
