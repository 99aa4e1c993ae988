// FantasyPros cheatsheet CSV loader.
//
// Column names differ between FantasyPros export flavors ("Player" vs
// "PLAYER NAME", "Bye" vs "BYE WEEK", ...), so each field is located by a
// case-insensitive alias list against the header row.

use std::io::Read;
use std::path::PathBuf;

use tracing::warn;

use super::{CatalogError, CatalogMeta, CatalogSource, LoadedPlayers};
use crate::normalize::{normalize_position, normalize_team, parse_bye, parse_number, whole_number};
use crate::player::{PlayerId, PlayerRecord, Position};

const NAME_COLUMNS: &[&str] = &["Player", "PLAYER NAME", "Name"];
const TEAM_COLUMNS: &[&str] = &["Team"];
const POS_COLUMNS: &[&str] = &["Pos", "Position"];
const BYE_COLUMNS: &[&str] = &["Bye", "BYE WEEK", "Bye Week"];
/// Overall rank; only integer ranks become player ids.
const ID_COLUMNS: &[&str] = &["RK", "Rank"];
const ECR_COLUMNS: &[&str] = &["ECR", "RK", "Rank"];
const ADP_COLUMNS: &[&str] = &["ADP", "Avg. Draft Pos.", "AVG"];
const TIER_COLUMNS: &[&str] = &["Tier", "TIERS"];
const PROJ_COLUMNS: &[&str] = &[
    "FPTS",
    "PROJ",
    "Proj PPR",
    "Projected PPR",
    "Projected Pts",
    "FPTS (PPR)",
];

/// Loads players from a FantasyPros rankings CSV on disk.
#[derive(Debug, Clone)]
pub struct FantasyProsCsvSource {
    path: PathBuf,
}

impl FantasyProsCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FantasyProsCsvSource { path: path.into() }
    }
}

impl CatalogSource for FantasyProsCsvSource {
    fn load(&self) -> Result<LoadedPlayers, CatalogError> {
        let path_str = self.path.display().to_string();
        let file = std::fs::File::open(&self.path).map_err(|e| CatalogError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        let players = load_from_reader(file).map_err(|e| CatalogError::Csv {
            path: path_str,
            source: e,
        })?;
        Ok(LoadedPlayers {
            players,
            meta: CatalogMeta {
                source: Some("FantasyPros CSV".to_string()),
                updated_at: None,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Column lookup
// ---------------------------------------------------------------------------

/// Resolved column indices for the fields we read.
#[derive(Debug, Default)]
struct Columns {
    name: Option<usize>,
    team: Option<usize>,
    pos: Option<usize>,
    bye: Option<usize>,
    id: Option<usize>,
    ecr: Option<usize>,
    adp: Option<usize>,
    tier: Option<usize>,
    proj: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |aliases: &[&str]| {
            aliases.iter().find_map(|alias| {
                headers
                    .iter()
                    .position(|h| h.trim().eq_ignore_ascii_case(alias))
            })
        };
        Columns {
            name: find(NAME_COLUMNS),
            team: find(TEAM_COLUMNS),
            pos: find(POS_COLUMNS),
            bye: find(BYE_COLUMNS),
            id: find(ID_COLUMNS),
            ecr: find(ECR_COLUMNS),
            adp: find(ADP_COLUMNS),
            tier: find(TIER_COLUMNS),
            proj: find(PROJ_COLUMNS),
        }
    }
}

fn field(record: &csv::StringRecord, col: Option<usize>) -> Option<&str> {
    col.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn row_id(record: &csv::StringRecord, col: Option<usize>, row: usize) -> PlayerId {
    field(record, col)
        .and_then(parse_number)
        .and_then(whole_number)
        .and_then(|rk| u32::try_from(rk).ok())
        .filter(|rk| *rk >= 1)
        .map(PlayerId)
        .unwrap_or(PlayerId(row as u32 + 1))
}

// ---------------------------------------------------------------------------
// Reader-based loader
// ---------------------------------------------------------------------------

fn load_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let columns = Columns::from_headers(reader.headers()?);

    if columns.name.is_none() {
        warn!("CSV has no player name column; no players will be read");
    }

    let mut players = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping malformed CSV row {}: {}", row + 1, e);
                continue;
            }
        };

        let Some(name) = field(&record, columns.name) else {
            continue;
        };

        let position = Position::from_code(&normalize_position(
            field(&record, columns.pos).unwrap_or(""),
        ));

        players.push(PlayerRecord {
            id: row_id(&record, columns.id, row),
            name: name.to_string(),
            position,
            team: normalize_team(field(&record, columns.team).unwrap_or("")),
            bye_week: field(&record, columns.bye).and_then(parse_bye),
            drafted: false,
            ecr: field(&record, columns.ecr).and_then(parse_number),
            adp: field(&record, columns.adp).and_then(parse_number),
            tier: field(&record, columns.tier)
                .and_then(parse_number)
                .and_then(whole_number)
                .and_then(|t| u32::try_from(t).ok())
                .filter(|t| *t >= 1),
            proj_ppr: field(&record, columns.proj).and_then(parse_number),
        });
    }
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_cheatsheet_columns() {
        let csv = "\
RK,TIERS,PLAYER NAME,TEAM,POS,BYE WEEK,SOS SEASON,ECR VS. ADP
1,1,Ja'Marr Chase,CIN,WR1,10,3 out of 5 stars,0
2,1,Bijan Robinson,ATL,RB1,5,4 out of 5 stars,0
3,1,Saquon Barkley,PHI,RB2,9,2 out of 5 stars,+1
";
        let players = load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(players.len(), 3);

        let p = &players[1];
        assert_eq!(p.id, PlayerId(2));
        assert_eq!(p.name, "Bijan Robinson");
        assert_eq!(p.position, Position::RunningBack);
        assert_eq!(p.team, "ATL");
        assert_eq!(p.bye_week, Some(5));
        assert_eq!(p.ecr, Some(2.0));
        assert_eq!(p.tier, Some(1));
    }

    #[test]
    fn reads_classic_headers_case_insensitively() {
        let csv = "\
player,team,pos,bye,ecr,adp,fpts
Josh Allen,BUF,QB,7,18,22.5,380.4
Jaguars D/ST,JAX,DST,8,180,,
";
        let players = load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].adp, Some(22.5));
        assert_eq!(players[0].proj_ppr, Some(380.4));
        assert_eq!(players[1].position, Position::Defense);
        assert_eq!(players[1].team, "JAC");
        assert!(players[1].adp.is_none());
    }

    #[test]
    fn missing_rank_uses_row_number() {
        let csv = "Name,Pos\nA,WR\nB,TE\n";
        let players = load_from_reader(csv.as_bytes()).unwrap();
        let ids: Vec<u32> = players.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn blank_name_rows_skipped() {
        let csv = "Player,Pos,Bye\n,WR,5\nReal Player,WR,-\n";
        let players = load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Real Player");
        assert!(players[0].bye_week.is_none());
    }

    #[test]
    fn ids_come_from_rk_not_fractional_ecr() {
        let csv = "RK,ECR,Player,Pos\n1,1.2,A,WR\n2,1.8,B,RB\n3,3.0,C,TE\n";
        let players = load_from_reader(csv.as_bytes()).unwrap();
        let ids: Vec<u32> = players.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(players[1].ecr, Some(1.8));
    }

    #[test]
    fn fractional_ecr_alone_falls_back_to_row_number() {
        let csv = "ECR,Player,Pos\n1.2,A,WR\n1.8,B,RB\n";
        let players = load_from_reader(csv.as_bytes()).unwrap();
        let ids: Vec<u32> = players.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(players[0].ecr, Some(1.2));
    }

    #[test]
    fn decimal_bye_weeks_are_kept() {
        let csv = "Player,Pos,Bye\nA,WR,10.0\nB,RB,7 \n";
        let players = load_from_reader(csv.as_bytes()).unwrap();
        let byes: Vec<Option<u8>> = players.iter().map(|p| p.bye_week).collect();
        assert_eq!(byes, vec![Some(10), Some(7)]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = FantasyProsCsvSource::new("/nonexistent/rankings.csv");
        assert!(matches!(source.load(), Err(CatalogError::Io { .. })));
    }
}
