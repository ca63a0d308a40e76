use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GameResult
// ---------------------------------------------------------------------------

/// One completed game from a team's perspective.
///
/// `date` is a two-digit-year `YY-MM-DD` string; lexicographic order equals
/// chronological order within a season, which the aggregators rely on.
/// `opponent` is the source abbreviation of the other team; it only counts
/// toward cross-team aggregation if it resolves in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub date: String,
    pub win: bool,
    #[serde(default)]
    pub opponent: String,
}

// ---------------------------------------------------------------------------
// Aggregate shapes: these are the cache file layouts, serialized verbatim
// ---------------------------------------------------------------------------

/// Per-team running (wins − losses) after each game, leading 0 included.
/// One instance per conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsData {
    pub standings: BTreeMap<String, Vec<i32>>,
}

/// `wins[a][b]` = number of a's wins over b. Asymmetric by design: the pair
/// (`wins[a][b]`, `wins[b][a]`) is one displayed cell; both zero means the
/// teams have not met yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHeadData {
    pub wins: BTreeMap<String, BTreeMap<String, u32>>,
    pub total_wins: BTreeMap<String, u32>,
}

/// One day of inter-conference play plus the running East−West total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBattle {
    pub date: String,
    pub east_wins: u32,
    pub west_wins: u32,
    pub cumulative: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceBattleData {
    pub daily: Vec<DailyBattle>,
    pub total_east: u32,
    pub total_west: u32,
}
