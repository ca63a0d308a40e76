//! Conference Battle Aggregator: daily and cumulative East−West win
//! differential over inter-conference games.

use std::collections::BTreeMap;

use crate::aggregate::{fold_chronological, load_team_games};
use crate::cache;
use crate::config::Config;
use crate::error::Result;
use crate::teams::{Conference, Registry};
use crate::types::{ConferenceBattleData, DailyBattle, GameResult};

/// Scan East teams only: each inter-conference game appears once from the
/// East side, so this avoids double counting. An East win is an East-over-
/// West win that day; an East loss is a West win.
pub fn compute_conference_battle(
    registry: &Registry,
    games_by_team: &BTreeMap<String, Vec<GameResult>>,
) -> ConferenceBattleData {
    // date → (east_wins, west_wins); BTreeMap keeps dates ascending.
    let mut daily_buckets: BTreeMap<String, (u32, u32)> = BTreeMap::new();

    for (team_id, games) in games_by_team {
        let is_east = registry
            .get(team_id)
            .is_some_and(|info| info.conference == Conference::East);
        if !is_east {
            continue;
        }
        fold_chronological(games, (), |(), game| {
            let opponent_is_west = registry
                .get(&game.opponent)
                .is_some_and(|info| info.conference == Conference::West);
            if !opponent_is_west {
                return;
            }
            let bucket = daily_buckets.entry(game.date.clone()).or_default();
            if game.win {
                bucket.0 += 1;
            } else {
                bucket.1 += 1;
            }
        });
    }

    let mut daily = Vec::with_capacity(daily_buckets.len());
    let mut running = 0i32;
    let mut total_east = 0u32;
    let mut total_west = 0u32;
    for (date, (east_wins, west_wins)) in daily_buckets {
        running += east_wins as i32 - west_wins as i32;
        total_east += east_wins;
        total_west += west_wins;
        daily.push(DailyBattle { date, east_wins, west_wins, cumulative: running });
    }

    ConferenceBattleData { daily, total_east, total_west }
}

/// Cached driver: recomputed at most once per day. Only East rosters are
/// loaded; the West side of every inter-conference game is implied.
pub async fn conference_battle(
    client: &reqwest::Client,
    cfg: &Config,
    registry: &Registry,
) -> Result<ConferenceBattleData> {
    cache::aggregate(cfg, "battle", move || async move {
        let east_ids = registry.conference_teams(Conference::East);
        let games_by_team = load_team_games(client, cfg, &east_ids).await;
        Ok(compute_conference_battle(registry, &games_by_team))
    })
    .await
}
