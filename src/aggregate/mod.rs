//! The three aggregate views over cached team data. Each aggregator is a
//! pure compute over preloaded games plus an async driver that goes through
//! the per-team and aggregate caches.

pub mod conference;
pub mod head_to_head;
pub mod standings;

pub use conference::conference_battle;
pub use head_to_head::head_to_head;
pub use standings::standings;

use std::collections::BTreeMap;

use tracing::warn;

use crate::cache;
use crate::config::Config;
use crate::types::GameResult;

/// Stable-sort a team's games ascending by date (ties keep source order)
/// and fold over them in that order. All three aggregators reduce to this.
pub fn fold_chronological<A>(
    games: &[GameResult],
    init: A,
    mut step: impl FnMut(A, &GameResult) -> A,
) -> A {
    let mut ordered: Vec<&GameResult> = games.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));
    ordered.into_iter().fold(init, |acc, game| step(acc, game))
}

/// Load cached games for each team, one fetch at a time in the given order.
/// A failing team is logged and left out, never zero-filled.
pub async fn load_team_games(
    client: &reqwest::Client,
    cfg: &Config,
    team_ids: &[&str],
) -> BTreeMap<String, Vec<GameResult>> {
    let mut games_by_team = BTreeMap::new();
    for &team_id in team_ids {
        match cache::team_games(client, cfg, team_id).await {
            Ok(games) => {
                games_by_team.insert(team_id.to_string(), games);
            }
            Err(e) => warn!("{team_id}: {e}"),
        }
    }
    games_by_team
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(date: &str, win: bool) -> GameResult {
        GameResult { date: date.into(), win, opponent: String::new() }
    }

    #[test]
    fn fold_visits_games_in_date_order() {
        let games = vec![game("25-11-01", true), game("25-10-22", false)];
        let dates = fold_chronological(&games, Vec::new(), |mut acc, g| {
            acc.push(g.date.clone());
            acc
        });
        assert_eq!(dates, vec!["25-10-22", "25-11-01"]);
    }

    #[test]
    fn fold_keeps_source_order_on_equal_dates() {
        let games = vec![game("25-10-22", true), game("25-10-22", false)];
        let wins = fold_chronological(&games, Vec::new(), |mut acc, g| {
            acc.push(g.win);
            acc
        });
        assert_eq!(wins, vec![true, false]);
    }
}
