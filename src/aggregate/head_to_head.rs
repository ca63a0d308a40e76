//! Head-to-Head Aggregator: pairwise win counts across the whole league.

use std::collections::BTreeMap;

use crate::aggregate::{fold_chronological, load_team_games};
use crate::cache;
use crate::config::Config;
use crate::error::Result;
use crate::teams::Registry;
use crate::types::{GameResult, HeadToHeadData};

/// `wins[a][b]` counts a's wins where the opponent resolved to b. Wins over
/// unresolvable opponents still count toward `total_wins[a]` but never reach
/// the matrix.
pub fn compute_head_to_head(
    registry: &Registry,
    games_by_team: &BTreeMap<String, Vec<GameResult>>,
) -> HeadToHeadData {
    let mut wins: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
    let mut total_wins: BTreeMap<String, u32> = BTreeMap::new();
    for (team_id, _) in registry.iter() {
        let row = registry.iter().map(|(opp, _)| (opp.to_string(), 0)).collect();
        wins.insert(team_id.to_string(), row);
        total_wins.insert(team_id.to_string(), 0);
    }

    for (team_id, games) in games_by_team {
        if !registry.contains(team_id) {
            continue;
        }
        fold_chronological(games, (), |(), game| {
            if !game.win {
                return;
            }
            if let Some(total) = total_wins.get_mut(team_id) {
                *total += 1;
            }
            if registry.contains(&game.opponent) {
                if let Some(cell) = wins
                    .get_mut(team_id)
                    .and_then(|row| row.get_mut(&game.opponent))
                {
                    *cell += 1;
                }
            }
        });
    }

    HeadToHeadData { wins, total_wins }
}

/// Display order: total wins descending, ties keep registry order.
pub fn ranked_teams<'a>(data: &HeadToHeadData, registry: &'a Registry) -> Vec<&'a str> {
    let mut ranked: Vec<(&str, u32)> = registry
        .iter()
        .map(|(id, _)| (id, data.total_wins.get(id).copied().unwrap_or(0)))
        .collect();
    ranked.sort_by_key(|&(_, total)| std::cmp::Reverse(total));
    ranked.into_iter().map(|(id, _)| id).collect()
}

/// Cached driver: recomputed at most once per day.
pub async fn head_to_head(
    client: &reqwest::Client,
    cfg: &Config,
    registry: &Registry,
) -> Result<HeadToHeadData> {
    cache::aggregate(cfg, "h2h", move || async move {
        let team_ids: Vec<&str> = registry.iter().map(|(id, _)| id).collect();
        let games_by_team = load_team_games(client, cfg, &team_ids).await;
        Ok(compute_head_to_head(registry, &games_by_team))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(date: &str, win: bool, opponent: &str) -> GameResult {
        GameResult { date: date.into(), win, opponent: opponent.into() }
    }

    #[test]
    fn wins_count_exactly_per_resolvable_pair() {
        let registry = Registry::new();
        let mut games_by_team = BTreeMap::new();
        games_by_team.insert(
            "mem".to_string(),
            vec![
                game("25-10-22", true, "lal"),
                game("25-11-05", true, "lal"),
                game("25-11-20", false, "lal"),
                game("25-12-01", true, "bos"),
            ],
        );
        games_by_team.insert(
            "lal".to_string(),
            vec![game("25-11-20", true, "mem")],
        );

        let data = compute_head_to_head(&registry, &games_by_team);
        assert_eq!(data.wins["mem"]["lal"], 2);
        assert_eq!(data.wins["lal"]["mem"], 1);
        assert_eq!(data.wins["mem"]["bos"], 1);
        assert_eq!(data.total_wins["mem"], 3);
        assert_eq!(data.total_wins["lal"], 1);
    }

    #[test]
    fn unknown_opponent_counts_only_toward_totals() {
        let registry = Registry::new();
        let mut games_by_team = BTreeMap::new();
        games_by_team.insert(
            "mem".to_string(),
            vec![game("25-10-22", true, "sea"), game("25-10-24", true, "")],
        );

        let data = compute_head_to_head(&registry, &games_by_team);
        assert_eq!(data.total_wins["mem"], 2);
        let row_total: u32 = data.wins["mem"].values().sum();
        assert_eq!(row_total, 0, "unresolvable opponents must not reach the matrix");
    }

    #[test]
    fn diagonal_and_unplayed_pairs_stay_zero() {
        let registry = Registry::new();
        let data = compute_head_to_head(&registry, &BTreeMap::new());
        assert_eq!(data.wins["mem"]["mem"], 0);
        assert_eq!(data.wins["bos"]["lal"], 0);
        assert_eq!(data.total_wins["bos"], 0);
    }

    #[test]
    fn ranking_is_total_wins_then_registry_order() {
        let registry = Registry::new();
        let mut games_by_team = BTreeMap::new();
        games_by_team.insert("lal".to_string(), vec![game("25-10-22", true, "mem")]);

        let data = compute_head_to_head(&registry, &games_by_team);
        let ranked = ranked_teams(&data, &registry);
        assert_eq!(ranked[0], "lal");
        // Everyone else is tied at zero; registry order follows.
        assert_eq!(ranked[1], "atl");
        assert_eq!(ranked.len(), 30);
    }
}
