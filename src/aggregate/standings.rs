//! Standings Aggregator: per-team running (wins − losses) series.

use std::collections::BTreeMap;

use crate::aggregate::{fold_chronological, load_team_games};
use crate::cache;
use crate::config::Config;
use crate::error::Result;
use crate::teams::{Conference, Registry};
use crate::types::{GameResult, StandingsData};

/// Running cumulative differential for every team of one conference.
/// Each series starts at 0 and moves ±1 per game in date order, so its
/// length is the team's game count + 1.
pub fn compute_standings(games_by_team: &BTreeMap<String, Vec<GameResult>>) -> StandingsData {
    let mut standings = BTreeMap::new();
    for (team_id, games) in games_by_team {
        let series = fold_chronological(games, vec![0i32], |mut acc, game| {
            let last = *acc.last().unwrap_or(&0);
            acc.push(last + if game.win { 1 } else { -1 });
            acc
        });
        standings.insert(team_id.clone(), series);
    }
    StandingsData { standings }
}

/// Display order: final cumulative value descending, ties keep registry
/// order. Teams missing from the data are left out.
pub fn ranked_teams<'a>(data: &StandingsData, registry: &'a Registry) -> Vec<&'a str> {
    let mut ranked: Vec<(&str, i32)> = registry
        .iter()
        .filter_map(|(id, _)| {
            data.standings
                .get(id)
                .and_then(|series| series.last())
                .map(|&finish| (id, finish))
        })
        .collect();
    ranked.sort_by_key(|&(_, finish)| -finish);
    ranked.into_iter().map(|(id, _)| id).collect()
}

/// Cached driver: recomputed at most once per day per conference.
pub async fn standings(
    client: &reqwest::Client,
    cfg: &Config,
    registry: &Registry,
    conference: Conference,
) -> Result<StandingsData> {
    let kind = format!("standings_{conference}");
    cache::aggregate(cfg, &kind, move || async move {
        let team_ids = registry.conference_teams(conference);
        let games_by_team = load_team_games(client, cfg, &team_ids).await;
        Ok(compute_standings(&games_by_team))
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
    fn series_walks_from_zero() {
        let mut games_by_team = BTreeMap::new();
        games_by_team.insert(
            "mem".to_string(),
            vec![game("25-10-22", true, "lal"), game("25-10-24", false, "bos")],
        );

        let data = compute_standings(&games_by_team);
        assert_eq!(data.standings["mem"], vec![0, 1, 0]);
    }

    #[test]
    fn series_length_is_game_count_plus_one() {
        let mut games_by_team = BTreeMap::new();
        games_by_team.insert(
            "bos".to_string(),
            vec![
                game("25-10-24", true, "ny"),
                game("25-10-22", true, "mia"),
                game("25-10-28", true, "phi"),
            ],
        );

        let data = compute_standings(&games_by_team);
        let series = &data.standings["bos"];
        assert_eq!(series.len(), 4);
        // Each step is ±1 from the previous value.
        for pair in series.windows(2) {
            assert_eq!((pair[1] - pair[0]).abs(), 1);
        }
        assert_eq!(*series, vec![0, 1, 2, 3]);
    }

    #[test]
    fn games_accumulate_in_date_order_not_page_order() {
        let mut games_by_team = BTreeMap::new();
        games_by_team.insert(
            "mem".to_string(),
            // Page order reversed: the loss on the 24th listed first.
            vec![game("25-10-24", false, "bos"), game("25-10-22", true, "lal")],
        );

        let data = compute_standings(&games_by_team);
        assert_eq!(data.standings["mem"], vec![0, 1, 0]);
    }

    #[test]
    fn ranking_breaks_ties_by_registry_order() {
        let registry = Registry::new();
        let mut games_by_team = BTreeMap::new();
        // cle finishes +1, atl and bos both finish 0.
        games_by_team.insert("bos".to_string(), vec![game("25-10-22", true, "x"), game("25-10-24", false, "x")]);
        games_by_team.insert("atl".to_string(), vec![game("25-10-22", false, "x"), game("25-10-24", true, "x")]);
        games_by_team.insert("cle".to_string(), vec![game("25-10-22", true, "x")]);

        let data = compute_standings(&games_by_team);
        // atl precedes bos in the registry, so it wins the tie.
        assert_eq!(ranked_teams(&data, &registry), vec!["cle", "atl", "bos"]);
    }
}
