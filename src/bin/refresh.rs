//! Batch refresh job: scrape every team's schedule into the per-team cache
//! (one status line each, continue on failure), compute the three aggregates
//! through the daily cache, and write the rendered charts to disk.

use std::fs;
use std::path::Path;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use nba_charts::aggregate;
use nba_charts::cache;
use nba_charts::config::Config;
use nba_charts::error::Result;
use nba_charts::render;
use nba_charts::scrape;
use nba_charts::teams::{Conference, Registry};

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let registry = Registry::new();
    let client = scrape::http_client()?;

    // One team at a time, registry order. A failed team is reported and
    // skipped; its cache entry is untouched.
    let mut fetched = 0usize;
    for (team_id, _) in registry.iter() {
        match cache::team_games(&client, &cfg, team_id).await {
            Ok(games) => {
                info!("{team_id}: {} games", games.len());
                fetched += 1;
            }
            Err(e) => warn!("{team_id}: {e}"),
        }
    }
    info!("Scrape pass done: {fetched}/{} teams available", registry.len());

    let chart_dir = Path::new(&cfg.chart_dir);
    fs::create_dir_all(chart_dir)?;

    for conference in [Conference::East, Conference::West] {
        let data = aggregate::standings(&client, &cfg, &registry, conference).await?;
        let svg = render::render_standings(&registry, &data, conference);
        let path = chart_dir.join(format!("{conference}_standings.svg"));
        fs::write(&path, svg)?;
        info!("Saved: {}", path.display());
    }

    let h2h = aggregate::head_to_head(&client, &cfg, &registry).await?;
    let path = chart_dir.join("head_to_head.svg");
    fs::write(&path, render::render_head_to_head(&registry, &h2h))?;
    info!("Saved: {}", path.display());

    let battle = aggregate::conference_battle(&client, &cfg, &registry).await?;
    let path = chart_dir.join("conference_battle.svg");
    fs::write(&path, render::render_conference_battle(&battle))?;
    info!("Saved: {}", path.display());

    Ok(())
}
