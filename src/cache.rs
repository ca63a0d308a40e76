//! On-disk memoization, two layers: the Per-Team Cache (one JSON file per
//! team, exists ⇒ valid, no TTL) and the Aggregate Cache (one file per
//! aggregator kind per calendar day).
//!
//! Known staleness risk, preserved deliberately: a team cache file never
//! expires within or across runs; clearing it is an out-of-band filesystem
//! operation.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::scrape::fetch_schedule;
use crate::types::GameResult;

/// Today's `YY-MM-DD`, the aggregate cache epoch.
pub fn cache_epoch() -> String {
    chrono::Local::now().format("%y-%m-%d").to_string()
}

pub fn team_cache_path(cfg: &Config, team_id: &str) -> PathBuf {
    Path::new(&cfg.team_cache_dir).join(format!("{team_id}.json"))
}

pub fn aggregate_cache_path(cfg: &Config, kind: &str) -> PathBuf {
    Path::new(&cfg.aggregate_cache_dir).join(format!("{kind}_data-{}.json", cache_epoch()))
}

/// Malformed JSON counts as a miss, not a crash.
fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("malformed cache file {}, treating as miss: {e}", path.display());
            None
        }
    }
}

/// Write-to-temp-then-rename so a concurrent reader never sees a
/// half-written file.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Per-Team Cache: a persisted entry is returned verbatim with no network
/// call and no freshness check; otherwise fetch, persist, return. A failed
/// fetch writes nothing.
pub async fn team_games(
    client: &reqwest::Client,
    cfg: &Config,
    team_id: &str,
) -> Result<Vec<GameResult>> {
    let path = team_cache_path(cfg, team_id);
    if path.exists() {
        if let Some(games) = read_json(&path) {
            info!("{team_id}: cached");
            return Ok(games);
        }
    }
    let games = fetch_schedule(client, cfg, team_id).await?;
    write_json(&path, &games)?;
    info!("{team_id}: fetched {} games", games.len());
    Ok(games)
}

/// Aggregate Cache: day-granularity memoization around any aggregator's
/// compute. Distinct kinds never share a file.
pub async fn aggregate<T, F, Fut>(cfg: &Config, kind: &str, compute: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let path = aggregate_cache_path(cfg, kind);
    if path.exists() {
        if let Some(value) = read_json(&path) {
            info!("{kind}: cached");
            return Ok(value);
        }
    }
    info!("{kind}: computing...");
    let value = compute().await?;
    write_json(&path, &value)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

    /// Config pointing caches at a fresh temp dir and fetches at a port
    /// nothing listens on, so any network attempt fails immediately.
    fn test_config() -> Config {
        let seq = DIR_SEQ.fetch_add(1, Ordering::SeqCst);
        let base = std::env::temp_dir().join(format!(
            "nba-charts-test-{}-{seq}",
            std::process::id()
        ));
        Config {
            schedule_url: "http://127.0.0.1:1/".to_string(),
            log_level: "info".to_string(),
            api_port: 0,
            team_cache_dir: base.join("teams").to_string_lossy().into_owned(),
            aggregate_cache_dir: base.join("aggregates").to_string_lossy().into_owned(),
            chart_dir: base.join("charts").to_string_lossy().into_owned(),
        }
    }

    fn sample_games() -> Vec<GameResult> {
        vec![
            GameResult { date: "25-10-22".into(), win: true, opponent: "lal".into() },
            GameResult { date: "25-10-24".into(), win: false, opponent: "bos".into() },
        ]
    }

    #[tokio::test]
    async fn cached_entry_is_returned_without_network() {
        let cfg = test_config();
        let client = crate::scrape::http_client().unwrap();

        write_json(&team_cache_path(&cfg, "mem"), &sample_games()).unwrap();

        // The fetch URL is unreachable, so success proves no network call.
        let first = team_games(&client, &cfg, "mem").await.unwrap();
        let second = team_games(&client, &cfg, "mem").await.unwrap();
        assert_eq!(first, sample_games());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn corrupt_entry_falls_through_to_fetch() {
        let cfg = test_config();
        let client = crate::scrape::http_client().unwrap();

        let path = team_cache_path(&cfg, "mem");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{not json").unwrap();

        // Miss semantics: the fetch is attempted (and fails, URL unreachable).
        let err = team_games(&client, &cfg, "mem").await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
        // Failure leaves the corrupt file alone: nothing was written.
        assert_eq!(fs::read(&path).unwrap(), b"{not json");
    }

    #[tokio::test]
    async fn missing_source_page_is_not_found_and_writes_nothing() {
        let mut cfg = test_config();
        let client = crate::scrape::http_client().unwrap();

        // One-shot server answering with a 404, standing in for an unknown
        // team's schedule page.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        cfg.schedule_url = format!("http://{}/", listener.local_addr().unwrap());
        tokio::spawn(async move {
            use tokio::io::{AsyncReadExt, AsyncWriteExt};
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let _ = stream
                    .write_all(b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\n\r\n")
                    .await;
            }
        });

        let err = team_games(&client, &cfg, "zzz").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(!team_cache_path(&cfg, "zzz").exists(), "failed fetch must write nothing");
    }

    #[tokio::test]
    async fn aggregate_computes_once_per_epoch() {
        let cfg = test_config();
        let calls = std::sync::Arc::new(AtomicUsize::new(0));

        let c = std::sync::Arc::clone(&calls);
        let first: Vec<i32> = aggregate(&cfg, "sample", move || async move {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1, 2, 3])
        })
        .await
        .unwrap();

        let c = std::sync::Arc::clone(&calls);
        let second: Vec<i32> = aggregate(&cfg, "sample", move || async move {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(vec![9])
        })
        .await
        .unwrap();

        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(second, first, "second call must come from disk");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn aggregate_kinds_do_not_share_a_slot() {
        let cfg = test_config();
        let a: Vec<i32> = aggregate(&cfg, "kind_a", || async { Ok(vec![1]) }).await.unwrap();
        let b: Vec<i32> = aggregate(&cfg, "kind_b", || async { Ok(vec![2]) }).await.unwrap();
        assert_ne!(a, b);
        assert!(aggregate_cache_path(&cfg, "kind_a").exists());
        assert!(aggregate_cache_path(&cfg, "kind_b").exists());
    }

    #[test]
    fn epoch_is_two_digit_year_date() {
        let epoch = cache_epoch();
        assert_eq!(epoch.len(), 8);
        assert_eq!(epoch.as_bytes()[2], b'-');
        assert_eq!(epoch.as_bytes()[5], b'-');
    }
}
