//! Game Record Fetcher: pulls one team's schedule page and parses the
//! completed games out of it. Pure network read; persistence lives in
//! [`crate::cache`].

use std::collections::HashSet;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::config::{Config, HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{AppError, Result};
use crate::html::{href_segment, next_tag_block_ci, strip_tags, text_after_marker};
use crate::types::GameResult;

/// Row markers on the schedule page. A row is a completed game iff it
/// carries both; future/scheduled rows lack the symbol and are skipped.
const SYMBOL_MARKER: &str = r#"data-testid="symbol""#;
const DATE_MARKER: &str = r#"data-testid="date""#;
const TEAM_LINK_PREFIX: &str = "/nba/team/_/name/";

pub fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?)
}

/// Fetch and parse one team's completed games, in page order (not guaranteed
/// chronological; sort by date before accumulating).
pub async fn fetch_schedule(
    client: &reqwest::Client,
    cfg: &Config,
    team_id: &str,
) -> Result<Vec<GameResult>> {
    let url = format!("{}{}", cfg.schedule_url, team_id);
    let resp = client.get(&url).send().await?;
    if !resp.status().is_success() {
        return Err(AppError::NotFound(team_id.to_string()));
    }
    let body = resp.text().await?;
    let today = chrono::Local::now().date_naive();
    parse_schedule_doc(&body, today)
}

/// Parse a schedule document. Split from the fetch for unit tests.
pub fn parse_schedule_doc(doc: &str, today: NaiveDate) -> Result<Vec<GameResult>> {
    let (table_start, table_end) = next_tag_block_ci(doc, "<table", "</table>", 0)
        .ok_or_else(|| AppError::Parse("no schedule table found on page".to_string()))?;
    let table = &doc[table_start..table_end];

    let season = season_years(doc).unwrap_or_else(|| infer_season(today));

    let mut results = Vec::new();
    let mut seen_dates: HashSet<String> = HashSet::new();
    let mut pos = 0usize;
    while let Some((row_start, row_end)) = next_tag_block_ci(table, "<tr", "</tr>", pos) {
        let row = &table[row_start..row_end];
        pos = row_end;

        // Completed games carry a W/L symbol; anything else is upcoming.
        let Some(symbol) = text_after_marker(row, SYMBOL_MARKER) else {
            continue;
        };
        let Some(date_text) = text_after_marker(row, DATE_MARKER) else {
            continue;
        };

        let date = match parse_game_date(&date_text, season) {
            Ok(d) => d,
            Err(e) => {
                // One bad row must not abort the fetch.
                warn!("skipping row: {e}");
                continue;
            }
        };

        // Doubleheaders are not modeled: first row for a date wins.
        if !seen_dates.insert(date.clone()) {
            warn!("duplicate row for {date}, keeping first");
            continue;
        }

        let opponent = href_segment(row, TEAM_LINK_PREFIX).unwrap_or_default();
        results.push(GameResult { date, win: symbol == "W", opponent });
    }

    Ok(results)
}

/// Season year range from a page heading like "… Schedule 2025-26".
/// Only heading text is searched; the table itself is full of dates that
/// would false-match a bare digit scan.
fn season_years(doc: &str) -> Option<(i32, i32)> {
    let mut pos = 0usize;
    while let Some((start, end)) = next_tag_block_ci(doc, "<h1", "</h1>", pos) {
        let text = strip_tags(&doc[start..end]);
        if let Some(years) = find_year_range(&text) {
            return Some(years);
        }
        pos = end;
    }
    None
}

/// First `YYYY-YY` substring in `text`, as (first_year, second_year).
fn find_year_range(text: &str) -> Option<(i32, i32)> {
    let bytes = text.as_bytes();
    for i in 0..bytes.len().saturating_sub(6) {
        let window = &bytes[i..i + 7];
        let shape_ok = window[..4].iter().all(u8::is_ascii_digit)
            && window[4] == b'-'
            && window[5..].iter().all(u8::is_ascii_digit);
        if !shape_ok {
            continue;
        }
        // Reject runs like "2025-10-22": a digit right after breaks the shape.
        if i > 0 && bytes[i - 1].is_ascii_digit() {
            continue;
        }
        if bytes.get(i + 7).is_some_and(u8::is_ascii_digit) {
            continue;
        }
        let first: i32 = text[i..i + 4].parse().ok()?;
        let second: i32 = text[i + 5..i + 7].parse().ok()?;
        return Some((first, 2000 + second));
    }
    None
}

/// Season inferred from the current date: October or later means the season
/// started this year.
fn infer_season(today: NaiveDate) -> (i32, i32) {
    let first = if today.month() >= 10 { today.year() } else { today.year() - 1 };
    (first, first + 1)
}

/// Resolve a "Wed, Oct 22" cell against the season years: months from
/// October onward belong to the first year, the rest to the second.
/// Output is the `YY-MM-DD` string used everywhere downstream.
pub fn parse_game_date(text: &str, season: (i32, i32)) -> Result<String> {
    // Drop the weekday (chrono would reject it against the dummy year),
    // then parse "Oct 22" with a placeholder year.
    let month_day = text.split_once(", ").map_or(text, |(_, rest)| rest);
    let parsed = NaiveDate::parse_from_str(&format!("{month_day} 2000"), "%b %d %Y")
        .map_err(|_| AppError::DateParse(text.to_string()))?;
    let year = if parsed.month() >= 10 { season.0 } else { season.1 };
    Ok(format!("{:02}-{:02}-{:02}", year % 100, parsed.month(), parsed.day()))
}
