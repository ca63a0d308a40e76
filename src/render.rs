//! Chart rendering: pure functions from aggregate data to SVG documents.
//! Styling is presentation-only, no aggregation logic is re-derived here.

use std::fmt::Write;

use crate::aggregate::{head_to_head, standings};
use crate::teams::{Conference, Registry};
use crate::types::{ConferenceBattleData, HeadToHeadData, StandingsData};

const BG_COLOR: &str = "#ffffff";
const GRID_COLOR: &str = "#e5e5e5";
const TEXT_COLOR: &str = "#1f2937";
const MUTED_TEXT: &str = "#6b7280";
const UNPLAYED_COLOR: &str = "#1a1a1a";

fn svg_open(out: &mut String, width: u32, height: u32) {
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" font-family="Arial, Helvetica, sans-serif">"#
    );
    let _ = write!(out, r#"<rect width="{width}" height="{height}" fill="{BG_COLOR}"/>"#);
}

fn text(out: &mut String, x: f64, y: f64, size: u32, color: &str, anchor: &str, content: &str) {
    let _ = write!(
        out,
        r#"<text x="{x:.1}" y="{y:.1}" font-size="{size}" fill="{color}" text-anchor="{anchor}">{content}</text>"#
    );
}

/// Cumulative standings line chart for one conference. Teams draw in
/// reverse rank order so the leaders end up on top; the legend on the right
/// lists rank order with each team's final differential.
pub fn render_standings(
    registry: &Registry,
    data: &StandingsData,
    conference: Conference,
) -> String {
    let (width, height) = (1200u32, 900u32);
    let (left, right, top, bottom) = (70.0, 260.0, 70.0, 40.0);
    let plot_w = width as f64 - left - right;
    let plot_h = height as f64 - top - bottom;

    let max_games = data
        .standings
        .values()
        .map(|s| s.len().saturating_sub(1))
        .max()
        .unwrap_or(0)
        .max(1);
    let max_val = data.standings.values().flatten().copied().max().unwrap_or(1).max(1);
    let min_val = data.standings.values().flatten().copied().min().unwrap_or(-1).min(-1);
    let span = (max_val - min_val) as f64;

    let x_of = |game: usize| left + game as f64 / max_games as f64 * plot_w;
    let y_of = |value: i32| top + (max_val - value) as f64 / span * plot_h;

    let mut out = String::new();
    svg_open(&mut out, width, height);

    // Zero line (.500) plus plot frame.
    let zero_y = y_of(0);
    let _ = write!(
        out,
        r##"<line x1="{left}" y1="{zero_y:.1}" x2="{:.1}" y2="{zero_y:.1}" stroke="#9ca3af" stroke-width="2"/>"##,
        left + plot_w
    );
    text(&mut out, left - 8.0, zero_y + 4.0, 13, MUTED_TEXT, "end", ".500");

    let ranked = standings::ranked_teams(data, registry);
    for &team_id in ranked.iter().rev() {
        let Some(series) = data.standings.get(team_id) else { continue };
        let Some(info) = registry.get(team_id) else { continue };
        let points: String = series
            .iter()
            .enumerate()
            .map(|(i, &v)| format!("{:.1},{:.1}", x_of(i), y_of(v)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            out,
            r#"<polyline points="{points}" fill="none" stroke="{}" stroke-width="5"/>"#,
            info.color2
        );
        let _ = write!(
            out,
            r#"<polyline points="{points}" fill="none" stroke="{}" stroke-width="2.5"/>"#,
            info.color
        );
    }

    // Legend, rank order top to bottom.
    let legend_x = left + plot_w + 30.0;
    for (i, &team_id) in ranked.iter().enumerate() {
        let Some(info) = registry.get(team_id) else { continue };
        let finish = data.standings[team_id].last().copied().unwrap_or(0);
        let y = top + i as f64 * (plot_h / ranked.len().max(1) as f64) + 12.0;
        let _ = write!(
            out,
            r#"<rect x="{legend_x:.1}" y="{:.1}" width="12" height="12" fill="{}"/>"#,
            y - 10.0,
            info.color
        );
        let label = format!("{} {:+}", info.name, finish);
        text(&mut out, legend_x + 18.0, y, 15, TEXT_COLOR, "start", &label);
    }

    let title = match conference {
        Conference::East => "NBA Eastern Conference",
        Conference::West => "NBA Western Conference",
    };
    text(&mut out, left, 34.0, 28, TEXT_COLOR, "start", title);
    text(&mut out, left, 56.0, 15, MUTED_TEXT, "start", "Cumulative Record");

    out.push_str("</svg>");
    out
}

/// Differential shade for a played cell: green for a positive differential,
/// red for negative, saturating at |diff| = 3.
fn cell_color(diff: i32) -> String {
    if diff == 0 {
        return "#f0f0f0".to_string();
    }
    let intensity = (diff.abs() as f64 / 3.0).min(1.0);
    if diff > 0 {
        let r = (240.0 - intensity * 180.0) as u32;
        let g = (250.0 - intensity * 60.0) as u32;
        let b = (240.0 - intensity * 180.0) as u32;
        format!("rgb({r},{g},{b})")
    } else {
        let r = (250.0 - intensity * 30.0) as u32;
        let g = (240.0 - intensity * 160.0) as u32;
        let b = (240.0 - intensity * 160.0) as u32;
        format!("rgb({r},{g},{b})")
    }
}

fn matrix_cell(data: &HeadToHeadData, team: &str, opponent: &str) -> u32 {
    data.wins
        .get(team)
        .and_then(|row| row.get(opponent))
        .copied()
        .unwrap_or(0)
}

/// Head-to-head grid: rows and columns in rank order, each played cell
/// showing `wins_row-wins_col` on a differential shade, unplayed cells dark.
pub fn render_head_to_head(registry: &Registry, data: &HeadToHeadData) -> String {
    let ranked = head_to_head::ranked_teams(data, registry);
    let n = ranked.len();
    let cell = 30.0;
    let origin = 60.0;
    let size = (origin * 2.0 + n as f64 * cell) as u32;

    let mut out = String::new();
    svg_open(&mut out, size, size);
    text(&mut out, size as f64 / 2.0, 30.0, 18, TEXT_COLOR, "middle", "Head-to-Head");

    for (i, &row_team) in ranked.iter().enumerate() {
        let y = origin + i as f64 * cell;
        text(&mut out, origin - 6.0, y + cell * 0.65, 11, TEXT_COLOR, "end", row_team);
        text(
            &mut out,
            origin + i as f64 * cell + cell / 2.0,
            origin - 6.0,
            11,
            TEXT_COLOR,
            "middle",
            row_team,
        );
        for (j, &col_team) in ranked.iter().enumerate() {
            let x = origin + j as f64 * cell;
            // An incomplete matrix (older cache file) reads as zero.
            let wins_row = matrix_cell(data, row_team, col_team);
            let wins_col = matrix_cell(data, col_team, row_team);
            let played = i != j && wins_row + wins_col > 0;
            let fill = if played {
                cell_color(wins_row as i32 - wins_col as i32)
            } else {
                UNPLAYED_COLOR.to_string()
            };
            let _ = write!(
                out,
                r##"<rect x="{x:.1}" y="{y:.1}" width="{cell}" height="{cell}" fill="{fill}" stroke="#e0e0e0" stroke-width="0.5"/>"##
            );
            if played {
                let diff = wins_row as i32 - wins_col as i32;
                let font_color = if diff.abs() >= 2 { "#ffffff" } else { TEXT_COLOR };
                text(
                    &mut out,
                    x + cell / 2.0,
                    y + cell * 0.65,
                    10,
                    font_color,
                    "middle",
                    &format!("{wins_row}-{wins_col}"),
                );
            }
        }
    }

    out.push_str("</svg>");
    out
}

/// East vs West cumulative line with the totals banner.
pub fn render_conference_battle(data: &ConferenceBattleData) -> String {
    let (width, height) = (1200u32, 700u32);
    let (left, right, top, bottom) = (70.0, 40.0, 90.0, 50.0);
    let plot_w = width as f64 - left - right;
    let plot_h = height as f64 - top - bottom;

    let mut out = String::new();
    svg_open(&mut out, width, height);
    text(&mut out, left, 34.0, 28, TEXT_COLOR, "start", "East vs West");
    let banner = format!("East {} - {} West", data.total_east, data.total_west);
    text(&mut out, left, 62.0, 16, MUTED_TEXT, "start", &banner);

    if data.daily.is_empty() {
        text(
            &mut out,
            width as f64 / 2.0,
            height as f64 / 2.0,
            16,
            MUTED_TEXT,
            "middle",
            "No inter-conference games yet",
        );
        out.push_str("</svg>");
        return out;
    }

    let max_val = data.daily.iter().map(|d| d.cumulative).max().unwrap_or(1).max(1);
    let min_val = data.daily.iter().map(|d| d.cumulative).min().unwrap_or(-1).min(-1);
    let span = (max_val - min_val) as f64;
    let last = data.daily.len().saturating_sub(1).max(1);

    let x_of = |i: usize| left + i as f64 / last as f64 * plot_w;
    let y_of = |v: i32| top + (max_val - v) as f64 / span * plot_h;

    let zero_y = y_of(0);
    let _ = write!(
        out,
        r#"<line x1="{left}" y1="{zero_y:.1}" x2="{:.1}" y2="{zero_y:.1}" stroke="{GRID_COLOR}" stroke-width="2"/>"#,
        left + plot_w
    );

    let points: String = data
        .daily
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{:.1},{:.1}", x_of(i), y_of(d.cumulative)))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = write!(
        out,
        r##"<polyline points="{points}" fill="none" stroke="#2563eb" stroke-width="3"/>"##
    );

    // First and last date ticks.
    let first_date = &data.daily[0].date;
    let last_date = &data.daily[data.daily.len() - 1].date;
    text(&mut out, left, height as f64 - 20.0, 13, MUTED_TEXT, "start", first_date);
    text(&mut out, left + plot_w, height as f64 - 20.0, 13, MUTED_TEXT, "end", last_date);

    out.push_str("</svg>");
    out
}
