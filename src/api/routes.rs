use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::aggregate;
use crate::config::Config;
use crate::error::AppError;
use crate::teams::{Conference, Registry};
use crate::types::{ConferenceBattleData, HeadToHeadData, StandingsData};

#[derive(Clone)]
pub struct ApiState {
    pub cfg: Config,
    pub registry: Arc<Registry>,
    pub client: reqwest::Client,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/charts/:name", get(get_chart))
        .route("/standings/:conference", get(get_standings))
        .route("/head-to-head", get(get_head_to_head))
        .route("/conference-battle", get(get_conference_battle))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "teams": state.registry.len(),
    }))
}

/// Serve a pre-rendered chart file from the chart directory. A missing file
/// is a structured 404; nothing is computed on this route.
async fn get_chart(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // Keep requests inside the chart directory.
    if name.contains('/') || name.contains("..") {
        return Err(AppError::NotFound(name));
    }
    let path = FsPath::new(&state.cfg.chart_dir).join(&name);
    let body = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound(name.clone()))?;
    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    };
    Ok(([(header::CONTENT_TYPE, content_type)], body))
}

/// The three aggregate routes hand back the cached data shapes verbatim;
/// consumers must not re-derive aggregation from raw games.
async fn get_standings(
    State(state): State<ApiState>,
    Path(conference): Path<String>,
) -> Result<Json<StandingsData>, AppError> {
    let conference: Conference = conference
        .parse()
        .map_err(|_| AppError::NotFound(conference))?;
    let data =
        aggregate::standings(&state.client, &state.cfg, &state.registry, conference).await?;
    Ok(Json(data))
}

async fn get_head_to_head(
    State(state): State<ApiState>,
) -> Result<Json<HeadToHeadData>, AppError> {
    let data = aggregate::head_to_head(&state.client, &state.cfg, &state.registry).await?;
    Ok(Json(data))
}

async fn get_conference_battle(
    State(state): State<ApiState>,
) -> Result<Json<ConferenceBattleData>, AppError> {
    let data = aggregate::conference_battle(&state.client, &state.cfg, &state.registry).await?;
    Ok(Json(data))
}
