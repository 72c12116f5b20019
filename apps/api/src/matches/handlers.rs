use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::{ApiJson, ApiPath, ApiQuery, AppError};
use crate::models::{MatchFilter, MatchListItem, MatchRow, MatchStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: MatchStatus,
}

/// GET /api/v1/matches?status=&candidate_id=&job_id=&limit=
///
/// Empty or `all` filter values mean "no filter".
pub async fn handle_list_matches(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<MatchFilter>,
) -> Result<Json<Vec<MatchListItem>>, AppError> {
    let matches = state.store.list_matches(&filter).await?;
    Ok(Json(matches))
}

/// GET /api/v1/matches/:id
pub async fn handle_get_match(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MatchRow>, AppError> {
    let row = state
        .store
        .get_match(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Match {id} not found")))?;
    Ok(Json(row))
}

/// PATCH /api/v1/matches/:id/status
///
/// Any status may be set from any other; triage order is not enforced.
pub async fn handle_update_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(update): ApiJson<StatusUpdate>,
) -> Result<Json<MatchRow>, AppError> {
    let row = state
        .store
        .update_match_status(id, update.status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Match {id} not found")))?;

    info!("Match {id} moved to {}", update.status);
    Ok(Json(row))
}
