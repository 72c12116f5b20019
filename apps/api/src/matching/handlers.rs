//! Axum route handler for the matching proxy.

use axum::{body::Bytes, extract::State, Json};
use tracing::debug;

use crate::errors::AppError;
use crate::matching::proxy::MatchResponse;
use crate::matching::request::MatchRequest;
use crate::state::AppState;

/// POST /api/v1/ai-match
///
/// Body: `{ type, candidate_id?, job_id?, job_description?, matched_by? }`.
/// The body is read raw so an unknown `type` yields `{ "error": "Invalid type" }`
/// rather than an extractor rejection.
pub async fn handle_ai_match(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MatchResponse>, AppError> {
    let request = MatchRequest::from_body(&body)?;
    debug!("ai-match request: {}", request.kind());

    let response = state.proxy.dispatch(request).await?;
    Ok(Json(response))
}
