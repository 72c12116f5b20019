//! Boundary validation for `POST /api/v1/ai-match` bodies.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;

/// Message returned for an absent or unrecognised `type`. The UI keys off it.
pub const INVALID_TYPE: &str = "Invalid type";

const KNOWN_TYPES: [&str; 4] = ["match_one", "power_match", "match_resumes", "reverse_match"];

/// One matching operation, discriminated by the body's `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchRequest {
    /// Score one candidate against one job; nothing is written.
    MatchOne { candidate_id: Uuid, job_id: Uuid },
    /// Score one pair and upsert the pair's match record.
    PowerMatch {
        candidate_id: Uuid,
        job_id: Uuid,
        #[serde(default)]
        matched_by: Option<Uuid>,
    },
    /// Rank the candidate pool against free-text job description.
    MatchResumes { job_description: String },
    /// Rank open jobs against one candidate.
    ReverseMatch { candidate_id: Uuid },
}

impl MatchRequest {
    /// Parses a raw request body, rejecting unknown operations before dispatch.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| AppError::InvalidRequest(format!("Request body is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, AppError> {
        let kind = match value.get("type").and_then(Value::as_str) {
            Some(kind) if KNOWN_TYPES.contains(&kind) => kind.to_string(),
            _ => return Err(AppError::InvalidRequest(INVALID_TYPE.to_string())),
        };

        let request: MatchRequest = serde_json::from_value(value)
            .map_err(|e| AppError::InvalidRequest(format!("Invalid {kind} request: {e}")))?;

        if let MatchRequest::MatchResumes { job_description } = &request {
            if job_description.trim().is_empty() {
                return Err(AppError::InvalidRequest(
                    "job_description cannot be empty".to_string(),
                ));
            }
        }

        Ok(request)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MatchRequest::MatchOne { .. } => "match_one",
            MatchRequest::PowerMatch { .. } => "power_match",
            MatchRequest::MatchResumes { .. } => "match_resumes",
            MatchRequest::ReverseMatch { .. } => "reverse_match",
        }
    }
}
