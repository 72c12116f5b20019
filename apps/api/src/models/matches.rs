use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// HR triage state of a match. Any state may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    New,
    Reviewed,
    Shortlisted,
    Rejected,
    Hired,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::New => "new",
            MatchStatus::Reviewed => "reviewed",
            MatchStatus::Shortlisted => "shortlisted",
            MatchStatus::Rejected => "rejected",
            MatchStatus::Hired => "hired",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(MatchStatus::New),
            "reviewed" => Ok(MatchStatus::Reviewed),
            "shortlisted" => Ok(MatchStatus::Shortlisted),
            "rejected" => Ok(MatchStatus::Rejected),
            "hired" => Ok(MatchStatus::Hired),
            other => Err(format!("unknown match status '{other}'")),
        }
    }
}

/// One persisted score record. Unique per (candidate_id, job_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub overall_score: Option<f64>,
    pub skill_score: Option<f64>,
    pub experience_score: Option<f64>,
    pub education_score: Option<f64>,
    pub location_score: Option<f64>,
    pub salary_score: Option<f64>,
    /// The full score result as scored: sub-scores, strengths, gaps, recommendation.
    pub score_breakdown: Option<Value>,
    pub status: String,
    pub matched_by: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A match joined with the candidate and job fields the list view shows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchListItem {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub record: MatchRow,
    pub candidate_name: String,
    pub candidate_skills: Vec<String>,
    pub candidate_location: Option<String>,
    pub candidate_experience_years: Option<f64>,
    pub job_title: String,
    pub company_name: Option<String>,
}

/// Values written by a score-and-persist call.
#[derive(Debug, Clone)]
pub struct MatchUpsert {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub overall_score: f64,
    pub skill_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub location_score: f64,
    pub salary_score: f64,
    pub score_breakdown: Value,
    pub matched_by: Option<Uuid>,
}

/// Query filters for the match list. Empty and `all` values filter nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<MatchStatus>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub candidate_id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub job_id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<i64>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl MatchFilter {
    pub const DEFAULT_LIMIT: i64 = 100;
    pub const MAX_LIMIT: i64 = 500;

    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn accepts(&self, row: &MatchRow) -> bool {
        self.status.map_or(true, |s| row.status == s.as_str())
            && self.candidate_id.map_or(true, |id| row.candidate_id == id)
            && self.job_id.map_or(true, |id| row.job_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            MatchStatus::New,
            MatchStatus::Reviewed,
            MatchStatus::Shortlisted,
            MatchStatus::Rejected,
            MatchStatus::Hired,
        ] {
            assert_eq!(status.as_str().parse::<MatchStatus>(), Ok(status));
        }
        assert!("archived".parse::<MatchStatus>().is_err());
    }

    #[test]
    fn test_status_serde_is_snake_case() {
        let status: MatchStatus = serde_json::from_str(r#""shortlisted""#).unwrap();
        assert_eq!(status, MatchStatus::Shortlisted);
        assert_eq!(serde_json::to_string(&MatchStatus::Hired).unwrap(), r#""hired""#);
    }

    #[test]
    fn test_filter_limit_is_clamped() {
        assert_eq!(MatchFilter::default().effective_limit(), 100);
        let huge = MatchFilter {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(huge.effective_limit(), 500);
        let zero = MatchFilter {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(zero.effective_limit(), 1);
    }

    #[test]
    fn test_filter_treats_blank_values_as_absent() {
        let filter: MatchFilter =
            serde_json::from_value(serde_json::json!({ "status": "", "candidate_id": "all" }))
                .unwrap();
        assert!(filter.status.is_none());
        assert!(filter.candidate_id.is_none());

        let filter: MatchFilter =
            serde_json::from_value(serde_json::json!({ "status": "hired", "limit": "25" }))
                .unwrap();
        assert_eq!(filter.status, Some(MatchStatus::Hired));
        assert_eq!(filter.limit, Some(25));

        let bad = serde_json::from_value::<MatchFilter>(serde_json::json!({ "status": "archived" }));
        assert!(bad.is_err());
    }
}
