use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<f64>,
    pub current_designation: Option<String>,
    pub current_company: Option<String>,
    pub education: Option<String>,
    pub location: Option<String>,
    pub current_salary: Option<f64>,
    pub expected_salary: Option<f64>,
    pub notice_period: Option<String>,
    pub source: Option<String>,
    /// candidate_status: new | screening | shortlisted | interview | offered | hired | rejected | on_hold
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateRow {
    /// A fresh `new`-status candidate with only a name set.
    pub fn new(full_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
            email: None,
            phone: None,
            skills: Vec::new(),
            experience_years: None,
            current_designation: None,
            current_company: None,
            education: None,
            location: None,
            current_salary: None,
            expected_salary: None,
            notice_period: None,
            source: None,
            status: "new".to_string(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}
