use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job requisition joined with its company's name and location.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub skills: Vec<String>,
    pub experience_min: Option<f64>,
    pub experience_max: Option<f64>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_currency: Option<String>,
    pub openings: Option<i32>,
    /// job_status: draft | open | on_hold | closed | filled
    pub status: String,
    /// job_priority: low | medium | high | urgent
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company_name: Option<String>,
    pub company_location: Option<String>,
}

impl JobRow {
    /// A fresh open, medium-priority job with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            company_id: None,
            title: title.into(),
            description: None,
            requirements: None,
            skills: Vec::new(),
            experience_min: None,
            experience_max: None,
            location: None,
            job_type: None,
            salary_min: None,
            salary_max: None,
            salary_currency: None,
            openings: None,
            status: "open".to_string(),
            priority: "medium".to_string(),
            created_at: now,
            updated_at: now,
            company_name: None,
            company_location: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == "open"
    }
}
