use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    CandidateRow, JobRow, MatchFilter, MatchListItem, MatchRow, MatchStatus, MatchUpsert,
};
use crate::store::TalentStore;

const JOB_SELECT: &str = r#"
    SELECT j.*, c.name AS company_name, c.location AS company_location
    FROM jobs j
    LEFT JOIN companies c ON c.id = j.company_id
"#;

/// `TalentStore` backed by the Postgres schema in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TalentStore for PgStore {
    async fn candidate(&self, id: Uuid) -> Result<Option<CandidateRow>, AppError> {
        let row = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn job(&self, id: Uuid) -> Result<Option<JobRow>, AppError> {
        let row = sqlx::query_as::<_, JobRow>(&format!("{JOB_SELECT} WHERE j.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn candidate_pool(&self, limit: i64) -> Result<Vec<CandidateRow>, AppError> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            "SELECT * FROM candidates ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn open_job_pool(&self, limit: i64) -> Result<Vec<JobRow>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "{JOB_SELECT} WHERE j.status = 'open' ORDER BY j.created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn upsert_match(&self, upsert: &MatchUpsert) -> Result<MatchRow, AppError> {
        // status is written only on insert; rescoring keeps HR's triage decision.
        let row = sqlx::query_as::<_, MatchRow>(
            r#"
            INSERT INTO matches
                (candidate_id, job_id, overall_score, skill_score, experience_score,
                 education_score, location_score, salary_score, score_breakdown,
                 matched_by, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'new')
            ON CONFLICT (candidate_id, job_id) DO UPDATE SET
                overall_score    = EXCLUDED.overall_score,
                skill_score      = EXCLUDED.skill_score,
                experience_score = EXCLUDED.experience_score,
                education_score  = EXCLUDED.education_score,
                location_score   = EXCLUDED.location_score,
                salary_score     = EXCLUDED.salary_score,
                score_breakdown  = EXCLUDED.score_breakdown,
                matched_by       = COALESCE(EXCLUDED.matched_by, matches.matched_by),
                updated_at       = now()
            RETURNING *
            "#,
        )
        .bind(upsert.candidate_id)
        .bind(upsert.job_id)
        .bind(upsert.overall_score)
        .bind(upsert.skill_score)
        .bind(upsert.experience_score)
        .bind(upsert.education_score)
        .bind(upsert.location_score)
        .bind(upsert.salary_score)
        .bind(&upsert.score_breakdown)
        .bind(upsert.matched_by)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Upserted match {} for candidate {} / job {}",
            row.id, row.candidate_id, row.job_id
        );
        Ok(row)
    }

    async fn list_matches(&self, filter: &MatchFilter) -> Result<Vec<MatchListItem>, AppError> {
        let rows = sqlx::query_as::<_, MatchListItem>(
            r#"
            SELECT m.*,
                   ca.full_name        AS candidate_name,
                   ca.skills           AS candidate_skills,
                   ca.location         AS candidate_location,
                   ca.experience_years AS candidate_experience_years,
                   j.title             AS job_title,
                   co.name             AS company_name
            FROM matches m
            JOIN candidates ca ON ca.id = m.candidate_id
            JOIN jobs j ON j.id = m.job_id
            LEFT JOIN companies co ON co.id = j.company_id
            WHERE ($1::text IS NULL OR m.status = $1)
              AND ($2::uuid IS NULL OR m.candidate_id = $2)
              AND ($3::uuid IS NULL OR m.job_id = $3)
            ORDER BY m.overall_score DESC NULLS LAST, m.created_at DESC
            LIMIT $4
            "#,
        )
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.candidate_id)
        .bind(filter.job_id)
        .bind(filter.effective_limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_match(&self, id: Uuid) -> Result<Option<MatchRow>, AppError> {
        let row = sqlx::query_as::<_, MatchRow>("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_match_status(
        &self,
        id: Uuid,
        status: MatchStatus,
    ) -> Result<Option<MatchRow>, AppError> {
        let row = sqlx::query_as::<_, MatchRow>(
            "UPDATE matches SET status = $1, updated_at = now() WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
