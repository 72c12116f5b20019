//! Matching proxy. Turns one `MatchRequest` into scores, optionally persisting
//! the pair's match record.
//!
//! Failure policy:
//! - lookup/storage failures surface as `AppError` (404 / 500)
//! - scorer failures never do: pairwise operations fall back to
//!   `ScoreResult::fallback()`, batch operations return an empty list.
//!   Both carry `degraded: true`.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::MAX_POOL_SIZE;
use crate::errors::AppError;
use crate::matching::request::MatchRequest;
use crate::matching::scorer::MatchScorer;
use crate::matching::scores::{
    rank_pool, BatchResponse, CandidateMatch, JobMatch, ScoreResult, MAX_RANKED_RESULTS,
};
use crate::models::{CandidateRow, JobRow, MatchRow};
use crate::store::TalentStore;

/// Response body for each operation; serialized without a tag.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MatchResponse {
    /// `match_one`: the score object itself.
    Scores(ScoreResult),
    /// `power_match`: the upserted record and the scores written into it.
    Persisted {
        #[serde(rename = "match")]
        record: MatchRow,
        scores: ScoreResult,
    },
    /// `match_resumes`
    Candidates(BatchResponse<CandidateMatch>),
    /// `reverse_match`
    Jobs(BatchResponse<JobMatch>),
}

#[derive(Clone)]
pub struct MatchingProxy {
    store: Arc<dyn TalentStore>,
    scorer: Arc<dyn MatchScorer>,
    pool_size: i64,
}

impl MatchingProxy {
    pub fn new(store: Arc<dyn TalentStore>, scorer: Arc<dyn MatchScorer>, pool_size: i64) -> Self {
        Self {
            store,
            scorer,
            pool_size: pool_size.clamp(1, MAX_POOL_SIZE),
        }
    }

    pub async fn dispatch(&self, request: MatchRequest) -> Result<MatchResponse, AppError> {
        match request {
            MatchRequest::MatchOne {
                candidate_id,
                job_id,
            } => {
                let (candidate, job) = self.fetch_pair(candidate_id, job_id).await?;
                Ok(MatchResponse::Scores(
                    self.score_or_fallback(&candidate, &job).await,
                ))
            }
            MatchRequest::PowerMatch {
                candidate_id,
                job_id,
                matched_by,
            } => self.power_match(candidate_id, job_id, matched_by).await,
            MatchRequest::MatchResumes { job_description } => {
                self.match_resumes(&job_description).await
            }
            MatchRequest::ReverseMatch { candidate_id } => self.reverse_match(candidate_id).await,
        }
    }

    async fn fetch_pair(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<(CandidateRow, JobRow), AppError> {
        let (candidate, job) = tokio::try_join!(
            self.store.candidate(candidate_id),
            self.store.job(job_id)
        )?;
        let candidate = candidate
            .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
        let job = job.ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
        Ok((candidate, job))
    }

    async fn score_or_fallback(&self, candidate: &CandidateRow, job: &JobRow) -> ScoreResult {
        match self.scorer.score_pair(candidate, job).await {
            Ok(scores) => scores,
            Err(e) => {
                warn!(
                    candidate_id = %candidate.id,
                    job_id = %job.id,
                    "Scoring unavailable, returning fallback scores: {e}"
                );
                ScoreResult::fallback()
            }
        }
    }

    async fn power_match(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        matched_by: Option<Uuid>,
    ) -> Result<MatchResponse, AppError> {
        let (candidate, job) = self.fetch_pair(candidate_id, job_id).await?;
        let scores = self.score_or_fallback(&candidate, &job).await;

        let upsert = scores
            .to_upsert(candidate_id, job_id, matched_by)
            .map_err(|e| AppError::Internal(e.into()))?;
        let record = self.store.upsert_match(&upsert).await?;

        info!(
            "Power match saved: match={} overall={} degraded={}",
            record.id, scores.overall_score, scores.degraded
        );
        Ok(MatchResponse::Persisted { record, scores })
    }

    async fn match_resumes(&self, job_description: &str) -> Result<MatchResponse, AppError> {
        let pool = self.store.candidate_pool(self.pool_size).await?;
        if pool.is_empty() {
            return Ok(MatchResponse::Candidates(BatchResponse::ranked(Vec::new())));
        }

        let response = match self.scorer.rank_candidates(job_description, &pool).await {
            Ok(items) => BatchResponse::ranked(
                rank_pool(&pool, items, MAX_RANKED_RESULTS)
                    .into_iter()
                    .map(|r| CandidateMatch {
                        candidate: r.entry.clone(),
                        score: r.score,
                        reason: r.reason,
                    })
                    .collect(),
            ),
            Err(e) => {
                warn!(pool = pool.len(), "Candidate ranking unavailable: {e}");
                BatchResponse::unavailable()
            }
        };
        Ok(MatchResponse::Candidates(response))
    }

    async fn reverse_match(&self, candidate_id: Uuid) -> Result<MatchResponse, AppError> {
        let candidate = self
            .store
            .candidate(candidate_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

        let pool = self.store.open_job_pool(self.pool_size).await?;
        if pool.is_empty() {
            return Ok(MatchResponse::Jobs(BatchResponse::ranked(Vec::new())));
        }

        let response = match self.scorer.rank_jobs(&candidate, &pool).await {
            Ok(items) => BatchResponse::ranked(
                rank_pool(&pool, items, MAX_RANKED_RESULTS)
                    .into_iter()
                    .map(|r| JobMatch {
                        job: r.entry.clone(),
                        score: r.score,
                        reason: r.reason,
                    })
                    .collect(),
            ),
            Err(e) => {
                warn!(%candidate_id, pool = pool.len(), "Job ranking unavailable: {e}");
                BatchResponse::unavailable()
            }
        };
        Ok(MatchResponse::Jobs(response))
    }
}
