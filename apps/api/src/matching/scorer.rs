//! Match scorer: the pluggable seam between the proxy and the model.
//!
//! Scorers report failures as `LlmError`; the proxy decides what a failure
//! degrades into. `AppState` holds an `Arc<dyn MatchScorer>`.

use async_trait::async_trait;

use crate::llm_client::prompts::{
    CANDIDATE_RANKING_SYSTEM, JOB_RANKING_SYSTEM, PAIR_SCORING_SYSTEM,
};
use crate::llm_client::{LlmClient, LlmError};
use crate::matching::prompts::{
    pair_prompt, ranking_tool, resume_match_prompt, reverse_match_prompt, score_tool,
};
use crate::matching::scores::{ModelRanking, ModelScores, RankedItem, ScoreResult};
use crate::models::{CandidateRow, JobRow};

#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score_pair(
        &self,
        candidate: &CandidateRow,
        job: &JobRow,
    ) -> Result<ScoreResult, LlmError>;

    /// Ranks `pool` against a free-text job description. Items index into `pool`.
    async fn rank_candidates(
        &self,
        job_description: &str,
        pool: &[CandidateRow],
    ) -> Result<Vec<RankedItem>, LlmError>;

    /// Ranks `pool` against one candidate. Items index into `pool`.
    async fn rank_jobs(
        &self,
        candidate: &CandidateRow,
        pool: &[JobRow],
    ) -> Result<Vec<RankedItem>, LlmError>;
}

/// Scores through the completion gateway, one tool-forced call per operation.
pub struct LlmMatchScorer(pub LlmClient);

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn score_pair(
        &self,
        candidate: &CandidateRow,
        job: &JobRow,
    ) -> Result<ScoreResult, LlmError> {
        let prompt = pair_prompt(candidate, job);
        let scores: ModelScores = self
            .0
            .call_tool(&prompt, PAIR_SCORING_SYSTEM, &score_tool())
            .await?;
        Ok(ScoreResult::from_model(scores))
    }

    async fn rank_candidates(
        &self,
        job_description: &str,
        pool: &[CandidateRow],
    ) -> Result<Vec<RankedItem>, LlmError> {
        let prompt = resume_match_prompt(job_description, pool);
        let tool = ranking_tool("Return scored candidate matches");
        let ranking: ModelRanking = self
            .0
            .call_tool(&prompt, CANDIDATE_RANKING_SYSTEM, &tool)
            .await?;
        Ok(ranking.matches)
    }

    async fn rank_jobs(
        &self,
        candidate: &CandidateRow,
        pool: &[JobRow],
    ) -> Result<Vec<RankedItem>, LlmError> {
        let prompt = reverse_match_prompt(candidate, pool);
        let tool = ranking_tool("Return scored job matches");
        let ranking: ModelRanking = self.0.call_tool(&prompt, JOB_RANKING_SYSTEM, &tool).await?;
        Ok(ranking.matches)
    }
}
