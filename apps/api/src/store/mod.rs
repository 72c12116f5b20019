//! Storage seam for the matching service.
//!
//! `AppState` holds an `Arc<dyn TalentStore>`: `PgStore` in production,
//! `MemoryStore` for `DATABASE_URL=memory://` and tests. Both implementations
//! keep at most one match per (candidate_id, job_id) and never reset a match's
//! triage status when it is rescored.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    CandidateRow, JobRow, MatchFilter, MatchListItem, MatchRow, MatchStatus, MatchUpsert,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait TalentStore: Send + Sync {
    async fn candidate(&self, id: Uuid) -> Result<Option<CandidateRow>, AppError>;

    async fn job(&self, id: Uuid) -> Result<Option<JobRow>, AppError>;

    /// Newest candidates first, at most `limit`.
    async fn candidate_pool(&self, limit: i64) -> Result<Vec<CandidateRow>, AppError>;

    /// Newest `open` jobs first, at most `limit`.
    async fn open_job_pool(&self, limit: i64) -> Result<Vec<JobRow>, AppError>;

    /// Inserts the pair's match with status `new`, or overwrites its scores in place.
    async fn upsert_match(&self, upsert: &MatchUpsert) -> Result<MatchRow, AppError>;

    /// Matches passing `filter`, best overall score first.
    async fn list_matches(&self, filter: &MatchFilter) -> Result<Vec<MatchListItem>, AppError>;

    async fn get_match(&self, id: Uuid) -> Result<Option<MatchRow>, AppError>;

    async fn update_match_status(
        &self,
        id: Uuid,
        status: MatchStatus,
    ) -> Result<Option<MatchRow>, AppError>;
}
