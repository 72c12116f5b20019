use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    CandidateRow, JobRow, MatchFilter, MatchListItem, MatchRow, MatchStatus, MatchUpsert,
};
use crate::store::TalentStore;

#[derive(Default)]
struct Tables {
    candidates: HashMap<Uuid, CandidateRow>,
    jobs: HashMap<Uuid, JobRow>,
    matches: HashMap<Uuid, MatchRow>,
}

/// In-process `TalentStore` with the same upsert and ordering rules as `PgStore`.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_candidate(&self, candidate: CandidateRow) -> Uuid {
        let id = candidate.id;
        self.tables.write().await.candidates.insert(id, candidate);
        id
    }

    pub async fn insert_job(&self, job: JobRow) -> Uuid {
        let id = job.id;
        self.tables.write().await.jobs.insert(id, job);
        id
    }

    pub async fn match_count(&self) -> usize {
        self.tables.read().await.matches.len()
    }
}

fn newest_first<T>(rows: &mut [T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>) {
    rows.sort_by_key(|r| std::cmp::Reverse(created_at(r)));
}

#[async_trait]
impl TalentStore for MemoryStore {
    async fn candidate(&self, id: Uuid) -> Result<Option<CandidateRow>, AppError> {
        Ok(self.tables.read().await.candidates.get(&id).cloned())
    }

    async fn job(&self, id: Uuid) -> Result<Option<JobRow>, AppError> {
        Ok(self.tables.read().await.jobs.get(&id).cloned())
    }

    async fn candidate_pool(&self, limit: i64) -> Result<Vec<CandidateRow>, AppError> {
        let mut rows: Vec<CandidateRow> =
            self.tables.read().await.candidates.values().cloned().collect();
        newest_first(&mut rows, |c| c.created_at);
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn open_job_pool(&self, limit: i64) -> Result<Vec<JobRow>, AppError> {
        let mut rows: Vec<JobRow> = self
            .tables
            .read()
            .await
            .jobs
            .values()
            .filter(|j| j.is_open())
            .cloned()
            .collect();
        newest_first(&mut rows, |j| j.created_at);
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn upsert_match(&self, upsert: &MatchUpsert) -> Result<MatchRow, AppError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        let existing = tables
            .matches
            .values_mut()
            .find(|m| m.candidate_id == upsert.candidate_id && m.job_id == upsert.job_id);

        if let Some(row) = existing {
            row.overall_score = Some(upsert.overall_score);
            row.skill_score = Some(upsert.skill_score);
            row.experience_score = Some(upsert.experience_score);
            row.education_score = Some(upsert.education_score);
            row.location_score = Some(upsert.location_score);
            row.salary_score = Some(upsert.salary_score);
            row.score_breakdown = Some(upsert.score_breakdown.clone());
            if upsert.matched_by.is_some() {
                row.matched_by = upsert.matched_by;
            }
            row.updated_at = now;
            return Ok(row.clone());
        }

        let row = MatchRow {
            id: Uuid::new_v4(),
            candidate_id: upsert.candidate_id,
            job_id: upsert.job_id,
            overall_score: Some(upsert.overall_score),
            skill_score: Some(upsert.skill_score),
            experience_score: Some(upsert.experience_score),
            education_score: Some(upsert.education_score),
            location_score: Some(upsert.location_score),
            salary_score: Some(upsert.salary_score),
            score_breakdown: Some(upsert.score_breakdown.clone()),
            status: MatchStatus::New.as_str().to_string(),
            matched_by: upsert.matched_by,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        tables.matches.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_matches(&self, filter: &MatchFilter) -> Result<Vec<MatchListItem>, AppError> {
        let tables = self.tables.read().await;

        let mut items: Vec<MatchListItem> = tables
            .matches
            .values()
            .filter(|m| filter.accepts(m))
            .filter_map(|m| {
                let candidate = tables.candidates.get(&m.candidate_id)?;
                let job = tables.jobs.get(&m.job_id)?;
                Some(MatchListItem {
                    record: m.clone(),
                    candidate_name: candidate.full_name.clone(),
                    candidate_skills: candidate.skills.clone(),
                    candidate_location: candidate.location.clone(),
                    candidate_experience_years: candidate.experience_years,
                    job_title: job.title.clone(),
                    company_name: job.company_name.clone(),
                })
            })
            .collect();

        // NULLS LAST, then newest first
        items.sort_by(|a, b| {
            let score = |i: &MatchListItem| i.record.overall_score.unwrap_or(f64::NEG_INFINITY);
            score(b)
                .total_cmp(&score(a))
                .then_with(|| b.record.created_at.cmp(&a.record.created_at))
        });
        items.truncate(filter.effective_limit() as usize);
        Ok(items)
    }

    async fn get_match(&self, id: Uuid) -> Result<Option<MatchRow>, AppError> {
        Ok(self.tables.read().await.matches.get(&id).cloned())
    }

    async fn update_match_status(
        &self,
        id: Uuid,
        status: MatchStatus,
    ) -> Result<Option<MatchRow>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.matches.get_mut(&id).map(|row| {
            row.status = status.as_str().to_string();
            row.updated_at = Utc::now();
            row.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn upsert_for(candidate_id: Uuid, job_id: Uuid, overall: f64) -> MatchUpsert {
        MatchUpsert {
            candidate_id,
            job_id,
            overall_score: overall,
            skill_score: overall,
            experience_score: overall,
            education_score: overall,
            location_score: overall,
            salary_score: overall,
            score_breakdown: json!({ "overall_score": overall }),
            matched_by: None,
        }
    }

    async fn seeded() -> (MemoryStore, Uuid, Uuid, Uuid) {
        let store = MemoryStore::new();
        let alice = store.insert_candidate(CandidateRow::new("Alice")).await;
        let bob = store.insert_candidate(CandidateRow::new("Bob")).await;
        let mut job = JobRow::new("Frontend Engineer");
        job.company_name = Some("Acme".to_string());
        let job = store.insert_job(job).await;
        (store, alice, bob, job)
    }

    #[tokio::test]
    async fn test_upsert_keeps_one_row_per_pair() {
        let (store, alice, _, job) = seeded().await;

        let first = store.upsert_match(&upsert_for(alice, job, 40.0)).await.unwrap();
        let second = store.upsert_match(&upsert_for(alice, job, 90.0)).await.unwrap();

        assert_eq!(store.match_count().await, 1);
        assert_eq!(first.id, second.id);
        assert_eq!(second.overall_score, Some(90.0));
        assert_eq!(second.status, "new");
    }

    #[tokio::test]
    async fn test_upsert_preserves_triage_status() {
        let (store, alice, _, job) = seeded().await;
        let row = store.upsert_match(&upsert_for(alice, job, 70.0)).await.unwrap();
        store
            .update_match_status(row.id, MatchStatus::Shortlisted)
            .await
            .unwrap();

        let rescored = store.upsert_match(&upsert_for(alice, job, 20.0)).await.unwrap();
        assert_eq!(rescored.status, "shortlisted");
        assert_eq!(rescored.overall_score, Some(20.0));
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_by_score() {
        let (store, alice, bob, job) = seeded().await;
        let a = store.upsert_match(&upsert_for(alice, job, 55.0)).await.unwrap();
        store.upsert_match(&upsert_for(bob, job, 80.0)).await.unwrap();
        store.update_match_status(a.id, MatchStatus::Rejected).await.unwrap();

        let all = store.list_matches(&MatchFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].candidate_name, "Bob");
        assert_eq!(all[1].candidate_name, "Alice");
        assert_eq!(all[0].company_name.as_deref(), Some("Acme"));

        let rejected = store
            .list_matches(&MatchFilter {
                status: Some(MatchStatus::Rejected),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].record.candidate_id, alice);

        let for_bob = store
            .list_matches(&MatchFilter {
                candidate_id: Some(bob),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(for_bob.len(), 1);
        assert_eq!(for_bob[0].record.overall_score, Some(80.0));
    }

    #[tokio::test]
    async fn test_any_status_transition_is_allowed() {
        let (store, alice, _, job) = seeded().await;
        let row = store.upsert_match(&upsert_for(alice, job, 60.0)).await.unwrap();

        for status in [MatchStatus::Hired, MatchStatus::New, MatchStatus::Rejected] {
            let updated = store.update_match_status(row.id, status).await.unwrap().unwrap();
            assert_eq!(updated.status, status.as_str());
        }
        assert!(store
            .update_match_status(Uuid::new_v4(), MatchStatus::Reviewed)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_pools_are_newest_first_and_bounded() {
        let store = MemoryStore::new();
        let base = Utc::now();
        for i in 0..5 {
            let mut c = CandidateRow::new(format!("C{i}"));
            c.created_at = base + Duration::seconds(i);
            store.insert_candidate(c).await;
        }
        let mut closed = JobRow::new("Closed role");
        closed.status = "closed".to_string();
        store.insert_job(closed).await;
        store.insert_job(JobRow::new("Open role")).await;

        let pool = store.candidate_pool(3).await.unwrap();
        let names: Vec<&str> = pool.iter().map(|c| c.full_name.as_str()).collect();
        assert_eq!(names, ["C4", "C3", "C2"]);

        let jobs = store.open_job_pool(50).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Open role");
    }
}
