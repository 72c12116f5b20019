//! Score contract: what the model must return, what callers receive, and the
//! degraded-mode substitutes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CandidateRow, JobRow, MatchUpsert};

/// Neutral value used for every score when the model could not be consulted.
pub const FALLBACK_SCORE: f64 = 50.0;
pub const FALLBACK_NOTE: &str = "Unable to analyze";
pub const FALLBACK_RECOMMENDATION: &str = "AI analysis unavailable. Please review manually.";

/// Most entries a batch ranking returns.
pub const MAX_RANKED_RESULTS: usize = 10;

/// Pairwise scores exactly as the `return_scores` tool delivers them.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelScores {
    pub overall_score: f64,
    pub skill_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub location_score: f64,
    pub salary_score: f64,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub recommendation: String,
}

/// Six scores in [0, 100] plus narrative. `degraded` marks a fallback result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall_score: f64,
    pub skill_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub location_score: f64,
    pub salary_score: f64,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub recommendation: String,
    #[serde(default)]
    pub degraded: bool,
}

impl ScoreResult {
    pub fn from_model(scores: ModelScores) -> Self {
        Self {
            overall_score: clamp_score(scores.overall_score),
            skill_score: clamp_score(scores.skill_score),
            experience_score: clamp_score(scores.experience_score),
            education_score: clamp_score(scores.education_score),
            location_score: clamp_score(scores.location_score),
            salary_score: clamp_score(scores.salary_score),
            strengths: scores.strengths,
            gaps: scores.gaps,
            recommendation: scores.recommendation,
            degraded: false,
        }
    }

    pub fn fallback() -> Self {
        Self {
            overall_score: FALLBACK_SCORE,
            skill_score: FALLBACK_SCORE,
            experience_score: FALLBACK_SCORE,
            education_score: FALLBACK_SCORE,
            location_score: FALLBACK_SCORE,
            salary_score: FALLBACK_SCORE,
            strengths: vec![FALLBACK_NOTE.to_string()],
            gaps: vec![FALLBACK_NOTE.to_string()],
            recommendation: FALLBACK_RECOMMENDATION.to_string(),
            degraded: true,
        }
    }

    pub fn scores(&self) -> [f64; 6] {
        [
            self.overall_score,
            self.skill_score,
            self.experience_score,
            self.education_score,
            self.location_score,
            self.salary_score,
        ]
    }

    /// Builds the match write for this result; the breakdown is the result itself.
    pub fn to_upsert(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        matched_by: Option<Uuid>,
    ) -> Result<MatchUpsert, serde_json::Error> {
        Ok(MatchUpsert {
            candidate_id,
            job_id,
            overall_score: self.overall_score,
            skill_score: self.skill_score,
            experience_score: self.experience_score,
            education_score: self.education_score,
            location_score: self.location_score,
            salary_score: self.salary_score,
            score_breakdown: serde_json::to_value(self)?,
            matched_by,
        })
    }
}

pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// One entry of the `return_matches` tool: a pool index, a score and a reason.
#[derive(Debug, Clone, Deserialize)]
pub struct RankedItem {
    pub index: f64,
    pub score: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelRanking {
    pub matches: Vec<RankedItem>,
}

/// A pool entry the model ranked, borrowed from the fetched pool.
#[derive(Debug)]
pub struct Ranked<'a, T> {
    pub entry: &'a T,
    pub score: f64,
    pub reason: String,
}

/// Joins ranked items back to `pool` by index.
///
/// Indices that are negative, fractional or past the end are dropped; when an
/// index repeats only its best-scored entry is kept. Result is sorted by score
/// descending and holds at most `limit` entries.
pub fn rank_pool<T>(pool: &[T], items: Vec<RankedItem>, limit: usize) -> Vec<Ranked<'_, T>> {
    let mut candidates: Vec<(usize, f64, String)> = items
        .into_iter()
        .filter_map(|item| {
            let index = pool_index(item.index, pool.len())?;
            Some((index, clamp_score(item.score), item.reason))
        })
        .collect();

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|(index, _, _)| seen.insert(*index))
        .take(limit)
        .map(|(index, score, reason)| Ranked {
            entry: &pool[index],
            score,
            reason,
        })
        .collect()
}

fn pool_index(raw: f64, len: usize) -> Option<usize> {
    if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 {
        return None;
    }
    let index = raw as usize;
    (index < len).then_some(index)
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateMatch {
    pub candidate: CandidateRow,
    pub score: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    pub job: JobRow,
    pub score: f64,
    pub reason: String,
}

/// `{ matches, degraded }`; `degraded` is set when the model could not be consulted.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse<T> {
    pub matches: Vec<T>,
    pub degraded: bool,
}

impl<T> BatchResponse<T> {
    pub fn ranked(matches: Vec<T>) -> Self {
        Self {
            matches,
            degraded: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            matches: Vec::new(),
            degraded: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(index: f64, score: f64) -> RankedItem {
        RankedItem {
            index,
            score,
            reason: format!("reason {index}"),
        }
    }

    #[test]
    fn test_fallback_is_fixed() {
        let fallback = ScoreResult::fallback();
        assert!(fallback.scores().iter().all(|s| *s == 50.0));
        assert_eq!(fallback.strengths, vec!["Unable to analyze"]);
        assert_eq!(fallback.gaps, vec!["Unable to analyze"]);
        assert_eq!(
            fallback.recommendation,
            "AI analysis unavailable. Please review manually."
        );
        assert!(fallback.degraded);
    }

    #[test]
    fn test_model_scores_are_clamped() {
        let result = ScoreResult::from_model(ModelScores {
            overall_score: 140.0,
            skill_score: -3.0,
            experience_score: 72.5,
            education_score: 0.0,
            location_score: 100.0,
            salary_score: 101.0,
            strengths: vec!["React".into()],
            gaps: vec![],
            recommendation: "Interview".into(),
        });
        assert_eq!(result.scores(), [100.0, 0.0, 72.5, 0.0, 100.0, 100.0]);
        assert!(!result.degraded);
    }

    #[test]
    fn test_model_scores_require_every_field() {
        let partial = r#"{"overall_score": 80, "skill_score": 70, "strengths": [], "gaps": [], "recommendation": "ok"}"#;
        assert!(serde_json::from_str::<ModelScores>(partial).is_err());
    }

    #[test]
    fn test_breakdown_is_the_full_result() {
        let result = ScoreResult::fallback();
        let upsert = result
            .to_upsert(Uuid::new_v4(), Uuid::new_v4(), None)
            .unwrap();
        assert_eq!(upsert.score_breakdown["recommendation"], FALLBACK_RECOMMENDATION);
        assert_eq!(upsert.score_breakdown["degraded"], true);
        assert_eq!(upsert.overall_score, 50.0);
    }

    #[test]
    fn test_rank_pool_sorts_descending() {
        let pool = ["a", "b", "c"];
        let ranked = rank_pool(&pool, vec![item(0.0, 40.0), item(2.0, 90.0), item(1.0, 65.0)], 10);
        let order: Vec<&str> = ranked.iter().map(|r| *r.entry).collect();
        assert_eq!(order, ["c", "b", "a"]);
        assert_eq!(ranked[0].reason, "reason 2");
    }

    #[test]
    fn test_rank_pool_drops_bad_indices() {
        let pool = ["a", "b"];
        let ranked = rank_pool(
            &pool,
            vec![item(5.0, 99.0), item(-1.0, 98.0), item(0.5, 97.0), item(1.0, 10.0)],
            10,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(*ranked[0].entry, "b");
    }

    #[test]
    fn test_rank_pool_keeps_best_duplicate_and_limits() {
        let pool: Vec<usize> = (0..20).collect();
        let mut items: Vec<RankedItem> = (0..20).map(|i| item(i as f64, i as f64)).collect();
        items.push(item(3.0, 100.0));

        let ranked = rank_pool(&pool, items, MAX_RANKED_RESULTS);
        assert_eq!(ranked.len(), MAX_RANKED_RESULTS);
        assert_eq!(*ranked[0].entry, 3);
        assert_eq!(ranked[0].score, 100.0);
        assert_eq!(ranked.iter().filter(|r| *r.entry == 3).count(), 1);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_pool_clamps_scores() {
        let pool = ["a"];
        let ranked = rank_pool(&pool, vec![item(0.0, 250.0)], 10);
        assert_eq!(ranked[0].score, 100.0);
    }
}
