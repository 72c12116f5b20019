// Shared prompt constants. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the system prompts.

/// System prompt for scoring one candidate against one job.
pub const PAIR_SCORING_SYSTEM: &str = "You are an ATS scoring engine. Return structured scores.";

/// System prompt for ranking a candidate pool against a job description.
pub const CANDIDATE_RANKING_SYSTEM: &str =
    "You are an ATS matching engine. Score candidates against a job description.";

/// System prompt for ranking open jobs against one candidate.
pub const JOB_RANKING_SYSTEM: &str =
    "You are an ATS reverse matching engine. Score jobs against a candidate profile.";
