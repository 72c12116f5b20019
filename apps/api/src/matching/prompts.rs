// Prompt rendering and tool schemas for the matching proxy.
// Every missing attribute renders as a placeholder so prompt shape never changes.

use serde_json::json;

use crate::llm_client::ToolDefinition;
use crate::models::{CandidateRow, JobRow};

const NOT_AVAILABLE: &str = "N/A";
const NOT_SPECIFIED: &str = "Not specified";
const DESCRIPTION_LIMIT: usize = 500;

pub const SCORE_TOOL: &str = "return_scores";
pub const RANKING_TOOL: &str = "return_matches";

fn text_or<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

fn number_or(value: Option<f64>, placeholder: &str) -> String {
    match value {
        Some(v) if v != 0.0 => v.to_string(),
        _ => placeholder.to_string(),
    }
}

fn skills(list: &[String], separator: &str) -> String {
    if list.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        list.join(separator)
    }
}

fn experience_band(job: &JobRow) -> String {
    format!(
        "{}-{}",
        job.experience_min.unwrap_or(0.0),
        number_or(job.experience_max, "any")
    )
}

fn truncated(text: Option<&str>) -> String {
    text.unwrap_or_default().chars().take(DESCRIPTION_LIMIT).collect()
}

/// Full candidate-vs-job prompt for pairwise scoring.
pub fn pair_prompt(candidate: &CandidateRow, job: &JobRow) -> String {
    format!(
        "You are an expert ATS scoring engine. Score this candidate against the job.

CANDIDATE:
- Name: {name}
- Skills: {candidate_skills}
- Experience: {years} years
- Current Role: {designation} at {company}
- Education: {education}
- Location: {candidate_location}
- Current Salary: {current_salary}
- Expected Salary: {expected_salary}

JOB:
- Title: {title}
- Company: {company_name}
- Required Skills: {job_skills}
- Experience Range: {band} years
- Location: {job_location}
- Salary Range: {salary_min}-{salary_max} {currency}
- Job Type: {job_type}
- Description: {description}",
        name = candidate.full_name,
        candidate_skills = skills(&candidate.skills, ", "),
        years = candidate.experience_years.unwrap_or(0.0),
        designation = text_or(candidate.current_designation.as_deref(), NOT_AVAILABLE),
        company = text_or(candidate.current_company.as_deref(), NOT_AVAILABLE),
        education = text_or(candidate.education.as_deref(), NOT_AVAILABLE),
        candidate_location = text_or(candidate.location.as_deref(), NOT_AVAILABLE),
        current_salary = number_or(candidate.current_salary, NOT_AVAILABLE),
        expected_salary = number_or(candidate.expected_salary, NOT_AVAILABLE),
        title = job.title,
        company_name = text_or(job.company_name.as_deref(), NOT_AVAILABLE),
        job_skills = skills(&job.skills, ", "),
        band = experience_band(job),
        job_location = text_or(job.location.as_deref(), NOT_AVAILABLE),
        salary_min = number_or(job.salary_min, NOT_AVAILABLE),
        salary_max = number_or(job.salary_max, NOT_AVAILABLE),
        currency = job.salary_currency.as_deref().unwrap_or_default(),
        job_type = text_or(job.job_type.as_deref(), NOT_AVAILABLE),
        description = truncated(job.description.as_deref()),
    )
}

/// One `[i] ...` line per candidate; `i` is the index the model must echo back.
pub fn candidate_pool_lines(candidates: &[CandidateRow]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "[{i}] {} | Skills: {} | Exp: {}y | Location: {}",
                c.full_name,
                skills(&c.skills, ","),
                c.experience_years.unwrap_or(0.0),
                text_or(c.location.as_deref(), NOT_AVAILABLE),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn job_pool_lines(jobs: &[JobRow]) -> String {
    jobs.iter()
        .enumerate()
        .map(|(i, j)| {
            format!(
                "[{i}] {} at {} | Skills: {} | Exp: {}y | Location: {}",
                j.title,
                text_or(j.company_name.as_deref(), NOT_AVAILABLE),
                skills(&j.skills, ","),
                experience_band(j),
                text_or(j.location.as_deref(), NOT_AVAILABLE),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn resume_match_prompt(job_description: &str, candidates: &[CandidateRow]) -> String {
    format!(
        "JOB DESCRIPTION:\n{}\n\nCANDIDATES:\n{}\n\nScore the top 10 most relevant candidates.",
        job_description.trim(),
        candidate_pool_lines(candidates)
    )
}

pub fn reverse_match_prompt(candidate: &CandidateRow, jobs: &[JobRow]) -> String {
    format!(
        "CANDIDATE:\nName: {}\nSkills: {}\nExperience: {} years\nLocation: {}\nCurrent Role: {}\n\nJOBS:\n{}\n\nScore the top 10 most relevant jobs.",
        candidate.full_name,
        skills(&candidate.skills, ","),
        candidate.experience_years.unwrap_or(0.0),
        text_or(candidate.location.as_deref(), NOT_AVAILABLE),
        text_or(candidate.current_designation.as_deref(), NOT_AVAILABLE),
        job_pool_lines(jobs)
    )
}

/// Schema for pairwise scoring: six scores, strengths, gaps, recommendation.
pub fn score_tool() -> ToolDefinition {
    let score = |what: &str| json!({ "type": "number", "description": format!("{what} match 0-100") });
    ToolDefinition {
        name: SCORE_TOOL,
        description: "Return matching scores for a candidate-job pair",
        parameters: json!({
            "type": "object",
            "properties": {
                "overall_score": score("Overall"),
                "skill_score": score("Skills"),
                "experience_score": score("Experience"),
                "education_score": score("Education"),
                "location_score": score("Location"),
                "salary_score": score("Salary"),
                "strengths": { "type": "array", "items": { "type": "string" }, "description": "Top 3 strengths" },
                "gaps": { "type": "array", "items": { "type": "string" }, "description": "Top 3 gaps" },
                "recommendation": { "type": "string", "description": "Brief recommendation (1-2 sentences)" }
            },
            "required": [
                "overall_score", "skill_score", "experience_score", "education_score",
                "location_score", "salary_score", "strengths", "gaps", "recommendation"
            ],
            "additionalProperties": false
        }),
    }
}

/// Schema for batch ranking: `{ matches: [{ index, score, reason }] }`.
pub fn ranking_tool(description: &'static str) -> ToolDefinition {
    ToolDefinition {
        name: RANKING_TOOL,
        description,
        parameters: json!({
            "type": "object",
            "properties": {
                "matches": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "index": { "type": "number" },
                            "score": { "type": "number", "description": "0-100" },
                            "reason": { "type": "string" }
                        },
                        "required": ["index", "score", "reason"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["matches"],
            "additionalProperties": false
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn react_candidate() -> CandidateRow {
        let mut c = CandidateRow::new("Priya Sharma");
        c.skills = vec!["React".into(), "Node.js".into()];
        c.experience_years = Some(5.0);
        c.location = Some("Mumbai".into());
        c
    }

    fn react_job() -> JobRow {
        let mut j = JobRow::new("Frontend Engineer");
        j.skills = vec!["React".into(), "TypeScript".into()];
        j.experience_min = Some(3.0);
        j.experience_max = Some(7.0);
        j.location = Some("Mumbai".into());
        j.company_name = Some("Acme".into());
        j
    }

    #[test]
    fn test_pair_prompt_embeds_both_profiles() {
        let prompt = pair_prompt(&react_candidate(), &react_job());
        assert!(prompt.contains("- Skills: React, Node.js"));
        assert!(prompt.contains("- Experience: 5 years"));
        assert!(prompt.contains("- Required Skills: React, TypeScript"));
        assert!(prompt.contains("- Experience Range: 3-7 years"));
        assert!(prompt.contains("- Company: Acme"));
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let prompt = pair_prompt(&CandidateRow::new("Blank"), &JobRow::new("Blank role"));
        assert!(prompt.contains("- Skills: Not specified"));
        assert!(prompt.contains("- Current Role: N/A at N/A"));
        assert!(prompt.contains("- Education: N/A"));
        assert!(prompt.contains("- Experience: 0 years"));
        assert!(prompt.contains("- Experience Range: 0-any years"));
        assert!(prompt.contains("- Salary Range: N/A-N/A"));
        assert!(!prompt.contains(": \n"));
    }

    #[test]
    fn test_description_is_truncated() {
        let mut job = react_job();
        job.description = Some("é".repeat(800));
        let prompt = pair_prompt(&react_candidate(), &job);
        let description = prompt.split("- Description: ").nth(1).unwrap();
        assert_eq!(description.chars().count(), 500);
    }

    #[test]
    fn test_pool_lines_are_indexed() {
        let pool = vec![react_candidate(), CandidateRow::new("Ravi")];
        let lines = candidate_pool_lines(&pool);
        let lines: Vec<&str> = lines.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "[0] Priya Sharma | Skills: React,Node.js | Exp: 5y | Location: Mumbai"
        );
        assert!(lines[1].starts_with("[1] Ravi | Skills: Not specified"));
    }

    #[test]
    fn test_job_pool_lines_include_band_and_company() {
        let lines = job_pool_lines(&[react_job()]);
        assert_eq!(
            lines,
            "[0] Frontend Engineer at Acme | Skills: React,TypeScript | Exp: 3-7y | Location: Mumbai"
        );
    }

    #[test]
    fn test_score_tool_requires_all_fields() {
        let tool = score_tool();
        let required = tool.parameters["required"].as_array().unwrap();
        assert_eq!(required.len(), 9);
        assert_eq!(tool.name, "return_scores");
    }
}
