//! Candidate ranking and per-pair match breakdowns

use crate::error::Result;
use crate::processing::profile::ExtractedProfile;
use crate::processing::similarity::{
    compute_similarity, matching_and_missing_skills, skills_match_percentage,
};
use crate::processing::vectorizer::VectorRepresentation;
use crate::storage::ProfileRecord;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

const DEGREE_KEYWORDS: &[&str] = &["bachelor", "master", "phd", "doctorate", "bsc", "msc", "ba", "ma"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionMatch {
    #[serde(rename = "match")]
    pub matched: bool,
    pub score: f32,
    pub details: String,
}

impl CriterionMatch {
    fn new(matched: bool, score: f32, details: impl Into<String>) -> Self {
        Self {
            matched,
            score,
            details: details.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub similarity_score: f32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub skills_match_percentage: f32,
    pub education_match: CriterionMatch,
    pub experience_match: CriterionMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate_id: String,
    pub owner_id: String,
    pub candidate_name: String,
    pub similarity_score: f32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub skills_match_percentage: f32,
}

pub struct Ranker {
    years_regex: Regex,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ranker {
    pub fn new() -> Self {
        Self {
            years_regex: Regex::new(r"(\d+)\+?\s+years?").expect("Invalid years regex"),
        }
    }

    /// Score every candidate that carries a vector against `job`, best first.
    /// Equal scores keep the order of `candidates`.
    pub fn rank_candidates(
        &self,
        job: &ProfileRecord,
        candidates: &[ProfileRecord],
    ) -> Vec<RankedCandidate> {
        let Some(job_vector) = job.vector.as_ref() else {
            debug!("Job {} has no vector; nothing to rank", job.id);
            return Vec::new();
        };
        let required = job.profile.skills.as_slice();

        let mut ranked: Vec<RankedCandidate> = candidates
            .iter()
            .filter_map(|candidate| {
                let vector = candidate.vector.as_ref()?;
                let similarity = match compute_similarity(Some(vector), Some(job_vector)) {
                    Ok(score) => score,
                    Err(e) => {
                        warn!("Excluding candidate {}: {}", candidate.id, e);
                        return None;
                    }
                };

                let (matching, missing) =
                    matching_and_missing_skills(candidate.profile.skills.as_slice(), required);
                let percentage = skills_match_percentage(matching.len(), required.len());

                Some(RankedCandidate {
                    candidate_id: candidate.id.clone(),
                    owner_id: candidate.owner_id.clone(),
                    candidate_name: candidate
                        .owner_name
                        .clone()
                        .unwrap_or_else(|| "Unknown".to_string()),
                    similarity_score: similarity,
                    matching_skills: matching,
                    missing_skills: missing,
                    skills_match_percentage: percentage,
                })
            })
            .collect();

        ranked.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        ranked
    }

    pub fn explain(
        &self,
        candidate: &ExtractedProfile,
        candidate_vector: Option<&VectorRepresentation>,
        job: &ExtractedProfile,
        job_vector: Option<&VectorRepresentation>,
    ) -> Result<MatchResult> {
        let similarity_score = compute_similarity(candidate_vector, job_vector)?;
        let required = job.skills.as_slice();
        let (matching_skills, missing_skills) =
            matching_and_missing_skills(candidate.skills.as_slice(), required);
        let skills_match_percentage = skills_match_percentage(matching_skills.len(), required.len());

        Ok(MatchResult {
            similarity_score,
            matching_skills,
            missing_skills,
            skills_match_percentage,
            education_match: self.evaluate_education_match(candidate, job),
            experience_match: self.evaluate_experience_match(candidate, job),
        })
    }

    pub fn evaluate_education_match(
        &self,
        candidate: &ExtractedProfile,
        job: &ExtractedProfile,
    ) -> CriterionMatch {
        if job.education.is_empty() {
            return CriterionMatch::new(true, 1.0, "No specific education requirements");
        }
        if candidate.education.is_empty() {
            return CriterionMatch::new(false, 0.0, "No education information provided");
        }

        let job_text = job.education_text().to_lowercase();
        let candidate_text = candidate.education_text().to_lowercase();
        for keyword in DEGREE_KEYWORDS {
            if job_text.contains(keyword) && candidate_text.contains(keyword) {
                return CriterionMatch::new(true, 1.0, format!("Found matching {} degree", keyword));
            }
        }

        CriterionMatch::new(false, 0.5, "Education requirements partially met")
    }

    /// Years are approximated by the number of experience entries the candidate has
    pub fn evaluate_experience_match(
        &self,
        candidate: &ExtractedProfile,
        job: &ExtractedProfile,
    ) -> CriterionMatch {
        if job.experience.is_empty() {
            return CriterionMatch::new(true, 1.0, "No specific experience requirements");
        }
        if candidate.experience.is_empty() {
            return CriterionMatch::new(false, 0.0, "No experience information provided");
        }

        let job_text = job.experience_text();
        let required = self
            .years_regex
            .captures(&job_text)
            .and_then(|caps| caps.get(1))
            // Digit runs past u64 still count as a requirement nobody meets
            .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX));

        let Some(required) = required else {
            return CriterionMatch::new(true, 0.7, "Experience appears relevant");
        };

        let entries = candidate.experience.len() as u64;
        if entries >= required {
            CriterionMatch::new(
                true,
                1.0,
                format!("Meets {}+ years requirement ({} experience entries counted)", required, entries),
            )
        } else {
            CriterionMatch::new(
                false,
                entries as f32 / required as f32,
                format!("{} experience entries counted, needs {} years", entries, required),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::profile::{EducationEntry, ExperienceEntry, SkillSet};
    use crate::processing::vectorizer::VectorMethod;
    use crate::storage::RecordKind;

    fn education(text: &str) -> EducationEntry {
        EducationEntry {
            text: text.to_string(),
            institutions: Vec::new(),
            years: Vec::new(),
        }
    }

    fn experience(text: &str) -> ExperienceEntry {
        ExperienceEntry {
            text: text.to_string(),
            organizations: Vec::new(),
            years: Vec::new(),
            job_titles: Vec::new(),
        }
    }

    fn record(owner: &str, skills: &[&str], values: Option<Vec<f32>>, version: &str) -> ProfileRecord {
        let profile = ExtractedProfile {
            skills: skills.iter().map(|s| s.to_string()).collect::<SkillSet>(),
            ..Default::default()
        };
        ProfileRecord::new(RecordKind::Resume, owner, profile).with_vector(
            values.map(|v| VectorRepresentation::new(v, VectorMethod::SparseTfidf, version)),
        )
    }

    #[test]
    fn test_education_scenarios() {
        let ranker = Ranker::new();
        let job = ExtractedProfile {
            education: vec![education("Bachelor's degree required")],
            ..Default::default()
        };
        let candidate = ExtractedProfile {
            education: vec![education("B.A. in Economics")],
            ..Default::default()
        };

        let result = ranker.evaluate_education_match(&candidate, &job);
        assert!(!result.matched);
        assert_eq!(result.score, 0.5);

        let no_requirement = ranker.evaluate_education_match(&candidate, &ExtractedProfile::default());
        assert!(no_requirement.matched);
        assert_eq!(no_requirement.score, 1.0);

        let none = ranker.evaluate_education_match(&ExtractedProfile::default(), &job);
        assert_eq!((none.matched, none.score), (false, 0.0));
    }

    #[test]
    fn test_matching_degree_keyword() {
        let ranker = Ranker::new();
        let job = ExtractedProfile {
            education: vec![education("Master in Computer Science")],
            ..Default::default()
        };
        let candidate = ExtractedProfile {
            education: vec![education("Master of Engineering, 2015")],
            ..Default::default()
        };
        let result = ranker.evaluate_education_match(&candidate, &job);
        assert!(result.matched);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_experience_scenarios() {
        let ranker = Ranker::new();
        let job = ExtractedProfile {
            experience: vec![experience("5+ years of experience")],
            ..Default::default()
        };
        let candidate = ExtractedProfile {
            experience: vec![experience("a"), experience("b"), experience("c")],
            ..Default::default()
        };

        let result = ranker.evaluate_experience_match(&candidate, &job);
        assert!(!result.matched);
        assert!((result.score - 0.6).abs() < 1e-6);

        let vague_job = ExtractedProfile {
            experience: vec![experience("Engineering role at a startup")],
            ..Default::default()
        };
        let vague = ranker.evaluate_experience_match(&candidate, &vague_job);
        assert_eq!((vague.matched, vague.score), (true, 0.7));

        let no_requirement = ranker.evaluate_experience_match(&candidate, &ExtractedProfile::default());
        assert_eq!((no_requirement.matched, no_requirement.score), (true, 1.0));

        let none = ranker.evaluate_experience_match(&ExtractedProfile::default(), &job);
        assert_eq!((none.matched, none.score), (false, 0.0));
    }

    #[test]
    fn test_oversized_years_requirement_is_unmet() {
        let ranker = Ranker::new();
        let job = ExtractedProfile {
            experience: vec![experience("99999999999999999999999 years of experience")],
            ..Default::default()
        };
        let candidate = ExtractedProfile {
            experience: vec![experience("a"), experience("b")],
            ..Default::default()
        };
        let result = ranker.evaluate_experience_match(&candidate, &job);
        assert!(!result.matched);
        assert!(result.score < 1e-6);
    }

    #[test]
    fn test_zero_years_requirement_is_met() {
        let ranker = Ranker::new();
        let job = ExtractedProfile {
            experience: vec![experience("0 years required")],
            ..Default::default()
        };
        let candidate = ExtractedProfile {
            experience: vec![experience("intern")],
            ..Default::default()
        };
        let result = ranker.evaluate_experience_match(&candidate, &job);
        assert!(result.matched);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_rank_sorts_and_excludes() {
        let ranker = Ranker::new();
        let mut job = record("hr", &["Python", "SQL", "Docker"], Some(vec![1.0, 0.0]), "g1");
        job.kind = RecordKind::JobDescription;

        let weak = record("weak", &["python"], Some(vec![0.0, 1.0]), "g1");
        let strong = record("strong", &["python", "docker"], Some(vec![1.0, 0.1]), "g1");
        let vectorless = record("none", &["SQL"], None, "g1");
        let stale = record("stale", &["SQL"], Some(vec![1.0, 0.0]), "g0");
        let tie = record("tie", &[], Some(vec![0.0, 2.0]), "g1");

        let ranked = ranker.rank_candidates(&job, &[weak, strong, vectorless, stale, tie]);
        let owners: Vec<&str> = ranked.iter().map(|r| r.owner_id.as_str()).collect();
        assert_eq!(owners, vec!["strong", "weak", "tie"]);

        assert_eq!(ranked[0].matching_skills, vec!["Python", "Docker"]);
        assert_eq!(ranked[0].missing_skills, vec!["SQL"]);
        assert!((ranked[0].skills_match_percentage - 66.666_67).abs() < 0.01);
        assert_eq!(ranked[0].candidate_name, "Unknown");
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].similarity_score >= pair[1].similarity_score));
    }

    #[test]
    fn test_job_without_vector_ranks_nobody() {
        let ranker = Ranker::new();
        let job = record("hr", &["Rust"], None, "g1");
        let candidate = record("c", &["Rust"], Some(vec![1.0]), "g1");
        assert!(ranker.rank_candidates(&job, &[candidate]).is_empty());
    }

    #[test]
    fn test_explain_without_vectors_scores_zero() {
        let ranker = Ranker::new();
        let result = ranker
            .explain(&ExtractedProfile::default(), None, &ExtractedProfile::default(), None)
            .unwrap();
        assert_eq!(result.similarity_score, 0.0);
        assert_eq!(result.skills_match_percentage, 0.0);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["education_match"]["match"], true);
    }
}
