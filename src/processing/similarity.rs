//! Vector similarity and skill overlap

use crate::error::{Result, RankerError};
use crate::processing::vectorizer::VectorRepresentation;
use std::collections::HashSet;

/// Cosine of the angle between `a` and `b`; 0.0 for empty, mismatched or zero-norm input
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

pub fn compute_similarity(
    a: Option<&VectorRepresentation>,
    b: Option<&VectorRepresentation>,
) -> Result<f32> {
    let (Some(a), Some(b)) = (a, b) else {
        return Ok(0.0);
    };
    if a.is_empty() || b.is_empty() {
        return Ok(0.0);
    }
    if !a.is_compatible_with(b) {
        return Err(RankerError::IncompatibleVectors(format!(
            "{} {} ({} dims) vs {} {} ({} dims)",
            a.method, a.model_version, a.dimensions, b.method, b.model_version, b.dimensions
        )));
    }
    Ok(cosine_similarity(&a.values, &b.values))
}

/// Partition `required` into skills the candidate has and skills it lacks, ignoring case.
/// Both lists keep the casing and order of `required`.
pub fn matching_and_missing_skills(
    candidate: &[String],
    required: &[String],
) -> (Vec<String>, Vec<String>) {
    let have: HashSet<String> = candidate.iter().map(|s| s.to_lowercase()).collect();
    required
        .iter()
        .cloned()
        .partition(|skill| have.contains(&skill.to_lowercase()))
}

pub fn skills_match_percentage(matching: usize, required: usize) -> f32 {
    if required == 0 {
        return 0.0;
    }
    100.0 * matching as f32 / required as f32
}
