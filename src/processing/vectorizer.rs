//! Vector representations of extracted profiles

use crate::error::Result;
use crate::processing::profile::ExtractedProfile;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VectorMethod {
    SparseTfidf,
    DenseEmbedding,
}

impl fmt::Display for VectorMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorMethod::SparseTfidf => write!(f, "sparse-tfidf"),
            VectorMethod::DenseEmbedding => write!(f, "dense-embedding"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRepresentation {
    pub values: Vec<f32>,
    pub method: VectorMethod,
    pub dimensions: usize,
    /// Fitted model state that produced the values
    pub model_version: String,
}

impl VectorRepresentation {
    pub fn new(values: Vec<f32>, method: VectorMethod, model_version: impl Into<String>) -> Self {
        let dimensions = values.len();
        Self {
            values,
            method,
            dimensions,
            model_version: model_version.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Vectors are comparable only when the same model state produced both
    pub fn is_compatible_with(&self, other: &VectorRepresentation) -> bool {
        self.method == other.method
            && self.model_version == other.model_version
            && self.dimensions == other.dimensions
    }
}

pub trait Vectorizer: Send + Sync {
    fn method(&self) -> VectorMethod;

    fn vectorize(&self, profile: &ExtractedProfile) -> Result<VectorRepresentation>;
}

/// Full text, skills, education and experience sentences as one normalized string
pub fn document_text(processor: &TextProcessor, profile: &ExtractedProfile) -> String {
    let skills = profile
        .skills
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    let combined = [
        profile.full_text.clone(),
        skills,
        profile.education_text(),
        profile.experience_text(),
    ]
    .join(" ");

    processor.preprocess(&combined)
}
