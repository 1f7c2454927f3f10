//! Profile extraction, vectorization, similarity and ranking

pub mod contact;
pub mod embeddings;
pub mod engine;
pub mod extractor;
pub mod profile;
pub mod ranker;
pub mod sections;
pub mod similarity;
pub mod skills;
pub mod text_processor;
pub mod tfidf;
pub mod vectorizer;

pub use engine::MatchingEngine;
pub use extractor::ProfileExtractor;
pub use profile::{EducationEntry, ExperienceEntry, ExtractedProfile, SkillSet};
pub use ranker::{CriterionMatch, MatchResult, RankedCandidate};
pub use vectorizer::{VectorMethod, VectorRepresentation, Vectorizer};
