//! Persistence of extracted profiles and their vectors

pub mod json_store;
pub mod memory;

pub use json_store::JsonFileStore;
pub use memory::InMemoryStore;

use crate::error::Result;
use crate::processing::profile::ExtractedProfile;
use crate::processing::vectorizer::VectorRepresentation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    Resume,
    JobDescription,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Resume => write!(f, "resume"),
            RecordKind::JobDescription => write!(f, "job description"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    pub owner_id: String,
    pub kind: RecordKind,
    pub owner_name: Option<String>,
    /// Resume filename or job title
    pub label: Option<String>,
    pub company: Option<String>,
    pub profile: ExtractedProfile,
    pub vector: Option<VectorRepresentation>,
    pub created_at: DateTime<Utc>,
}

impl ProfileRecord {
    pub fn new(kind: RecordKind, owner_id: impl Into<String>, profile: ExtractedProfile) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            kind,
            owner_name: None,
            label: None,
            company: None,
            profile,
            vector: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_owner_name(mut self, name: Option<String>) -> Self {
        self.owner_name = name;
        self
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn with_company(mut self, company: Option<String>) -> Self {
        self.company = company;
        self
    }

    pub fn with_vector(mut self, vector: Option<VectorRepresentation>) -> Self {
        self.vector = vector;
        self
    }
}

/// Record persistence. Listing order is stable and defines ranking tie order.
pub trait RecordStore: Send + Sync {
    /// Insert or replace by id
    fn put(&self, record: ProfileRecord) -> Result<()>;

    fn get(&self, kind: RecordKind, id: &str) -> Result<Option<ProfileRecord>>;

    fn list(&self, kind: RecordKind) -> Result<Vec<ProfileRecord>>;

    fn candidates_with_vectors(&self) -> Result<Vec<ProfileRecord>> {
        Ok(self
            .list(RecordKind::Resume)?
            .into_iter()
            .filter(|record| record.vector.is_some())
            .collect())
    }
}
