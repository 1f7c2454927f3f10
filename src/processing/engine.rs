//! Ties extraction, vectorization and ranking to a record store

use crate::error::{Result, RankerError};
use crate::processing::extractor::ProfileExtractor;
use crate::processing::ranker::{MatchResult, RankedCandidate, Ranker};
use crate::processing::vectorizer::Vectorizer;
use crate::storage::{ProfileRecord, RecordKind, RecordStore};
use log::{info, warn};
use std::sync::Arc;

pub struct MatchingEngine {
    extractor: ProfileExtractor,
    vectorizer: Arc<dyn Vectorizer>,
    store: Arc<dyn RecordStore>,
    ranker: Ranker,
}

impl MatchingEngine {
    pub fn new(
        extractor: ProfileExtractor,
        vectorizer: Arc<dyn Vectorizer>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            extractor,
            vectorizer,
            store,
            ranker: Ranker::new(),
        }
    }

    pub fn extractor(&self) -> &ProfileExtractor {
        &self.extractor
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Extract, vectorize and store a resume. An unfitted model leaves the record without
    /// a vector so it can be filled in by a later refit.
    pub fn ingest_resume(
        &self,
        owner_id: &str,
        filename: Option<String>,
        owner_name: Option<String>,
        text: &str,
    ) -> Result<ProfileRecord> {
        let profile = self.extractor.extract_profile(text);
        let record = ProfileRecord::new(RecordKind::Resume, owner_id, profile)
            .with_label(filename)
            .with_owner_name(owner_name);
        self.vectorize_and_store(record)
    }

    pub fn ingest_job(
        &self,
        owner_id: &str,
        title: &str,
        company: Option<String>,
        text: &str,
    ) -> Result<ProfileRecord> {
        let profile = self.extractor.extract_job_profile(text);
        let record = ProfileRecord::new(RecordKind::JobDescription, owner_id, profile)
            .with_label(Some(title.to_string()))
            .with_company(company);
        self.vectorize_and_store(record)
    }

    fn vectorize_and_store(&self, record: ProfileRecord) -> Result<ProfileRecord> {
        let vector = match self.vectorizer.vectorize(&record.profile) {
            Ok(vector) => Some(vector),
            Err(RankerError::ModelNotFitted(reason)) => {
                warn!("Storing {} {} without a vector: {}", record.kind, record.id, reason);
                None
            }
            Err(e) => return Err(e),
        };

        let record = record.with_vector(vector);
        self.store.put(record.clone())?;
        info!(
            "Stored {} {} ({} skills)",
            record.kind,
            record.id,
            record.profile.skills.len()
        );
        Ok(record)
    }

    fn require(&self, kind: RecordKind, id: &str) -> Result<ProfileRecord> {
        self.store
            .get(kind, id)?
            .ok_or_else(|| RankerError::NotFound(format!("{} {}", kind, id)))
    }

    pub fn rank_candidates_for_job(&self, job_id: &str) -> Result<Vec<RankedCandidate>> {
        let job = self.require(RecordKind::JobDescription, job_id)?;
        let candidates = self.store.candidates_with_vectors()?;
        let ranked = self.ranker.rank_candidates(&job, &candidates);

        info!(
            "Ranked {} of {} vectorized candidates for job {}",
            ranked.len(),
            candidates.len(),
            job_id
        );
        Ok(ranked)
    }

    pub fn explain_match(&self, candidate_id: &str, job_id: &str) -> Result<MatchResult> {
        let candidate = self.require(RecordKind::Resume, candidate_id)?;
        let job = self.require(RecordKind::JobDescription, job_id)?;

        self.ranker.explain(
            &candidate.profile,
            candidate.vector.as_ref(),
            &job.profile,
            job.vector.as_ref(),
        )
    }

    /// Every stored profile, resumes first, as input for a refit
    pub fn corpus(&self) -> Result<Vec<ProfileRecord>> {
        let mut records = self.store.list(RecordKind::Resume)?;
        records.extend(self.store.list(RecordKind::JobDescription)?);
        Ok(records)
    }

    /// Recompute and store the vector of every record with the current model.
    /// `on_progress` is called once per record.
    pub fn revectorize_all<F: FnMut(&ProfileRecord)>(&self, mut on_progress: F) -> Result<usize> {
        let records = self.corpus()?;
        for record in &records {
            let vector = self.vectorizer.vectorize(&record.profile)?;
            self.store.put(record.clone().with_vector(Some(vector)))?;
            on_progress(record);
        }
        info!("Re-vectorized {} records", records.len());
        Ok(records.len())
    }
}
