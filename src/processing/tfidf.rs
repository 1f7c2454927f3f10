//! Corpus-fitted TF-IDF vectorizer with versioned, atomically persisted snapshots

use crate::error::{Result, RankerError};
use crate::processing::profile::ExtractedProfile;
use crate::processing::text_processor::TextProcessor;
use crate::processing::vectorizer::{document_text, VectorMethod, VectorRepresentation, Vectorizer};
use chrono::{DateTime, Utc};
use fs4::fs_std::FileExt;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

/// An immutable fitted vocabulary with smoothed inverse document frequencies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfModel {
    generation: u64,
    fitted_at: DateTime<Utc>,
    document_count: usize,
    /// Alphabetical; a term's position is its feature index
    terms: Vec<String>,
    idf: Vec<f32>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl TfidfModel {
    pub fn fit(
        processor: &TextProcessor,
        documents: &[String],
        max_features: usize,
        generation: u64,
    ) -> Result<Self> {
        if documents.is_empty() {
            return Err(RankerError::InvalidInput(
                "cannot fit a TF-IDF model on an empty corpus".to_string(),
            ));
        }

        let mut term_counts: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for document in documents {
            let terms = processor.tokenize_terms(document);
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
            for term in terms {
                *term_counts.entry(term).or_insert(0) += 1;
            }
        }

        if term_counts.is_empty() {
            return Err(RankerError::InvalidInput(
                "corpus produced an empty vocabulary; documents contain only stop words".to_string(),
            ));
        }

        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features.max(1));

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n = documents.len() as f32;
        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f32;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        Ok(Self {
            generation,
            fitted_at: Utc::now(),
            document_count: documents.len(),
            terms,
            idf,
            index: HashMap::new(),
        }
        .reindexed())
    }

    fn reindexed(mut self) -> Self {
        self.index = self
            .terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        self
    }

    /// Raw term count times IDF, L2-normalized; unknown terms are ignored
    pub fn transform(&self, processor: &TextProcessor, text: &str) -> Vec<f32> {
        let mut values = vec![0.0f32; self.terms.len()];
        for term in processor.tokenize_terms(text) {
            if let Some(&i) = self.index.get(&term) {
                values[i] += self.idf[i];
            }
        }

        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            values.iter_mut().for_each(|v| *v /= norm);
        }
        values
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let model: TfidfModel = serde_json::from_str(&content)?;
        if model.terms.len() != model.idf.len() {
            return Err(RankerError::Storage(format!(
                "TF-IDF model at {} has {} terms but {} weights",
                path.display(),
                model.terms.len(),
                model.idf.len()
            )));
        }
        Ok(model.reindexed())
    }

    /// Write to a sibling temp file, then rename over `path`
    pub fn save_atomic(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let mut file = tempfile::NamedTempFile::new_in(parent)?;
        file.write_all(serde_json::to_string(self)?.as_bytes())?;
        file.flush()?;
        file.persist(path)?;
        Ok(())
    }

    pub fn version(&self) -> String {
        format!("tfidf-g{}-{}", self.generation, self.fitted_at.timestamp_millis())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fitted_at(&self) -> DateTime<Utc> {
        self.fitted_at
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn dimensions(&self) -> usize {
        self.terms.len()
    }
}

pub struct TfidfVectorizer {
    processor: TextProcessor,
    model_path: Option<PathBuf>,
    max_features: usize,
    bootstrap_on_first_use: bool,
    snapshot: RwLock<Option<Arc<TfidfModel>>>,
    writer: Mutex<()>,
}

impl TfidfVectorizer {
    /// Open the vectorizer backed by a model file, loading it when present
    pub fn open(path: &Path, max_features: usize, bootstrap_on_first_use: bool) -> Result<Self> {
        let snapshot = if path.exists() {
            let model = TfidfModel::load(path)?;
            info!(
                "Loaded TF-IDF model {} ({} features) from {}",
                model.version(),
                model.dimensions(),
                path.display()
            );
            Some(Arc::new(model))
        } else {
            debug!("No TF-IDF model at {}", path.display());
            None
        };

        Ok(Self {
            processor: TextProcessor::new(),
            model_path: Some(path.to_path_buf()),
            max_features,
            bootstrap_on_first_use,
            snapshot: RwLock::new(snapshot),
            writer: Mutex::new(()),
        })
    }

    /// A vectorizer that never touches disk
    pub fn in_memory(max_features: usize) -> Self {
        Self {
            processor: TextProcessor::new(),
            model_path: None,
            max_features,
            bootstrap_on_first_use: false,
            snapshot: RwLock::new(None),
            writer: Mutex::new(()),
        }
    }

    pub fn with_bootstrap(mut self, enabled: bool) -> Self {
        self.bootstrap_on_first_use = enabled;
        self
    }

    /// Currently published model, if any
    pub fn snapshot(&self) -> Option<Arc<TfidfModel>> {
        self.snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    pub fn document_text(&self, profile: &ExtractedProfile) -> String {
        document_text(&self.processor, profile)
    }

    /// Fit a new generation on `corpus`, persist it and publish it
    pub fn refit(&self, corpus: &[String]) -> Result<Arc<TfidfModel>> {
        let _guard = self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _file_lock = self.lock_model_file()?;

        let latest = match self.reload()? {
            Some(model) => Some(model),
            None => self.snapshot(),
        };
        let generation = latest.map_or(1, |model| model.generation() + 1);
        self.fit_and_publish(corpus, generation)
    }

    fn fit_and_publish(&self, corpus: &[String], generation: u64) -> Result<Arc<TfidfModel>> {
        let model = TfidfModel::fit(&self.processor, corpus, self.max_features, generation)?;

        if let Some(path) = &self.model_path {
            model.save_atomic(path)?;
        }

        let model = Arc::new(model);
        self.publish(Arc::clone(&model));

        info!(
            "Fitted TF-IDF generation {} on {} documents ({} features)",
            model.generation(),
            model.document_count(),
            model.dimensions()
        );
        Ok(model)
    }

    fn publish(&self, model: Arc<TfidfModel>) {
        *self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(model);
    }

    /// Publish whatever model is on disk; other processes may have fitted since `open`
    fn reload(&self) -> Result<Option<Arc<TfidfModel>>> {
        let Some(path) = self.model_path.as_deref().filter(|path| path.exists()) else {
            return Ok(None);
        };
        let model = Arc::new(TfidfModel::load(path)?);
        debug!("Reloaded TF-IDF model {} from {}", model.version(), path.display());
        self.publish(Arc::clone(&model));
        Ok(Some(model))
    }

    /// Exclusive lock on `<model path>.lock`, held until the returned file is dropped
    fn lock_model_file(&self) -> Result<Option<File>> {
        let Some(path) = &self.model_path else {
            return Ok(None);
        };
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let mut lock_name = path.as_os_str().to_os_string();
        lock_name.push(".lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(PathBuf::from(lock_name))?;
        file.lock_exclusive()?;
        Ok(Some(file))
    }

    fn bootstrap(&self, text: &str) -> Result<Arc<TfidfModel>> {
        let _guard = self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _file_lock = self.lock_model_file()?;

        // Another thread or process may have fitted while we waited for the locks
        if let Some(model) = self.reload()?.or_else(|| self.snapshot()) {
            return Ok(model);
        }
        info!("Bootstrapping TF-IDF model from the first document");
        self.fit_and_publish(&[text.to_string()], 1)
    }
}

impl Vectorizer for TfidfVectorizer {
    fn method(&self) -> VectorMethod {
        VectorMethod::SparseTfidf
    }

    fn vectorize(&self, profile: &ExtractedProfile) -> Result<VectorRepresentation> {
        let text = self.document_text(profile);
        let model = match self.snapshot() {
            Some(model) => model,
            None if self.bootstrap_on_first_use => self.bootstrap(&text)?,
            None => {
                return Err(RankerError::ModelNotFitted(
                    "no TF-IDF model has been fitted (run `resume-ranker model fit`)".to_string(),
                ))
            }
        };

        let values = model.transform(&self.processor, &text);
        Ok(VectorRepresentation::new(
            values,
            VectorMethod::SparseTfidf,
            model.version(),
        ))
    }
}
