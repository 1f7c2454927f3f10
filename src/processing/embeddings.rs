//! Dense profile vectors from a Model2Vec static embedding model

use crate::error::{Result, RankerError};
use crate::processing::profile::ExtractedProfile;
use crate::processing::text_processor::TextProcessor;
use crate::processing::vectorizer::{document_text, VectorMethod, VectorRepresentation, Vectorizer};
use log::{debug, info};
use model2vec_rs::model::StaticModel;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

pub trait EmbeddingModel: Send + Sync {
    fn encode(&self, text: &str) -> Vec<f32>;

    fn name(&self) -> &str;
}

pub struct Model2VecModel {
    model: StaticModel,
    name: String,
}

impl Model2VecModel {
    /// Load from a local directory. Nothing is downloaded.
    pub fn load(model_path: &Path) -> Result<Self> {
        if !model_path.exists() {
            return Err(RankerError::ModelLoading(format!(
                "embedding model not found at {}",
                model_path.display()
            )));
        }

        let start_time = Instant::now();
        let model = StaticModel::from_pretrained(model_path, None, None, None)?;
        info!(
            "Loaded Model2Vec model from {} in {:.2?}",
            model_path.display(),
            start_time.elapsed()
        );

        let name = model_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "model2vec".to_string());

        Ok(Self { model, name })
    }
}

impl EmbeddingModel for Model2VecModel {
    fn encode(&self, text: &str) -> Vec<f32> {
        self.model.encode_single(text)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Distinct documents remembered before the cache starts over
const MAX_CACHED_EMBEDDINGS: usize = 256;

pub struct DenseVectorizer {
    model: Box<dyn EmbeddingModel>,
    processor: TextProcessor,
    default_dimensions: usize,
    cache: Mutex<HashMap<String, Vec<f32>>>,
}

impl DenseVectorizer {
    pub fn new(model: Box<dyn EmbeddingModel>, default_dimensions: usize) -> Self {
        Self {
            model,
            processor: TextProcessor::new(),
            default_dimensions,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_path(model_path: &Path, default_dimensions: usize) -> Result<Self> {
        Ok(Self::new(Box::new(Model2VecModel::load(model_path)?), default_dimensions))
    }

    fn model_version(&self) -> String {
        format!("model2vec:{}", self.model.name())
    }

    fn encode_cached(&self, text: &str) -> Vec<f32> {
        let mut cache = self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(embedding) = cache.get(text) {
            return embedding.clone();
        }
        let embedding = self.model.encode(text);
        if cache.len() >= MAX_CACHED_EMBEDDINGS {
            debug!("Embedding cache full; clearing {} entries", cache.len());
            cache.clear();
        }
        cache.insert(text.to_string(), embedding.clone());
        embedding
    }

    pub fn cache_size(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl Vectorizer for DenseVectorizer {
    fn method(&self) -> VectorMethod {
        VectorMethod::DenseEmbedding
    }

    fn vectorize(&self, profile: &ExtractedProfile) -> Result<VectorRepresentation> {
        let text = document_text(&self.processor, profile);
        let zero = || {
            VectorRepresentation::new(
                vec![0.0; self.default_dimensions],
                VectorMethod::DenseEmbedding,
                self.model_version(),
            )
        };

        if self.processor.content_words(&text).is_empty() {
            debug!("No content words; using zero embedding");
            return Ok(zero());
        }

        let embedding = self.encode_cached(&text);
        if embedding.is_empty() || embedding.iter().all(|v| *v == 0.0) {
            debug!("Model returned an empty embedding; using zero embedding");
            return Ok(zero());
        }
        if embedding.iter().any(|v| !v.is_finite()) {
            return Err(RankerError::Embedding(
                "embedding model produced non-finite values".to_string(),
            ));
        }

        Ok(VectorRepresentation::new(
            embedding,
            VectorMethod::DenseEmbedding,
            self.model_version(),
        ))
    }
}
