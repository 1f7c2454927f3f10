//! Configuration management for the resume ranker

use crate::error::{Result, RankerError};
use crate::processing::vectorizer::VectorMethod;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub vectorizer: VectorizerConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    /// Lexicon consumed by the rule-based language analyzer
    pub lexicon_path: PathBuf,
    /// Local Model2Vec folder (tokenizer.json, model.safetensors, config.json)
    pub embedding_model_path: PathBuf,
    /// Width of the zero vector returned for text without content words
    pub dense_dimensions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerConfig {
    pub method: VectorMethod,
    pub max_features: usize,
    pub tfidf_model_path: PathBuf,
    /// Fit the sparse model on the first vectorized document when no snapshot exists
    pub bootstrap_on_first_use: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-ranker");
        let models_dir = base_dir.join("models");

        Self {
            models: ModelConfig {
                lexicon_path: models_dir.join("lexicon-en.json"),
                embedding_model_path: models_dir.join("M2V_base_output"),
                dense_dimensions: 256,
                models_dir: models_dir.clone(),
            },
            vectorizer: VectorizerConfig {
                method: VectorMethod::SparseTfidf,
                max_features: 5000,
                tfidf_model_path: models_dir.join("tfidf-model.json"),
                bootstrap_on_first_use: false,
            },
            storage: StorageConfig {
                data_dir: base_dir.join("data"),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| RankerError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RankerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.models.models_dir)?;
        std::fs::create_dir_all(&self.storage.data_dir)?;
        Ok(())
    }
}
