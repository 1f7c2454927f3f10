//! Error handling for the resume ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Language analysis backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Vectorizer model not fitted: {0}")]
    ModelNotFitted(String),

    #[error("Incompatible vectors: {0}")]
    IncompatibleVectors(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, RankerError>;

/// The Model2Vec loader reports failures through anyhow
impl From<anyhow::Error> for RankerError {
    fn from(err: anyhow::Error) -> Self {
        RankerError::ModelLoading(err.to_string())
    }
}

impl From<zip::result::ZipError> for RankerError {
    fn from(err: zip::result::ZipError) -> Self {
        RankerError::DocxExtraction(err.to_string())
    }
}

impl From<quick_xml::Error> for RankerError {
    fn from(err: quick_xml::Error) -> Self {
        RankerError::DocxExtraction(err.to_string())
    }
}

impl From<tempfile::PersistError> for RankerError {
    fn from(err: tempfile::PersistError) -> Self {
        RankerError::Io(err.error)
    }
}
