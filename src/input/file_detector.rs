//! File type detection

use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Unknown(String),
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            _ => FileType::Unknown(ext),
        }
    }

    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(ext)
    }
}
