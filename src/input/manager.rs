//! Input manager for reading uploaded files from disk

use crate::error::{Result, RankerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{extract_text, RawDocument};
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(RankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        // Reject before reading so large unsupported uploads are not loaded
        let format = FileType::from_path(path);
        if let FileType::Unknown(ext) = &format {
            return Err(RankerError::UnsupportedFormat(format!(
                "Unsupported file format: .{} ({})",
                ext,
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        let text = extract_text(&RawDocument { bytes, format })?;

        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
