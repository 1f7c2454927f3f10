use crate::error::{Result, RankerError};
use crate::storage::{ProfileRecord, RecordKind, RecordStore};
use log::{debug, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One JSON document per record under `resumes/` and `jobs/`
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn open(root: &Path) -> Result<Self> {
        let store = Self {
            root: root.to_path_buf(),
        };
        for kind in [RecordKind::Resume, RecordKind::JobDescription] {
            std::fs::create_dir_all(store.kind_dir(kind))?;
        }
        Ok(store)
    }

    fn kind_dir(&self, kind: RecordKind) -> PathBuf {
        match kind {
            RecordKind::Resume => self.root.join("resumes"),
            RecordKind::JobDescription => self.root.join("jobs"),
        }
    }

    fn record_path(&self, kind: RecordKind, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RankerError::InvalidInput(format!("invalid record id: {}", id)));
        }
        Ok(self.kind_dir(kind).join(format!("{}.json", id)))
    }

    fn read_record(path: &Path) -> Result<ProfileRecord> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| RankerError::Storage(format!("{}: {}", path.display(), e)))
    }
}

impl RecordStore for JsonFileStore {
    fn put(&self, record: ProfileRecord) -> Result<()> {
        let path = self.record_path(record.kind, &record.id)?;
        let dir = self.kind_dir(record.kind);

        let mut file = tempfile::NamedTempFile::new_in(&dir)?;
        file.write_all(serde_json::to_string_pretty(&record)?.as_bytes())?;
        file.flush()?;
        file.persist(&path)?;

        debug!("Stored {} {} at {}", record.kind, record.id, path.display());
        Ok(())
    }

    fn get(&self, kind: RecordKind, id: &str) -> Result<Option<ProfileRecord>> {
        let path = self.record_path(kind, id)?;
        if !path.exists() {
            return Ok(None);
        }
        Self::read_record(&path).map(Some)
    }

    /// Ordered by creation time, then id
    fn list(&self, kind: RecordKind) -> Result<Vec<ProfileRecord>> {
        let mut records = Vec::new();
        for entry in std::fs::read_dir(self.kind_dir(kind))? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match Self::read_record(&path) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable record: {}", e),
            }
        }

        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::profile::{ExtractedProfile, SkillSet};
    use chrono::Duration;

    #[test]
    fn test_put_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        let profile = ExtractedProfile {
            full_text: "Rust developer".to_string(),
            skills: SkillSet::from(vec!["Rust".to_string()]),
            ..Default::default()
        };
        let record = ProfileRecord::new(RecordKind::Resume, "owner-1", profile)
            .with_label(Some("cv.pdf".to_string()));
        store.put(record.clone()).unwrap();

        let loaded = store.get(RecordKind::Resume, &record.id).unwrap().unwrap();
        assert_eq!(loaded, record);
        assert!(dir.path().join("resumes").join(format!("{}.json", record.id)).exists());
    }

    #[test]
    fn test_list_orders_by_creation_time() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        let mut older = ProfileRecord::new(RecordKind::Resume, "a", ExtractedProfile::default());
        let newer = ProfileRecord::new(RecordKind::Resume, "b", ExtractedProfile::default());
        older.created_at = newer.created_at - Duration::seconds(60);
        store.put(newer.clone()).unwrap();
        store.put(older.clone()).unwrap();

        let listed = store.list(RecordKind::Resume).unwrap();
        assert_eq!(listed[0].id, older.id);
        assert_eq!(listed[1].id, newer.id);
        assert!(store.list(RecordKind::JobDescription).unwrap().is_empty());
    }

    #[test]
    fn test_path_traversal_ids_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.get(RecordKind::Resume, "../secrets"),
            Err(RankerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unreadable_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        std::fs::write(dir.path().join("resumes").join("broken.json"), "{").unwrap();

        assert!(store.list(RecordKind::Resume).unwrap().is_empty());
    }
}
