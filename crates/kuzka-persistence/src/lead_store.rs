//! Lead store backed by one JSON file per lead.

use std::fs;
use std::path::PathBuf;

use kuzka_models::{Lead, LeadId};
use tracing::{debug, warn};

use crate::atomic::{read_json, write_json};
use crate::error::{PersistenceError, Result};

/// Manages persistence of leads.
///
/// ```text
/// base_path/
/// └── leads/
///     ├── lead-0f4c....json
///     └── lead-9a1e....json
/// ```
pub struct LeadStore {
    base_path: PathBuf,
}

impl LeadStore {
    /// Creates a new LeadStore rooted at the given directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn leads_dir(&self) -> PathBuf {
        self.base_path.join("leads")
    }

    fn lead_path(&self, id: &LeadId) -> PathBuf {
        self.leads_dir().join(format!("{}.json", id))
    }

    /// Resolves the file of an existing lead. IDs come from URLs, so anything
    /// that could escape the leads directory is treated as unknown.
    fn existing_path(&self, id: &LeadId) -> Result<PathBuf> {
        let raw = id.as_str();
        if raw.is_empty() || raw.contains(['/', '\\']) || raw.starts_with('.') {
            return Err(PersistenceError::NotFound(id.to_string()));
        }
        let path = self.lead_path(id);
        if !path.exists() {
            return Err(PersistenceError::NotFound(id.to_string()));
        }
        Ok(path)
    }

    /// Saves a lead, replacing any previous version.
    pub fn save(&self, lead: &Lead) -> Result<()> {
        let path = self.lead_path(&lead.id);
        write_json(&path, lead)?;
        debug!(lead_id = %lead.id, path = %path.display(), "Saved lead");
        Ok(())
    }

    /// Loads a lead by ID.
    pub fn load(&self, id: &LeadId) -> Result<Lead> {
        let path = self.existing_path(id)?;
        read_json(&path)
    }

    /// Lists all leads, newest first.
    ///
    /// Unreadable files are skipped with a warning so one damaged record does
    /// not hide the rest from the admin.
    pub fn list(&self) -> Result<Vec<Lead>> {
        let dir = self.leads_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|source| PersistenceError::ReadError {
            path: dir.clone(),
            source,
        })?;

        let mut leads = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                match read_json::<Lead>(&path) {
                    Ok(lead) => leads.push(lead),
                    Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable lead"),
                }
            }
        }

        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    /// Deletes a lead by ID.
    pub fn delete(&self, id: &LeadId) -> Result<()> {
        let path = self.existing_path(id)?;
        fs::remove_file(&path).map_err(|source| PersistenceError::WriteError { path, source })?;
        debug!(lead_id = %id, "Deleted lead");
        Ok(())
    }

    /// Number of stored leads.
    pub fn count(&self) -> Result<usize> {
        self.list().map(|leads| leads.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use kuzka_models::{LeadStatus, LeadSubmission, LeadUpdate};
    use tempfile::tempdir;

    fn lead(inn: &str) -> Lead {
        Lead::from_submission(LeadSubmission {
            inn: inn.to_string(),
            email: "a@b.ru".to_string(),
            name: None,
            phone: "+79991234567".to_string(),
            contact_time: "Сегодня 16:00-18:00".to_string(),
            service: "Сдача отчетности".to_string(),
            urgency: "Обычная".to_string(),
        })
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = LeadStore::new(dir.path());

        let lead = lead("1234567890");
        store.save(&lead).unwrap();

        let loaded = store.load(&lead.id).unwrap();
        assert_eq!(loaded.inn, "1234567890");
        assert_eq!(loaded.status, LeadStatus::New);
    }

    #[test]
    fn test_load_not_found() {
        let dir = tempdir().unwrap();
        let store = LeadStore::new(dir.path());

        let result = store.load(&LeadId::from_string("lead-missing"));
        assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    }

    #[test]
    fn test_load_rejects_path_escape() {
        let dir = tempdir().unwrap();
        let store = LeadStore::new(dir.path());

        let result = store.load(&LeadId::from_string("../secrets"));
        assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    }

    #[test]
    fn test_list_empty() {
        let dir = tempdir().unwrap();
        let store = LeadStore::new(dir.path());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_newest_first() {
        let dir = tempdir().unwrap();
        let store = LeadStore::new(dir.path());

        let mut older = lead("1111111111");
        older.created_at = Utc::now() - Duration::hours(1);
        let newer = lead("222222222222");

        store.save(&older).unwrap();
        store.save(&newer).unwrap();

        let leads = store.list().unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].inn, "222222222222");
        assert_eq!(leads[1].inn, "1111111111");
    }

    #[test]
    fn test_list_skips_corrupt_files() {
        let dir = tempdir().unwrap();
        let store = LeadStore::new(dir.path());
        store.save(&lead("1234567890")).unwrap();
        fs::write(dir.path().join("leads/broken.json"), "{").unwrap();

        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_update_persists() {
        let dir = tempdir().unwrap();
        let store = LeadStore::new(dir.path());

        let mut lead = lead("1234567890");
        store.save(&lead).unwrap();

        lead.apply(LeadUpdate {
            status: Some(LeadStatus::Done),
            ..Default::default()
        });
        store.save(&lead).unwrap();

        assert_eq!(store.load(&lead.id).unwrap().status, LeadStatus::Done);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let store = LeadStore::new(dir.path());

        let lead = lead("1234567890");
        store.save(&lead).unwrap();
        store.delete(&lead.id).unwrap();

        assert!(store.list().unwrap().is_empty());
        assert!(matches!(
            store.delete(&lead.id),
            Err(PersistenceError::NotFound(_))
        ));
    }
}
