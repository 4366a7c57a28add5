//! FileStorage - TOML-Backed Key/Value Storage

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, error, info};

use super::KeyValueStorage;
use crate::constants::PREFERENCES_FILE;
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;

/// Storage persisted as a flat TOML table of string entries.
///
/// The whole table is rewritten on every write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open storage at `path`, loading existing entries if the file exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries: BTreeMap<String, String> = if path.exists() {
            let value = fs::read_to_string(&path)?;
            if value.trim().is_empty() {
                BTreeMap::new()
            } else {
                toml::from_str(&value).map_err(|e| {
                    error!(error = %e, path = ?path, "Failed to parse preferences file");
                    e
                })?
            }
        } else {
            BTreeMap::new()
        };

        info!(path = ?path, entries = entries.len(), "Opened preferences storage");

        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    /// Open storage in the platform config directory
    pub fn open_default() -> Result<Self> {
        let path = get_or_create_config_dir()?.join(PREFERENCES_FILE);
        Self::open(path)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let value = toml::to_string(entries)?;
        fs::write(&self.path, value)?;
        debug!(path = ?self.path, "Preferences saved");
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    /// Entries change in memory only once the file write succeeded
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut next = self.entries.borrow().clone();
        next.insert(key.to_string(), value.to_string());

        self.save(&next).map_err(|e| {
            error!(error = %e, path = ?self.path, key, "Failed to save preferences");
            Error::Storage {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;

        *self.entries.borrow_mut() = next;
        Ok(())
    }
}
