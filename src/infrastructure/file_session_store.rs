// Session keys persisted as a small TOML table between CLI runs
use crate::application::session_store::SessionStore;
use crate::error::DashboardError;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // serialises read-modify-write cycles within one process
    guard: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, DashboardError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| DashboardError::Session(format!("read {}: {}", self.path.display(), e)))?;
        toml::from_str(&raw)
            .map_err(|e| DashboardError::Session(format!("parse {}: {}", self.path.display(), e)))
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), DashboardError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DashboardError::Session(format!("create {}: {}", parent.display(), e)))?;
        }
        let raw = toml::to_string(entries).map_err(|e| DashboardError::Session(e.to_string()))?;
        write_private(&self.path, raw.as_bytes())
            .map_err(|e| DashboardError::Session(format!("write {}: {}", self.path.display(), e)))
    }

    fn update<F>(&self, change: F) -> Result<(), DashboardError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _held = self
            .guard
            .lock()
            .map_err(|_| DashboardError::Session("session file lock poisoned".to_string()))?;
        let mut entries = self.read()?;
        change(&mut entries);
        self.write(&entries)
    }
}

/// Write the file readable by its owner only; it holds the bearer token.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // mode only applies on creation
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, DashboardError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DashboardError> {
        tracing::debug!(key, path = %self.path.display(), "Storing session key");
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), DashboardError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
