//! Key-value preference stores

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::PrefsError;

/// Partial mapping of preference keys to values
pub type PrefMap = BTreeMap<String, String>;

/// Asynchronous key-value preference storage. Last write wins per key.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Values for the requested keys that have been set; unset keys are absent
    async fn get(&self, keys: &[&str]) -> Result<PrefMap, PrefsError>;

    /// Merge `values` into the store
    async fn set(&self, values: PrefMap) -> Result<(), PrefsError>;
}

fn pick(all: &PrefMap, keys: &[&str]) -> PrefMap {
    keys.iter()
        .filter_map(|k| all.get(*k).map(|v| (k.to_string(), v.clone())))
        .collect()
}

/// Store kept in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<PrefMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: PrefMap) -> Self {
        Self { values: Mutex::new(values) }
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<PrefMap, PrefsError> {
        Ok(pick(&*self.values.lock().await, keys))
    }

    async fn set(&self, values: PrefMap) -> Result<(), PrefsError> {
        self.values.lock().await.extend(values);
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-merge-write cycles within the process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<PrefMap, PrefsError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PrefMap::new()),
            Err(source) => return Err(PrefsError::Read { path: self.path.clone(), source }),
        };

        if content.trim().is_empty() {
            return Ok(PrefMap::new());
        }

        serde_json::from_str(&content)
            .map_err(|source| PrefsError::Parse { path: self.path.clone(), source })
    }
}

#[async_trait]
impl PreferenceStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<PrefMap, PrefsError> {
        let all = self.read_all().await?;
        Ok(pick(&all, keys))
    }

    async fn set(&self, values: PrefMap) -> Result<(), PrefsError> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.read_all().await?;
        all.extend(values);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await
                .map_err(|source| PrefsError::Write { path: self.path.clone(), source })?;
        }

        let content = serde_json::to_string_pretty(&all)?;
        fs::write(&self.path, content).await
            .map_err(|source| PrefsError::Write { path: self.path.clone(), source })?;

        debug!(path = %self.path.display(), keys = all.len(), "preferences saved");
        Ok(())
    }
}
