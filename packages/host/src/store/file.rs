//! JSON file backed static data
//!
//! The whole file is rewritten on every mutation. Intended for single-process
//! tools; concurrent writers from separate processes are not coordinated.

use crate::{
    error::{HostError, HostResult},
    traits::StaticDataStore,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

type NodeData = BTreeMap<String, Map<String, Value>>;

pub struct FileStaticData {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStaticData {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> HostResult<NodeData> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(NodeData::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                HostError::StaticData(format!("Invalid state file {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(NodeData::new()),
            Err(e) => Err(HostError::StaticData(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn save(&self, data: &NodeData) -> HostResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                HostError::StaticData(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            HostError::StaticData(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait::async_trait]
impl StaticDataStore for FileStaticData {
    async fn get(&self, node_id: &str, key: &str) -> HostResult<Option<Value>> {
        let _guard = self.lock.lock().await;
        let data = self.load().await?;
        Ok(data.get(node_id).and_then(|node| node.get(key)).cloned())
    }

    async fn set(&self, node_id: &str, key: &str, value: Value) -> HostResult<()> {
        let _guard = self.lock.lock().await;
        let mut data = self.load().await?;
        data.entry(node_id.to_string())
            .or_default()
            .insert(key.to_string(), value);
        self.save(&data).await
    }

    async fn remove(&self, node_id: &str, key: &str) -> HostResult<Option<Value>> {
        let _guard = self.lock.lock().await;
        let mut data = self.load().await?;
        let Some(node) = data.get_mut(node_id) else {
            return Ok(None);
        };

        let previous = node.remove(key);
        if node.is_empty() {
            data.remove(node_id);
        }
        if previous.is_some() {
            self.save(&data).await?;
        }
        Ok(previous)
    }
}
