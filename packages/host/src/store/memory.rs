//! In-memory stores

use crate::{
    error::{HostError, HostResult},
    traits::{CredentialStore, StaticDataStore},
};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Credential store backed by a map of credential name to data
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: impl Into<String>, data: Value) {
        self.entries.write().insert(name.into(), data);
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        self.entries.write().remove(name)
    }
}

#[async_trait::async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, name: &str) -> HostResult<Value> {
        self.entries
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::CredentialsNotFound(name.to_string()))
    }
}

/// Static data held per node id
#[derive(Debug, Clone, Default)]
pub struct MemoryStaticData {
    nodes: Arc<RwLock<HashMap<String, Map<String, Value>>>>,
}

impl MemoryStaticData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored for a node
    pub fn snapshot(&self, node_id: &str) -> Map<String, Value> {
        self.nodes.read().get(node_id).cloned().unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl StaticDataStore for MemoryStaticData {
    async fn get(&self, node_id: &str, key: &str) -> HostResult<Option<Value>> {
        let nodes = self.nodes.read();
        Ok(nodes.get(node_id).and_then(|data| data.get(key)).cloned())
    }

    async fn set(&self, node_id: &str, key: &str, value: Value) -> HostResult<()> {
        let mut nodes = self.nodes.write();
        nodes
            .entry(node_id.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, node_id: &str, key: &str) -> HostResult<Option<Value>> {
        let mut nodes = self.nodes.write();
        let Some(data) = nodes.get_mut(node_id) else {
            return Ok(None);
        };

        let previous = data.remove(key);
        if data.is_empty() {
            nodes.remove(node_id);
        }
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_credential_store_lookup() {
        let store = MemoryCredentialStore::new();
        store.insert("filloutApi", json!({ "apiKey": "k" }));

        assert_eq!(store.get("filloutApi").await.unwrap(), json!({ "apiKey": "k" }));
        assert!(matches!(
            store.get("other").await,
            Err(HostError::CredentialsNotFound(name)) if name == "other"
        ));

        store.remove("filloutApi");
        assert!(store.get("filloutApi").await.is_err());
    }

    #[tokio::test]
    async fn test_static_data_set_get_remove() {
        let store = MemoryStaticData::new();

        assert_eq!(store.get("n1", "webhookId").await.unwrap(), None);

        store.set("n1", "webhookId", json!("wh_1")).await.unwrap();
        store.set("n1", "formId", json!("f1")).await.unwrap();
        assert_eq!(store.get("n1", "webhookId").await.unwrap(), Some(json!("wh_1")));
        assert_eq!(store.snapshot("n1").len(), 2);

        assert_eq!(
            store.remove("n1", "webhookId").await.unwrap(),
            Some(json!("wh_1"))
        );
        assert_eq!(store.remove("n1", "webhookId").await.unwrap(), None);
        assert_eq!(store.remove("unknown", "webhookId").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_static_data_drops_empty_nodes() {
        let store = MemoryStaticData::new();
        store.set("n1", "webhookId", json!(1)).await.unwrap();
        store.remove("n1", "webhookId").await.unwrap();
        assert!(store.snapshot("n1").is_empty());
        assert!(store.nodes.read().is_empty());
    }
}
