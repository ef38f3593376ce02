//! Per-invocation context handed to trigger nodes

use crate::{
    error::{HostError, HostResult},
    traits::{CredentialStore, RequestHelper, StaticDataStore},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Everything a trigger node may use from the host during one invocation.
///
/// Lifecycle calls and webhook deliveries each get their own context; the
/// only state shared between them lives in the static data store.
#[derive(Clone)]
pub struct NodeContext {
    /// Stable id of the node instance, scopes static data and webhook URLs
    pub node_id: String,

    /// Display name of the node instance, used in error messages
    pub node_name: String,

    /// Parameter values configured on the node
    pub parameters: Map<String, Value>,

    /// Public base URL under which the host serves webhooks
    pub webhook_base_url: String,

    pub credentials: Arc<dyn CredentialStore>,
    pub static_data: Arc<dyn StaticDataStore>,
    pub http: Arc<dyn RequestHelper>,
}

impl NodeContext {
    pub fn new(
        node_id: impl Into<String>,
        credentials: Arc<dyn CredentialStore>,
        static_data: Arc<dyn StaticDataStore>,
        http: Arc<dyn RequestHelper>,
    ) -> Self {
        let node_id = node_id.into();
        Self {
            node_name: node_id.clone(),
            node_id,
            parameters: Map::new(),
            webhook_base_url: String::new(),
            credentials,
            static_data,
            http,
        }
    }

    pub fn with_node_name(mut self, name: impl Into<String>) -> Self {
        self.node_name = name.into();
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn with_webhook_base_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_base_url = url.into();
        self
    }

    /// Fetch and decode the credentials stored under `name`
    pub async fn get_credentials<T: DeserializeOwned>(&self, name: &str) -> HostResult<T> {
        let raw = self.credentials.get(name).await?;
        serde_json::from_value(raw).map_err(|e| HostError::InvalidCredentials {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Decode a configured parameter
    pub fn node_parameter<T: DeserializeOwned>(&self, name: &str) -> HostResult<T> {
        let value = self
            .parameters
            .get(name)
            .ok_or_else(|| HostError::MissingParameter(name.to_string()))?;

        serde_json::from_value(value.clone()).map_err(|e| HostError::InvalidParameter {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Public URL of the given webhook path for this node instance
    pub fn node_webhook_url(&self, path: &str) -> HostResult<String> {
        if self.webhook_base_url.is_empty() {
            return Err(HostError::UnknownWebhook(format!(
                "no webhook base URL configured for node {}",
                self.node_id
            )));
        }

        Ok(format!(
            "{}/{}/{}",
            self.webhook_base_url.trim_end_matches('/'),
            self.node_id,
            path.trim_start_matches('/')
        ))
    }

    pub async fn get_static(&self, key: &str) -> HostResult<Option<Value>> {
        self.static_data.get(&self.node_id, key).await
    }

    pub async fn set_static(&self, key: &str, value: Value) -> HostResult<()> {
        self.static_data.set(&self.node_id, key, value).await
    }

    pub async fn remove_static(&self, key: &str) -> HostResult<Option<Value>> {
        self.static_data.remove(&self.node_id, key).await
    }
}

impl std::fmt::Debug for NodeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeContext")
            .field("node_id", &self.node_id)
            .field("node_name", &self.node_name)
            .field("parameters", &self.parameters)
            .field("webhook_base_url", &self.webhook_base_url)
            .finish_non_exhaustive()
    }
}
