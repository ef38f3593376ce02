//! Trait definitions for the host contract

use crate::{
    context::NodeContext,
    description::{CredentialTypeDescription, NodeTypeDescription, PropertyOption},
    error::HostResult,
    types::{HttpRequest, WebhookRequest, WebhookResponse},
};
use serde_json::Value;

/// A credential type a plugin declares
pub trait CredentialType: Send + Sync {
    fn description(&self) -> CredentialTypeDescription;
}

/// Trait for webhook-driven trigger nodes
#[async_trait::async_trait]
pub trait TriggerNode: Send + Sync {
    /// Static declaration of the node
    fn description(&self) -> NodeTypeDescription;

    /// Whether the remote registration for this node instance already exists
    async fn check_exists(&self, ctx: &NodeContext) -> HostResult<bool>;

    /// Register the webhook with the remote service
    async fn create(&self, ctx: &NodeContext) -> HostResult<bool>;

    /// Remove the remote registration
    async fn delete(&self, ctx: &NodeContext) -> HostResult<bool>;

    /// Handle an inbound delivery
    async fn webhook(&self, ctx: &NodeContext, request: WebhookRequest)
    -> HostResult<WebhookResponse>;

    /// List options for a property whose options are loaded at edit time
    async fn load_options(&self, ctx: &NodeContext, method: &str)
    -> HostResult<Vec<PropertyOption>>;
}

/// Host-owned secret store
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the decrypted credential data stored under `name`
    async fn get(&self, name: &str) -> HostResult<Value>;
}

/// Key/value data the host persists per node instance between runs
#[async_trait::async_trait]
pub trait StaticDataStore: Send + Sync {
    async fn get(&self, node_id: &str, key: &str) -> HostResult<Option<Value>>;

    async fn set(&self, node_id: &str, key: &str, value: Value) -> HostResult<()>;

    /// Remove a key, returning the previous value
    async fn remove(&self, node_id: &str, key: &str) -> HostResult<Option<Value>>;
}

/// Generic HTTP request helper provided by the host
#[async_trait::async_trait]
pub trait RequestHelper: Send + Sync {
    /// Send the request and return the parsed JSON response body.
    ///
    /// An empty response body yields `Value::Null`. Non-2xx responses are
    /// returned as `HostError::Request`.
    async fn request(&self, request: HttpRequest) -> HostResult<Value>;
}
