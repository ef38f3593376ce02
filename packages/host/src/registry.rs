//! Registry of the credential types and trigger nodes a host has loaded

use crate::{
    description::CredentialTypeDescription,
    error::{HostError, HostResult},
    traits::{CredentialType, TriggerNode},
};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct NodeRegistry {
    credentials: HashMap<String, CredentialTypeDescription>,
    nodes: HashMap<String, Arc<dyn TriggerNode>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_credential<C: CredentialType>(&mut self, credential: &C) -> HostResult<()> {
        let description = credential.description();
        if self.credentials.contains_key(&description.name) {
            return Err(HostError::AlreadyRegistered(description.name));
        }

        tracing::info!(credential = %description.name, "Registered credential type");
        self.credentials.insert(description.name.clone(), description);
        Ok(())
    }

    /// Register a trigger node. Every credential it requires must already be registered.
    pub fn register_node(&mut self, node: Arc<dyn TriggerNode>) -> HostResult<()> {
        let description = node.description();
        if self.nodes.contains_key(&description.name) {
            return Err(HostError::AlreadyRegistered(description.name));
        }

        if let Some(missing) = description
            .credentials
            .iter()
            .filter(|c| c.required)
            .find(|c| !self.credentials.contains_key(&c.name))
        {
            return Err(HostError::CredentialsNotFound(missing.name.clone()));
        }

        tracing::info!(
            node = %description.name,
            webhooks = description.webhooks.len(),
            "Registered trigger node"
        );
        self.nodes.insert(description.name, node);
        Ok(())
    }

    pub fn deregister_node(&mut self, name: &str) -> Option<Arc<dyn TriggerNode>> {
        let removed = self.nodes.remove(name);
        if removed.is_some() {
            tracing::info!(node = %name, "Deregistered trigger node");
        }
        removed
    }

    /// Remove a credential type. Fails while a registered node still requires it.
    pub fn deregister_credential(&mut self, name: &str) -> HostResult<CredentialTypeDescription> {
        let in_use = self.nodes.values().any(|node| {
            node.description()
                .credentials
                .iter()
                .any(|c| c.name == name)
        });
        if in_use {
            return Err(HostError::Internal(format!(
                "Credential type {} is still used by a registered node",
                name
            )));
        }

        self.credentials
            .remove(name)
            .ok_or_else(|| HostError::CredentialsNotFound(name.to_string()))
    }

    pub fn node(&self, name: &str) -> HostResult<Arc<dyn TriggerNode>> {
        self.nodes
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::NodeNotFound(name.to_string()))
    }

    pub fn credential(&self, name: &str) -> Option<&CredentialTypeDescription> {
        self.credentials.get(name)
    }

    pub fn node_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.nodes.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn credential_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.credentials.keys().cloned().collect();
        names.sort();
        names
    }
}
