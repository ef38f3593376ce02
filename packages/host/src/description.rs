//! Descriptors a plugin hands to the host for credential types and trigger nodes

use crate::types::HttpMethod;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a configurable property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    /// Pick one of a fixed or dynamically loaded set of options
    Options,
}

/// One selectable option of an `Options` property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PropertyOption {
    pub name: String,
    pub value: String,
}

impl PropertyOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A configurable field on a node or credential type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(default)]
    pub required: bool,
    /// Rendered as a masked input and stored as a secret
    #[serde(default)]
    pub password: bool,
    #[serde(default)]
    pub default: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
    /// Name of the node method that lists options at edit time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_options_method: Option<String>,
}

impl NodeProperty {
    pub fn new(name: &str, display_name: &str, kind: PropertyType) -> Self {
        Self {
            display_name: display_name.to_string(),
            name: name.to_string(),
            kind,
            required: false,
            password: false,
            default: Value::String(String::new()),
            description: None,
            options: Vec::new(),
            load_options_method: None,
        }
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn set_password(mut self, password: bool) -> Self {
        self.password = password;
        self
    }

    pub fn set_default(mut self, default: Value) -> Self {
        self.default = default;
        self
    }

    pub fn set_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn add_option(mut self, name: &str, value: &str) -> Self {
        self.options.push(PropertyOption::new(name, value));
        self
    }

    pub fn set_load_options_method(mut self, method: &str) -> Self {
        self.load_options_method = Some(method.to_string());
        self
    }
}

/// Credential type declaration consumed by the host's secret store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialTypeDescription {
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    pub properties: Vec<NodeProperty>,
}

impl CredentialTypeDescription {
    pub fn new(name: &str, display_name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            documentation_url: None,
            properties: Vec::new(),
        }
    }

    pub fn set_documentation_url(&mut self, url: &str) -> &mut Self {
        self.documentation_url = Some(url.to_string());
        self
    }

    pub fn add_property(&mut self, property: NodeProperty) -> &mut Self {
        self.properties.push(property);
        self
    }

    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Reference from a node to a credential type it uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NodeCredential {
    pub name: String,
    pub required: bool,
}

/// When the host answers the webhook caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ResponseMode {
    /// Respond as soon as the delivery is accepted
    #[default]
    OnReceived,
    /// Respond once the triggered run finishes
    LastNode,
}

/// An inbound webhook endpoint exposed by a trigger node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookDescription {
    pub name: String,
    pub http_method: HttpMethod,
    pub response_mode: ResponseMode,
    pub path: String,
}

/// Full declaration of a trigger node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeDescription {
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub group: Vec<String>,
    pub version: u32,
    pub description: String,
    /// Name a new node instance starts with
    pub default_name: String,
    pub inputs: usize,
    pub outputs: usize,
    pub credentials: Vec<NodeCredential>,
    pub webhooks: Vec<WebhookDescription>,
    pub properties: Vec<NodeProperty>,
}

impl NodeTypeDescription {
    pub fn new(name: &str, display_name: &str, description: &str, group: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            icon: None,
            group: vec![group.to_string()],
            version: 1,
            description: description.to_string(),
            default_name: display_name.to_string(),
            inputs: 0,
            outputs: 1,
            credentials: Vec::new(),
            webhooks: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn add_icon(&mut self, icon: &str) -> &mut Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn add_credential(&mut self, name: &str, required: bool) -> &mut Self {
        self.credentials.push(NodeCredential {
            name: name.to_string(),
            required,
        });
        self
    }

    pub fn add_webhook(
        &mut self,
        name: &str,
        http_method: HttpMethod,
        response_mode: ResponseMode,
        path: &str,
    ) -> &mut Self {
        self.webhooks.push(WebhookDescription {
            name: name.to_string(),
            http_method,
            response_mode,
            path: path.to_string(),
        });
        self
    }

    pub fn add_property(&mut self, property: NodeProperty) -> &mut Self {
        self.properties.push(property);
        self
    }

    pub fn webhook(&self, name: &str) -> Option<&WebhookDescription> {
        self.webhooks.iter().find(|w| w.name == name)
    }

    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn is_trigger(&self) -> bool {
        self.group.iter().any(|g| g == "trigger")
    }
}
