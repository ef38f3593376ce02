//! Error types for host operations

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;

/// Errors surfaced to the workflow host
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Credentials not found: {0}")]
    CredentialsNotFound(String),

    #[error("Invalid credentials for {name}: {message}")]
    InvalidCredentials { name: String, message: String },

    #[error("Missing node parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid node parameter {name}: {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Unknown webhook: {0}")]
    UnknownWebhook(String),

    #[error("Request failed with status {status}: {message}")]
    Request { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Static data error: {0}")]
    StaticData(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Error in node '{node}': {message}")]
    NodeOperation { node: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HostError {
    pub fn node_operation(node: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::NodeOperation {
            node: node.into(),
            message: message.to_string(),
        }
    }

    /// Status code of a failed remote request, if this error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HostError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {}", err))
    }
}
