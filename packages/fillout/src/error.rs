//! Error type for the Fillout trigger

use fillout_host::HostError;

pub type FilloutResult<T> = Result<T, FilloutError>;

#[derive(Debug, thiserror::Error)]
pub enum FilloutError {
    #[error("Fillout API key is empty")]
    MissingApiKey,

    #[error("Unknown Fillout region: {0}")]
    UnknownRegion(String),

    #[error("No form selected")]
    MissingForm,

    #[error("Invalid webhook body: {0}")]
    InvalidBody(String),

    #[error("Webhook body has no submission")]
    MissingSubmission,

    #[error("Invalid {collection}: {message}")]
    InvalidCollection {
        collection: &'static str,
        message: String,
    },

    #[error("Unexpected response from Fillout: {0}")]
    UnexpectedResponse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Host(#[from] HostError),
}

impl FilloutError {
    pub(crate) fn invalid_collection(collection: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidCollection {
            collection,
            message: message.into(),
        }
    }

    /// Convert into the error reported to the host. Host errors pass through
    /// untouched, everything else becomes a node operation error.
    pub fn into_host(self, node: &str) -> HostError {
        match self {
            Self::Host(err) => err,
            other => HostError::node_operation(node, other),
        }
    }
}
