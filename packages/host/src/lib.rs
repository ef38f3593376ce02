//! Host contract for webhook trigger plugins
//!
//! A workflow host implements the services in [`traits`] and hands each
//! trigger invocation a [`NodeContext`]. Plugins declare what they need
//! through the descriptor types in [`description`].
//!
//! | Host service | Trait | Provided implementations |
//! |--------------|-------|--------------------------|
//! | Secret store | [`CredentialStore`] | [`MemoryCredentialStore`] |
//! | Per-node persisted data | [`StaticDataStore`] | [`MemoryStaticData`], [`FileStaticData`] |
//! | HTTP requests | [`RequestHelper`] | [`ReqwestRequestHelper`] |
//! | Webhook URLs | [`NodeContext::node_webhook_url`] | |

mod context;
mod error;
mod traits;
mod types;

pub mod description;
pub mod http;
pub mod lifecycle;
pub mod registry;
pub mod store;

pub use context::NodeContext;
pub use description::{
    CredentialTypeDescription, NodeCredential, NodeProperty, NodeTypeDescription,
    PropertyOption, PropertyType, ResponseMode, WebhookDescription,
};
pub use error::{HostError, HostResult};
pub use http::{ReqwestRequestHelper, RequestHelperConfig};
pub use registry::NodeRegistry;
pub use store::{FileStaticData, MemoryCredentialStore, MemoryStaticData};
pub use traits::{CredentialStore, CredentialType, RequestHelper, StaticDataStore, TriggerNode};
pub use types::{HttpMethod, HttpRequest, WebhookRequest, WebhookResponse};
