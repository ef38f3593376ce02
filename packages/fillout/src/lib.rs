//! Fillout trigger plugin
//!
//! Registers the `filloutApi` credential type and the `filloutTrigger` node.
//! The node subscribes a webhook for the selected form when the workflow is
//! activated, removes it on deactivation, and emits each delivered
//! submission with its collections keyed by id.

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod submission;
pub mod trigger;
pub mod webhook;

use fillout_host::{HostResult, NodeRegistry};
use std::sync::Arc;

pub use api::{FilloutClient, FormSummary, WebhookId};
pub use config::FilloutConfig;
pub use credentials::{FILLOUT_CREDENTIAL_NAME, FilloutApi, FilloutApiCredentials, FilloutRegion};
pub use error::{FilloutError, FilloutResult};
pub use submission::{SubmissionCollection, transform_array_to_id_map, transform_submission};
pub use trigger::{FILLOUT_TRIGGER_NAME, FilloutTrigger};
pub use webhook::WebhookRegistration;

/// Register the credential type and trigger node with a host registry
pub fn register(registry: &mut NodeRegistry) -> HostResult<()> {
    registry.register_credential(&FilloutApi)?;
    registry.register_node(Arc::new(FilloutTrigger::new()))?;
    Ok(())
}

/// Remove everything [`register`] added
pub fn deregister(registry: &mut NodeRegistry) -> HostResult<()> {
    registry.deregister_node(FILLOUT_TRIGGER_NAME);
    registry.deregister_credential(FILLOUT_CREDENTIAL_NAME)?;
    Ok(())
}
