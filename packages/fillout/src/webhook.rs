//! Remote webhook registration for a trigger node instance
//!
//! The registration id is kept in the node's static data. Create and delete
//! look at it first, so repeated calls reach the Fillout API at most once.

use crate::{
    api::{FilloutClient, WebhookId},
    credentials::{FILLOUT_CREDENTIAL_NAME, FilloutApiCredentials},
    error::{FilloutError, FilloutResult},
};
use fillout_host::NodeContext;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const WEBHOOK_ID_KEY: &str = "webhookId";
pub const FORM_ID_KEY: &str = "formId";

/// Name and path of the single webhook a Fillout trigger exposes
pub const DEFAULT_WEBHOOK: &str = "default";
pub const WEBHOOK_PATH: &str = "webhook";

/// Node parameter holding the selected form
pub const FORM_PARAMETER: &str = "form";

/// A webhook registered with Fillout for one node instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRegistration {
    pub webhook_id: WebhookId,
    pub form_id: Option<String>,
}

/// Load the persisted registration, if any
pub async fn load_registration(ctx: &NodeContext) -> FilloutResult<Option<WebhookRegistration>> {
    let Some(raw_id) = ctx.get_static(WEBHOOK_ID_KEY).await? else {
        return Ok(None);
    };

    let webhook_id: WebhookId = serde_json::from_value(raw_id).map_err(|e| {
        FilloutError::UnexpectedResponse(format!("stored webhook id is invalid: {}", e))
    })?;
    let form_id = ctx
        .get_static(FORM_ID_KEY)
        .await?
        .and_then(|value| value.as_str().map(str::to_string));

    Ok(Some(WebhookRegistration {
        webhook_id,
        form_id,
    }))
}

pub async fn check_exists(ctx: &NodeContext) -> FilloutResult<bool> {
    let exists = ctx.get_static(WEBHOOK_ID_KEY).await?.is_some();
    tracing::debug!(node_id = %ctx.node_id, exists, "Checked Fillout webhook");
    Ok(exists)
}

pub async fn create(ctx: &NodeContext) -> FilloutResult<bool> {
    let credentials: FilloutApiCredentials = ctx.get_credentials(FILLOUT_CREDENTIAL_NAME).await?;

    if let Some(existing) = load_registration(ctx).await? {
        tracing::debug!(
            node_id = %ctx.node_id,
            webhook_id = %existing.webhook_id,
            "Fillout webhook already created, no changes"
        );
        return Ok(true);
    }

    let form_id: String = ctx.node_parameter(FORM_PARAMETER)?;
    if form_id.trim().is_empty() {
        return Err(FilloutError::MissingForm);
    }
    let webhook_url = ctx.node_webhook_url(WEBHOOK_PATH)?;

    let client = FilloutClient::new(ctx.http.as_ref(), &credentials);
    let webhook_id = client.create_webhook(&form_id, &webhook_url).await?;

    ctx.set_static(WEBHOOK_ID_KEY, json!(webhook_id)).await?;
    ctx.set_static(FORM_ID_KEY, json!(form_id)).await?;

    tracing::info!(
        node_id = %ctx.node_id,
        form_id = %form_id,
        webhook_id = %webhook_id,
        url = %webhook_url,
        "Created Fillout webhook"
    );
    Ok(true)
}

pub async fn delete(ctx: &NodeContext) -> FilloutResult<bool> {
    let credentials: FilloutApiCredentials = ctx.get_credentials(FILLOUT_CREDENTIAL_NAME).await?;

    let Some(registration) = load_registration(ctx).await? else {
        tracing::debug!(node_id = %ctx.node_id, "Fillout webhook already deleted, no changes");
        return Ok(true);
    };

    let client = FilloutClient::new(ctx.http.as_ref(), &credentials);
    client.delete_webhook(&registration.webhook_id).await?;

    ctx.remove_static(WEBHOOK_ID_KEY).await?;
    ctx.remove_static(FORM_ID_KEY).await?;

    tracing::info!(
        node_id = %ctx.node_id,
        webhook_id = %registration.webhook_id,
        "Deleted Fillout webhook"
    );
    Ok(true)
}
