//! Client for the Fillout REST API, routed through the host's request helper

use crate::{
    credentials::FilloutApiCredentials,
    error::{FilloutError, FilloutResult},
};
use fillout_host::{HttpRequest, RequestHelper};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value, json};

/// Opaque webhook id. Echoed back to the API in the shape it was returned in,
/// so numbers are kept as JSON numbers of any width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WebhookId {
    Number(Number),
    Text(String),
}

impl From<i64> for WebhookId {
    fn from(id: i64) -> Self {
        Self::Number(id.into())
    }
}

impl From<&str> for WebhookId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl std::fmt::Display for WebhookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{}", id),
            Self::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Entry of `GET /forms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub form_id: String,
    pub name: String,
}

#[derive(Deserialize)]
struct CreateWebhookResponse {
    id: WebhookId,
}

pub struct FilloutClient<'a> {
    http: &'a dyn RequestHelper,
    base_url: String,
    api_key: &'a SecretString,
}

impl<'a> FilloutClient<'a> {
    pub fn new(http: &'a dyn RequestHelper, credentials: &'a FilloutApiCredentials) -> Self {
        Self {
            http,
            base_url: credentials.base_url(),
            api_key: credentials.api_key(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn list_forms(&self) -> FilloutResult<Vec<FormSummary>> {
        let request = HttpRequest::get(self.url("forms")).bearer_auth(self.api_key.expose_secret());
        let response = self.http.request(request).await?;

        // Some forms come back with numeric ids or names; keep them as strings.
        let Value::Array(forms) = response else {
            return Err(FilloutError::UnexpectedResponse(format!(
                "expected a list of forms, got {}",
                response
            )));
        };

        forms
            .into_iter()
            .map(|form| {
                let form_id = stringify_field(&form, "formId")?;
                let name = stringify_field(&form, "name")?;
                Ok(FormSummary { form_id, name })
            })
            .collect()
    }

    pub async fn create_webhook(&self, form_id: &str, url: &str) -> FilloutResult<WebhookId> {
        let request = HttpRequest::post(self.url("webhook/create"))
            .bearer_auth(self.api_key.expose_secret())
            .json(json!({ "formId": form_id, "url": url }));

        let response = self.http.request(request).await?;
        let created: CreateWebhookResponse = serde_json::from_value(response).map_err(|e| {
            FilloutError::UnexpectedResponse(format!("webhook create response: {}", e))
        })?;

        Ok(created.id)
    }

    pub async fn delete_webhook(&self, webhook_id: &WebhookId) -> FilloutResult<()> {
        let request = HttpRequest::post(self.url("webhook/delete"))
            .bearer_auth(self.api_key.expose_secret())
            .json(json!({ "webhookId": webhook_id }));

        self.http.request(request).await?;
        Ok(())
    }
}

fn stringify_field(form: &Value, field: &str) -> FilloutResult<String> {
    match form.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Number(value)) => Ok(value.to_string()),
        other => Err(FilloutError::UnexpectedResponse(format!(
            "form entry has invalid {}: {:?}",
            field, other
        ))),
    }
}
