use crate::{
    api::FilloutClient,
    credentials::{FILLOUT_CREDENTIAL_NAME, FilloutApiCredentials},
    error::FilloutError,
    submission::parse_webhook_body,
    webhook::{self, DEFAULT_WEBHOOK, FORM_PARAMETER, WEBHOOK_PATH},
};
use fillout_host::{
    HostError, HostResult, HttpMethod, NodeContext, NodeProperty, NodeTypeDescription,
    PropertyOption, PropertyType, ResponseMode, TriggerNode, WebhookRequest, WebhookResponse,
};

pub const FILLOUT_TRIGGER_NAME: &str = "filloutTrigger";
pub const GET_FORMS_METHOD: &str = "getForms";

/// Starts a run for every Fillout form submission
#[derive(Debug, Default, Clone, Copy)]
pub struct FilloutTrigger;

impl FilloutTrigger {
    pub fn new() -> Self {
        Self
    }

    async fn get_forms(&self, ctx: &NodeContext) -> Result<Vec<PropertyOption>, FilloutError> {
        let credentials: FilloutApiCredentials =
            ctx.get_credentials(FILLOUT_CREDENTIAL_NAME).await?;
        let client = FilloutClient::new(ctx.http.as_ref(), &credentials);

        let forms = client.list_forms().await?;
        Ok(forms
            .into_iter()
            .map(|form| PropertyOption::new(form.name, form.form_id))
            .collect())
    }
}

#[async_trait::async_trait]
impl TriggerNode for FilloutTrigger {
    fn description(&self) -> NodeTypeDescription {
        let mut node = NodeTypeDescription::new(
            FILLOUT_TRIGGER_NAME,
            "Fillout Trigger",
            "Handle Fillout submissions via webhooks",
            "trigger",
        );
        node.add_icon("file:fillout.svg");
        node.add_credential(FILLOUT_CREDENTIAL_NAME, true);
        node.add_webhook(
            DEFAULT_WEBHOOK,
            HttpMethod::Post,
            ResponseMode::OnReceived,
            WEBHOOK_PATH,
        );
        node.add_property(
            NodeProperty::new(FORM_PARAMETER, "Form Name or ID", PropertyType::Options)
                .set_required(true)
                .set_description("Choose from the list, or specify a form ID directly")
                .set_load_options_method(GET_FORMS_METHOD),
        );

        node
    }

    async fn check_exists(&self, ctx: &NodeContext) -> HostResult<bool> {
        webhook::check_exists(ctx)
            .await
            .map_err(|e| e.into_host(&ctx.node_name))
    }

    async fn create(&self, ctx: &NodeContext) -> HostResult<bool> {
        webhook::create(ctx)
            .await
            .map_err(|e| e.into_host(&ctx.node_name))
    }

    async fn delete(&self, ctx: &NodeContext) -> HostResult<bool> {
        webhook::delete(ctx)
            .await
            .map_err(|e| e.into_host(&ctx.node_name))
    }

    async fn webhook(
        &self,
        ctx: &NodeContext,
        request: WebhookRequest,
    ) -> HostResult<WebhookResponse> {
        let submission = parse_webhook_body(&request.body).map_err(|e| {
            tracing::warn!(node_id = %ctx.node_id, error = %e, "Rejected Fillout delivery");
            HostError::node_operation(&ctx.node_name, e)
        })?;

        tracing::info!(
            node_id = %ctx.node_id,
            submission_id = submission
                .get("submissionId")
                .and_then(|id| id.as_str())
                .unwrap_or_default(),
            "Received Fillout submission"
        );

        Ok(WebhookResponse::single_output(vec![submission]))
    }

    async fn load_options(
        &self,
        ctx: &NodeContext,
        method: &str,
    ) -> HostResult<Vec<PropertyOption>> {
        match method {
            GET_FORMS_METHOD => self
                .get_forms(ctx)
                .await
                .map_err(|e| e.into_host(&ctx.node_name)),
            other => Err(HostError::node_operation(
                &ctx.node_name,
                format!("Unknown load options method: {}", other),
            )),
        }
    }
}
