//! Activation, deactivation and delivery of trigger nodes

use crate::{
    context::NodeContext,
    error::{HostError, HostResult},
    traits::TriggerNode,
    types::{WebhookRequest, WebhookResponse},
};

/// Ensure the node's remote registration exists.
///
/// Returns `true` when a registration was created during this call.
pub async fn activate(node: &dyn TriggerNode, ctx: &NodeContext) -> HostResult<bool> {
    if node.check_exists(ctx).await? {
        tracing::debug!(node_id = %ctx.node_id, "Webhook already registered");
        return Ok(false);
    }

    node.create(ctx).await?;
    tracing::info!(node_id = %ctx.node_id, node = %node.description().name, "Activated trigger");
    Ok(true)
}

/// Tear down the node's remote registration
pub async fn deactivate(node: &dyn TriggerNode, ctx: &NodeContext) -> HostResult<()> {
    node.delete(ctx).await?;
    tracing::info!(node_id = %ctx.node_id, node = %node.description().name, "Deactivated trigger");
    Ok(())
}

/// Route an inbound delivery to the node after checking it targets a declared webhook
pub async fn deliver(
    node: &dyn TriggerNode,
    ctx: &NodeContext,
    request: WebhookRequest,
) -> HostResult<WebhookResponse> {
    let description = node.description();
    let webhook = description
        .webhook(&request.webhook_name)
        .ok_or_else(|| HostError::UnknownWebhook(request.webhook_name.clone()))?;

    if webhook.http_method != request.method {
        return Err(HostError::UnknownWebhook(format!(
            "{} does not accept {}",
            webhook.name, request.method
        )));
    }

    node.webhook(ctx, request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        description::{
            CredentialTypeDescription, NodeTypeDescription, PropertyOption, ResponseMode,
        },
        registry::NodeRegistry,
        store::{MemoryCredentialStore, MemoryStaticData},
        traits::{CredentialType, RequestHelper},
        types::{HttpMethod, HttpRequest},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingNode {
        creates: AtomicUsize,
        deletes: AtomicUsize,
    }

    struct EchoCredential;

    impl CredentialType for EchoCredential {
        fn description(&self) -> CredentialTypeDescription {
            CredentialTypeDescription::new("echoApi", "Echo API")
        }
    }

    #[async_trait::async_trait]
    impl TriggerNode for CountingNode {
        fn description(&self) -> NodeTypeDescription {
            let mut node = NodeTypeDescription::new("echo", "Echo", "Echoes bodies", "trigger");
            node.add_credential("echoApi", true).add_webhook(
                "default",
                HttpMethod::Post,
                ResponseMode::OnReceived,
                "webhook",
            );
            node
        }

        async fn check_exists(&self, ctx: &NodeContext) -> HostResult<bool> {
            Ok(ctx.get_static("id").await?.is_some())
        }

        async fn create(&self, ctx: &NodeContext) -> HostResult<bool> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            ctx.set_static("id", json!("x")).await?;
            Ok(true)
        }

        async fn delete(&self, ctx: &NodeContext) -> HostResult<bool> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            ctx.remove_static("id").await?;
            Ok(true)
        }

        async fn webhook(
            &self,
            _ctx: &NodeContext,
            request: WebhookRequest,
        ) -> HostResult<WebhookResponse> {
            let body: Value = serde_json::from_slice(&request.body)?;
            Ok(WebhookResponse::single_output(vec![body]))
        }

        async fn load_options(
            &self,
            _ctx: &NodeContext,
            _method: &str,
        ) -> HostResult<Vec<PropertyOption>> {
            Ok(Vec::new())
        }
    }

    struct NoHttp;

    #[async_trait::async_trait]
    impl RequestHelper for NoHttp {
        async fn request(&self, _request: HttpRequest) -> HostResult<Value> {
            Ok(Value::Null)
        }
    }

    fn context() -> NodeContext {
        NodeContext::new(
            "node-1",
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(MemoryStaticData::new()),
            Arc::new(NoHttp),
        )
    }

    #[tokio::test]
    async fn test_activate_creates_once() {
        let node = CountingNode::default();
        let ctx = context();

        assert!(activate(&node, &ctx).await.unwrap());
        assert!(!activate(&node, &ctx).await.unwrap());
        assert_eq!(node.creates.load(Ordering::SeqCst), 1);

        deactivate(&node, &ctx).await.unwrap();
        assert_eq!(node.deletes.load(Ordering::SeqCst), 1);
        assert!(activate(&node, &ctx).await.unwrap());
        assert_eq!(node.creates.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_deliver_checks_webhook_and_method() {
        let node = CountingNode::default();
        let ctx = context();

        let response = deliver(&node, &ctx, WebhookRequest::post("default", r#"{"a":1}"#))
            .await
            .unwrap();
        assert_eq!(response, WebhookResponse::single_output(vec![json!({ "a": 1 })]));

        let unknown = deliver(&node, &ctx, WebhookRequest::post("other", "{}")).await;
        assert!(matches!(unknown, Err(HostError::UnknownWebhook(_))));

        let mut get = WebhookRequest::post("default", "{}");
        get.method = HttpMethod::Get;
        assert!(matches!(
            deliver(&node, &ctx, get).await,
            Err(HostError::UnknownWebhook(_))
        ));
    }

    #[test]
    fn test_registry_requires_credentials_first() {
        let mut registry = NodeRegistry::new();
        let node: Arc<dyn TriggerNode> = Arc::new(CountingNode::default());

        assert!(matches!(
            registry.register_node(node.clone()),
            Err(HostError::CredentialsNotFound(name)) if name == "echoApi"
        ));

        registry.register_credential(&EchoCredential).unwrap();
        registry.register_node(node.clone()).unwrap();
        assert!(matches!(
            registry.register_node(node),
            Err(HostError::AlreadyRegistered(_))
        ));
        assert_eq!(registry.node_names(), vec!["echo".to_string()]);

        assert!(registry.deregister_credential("echoApi").is_err());
        assert!(registry.deregister_node("echo").is_some());
        assert!(registry.node("echo").is_err());
        registry.deregister_credential("echoApi").unwrap();
        assert!(registry.credential_names().is_empty());
    }
}
