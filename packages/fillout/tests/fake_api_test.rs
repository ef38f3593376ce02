//! End-to-end run of the trigger against a local stand-in for the Fillout API

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use fillout_host::{
    MemoryCredentialStore, MemoryStaticData, NodeContext, ReqwestRequestHelper,
    RequestHelperConfig, TriggerNode, WebhookRequest, lifecycle,
};
use fillout_trigger::{FilloutApiCredentials, FilloutRegion, FilloutTrigger};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

const API_KEY: &str = "sk_test_123";

#[derive(Default)]
struct ApiState {
    webhooks: Mutex<Vec<(i64, String, String)>>,
    next_id: Mutex<i64>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", API_KEY))
}

async fn list_forms(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
    }
    (
        StatusCode::OK,
        Json(json!([{ "formId": "form_a", "name": "Signup" }])),
    )
}

async fn create_webhook(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
    }

    let mut next_id = state.next_id.lock().unwrap();
    *next_id += 1;
    let id = *next_id;
    state.webhooks.lock().unwrap().push((
        id,
        body["formId"].as_str().unwrap_or_default().to_string(),
        body["url"].as_str().unwrap_or_default().to_string(),
    ));
    (StatusCode::OK, Json(json!({ "id": id })))
}

async fn delete_webhook(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }

    let Some(id) = body["webhookId"].as_i64() else {
        return StatusCode::BAD_REQUEST;
    };
    let mut webhooks = state.webhooks.lock().unwrap();
    let before = webhooks.len();
    webhooks.retain(|(existing, _, _)| *existing != id);
    if webhooks.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

async fn spawn_api(state: Arc<ApiState>) -> String {
    let app = Router::new()
        .route("/v1/api/forms", get(list_forms))
        .route("/v1/api/webhook/create", post(create_webhook))
        .route("/v1/api/webhook/delete", post(delete_webhook))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1/api", addr)
}

fn context(base_url: &str, api_key: &str) -> NodeContext {
    let credentials = FilloutApiCredentials::new(api_key, FilloutRegion::Us)
        .unwrap()
        .with_base_url(base_url);
    let store = MemoryCredentialStore::new();
    store.insert("filloutApi", credentials.to_host_value());

    let http = ReqwestRequestHelper::new(RequestHelperConfig::default()).unwrap();

    NodeContext::new(
        "node-e2e",
        Arc::new(store),
        Arc::new(MemoryStaticData::new()),
        Arc::new(http),
    )
    .with_parameter("form", json!("form_a"))
    .with_webhook_base_url("https://automation.example.com/webhook")
}

#[tokio::test]
async fn test_full_trigger_lifecycle() {
    let state = Arc::new(ApiState::default());
    let base_url = spawn_api(state.clone()).await;
    let ctx = context(&base_url, API_KEY);
    let node = FilloutTrigger::new();

    let forms = node.load_options(&ctx, "getForms").await.unwrap();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].value, "form_a");

    assert!(lifecycle::activate(&node, &ctx).await.unwrap());
    assert!(!lifecycle::activate(&node, &ctx).await.unwrap());
    {
        let webhooks = state.webhooks.lock().unwrap();
        assert_eq!(webhooks.len(), 1);
        assert_eq!(webhooks[0].1, "form_a");
        assert_eq!(
            webhooks[0].2,
            "https://automation.example.com/webhook/node-e2e/webhook"
        );
    }

    let body = json!({
        "submission": {
            "submissionId": "sub_9",
            "questions": [{ "id": "q", "name": "Plan", "type": "Dropdown", "value": "pro" }],
            "urlParameters": [{ "id": "ref", "name": "ref", "value": "ad" }]
        }
    });
    let response = lifecycle::deliver(
        &node,
        &ctx,
        WebhookRequest::post("default", body.to_string())
            .with_header("content-type", "application/json"),
    )
    .await
    .unwrap();
    let item = response.items().next().unwrap();
    assert_eq!(item["questions"]["q"], json!({ "name": "Plan", "value": "pro" }));
    assert_eq!(item["urlParameters"]["ref"]["value"], "ad");

    lifecycle::deactivate(&node, &ctx).await.unwrap();
    assert!(state.webhooks.lock().unwrap().is_empty());
    assert!(!node.check_exists(&ctx).await.unwrap());
}

#[tokio::test]
async fn test_auth_failure_propagates_from_remote() {
    let state = Arc::new(ApiState::default());
    let base_url = spawn_api(state.clone()).await;
    let ctx = context(&base_url, "wrong_key");
    let node = FilloutTrigger::new();

    let err = node.create(&ctx).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!node.check_exists(&ctx).await.unwrap());
    assert!(state.webhooks.lock().unwrap().is_empty());
}
