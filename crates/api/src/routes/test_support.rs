//! Router harness backed by an in-memory snapshot store.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use condo_core::state::AppState;
use condo_core::storage::{Autosaver, SnapshotStore};
use http_body_util::BodyExt;
use opendal::{Operator, services};
use serde_json::Value;
use tower::ServiceExt;

use crate::{ApiState, create_router};

pub(crate) fn api_state(document: AppState) -> ApiState {
    let operator = Operator::new(services::Memory::default()).unwrap().finish();
    let store = Arc::new(SnapshotStore::from_operator(operator, "snapshot.json"));
    let autosave = Autosaver::spawn(store.clone(), document.clone(), Duration::from_millis(10));
    ApiState::new(document, store, autosave)
}

pub(crate) fn app(state: &ApiState) -> Router {
    create_router(state.clone())
}

pub(crate) async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(format!("/api/v1{uri}"))
        .header("content-type", "application/json");
    let request = match body {
        Some(json) => request.body(Body::from(json.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
