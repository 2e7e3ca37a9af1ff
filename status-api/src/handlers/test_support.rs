//! Router-level helpers shared by endpoint tests

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

use crate::middleware::{Claims, TokenAuth};
use crate::models::{ComponentGroupCollapsed, ComponentGroupId, NewComponentGroup, ResourceVisibility};
use crate::repository::Repository;
use crate::routes::router;
use crate::state::AppState;
use crate::store::MemoryStore;

const SECRET: &[u8] = b"endpoint-test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        let state = AppState::builder()
            .store(Arc::clone(&store))
            .token_auth(TokenAuth::hs256(SECRET))
            .without_tracing()
            .build()
            .await
            .unwrap();
        Self {
            router: router(state),
            store,
        }
    }

    pub async fn group(&self, name: &str) -> ComponentGroupId {
        self.store
            .component_groups()
            .create(NewComponentGroup {
                name: name.into(),
                order: 0,
                collapsed: ComponentGroupCollapsed::Expanded,
                visible: ResourceVisibility::Guest,
                components: Vec::new(),
            })
            .await
            .unwrap()
            .id
    }
}

/// Bearer token for `user:1` holding `perms`
pub fn bearer(perms: &[&str]) -> String {
    let claims = Claims::new("user:1", perms.iter().copied());
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

/// Drive one request through the router; an empty body decodes as `null`
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
