use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use hrdesk::hrdesk_auth::create_access_token;
use hrdesk::hrdesk_config::{CorsConfig, JwtConfig};
use hrdesk::hrdesk_core::permissions::PermissionSchema;
use hrdesk::router::init_router;
use hrdesk::state::AppState;
use hrdesk::store::PermissionStore;
use hrdesk::store::memory::MemoryPermissionStore;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

#[allow(dead_code)]
pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 3600,
    }
}

#[allow(dead_code)]
pub fn test_state(store: Arc<dyn PermissionStore>) -> AppState {
    AppState {
        jwt_config: jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        schema: Arc::new(PermissionSchema::builtin().unwrap()),
        store,
    }
}

#[allow(dead_code)]
/// Router over the seeded in-memory store; the store handle is returned so
/// tests can inspect what was saved.
pub fn setup_test_app() -> (Router, Arc<MemoryPermissionStore>) {
    let store = Arc::new(MemoryPermissionStore::seeded());
    (init_router(test_state(store.clone())), store)
}

#[allow(dead_code)]
pub fn token_for(permissions: &[&str], is_super_user: bool) -> String {
    create_access_token(
        "hr-admin",
        "hr-admin@example.com",
        permissions.iter().map(|p| p.to_string()).collect(),
        is_super_user,
        &jwt_config(),
    )
    .unwrap()
}

#[allow(dead_code)]
pub fn viewer_token() -> String {
    token_for(&["Permissions:view"], false)
}

#[allow(dead_code)]
pub fn editor_token() -> String {
    token_for(&["Permissions:view", "Permissions:edit"], false)
}

#[allow(dead_code)]
/// Sends one request and returns the status and the JSON body (`Null` when empty).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!(
                "Non-JSON response. Status: {}, Body: {:?}",
                status,
                String::from_utf8_lossy(&bytes)
            )
        })
    };
    (status, body)
}
