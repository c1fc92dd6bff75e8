//! Upstream collaborator that owns role and user permission sets.
//!
//! The HR API is the source of truth; this service only fetches and saves.
//! [`PermissionStore`] has two implementations:
//!
//! - [`http::HttpPermissionStore`]: the HR REST API via `reqwest`
//! - [`memory::MemoryPermissionStore`]: process-local, for development and tests

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::http::StatusCode;
use thiserror::Error;
use tracing::{info, warn};

use hrdesk_config::{StoreKind, UpstreamConfig};
use hrdesk_core::AppError;
use hrdesk_core::permissions::PermissionSet;
use hrdesk_models::{FetchedPermissions, Role, RoleId, UpstreamUserSave};

pub mod http;
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("upstream responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// HTTP error for a failed store call. Anything that is not a lookup miss
    /// or a conflict is reported as a gateway failure.
    pub fn into_app_error(self) -> AppError {
        match self {
            StoreError::NotFound(what) => AppError::not_found(anyhow!("{what} not found")),
            StoreError::Conflict(msg) => AppError::new(StatusCode::CONFLICT, anyhow!(msg)),
            other => AppError::bad_gateway(other),
        }
    }
}

#[async_trait]
pub trait PermissionStore: Send + Sync {
    async fn list_roles(&self) -> StoreResult<Vec<Role>>;
    async fn create_role(&self, name: &str, permissions: &PermissionSet) -> StoreResult<Role>;
    async fn delete_role(&self, id: &RoleId) -> StoreResult<()>;

    async fn role_permissions(&self, id: &RoleId) -> StoreResult<FetchedPermissions>;
    async fn save_role_permissions(
        &self,
        id: &RoleId,
        permissions: &PermissionSet,
    ) -> StoreResult<()>;

    async fn user_permissions(&self, username: &str) -> StoreResult<FetchedPermissions>;
    async fn save_user_permissions(&self, save: &UpstreamUserSave) -> StoreResult<()>;

    fn backend_name(&self) -> &'static str;
}

/// Builds the store selected by `PERMISSION_STORE`.
pub fn init_store(config: &UpstreamConfig) -> StoreResult<Arc<dyn PermissionStore>> {
    let store: Arc<dyn PermissionStore> = match config.store {
        StoreKind::Http => Arc::new(http::HttpPermissionStore::new(config.clone())?),
        StoreKind::Memory => Arc::new(memory::MemoryPermissionStore::seeded()),
    };

    info!(backend = store.backend_name(), "Permission store ready");
    Ok(store)
}

/// Resolves a permission fetch for display. Lookup misses surface as 404;
/// any other failure degrades to an empty set so nothing is granted by
/// accident. Saves read their baseline with `into_app_error` instead.
pub fn fetched_or_empty(
    result: StoreResult<FetchedPermissions>,
    subject: &str,
) -> Result<FetchedPermissions, AppError> {
    match result {
        Ok(fetched) => Ok(fetched),
        Err(StoreError::NotFound(what)) => Err(AppError::not_found(anyhow!("{what} not found"))),
        Err(err) => {
            warn!(subject, error = %err, "Permission fetch failed, using an empty set");
            Ok(FetchedPermissions::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_status_mapping() {
        assert_eq!(
            StoreError::NotFound("role 9".into()).into_app_error().status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            StoreError::Conflict("exists".into()).into_app_error().status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            StoreError::Status {
                status: 500,
                body: "boom".into()
            }
            .into_app_error()
            .status,
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_fetch_failure_is_empty_set() {
        let fetched = fetched_or_empty(
            Err(StoreError::Status {
                status: 503,
                body: String::new(),
            }),
            "role 1",
        )
        .unwrap();
        assert!(fetched.permissions.is_empty());
        assert!(!fetched.is_super_user);
    }

    #[test]
    fn test_fetch_not_found_is_an_error() {
        let err = fetched_or_empty(Err(StoreError::NotFound("role 1".into())), "role 1")
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
