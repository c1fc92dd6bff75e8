//! [`PermissionStore`] backed by the HR REST API.
//!
//! | Call | Request |
//! |---|---|
//! | list roles | `GET {base}/roles` |
//! | create role | `POST {base}/roles` `{ name, permissions }` |
//! | delete role | `DELETE {base}/roles/{id}` |
//! | role permissions | `GET`/`PUT {base}/roles/{id}/permissions` |
//! | user permissions | `GET`/`PUT {base}/users/{username}/permissions` |
//!
//! Fetched permission payloads are normalised by [`FetchedPermissions::from_value`].
//! Saves are not retried.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use hrdesk_config::UpstreamConfig;
use hrdesk_core::permissions::PermissionSet;
use hrdesk_models::{FetchedPermissions, Role, RoleId, UpstreamUserSave};

use super::{PermissionStore, StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct HttpPermissionStore {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl HttpPermissionStore {
    pub fn new(config: UpstreamConfig) -> StoreResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid HR_API_BASE_URL `{}`: {e}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow::anyhow!("HR_API_BASE_URL `{}` cannot be a base URL", base_url).into());
        }

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url,
            api_token: config.api_token,
        })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let builder = self.client.request(method, self.url(segments));
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, subject: String) -> StoreResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), subject = %subject, "HR API responded");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::NOT_FOUND => StoreError::NotFound(subject),
            StatusCode::CONFLICT => StoreError::Conflict(body),
            _ => StoreError::Status {
                status: status.as_u16(),
                body,
            },
        })
    }
}

#[async_trait]
impl PermissionStore for HttpPermissionStore {
    #[instrument(skip(self))]
    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        let response = self
            .send(self.request(Method::GET, &["roles"]), "roles".into())
            .await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, permissions))]
    async fn create_role(&self, name: &str, permissions: &PermissionSet) -> StoreResult<Role> {
        let body = json!({ "name": name, "permissions": permissions.to_vec() });
        let response = self
            .send(
                self.request(Method::POST, &["roles"]).json(&body),
                format!("role {name}"),
            )
            .await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    async fn delete_role(&self, id: &RoleId) -> StoreResult<()> {
        self.send(
            self.request(Method::DELETE, &["roles", id.as_str()]),
            format!("role {id}"),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn role_permissions(&self, id: &RoleId) -> StoreResult<FetchedPermissions> {
        let response = self
            .send(
                self.request(Method::GET, &["roles", id.as_str(), "permissions"]),
                format!("role {id}"),
            )
            .await?;
        let value: Value = response.json().await?;
        Ok(FetchedPermissions::from_value(value))
    }

    #[instrument(skip(self, permissions), fields(count = permissions.len()))]
    async fn save_role_permissions(
        &self,
        id: &RoleId,
        permissions: &PermissionSet,
    ) -> StoreResult<()> {
        let body = json!({ "permissions": permissions.to_vec() });
        self.send(
            self.request(Method::PUT, &["roles", id.as_str(), "permissions"])
                .json(&body),
            format!("role {id}"),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn user_permissions(&self, username: &str) -> StoreResult<FetchedPermissions> {
        let response = self
            .send(
                self.request(Method::GET, &["users", username, "permissions"]),
                format!("user {username}"),
            )
            .await?;
        let value: Value = response.json().await?;
        Ok(FetchedPermissions::from_value(value))
    }

    #[instrument(skip(self, save), fields(username = %save.selected_user))]
    async fn save_user_permissions(&self, save: &UpstreamUserSave) -> StoreResult<()> {
        self.send(
            self.request(
                Method::PUT,
                &["users", save.selected_user.as_str(), "permissions"],
            )
            .json(save),
            format!("user {}", save.selected_user),
        )
        .await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
