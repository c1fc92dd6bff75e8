use axum::{
    Json,
    extract::{Path, State},
};

use hrdesk_core::AppError;

use crate::middleware::auth::{RequirePermissionsEdit, RequirePermissionsView};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    PreviewRoleDto, PreviewRoleResponse, SaveResponse, SaveUserPermissionsDto,
    UserPermissionsResponse,
};
use super::service;

#[utoipa::path(
    get,
    path = "/api/users/{username}/permissions",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "User permission set, super-user flag and matrix", body = UserPermissionsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_user_permissions(
    State(state): State<AppState>,
    _auth: RequirePermissionsView,
    Path(username): Path<String>,
) -> Result<Json<UserPermissionsResponse>, AppError> {
    let response =
        service::get_user_permissions(state.store.as_ref(), &state.schema, username).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/users/{username}/permissions/preview",
    params(
        ("username" = String, Path, description = "Username")
    ),
    request_body = PreviewRoleDto,
    responses(
        (status = 200, description = "Merged set for the selected role", body = PreviewRoleResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User or role not found"),
        (status = 422, description = "Malformed token")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn preview_role(
    State(state): State<AppState>,
    _auth: RequirePermissionsView,
    Path(username): Path<String>,
    ValidatedJson(dto): ValidatedJson<PreviewRoleDto>,
) -> Result<Json<PreviewRoleResponse>, AppError> {
    let response =
        service::preview_role(state.store.as_ref(), &state.schema, &username, dto).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/users/{username}/permissions",
    params(
        ("username" = String, Path, description = "Username")
    ),
    request_body = SaveUserPermissionsDto,
    responses(
        (status = 200, description = "Saved, or unchanged", body = SaveResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Malformed token"),
        (status = 502, description = "HR API rejected the save")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn save_user_permissions(
    State(state): State<AppState>,
    _auth: RequirePermissionsEdit,
    Path(username): Path<String>,
    ValidatedJson(dto): ValidatedJson<SaveUserPermissionsDto>,
) -> Result<Json<SaveResponse>, AppError> {
    let response =
        service::save_user_permissions(state.store.as_ref(), &state.schema, &username, dto)
            .await?;
    Ok(Json(response))
}
