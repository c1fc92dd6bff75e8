use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use hrdesk_core::AppError;

use crate::middleware::auth::{RequirePermissionsEdit, RequirePermissionsView};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateRoleDto, Role, RoleId, RolePermissionsResponse, SaveResponse, SaveRolePermissionsDto,
};
use super::service;

#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "Roles known to the HR API", body = Vec<Role>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 502, description = "HR API unavailable")
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
pub async fn get_roles(
    State(state): State<AppState>,
    _auth: RequirePermissionsView,
) -> Result<Json<Vec<Role>>, AppError> {
    Ok(Json(service::list_roles(state.store.as_ref()).await?))
}

#[utoipa::path(
    post,
    path = "/api/roles",
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Role name already taken"),
        (status = 422, description = "Validation failed or malformed token"),
        (status = 502, description = "HR API unavailable")
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
pub async fn create_role(
    State(state): State<AppState>,
    _auth: RequirePermissionsEdit,
    ValidatedJson(dto): ValidatedJson<CreateRoleDto>,
) -> Result<(StatusCode, Json<Role>), AppError> {
    let role = service::create_role(state.store.as_ref(), &state.schema, dto).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Role not found"),
        (status = 502, description = "HR API unavailable")
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
pub async fn delete_role(
    State(state): State<AppState>,
    _auth: RequirePermissionsEdit,
    Path(id): Path<RoleId>,
) -> Result<StatusCode, AppError> {
    service::delete_role(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/roles/{id}/permissions",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role permission set and matrix", body = RolePermissionsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Role not found")
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
pub async fn get_role_permissions(
    State(state): State<AppState>,
    _auth: RequirePermissionsView,
    Path(id): Path<RoleId>,
) -> Result<Json<RolePermissionsResponse>, AppError> {
    let response = service::get_role_permissions(state.store.as_ref(), &state.schema, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/roles/{id}/permissions",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    request_body = SaveRolePermissionsDto,
    responses(
        (status = 200, description = "Saved, or unchanged", body = SaveResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Role not found"),
        (status = 422, description = "Malformed token"),
        (status = 502, description = "HR API rejected the save")
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
pub async fn save_role_permissions(
    State(state): State<AppState>,
    _auth: RequirePermissionsEdit,
    Path(id): Path<RoleId>,
    ValidatedJson(dto): ValidatedJson<SaveRolePermissionsDto>,
) -> Result<Json<SaveResponse>, AppError> {
    let response =
        service::save_role_permissions(state.store.as_ref(), &state.schema, &id, dto).await?;
    Ok(Json(response))
}
