use axum::{Json, extract::State};

use hrdesk_core::AppError;

use crate::middleware::auth::{RequirePermissionsEdit, RequirePermissionsView};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CheckPermissionDto, CheckPermissionResponse, DiffPermissionsDto, DiffPermissionsResponse,
    MatrixDto, ModuleMatrix, ModuleSummary, TogglePermissionDto, TogglePermissionResponse,
};
use super::service;

#[utoipa::path(
    get,
    path = "/api/permissions/schema",
    responses(
        (status = 200, description = "Modules in display order with their actions and scopes", body = Vec<ModuleSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn get_schema(
    State(state): State<AppState>,
    _auth: RequirePermissionsView,
) -> Json<Vec<ModuleSummary>> {
    Json(service::schema_summary(&state.schema))
}

#[utoipa::path(
    post,
    path = "/api/permissions/check",
    request_body = CheckPermissionDto,
    responses(
        (status = 200, description = "Whether the set grants the permission", body = CheckPermissionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Malformed token or scope")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn check_permission(
    State(state): State<AppState>,
    _auth: RequirePermissionsView,
    ValidatedJson(dto): ValidatedJson<CheckPermissionDto>,
) -> Result<Json<CheckPermissionResponse>, AppError> {
    Ok(Json(service::check(&state.schema, dto)?))
}

#[utoipa::path(
    post,
    path = "/api/permissions/toggle",
    request_body = TogglePermissionDto,
    responses(
        (status = 200, description = "Set with the grant flipped", body = TogglePermissionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Malformed token or scope")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn toggle_permission(
    State(state): State<AppState>,
    _auth: RequirePermissionsEdit,
    ValidatedJson(dto): ValidatedJson<TogglePermissionDto>,
) -> Result<Json<TogglePermissionResponse>, AppError> {
    Ok(Json(service::toggle(&state.schema, dto)?))
}

#[utoipa::path(
    post,
    path = "/api/permissions/diff",
    request_body = DiffPermissionsDto,
    responses(
        (status = 200, description = "Order-independent comparison", body = DiffPermissionsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Malformed token")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn diff_permissions(
    State(state): State<AppState>,
    _auth: RequirePermissionsView,
    ValidatedJson(dto): ValidatedJson<DiffPermissionsDto>,
) -> Result<Json<DiffPermissionsResponse>, AppError> {
    Ok(Json(service::diff(&state.schema, dto)?))
}

#[utoipa::path(
    post,
    path = "/api/permissions/matrix",
    request_body = MatrixDto,
    responses(
        (status = 200, description = "Grant matrix for every module", body = Vec<ModuleMatrix>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Malformed token")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn permission_matrix(
    State(state): State<AppState>,
    _auth: RequirePermissionsView,
    ValidatedJson(dto): ValidatedJson<MatrixDto>,
) -> Result<Json<Vec<ModuleMatrix>>, AppError> {
    Ok(Json(service::matrix(&state.schema, dto)?))
}
