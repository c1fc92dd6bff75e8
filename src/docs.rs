use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::permissions::model::{
    ActionRow, ActionSummary, CellState, CheckPermissionDto, CheckPermissionResponse,
    DiffPermissionsDto, DiffPermissionsResponse, MatrixCell, MatrixDto, ModuleMatrix,
    ModuleSummary, SaveResponse, TogglePermissionDto, TogglePermissionResponse,
};
use crate::modules::roles::model::{
    CreateRoleDto, Role, RoleId, RolePermissionsResponse, SaveRolePermissionsDto,
};
use crate::modules::users::model::{
    PreviewRoleDto, PreviewRoleResponse, SaveUserPermissionsDto, UserPermissionsResponse,
};
use hrdesk_core::permissions::PermissionSet;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::permissions::controller::get_schema,
        crate::modules::permissions::controller::check_permission,
        crate::modules::permissions::controller::toggle_permission,
        crate::modules::permissions::controller::diff_permissions,
        crate::modules::permissions::controller::permission_matrix,
        crate::modules::roles::controller::get_roles,
        crate::modules::roles::controller::create_role,
        crate::modules::roles::controller::delete_role,
        crate::modules::roles::controller::get_role_permissions,
        crate::modules::roles::controller::save_role_permissions,
        crate::modules::users::controller::get_user_permissions,
        crate::modules::users::controller::preview_role,
        crate::modules::users::controller::save_user_permissions,
    ),
    components(
        schemas(
            PermissionSet,
            ModuleSummary,
            ActionSummary,
            ModuleMatrix,
            ActionRow,
            MatrixCell,
            CellState,
            CheckPermissionDto,
            CheckPermissionResponse,
            TogglePermissionDto,
            TogglePermissionResponse,
            DiffPermissionsDto,
            DiffPermissionsResponse,
            MatrixDto,
            SaveResponse,
            Role,
            RoleId,
            CreateRoleDto,
            SaveRolePermissionsDto,
            RolePermissionsResponse,
            UserPermissionsResponse,
            PreviewRoleDto,
            PreviewRoleResponse,
            SaveUserPermissionsDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Permissions", description = "Permission schema and engine operations"),
        (name = "Roles", description = "Role permission editor"),
        (name = "Users", description = "User permission editor")
    ),
    info(
        title = "HRDesk Permissions API",
        version = "0.1.0",
        description = "Permission editors for the HRDesk HR application, backed by the HR REST API.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
