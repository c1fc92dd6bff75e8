//! Role models and DTOs for the role permission editor.

use crate::ids::RoleId;
use hrdesk_core::permissions::{ModuleMatrix, PermissionSet};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A role as stored by the HR API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    /// Absent from list responses of some HR API versions
    #[serde(default)]
    pub permissions: PermissionSet,
}

// DTOs

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRoleDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    #[schema(example = "Team Lead")]
    pub name: String,
    /// Initial permission tokens
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveRolePermissionsDto {
    pub permissions: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissionsResponse {
    pub role_id: RoleId,
    pub permissions: PermissionSet,
    pub is_super_user: bool,
    pub matrix: Vec<ModuleMatrix>,
}
