//! DTOs for the user permission editor.

use crate::ids::RoleId;
use hrdesk_core::permissions::{ModuleMatrix, PermissionSet};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissionsResponse {
    pub username: String,
    pub permissions: PermissionSet,
    pub is_super_user: bool,
    pub matrix: Vec<ModuleMatrix>,
}

/// Merges a role over the user's own set without saving.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRoleDto {
    /// `null` previews the user's own set
    pub selected_role: Option<RoleId>,
    /// The user's own set with unsaved edits; fetched from the HR API when absent
    pub permissions: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRoleResponse {
    pub permissions: PermissionSet,
    pub is_super_user: bool,
    pub selected_role: Option<RoleId>,
    /// Whether the preview differs from the user's saved set
    pub has_changes: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserPermissionsDto {
    pub permissions: Vec<String>,
    #[serde(default)]
    pub selected_role: Option<RoleId>,
}

/// Body of the HR API user save call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamUserSave {
    /// Sorted
    pub permissions: Vec<String>,
    pub selected_user: String,
    pub selected_role: Option<RoleId>,
}

impl UpstreamUserSave {
    pub fn new(username: &str, permissions: &PermissionSet, selected_role: Option<RoleId>) -> Self {
        Self {
            permissions: permissions.to_vec(),
            selected_user: username.to_string(),
            selected_role,
        }
    }
}
