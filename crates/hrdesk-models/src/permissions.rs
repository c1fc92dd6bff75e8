//! Permission engine DTOs and upstream fetch normalisation.

use hrdesk_core::permissions::{PermissionScope, PermissionSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use utoipa::ToSchema;
use validator::Validate;

/// Permission set as returned by an upstream fetch, after normalisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPermissions {
    pub permissions: PermissionSet,
    /// Upstream flag OR the `*:*:*` token
    pub is_super_user: bool,
}

/// Shapes the HR API has been seen to answer with.
#[derive(Deserialize)]
#[serde(untagged)]
enum PermissionsEnvelope {
    Wrapped {
        permissions: Vec<String>,
        #[serde(default, rename = "isSuperUser")]
        is_super_user: bool,
    },
    Bare(Vec<String>),
}

impl FetchedPermissions {
    pub fn new(permissions: PermissionSet, is_super_user: bool) -> Self {
        let is_super_user = is_super_user || permissions.is_super_user();
        Self {
            permissions,
            is_super_user,
        }
    }

    /// Accepts `{ "permissions": [...], "isSuperUser"?: bool }` or a bare
    /// array. Anything else yields an empty set.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<PermissionsEnvelope>(value) {
            Ok(PermissionsEnvelope::Wrapped {
                permissions,
                is_super_user,
            }) => Self::new(permissions.into(), is_super_user),
            Ok(PermissionsEnvelope::Bare(permissions)) => Self::new(permissions.into(), false),
            Err(err) => {
                warn!(error = %err, "Unexpected permissions payload, treating as empty");
                Self::default()
            }
        }
    }
}

/// One action of a module with the scopes it allows.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionSummary {
    pub action: String,
    #[schema(value_type = Vec<String>)]
    pub scopes: Vec<PermissionScope>,
}

/// Schema entry for one module, in display order.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleSummary {
    pub module: String,
    pub label: String,
    /// Union of scopes across the module's actions, in column order
    #[schema(value_type = Vec<String>)]
    pub scopes: Vec<PermissionScope>,
    pub actions: Vec<ActionSummary>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckPermissionDto {
    #[validate(length(min = 1, message = "Module is required"))]
    #[schema(example = "Leave")]
    pub module: String,
    #[validate(length(min = 1, message = "Action is required"))]
    #[schema(example = "approve")]
    pub action: String,
    /// `self`, `team`, `all` or `-`
    #[schema(example = "team")]
    pub scope: String,
    #[serde(default)]
    pub is_super_user: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckPermissionResponse {
    pub granted: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TogglePermissionDto {
    #[validate(length(min = 1, message = "Module is required"))]
    #[schema(example = "HRActivities")]
    pub module: String,
    #[validate(length(min = 1, message = "Action is required"))]
    #[schema(example = "create")]
    pub action: String,
    #[schema(example = "-")]
    pub scope: String,
    #[serde(default)]
    pub is_super_user: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Last-saved set; defaults to `permissions` as sent
    pub baseline: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TogglePermissionResponse {
    pub permissions: PermissionSet,
    pub has_changes: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DiffPermissionsDto {
    #[serde(default)]
    pub current: Vec<String>,
    #[serde(default)]
    pub baseline: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiffPermissionsResponse {
    pub has_changes: bool,
    /// In `current` but not in `baseline`
    pub added: Vec<String>,
    /// In `baseline` but not in `current`
    pub removed: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatrixDto {
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub is_super_user: bool,
}

/// Result of a role or user save.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveResponse {
    /// `false` when nothing changed and the HR API was not called
    pub saved: bool,
    pub permissions: PermissionSet,
}
