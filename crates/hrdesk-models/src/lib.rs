//! # HRDesk Models
//!
//! Request/response DTOs for the HRDesk API and the payloads exchanged with
//! the upstream HR API.
//!
//! # Modules
//!
//! - [`ids`]: Opaque identifier newtypes
//! - [`permissions`]: Engine request/response DTOs and upstream fetch normalisation
//! - [`roles`]: Role models and role-editor DTOs
//! - [`users`]: User-editor DTOs
//!
//! # Example
//!
//! ```ignore
//! use hrdesk_models::permissions::FetchedPermissions;
//!
//! let body = serde_json::json!({ "permissions": ["Leave:apply:self"] });
//! let fetched = FetchedPermissions::from_value(body);
//! assert!(!fetched.is_super_user);
//! ```

pub mod ids;
pub mod permissions;
pub mod roles;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use ids::RoleId;

pub use permissions::{
    ActionSummary, CheckPermissionDto, CheckPermissionResponse, DiffPermissionsDto,
    DiffPermissionsResponse, FetchedPermissions, MatrixDto, ModuleSummary, SaveResponse,
    TogglePermissionDto, TogglePermissionResponse,
};

pub use roles::{CreateRoleDto, Role, RolePermissionsResponse, SaveRolePermissionsDto};

pub use users::{
    PreviewRoleDto, PreviewRoleResponse, SaveUserPermissionsDto, UpstreamUserSave,
    UserPermissionsResponse,
};
