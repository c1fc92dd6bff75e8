//! Permission model for HRDesk.
//!
//! Grants are flat, colon-delimited tokens checked by exact string equality:
//!
//! - `Module:action:scope` for scoped actions (`self`, `team`, `all`)
//! - `Module:action` for global actions (schema scope `-`)
//! - `*:*:*` for the super-user, which grants everything
//!
//! Tokens stay strings on the wire and inside [`PermissionSet`]; they are
//! decoded into [`PermissionToken`] only where their structure matters.
//!
//! # Example
//!
//! ```ignore
//! use hrdesk_core::permissions::{self, PermissionScope, PermissionSet, Scope};
//! use hrdesk_core::permissions::engine::has_permission;
//!
//! let set: PermissionSet = ["Leave:apply:self", "HRActivities:create"].into_iter().collect();
//!
//! assert!(has_permission("Leave", "apply", PermissionScope::Scoped(Scope::Own), false, &set));
//! assert!(has_permission("HRActivities", "create", PermissionScope::Global, false, &set));
//! assert!(!has_permission(
//!     permissions::PERMISSIONS_MODULE,
//!     permissions::EDIT,
//!     PermissionScope::Global,
//!     false,
//!     &set,
//! ));
//! ```

pub mod editor;
pub mod engine;
pub mod schema;
pub mod scope;
pub mod set;
pub mod token;

pub use editor::PermissionEditor;
pub use schema::{
    ActionRow, CellState, MatrixCell, ModuleMatrix, PermissionSchema, SchemaError, humanize,
};
pub use scope::{InvalidScope, PermissionScope, SCOPE_COLUMNS, Scope};
pub use set::PermissionSet;
pub use token::{PermissionToken, SUPER_USER_TOKEN, TokenError};

// =============================================================================
// Permissions for the permission editors themselves
// =============================================================================

/// Schema module guarding the permission editors
pub const PERMISSIONS_MODULE: &str = "Permissions";
/// Action to read schemas, roles, and permission sets
pub const VIEW: &str = "view";
/// Action to change roles and permission sets
pub const EDIT: &str = "edit";
