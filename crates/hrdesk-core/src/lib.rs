//! # HRDesk Core
//!
//! Core types, errors, and the permission engine for the HRDesk API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`permissions`]: Permission schema, tokens, sets, and the editing rules
//!   shared by the role and user permission editors
//!
//! # Example
//!
//! ```ignore
//! use hrdesk_core::permissions::{PermissionSchema, PermissionScope, PermissionSet, Scope};
//! use hrdesk_core::permissions::engine::{has_permission, toggle_permission};
//!
//! let schema = PermissionSchema::builtin()?;
//! let set = toggle_permission(
//!     "Leave",
//!     "apply",
//!     PermissionScope::Scoped(Scope::Own),
//!     false,
//!     &PermissionSet::new(),
//! );
//! assert!(has_permission("Leave", "apply", PermissionScope::Scoped(Scope::Own), false, &set));
//! ```

pub mod errors;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use permissions::{
    PermissionEditor, PermissionSchema, PermissionScope, PermissionSet, PermissionToken, Scope,
    SchemaError, TokenError,
};
