//! # HRDesk Auth
//!
//! Authentication types and JWT utilities for the HRDesk API.
//!
//! This crate provides:
//!
//! - [`claims`]: JWT claim structure for access tokens
//! - [`jwt`]: Token creation and verification utilities
//!
//! Access tokens carry the caller's permission tokens and super-user flag,
//! so authorization needs no upstream lookup.
//!
//! # Example
//!
//! ```ignore
//! use hrdesk_auth::{create_access_token, verify_token};
//! use hrdesk_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//!
//! let token = create_access_token(
//!     "jdoe",
//!     "jdoe@example.com",
//!     vec!["Permissions:view".to_string()],
//!     false,
//!     &config,
//! )?;
//!
//! let claims = verify_token(&token, &config)?;
//! println!("User: {}", claims.sub);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
