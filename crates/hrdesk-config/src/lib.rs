//! # HRDesk Config
//!
//! Configuration types for the HRDesk API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listen address
//! - [`upstream`]: Upstream HR API used to fetch and save permission sets
//! - [`schema`]: Location of the permission schema
//!
//! # Example
//!
//! ```ignore
//! use hrdesk_config::{CorsConfig, JwtConfig, SchemaConfig, ServerConfig, UpstreamConfig};
//!
//! // Load all configs from environment
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! let upstream_config = UpstreamConfig::from_env();
//! let schema = SchemaConfig::from_env().load()?;
//! ```

pub mod cors;
pub mod jwt;
pub mod schema;
pub mod server;
pub mod upstream;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use schema::SchemaConfig;
pub use server::ServerConfig;
pub use upstream::{StoreKind, UpstreamConfig};
