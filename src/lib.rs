//! # HRDesk Permissions API
//!
//! Backend for the role and user permission editors of the HRDesk HR
//! application, built with Axum.
//!
//! ## Overview
//!
//! Permissions are flat sets of tokens checked against a static schema of
//! modules, actions and scopes:
//!
//! | Token | Meaning |
//! |---|---|
//! | `Leave:approve:team` | approve leave for direct reports |
//! | `HRActivities:create` | global grant, the action has no scope |
//! | `*:*:*` | super-user, every permission |
//!
//! The engine lives in `hrdesk-core`. This crate exposes it over HTTP and
//! brokers fetch/save of role and user sets to the HR REST API, which owns
//! them.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # JWT extractor and permission guards
//! ├── modules/          # Feature modules
//! │   ├── permissions/ # Schema, check, toggle, diff, matrix
//! │   ├── roles/       # Role permission editor
//! │   └── users/       # User permission editor
//! └── store/            # Upstream HR API client and in-memory store
//! ```
//!
//! Each feature module has `controller.rs` (handlers), `service.rs`
//! (logic), `model.rs` (DTOs) and `router.rs`.
//!
//! ## Authentication
//!
//! Every `/api` route requires a bearer JWT whose claims carry the caller's
//! permission tokens. Read routes need `Permissions:view`, writes need
//! `Permissions:edit`.
//!
//! ## Environment Variables
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key
//! PERMISSION_STORE=http            # or memory
//! HR_API_BASE_URL=http://localhost:8080/api
//! PERMISSION_SCHEMA_PATH=./permission_schema.json   # optional
//! LOG_FORMAT=json                  # optional
//! ```
//!
//! Swagger UI is served at `/swagger-ui`.

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod store;
pub mod validator;

// Re-export workspace crates for convenience
pub use hrdesk_auth;
pub use hrdesk_config;
pub use hrdesk_core;
pub use hrdesk_models;
