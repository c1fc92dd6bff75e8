//! # HRDesk CLI
//!
//! Offline tools over the permission engine: list schema modules, validate
//! a schema file, check a grant and diff two token sets.
//!
//! The functions here return plain values so the binary only formats and
//! sets the exit code.
//!
//! ## Usage
//!
//! ```ignore
//! use hrdesk_cli::commands::{diff, parse_csv};
//!
//! let report = diff(&parse_csv("Leave:apply:self"), &parse_csv(""));
//! assert!(report.has_changes);
//! ```

pub mod commands;
