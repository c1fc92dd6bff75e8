//! Permission scopes.
//!
//! The schema and the wire use four scope identifiers: `self`, `team`, `all`
//! and `-`. The dash marks an action without a breadth concept. Inside the
//! crate that case is [`PermissionScope::Global`]; the dash string only
//! appears in [`PermissionScope::as_str`] and its `FromStr` counterpart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const GLOBAL: &str = "-";

/// Breadth of a scoped grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// Own records only (`self`)
    Own,
    /// Direct reports (`team`)
    Team,
    /// Organisation-wide (`all`)
    All,
}

impl Scope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Scope::Own => "self",
            Scope::Team => "team",
            Scope::All => "all",
        }
    }
}

/// Scope of one action: a real breadth, or a global boolean grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum PermissionScope {
    Scoped(Scope),
    Global,
}

/// Scope columns in display order.
pub const SCOPE_COLUMNS: [PermissionScope; 4] = [
    PermissionScope::Scoped(Scope::Own),
    PermissionScope::Scoped(Scope::Team),
    PermissionScope::Scoped(Scope::All),
    PermissionScope::Global,
];

impl PermissionScope {
    pub const fn as_str(self) -> &'static str {
        match self {
            PermissionScope::Scoped(scope) => scope.as_str(),
            PermissionScope::Global => GLOBAL,
        }
    }

    pub const fn is_global(self) -> bool {
        matches!(self, PermissionScope::Global)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scope `{0}`, expected one of: self, team, all, -")]
pub struct InvalidScope(pub String);

impl FromStr for PermissionScope {
    type Err = InvalidScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self" => Ok(PermissionScope::Scoped(Scope::Own)),
            "team" => Ok(PermissionScope::Scoped(Scope::Team)),
            "all" => Ok(PermissionScope::Scoped(Scope::All)),
            GLOBAL => Ok(PermissionScope::Global),
            other => Err(InvalidScope(other.to_string())),
        }
    }
}

impl TryFrom<String> for PermissionScope {
    type Error = InvalidScope;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PermissionScope> for &'static str {
    fn from(scope: PermissionScope) -> Self {
        scope.as_str()
    }
}

impl fmt::Display for PermissionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
