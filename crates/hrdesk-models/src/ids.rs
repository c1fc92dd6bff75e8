//! Identifier newtypes.
//!
//! Role ids are owned by the HR API and treated as opaque strings; the
//! newtype keeps them from being mixed up with usernames.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Opaque role identifier assigned by the HR API.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "manager")]
pub struct RoleId(pub String);

impl RoleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoleId({})", self.0)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RoleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RoleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for RoleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_id_is_transparent() {
        let id = RoleId::new("hr-manager");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""hr-manager""#);

        let parsed: RoleId = serde_json::from_str(r#""42""#).unwrap();
        assert_eq!(parsed.as_str(), "42");
    }

    #[test]
    fn test_debug_and_display() {
        let id = RoleId::from("admin");
        assert_eq!(format!("{id:?}"), "RoleId(admin)");
        assert_eq!(id.to_string(), "admin");
    }
}
