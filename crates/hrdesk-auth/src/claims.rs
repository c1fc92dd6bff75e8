//! JWT claim structure for access tokens.

use hrdesk_core::permissions::PermissionSet;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// # Fields
///
/// - `sub`: Username (subject)
/// - `email`: User's email address
/// - `permissions`: Permission tokens granted to the user
/// - `is_super_user`: Super-user flag, equivalent to holding `*:*:*`
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Username (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Permission tokens granted to the user
    pub permissions: Vec<String>,
    /// Super-user flag
    #[serde(default)]
    pub is_super_user: bool,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn permission_set(&self) -> PermissionSet {
        self.permissions.iter().map(String::as_str).collect()
    }
}
