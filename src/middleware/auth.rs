use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use hrdesk_auth::{Claims, verify_token};
use hrdesk_core::AppError;
use hrdesk_core::permissions::{PermissionScope, PermissionSet, engine};

use crate::state::AppState;

/// Extractor that validates the bearer JWT and provides the caller's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn username(&self) -> &str {
        &self.0.sub
    }

    pub fn permissions(&self) -> PermissionSet {
        self.0.permission_set()
    }

    pub fn is_super_user(&self) -> bool {
        self.0.is_super_user
    }

    /// Same rule the editors use: exact token, `*:*:*`, or the super-user flag.
    pub fn has_permission(&self, module: &str, action: &str, scope: PermissionScope) -> bool {
        engine::has_permission(module, action, scope, self.0.is_super_user, &self.permissions())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Generates an extractor that requires a global `module:action` grant.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $module:literal, $action:literal) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = hrdesk_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                if !auth_user.has_permission(
                    $module,
                    $action,
                    hrdesk_core::permissions::PermissionScope::Global,
                ) {
                    tracing::warn!(
                        username = auth_user.username(),
                        required = concat!($module, ":", $action),
                        "Permission denied"
                    );
                    return Err(hrdesk_core::AppError::forbidden(concat!(
                        "Access denied. Missing required permission: ",
                        $module,
                        ":",
                        $action
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_permission!(RequirePermissionsView, "Permissions", "view");
require_permission!(RequirePermissionsEdit, "Permissions", "edit");

#[cfg(test)]
mod tests {
    use super::*;
    use hrdesk_core::permissions::Scope;

    fn auth_user(permissions: &[&str], is_super_user: bool) -> AuthUser {
        AuthUser(Claims {
            sub: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            is_super_user,
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_has_permission_global() {
        let user = auth_user(&["Permissions:view"], false);
        assert!(user.has_permission("Permissions", "view", PermissionScope::Global));
        assert!(!user.has_permission("Permissions", "edit", PermissionScope::Global));
    }

    #[test]
    fn test_has_permission_scoped() {
        let user = auth_user(&["Leave:approve:team"], false);
        let team = PermissionScope::Scoped(Scope::Team);
        let all = PermissionScope::Scoped(Scope::All);
        assert!(user.has_permission("Leave", "approve", team));
        assert!(!user.has_permission("Leave", "approve", all));
    }

    #[test]
    fn test_super_user_flag_and_token() {
        assert!(auth_user(&[], true).has_permission("Permissions", "edit", PermissionScope::Global));
        assert!(auth_user(&["*:*:*"], false).has_permission(
            "Salary",
            "manage",
            PermissionScope::Scoped(Scope::All)
        ));
    }

    #[test]
    fn test_username() {
        assert_eq!(auth_user(&[], false).username(), "jdoe");
    }
}
