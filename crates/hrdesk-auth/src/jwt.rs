//! JWT (JSON Web Token) utilities for authentication.
//!
//! Tokens are HS256-signed with [`JwtConfig::secret`] and expire after
//! [`JwtConfig::access_token_expiry`] seconds.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use hrdesk_config::JwtConfig;
use hrdesk_core::AppError;

use crate::claims::Claims;

/// Creates an access token carrying the user's permission tokens.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
///
/// # Example
///
/// ```ignore
/// let token = create_access_token(
///     "hr-admin",
///     "hr-admin@example.com",
///     vec!["Permissions:view".to_string(), "Permissions:edit".to_string()],
///     false,
///     &jwt_config,
/// )?;
/// ```
pub fn create_access_token(
    username: &str,
    email: &str,
    permissions: Vec<String>,
    is_super_user: bool,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: username.to_string(),
        email: email.to_string(),
        permissions,
        is_super_user,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token has
/// expired, or the token is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_create_and_verify_roundtrip() {
        let config = config("test-secret");
        let token = create_access_token(
            "jdoe",
            "jdoe@example.com",
            vec!["Leave:apply:self".to_string()],
            false,
            &config,
        )
        .unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "jdoe");
        assert_eq!(claims.permissions, vec!["Leave:apply:self"]);
        assert!(!claims.is_super_user);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_with_wrong_secret_fails() {
        let token = create_access_token("jdoe", "jdoe@example.com", vec![], true, &config("a"))
            .unwrap();
        let err = verify_token(&token, &config("b")).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_verify_garbage_fails() {
        assert!(verify_token("not-a-jwt", &config("a")).is_err());
    }
}
