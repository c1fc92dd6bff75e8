//! Encoding and decoding of permission tokens.
//!
//! The string form is load-bearing: upstream services compare tokens by
//! exact equality, so `encode(decode(s)) == s` for every accepted `s`.

use std::fmt;
use std::str::FromStr;

use super::scope::{PermissionScope, Scope};

/// Token granting every permission.
pub const SUPER_USER_TOKEN: &str = "*:*:*";

const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token `{token}` has {count} segments, expected 2 or 3")]
    SegmentCount { token: String, count: usize },

    #[error("token `{0}` has an empty segment")]
    EmptySegment(String),

    #[error("token `{0}` uses `*` outside the super-user token")]
    Wildcard(String),

    #[error("token `{0}` contains non-ASCII or whitespace characters")]
    InvalidCharacters(String),

    #[error("token `{token}` has invalid scope `{scope}`")]
    InvalidScope { token: String, scope: String },

    #[error("token `{0}` spells out the global scope; global grants have two segments")]
    ExplicitGlobalScope(String),
}

/// Decoded permission token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PermissionToken {
    SuperUser,
    Grant {
        module: String,
        action: String,
        scope: PermissionScope,
    },
}

impl PermissionToken {
    pub fn grant(
        module: impl Into<String>,
        action: impl Into<String>,
        scope: PermissionScope,
    ) -> Self {
        PermissionToken::Grant {
            module: module.into(),
            action: action.into(),
            scope,
        }
    }

    /// Wire form of a grant without building a token first.
    pub fn encode(module: &str, action: &str, scope: PermissionScope) -> String {
        match scope {
            PermissionScope::Global => format!("{module}:{action}"),
            PermissionScope::Scoped(scope) => format!("{module}:{action}:{}", scope.as_str()),
        }
    }

    pub fn is_super_user(&self) -> bool {
        matches!(self, PermissionToken::SuperUser)
    }
}

impl fmt::Display for PermissionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionToken::SuperUser => f.write_str(SUPER_USER_TOKEN),
            PermissionToken::Grant {
                module,
                action,
                scope,
            } => f.write_str(&Self::encode(module, action, *scope)),
        }
    }
}

impl FromStr for PermissionToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == SUPER_USER_TOKEN {
            return Ok(PermissionToken::SuperUser);
        }

        let segments: Vec<&str> = s.split(':').collect();
        match segments.as_slice() {
            [module, action] => {
                validate_segment(s, module)?;
                validate_segment(s, action)?;
                Ok(PermissionToken::grant(*module, *action, PermissionScope::Global))
            }
            [module, action, scope] => {
                validate_segment(s, module)?;
                validate_segment(s, action)?;
                let scope = match *scope {
                    "self" => Scope::Own,
                    "team" => Scope::Team,
                    "all" => Scope::All,
                    "-" => return Err(TokenError::ExplicitGlobalScope(s.to_string())),
                    other => {
                        return Err(TokenError::InvalidScope {
                            token: s.to_string(),
                            scope: other.to_string(),
                        });
                    }
                };
                Ok(PermissionToken::grant(
                    *module,
                    *action,
                    PermissionScope::Scoped(scope),
                ))
            }
            _ => Err(TokenError::SegmentCount {
                token: s.to_string(),
                count: segments.len(),
            }),
        }
    }
}

/// Checks one module or action segment. Schema names go through the same
/// rules so every schema entry can be encoded into a token.
pub(crate) fn validate_segment(token: &str, segment: &str) -> Result<(), TokenError> {
    if segment.is_empty() {
        return Err(TokenError::EmptySegment(token.to_string()));
    }
    if segment == WILDCARD {
        return Err(TokenError::Wildcard(token.to_string()));
    }
    if !segment
        .chars()
        .all(|c| c.is_ascii() && !c.is_ascii_whitespace() && c != ':')
    {
        return Err(TokenError::InvalidCharacters(token.to_string()));
    }
    Ok(())
}
