//! Static permission schema: modules, their actions, and each action's
//! allowed scopes.
//!
//! The schema is loaded once at start-up and never mutated; callers share it
//! behind an `Arc`. Module ordering is computed at load time and is part of
//! the contract: editors and tests rely on [`PermissionSchema::list_modules`]
//! returning the same order every time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use utoipa::ToSchema;

use super::engine::has_permission;
use super::scope::{PermissionScope, SCOPE_COLUMNS};
use super::set::PermissionSet;
use super::token::{PermissionToken, TokenError, validate_segment};

const BUILTIN_SCHEMA: &str = include_str!("../../schema/permission_schema.json");

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read permission schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid permission schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {kind} name `{name}`: {source}")]
    InvalidName {
        kind: &'static str,
        name: String,
        #[source]
        source: TokenError,
    },

    #[error("module `{0}` defines no actions")]
    EmptyModule(String),

    #[error("action `{module}:{action}` lists no scopes")]
    EmptyScopes { module: String, action: String },

    #[error("action `{module}:{action}` lists invalid scope `{scope}`")]
    InvalidScope {
        module: String,
        action: String,
        scope: String,
    },

    #[error("action `{module}:{action}` lists scope `{scope}` more than once")]
    DuplicateScope {
        module: String,
        action: String,
        scope: String,
    },

    #[error("action `{module}:{action}` mixes `-` with self/team/all")]
    MixedGlobalScope { module: String, action: String },
}

/// Schema as written in JSON, before validation.
pub type RawSchema = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Actions of one module with their allowed scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDefinition {
    actions: BTreeMap<String, Vec<PermissionScope>>,
}

impl ModuleDefinition {
    /// Actions sorted by name.
    pub fn actions(&self) -> impl Iterator<Item = (&str, &[PermissionScope])> {
        self.actions
            .iter()
            .map(|(name, scopes)| (name.as_str(), scopes.as_slice()))
    }

    pub fn allowed_scopes(&self, action: &str) -> Option<&[PermissionScope]> {
        self.actions.get(action).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone)]
pub struct PermissionSchema {
    modules: BTreeMap<String, ModuleDefinition>,
    ordered: Vec<String>,
}

impl PermissionSchema {
    /// The schema shipped with the binary.
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::from_json(BUILTIN_SCHEMA)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parses `{ "Module": { "action": ["self", "team", ...] } }`.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let raw: RawSchema = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawSchema) -> Result<Self, SchemaError> {
        let mut modules = BTreeMap::new();

        for (module, raw_actions) in raw {
            validate_segment(&module, &module).map_err(|source| SchemaError::InvalidName {
                kind: "module",
                name: module.clone(),
                source,
            })?;
            if raw_actions.is_empty() {
                return Err(SchemaError::EmptyModule(module));
            }

            let mut actions = BTreeMap::new();
            for (action, raw_scopes) in raw_actions {
                validate_segment(&action, &action).map_err(|source| SchemaError::InvalidName {
                    kind: "action",
                    name: action.clone(),
                    source,
                })?;
                let scopes = parse_scopes(&module, &action, &raw_scopes)?;
                actions.insert(action, scopes);
            }

            modules.insert(module, ModuleDefinition { actions });
        }

        let mut ordered: Vec<String> = modules.keys().cloned().collect();
        ordered.sort_by_cached_key(|module| (humanize(module).to_lowercase(), module.clone()));

        debug!(modules = ordered.len(), "Permission schema loaded");

        Ok(Self { modules, ordered })
    }

    /// Module identifiers sorted by their case-folded human-readable label.
    pub fn list_modules(&self) -> &[String] {
        &self.ordered
    }

    pub fn module(&self, module: &str) -> Option<&ModuleDefinition> {
        self.modules.get(module)
    }

    pub fn allowed_scopes(&self, module: &str, action: &str) -> Option<&[PermissionScope]> {
        self.module(module)?.allowed_scopes(action)
    }

    /// Scope columns used by at least one action of `module`, in
    /// `self, team, all, -` order. Unknown modules have no columns.
    pub fn available_scopes(&self, module: &str) -> Vec<PermissionScope> {
        let Some(definition) = self.module(module) else {
            return Vec::new();
        };

        SCOPE_COLUMNS
            .into_iter()
            .filter(|column| {
                definition
                    .actions
                    .values()
                    .any(|scopes| scopes.contains(column))
            })
            .collect()
    }

    /// Whether the schema has an entry for this grant. The super-user token
    /// is always defined.
    pub fn defines(&self, token: &PermissionToken) -> bool {
        match token {
            PermissionToken::SuperUser => true,
            PermissionToken::Grant {
                module,
                action,
                scope,
            } => self
                .allowed_scopes(module, action)
                .is_some_and(|scopes| scopes.contains(scope)),
        }
    }

    /// Permission matrix for an editor: one entry per module in
    /// [`list_modules`](Self::list_modules) order, one cell per scope column.
    pub fn matrix(&self, permissions: &PermissionSet, is_super_user: bool) -> Vec<ModuleMatrix> {
        self.ordered
            .iter()
            .filter_map(|module| {
                let definition = self.modules.get(module)?;
                let scopes = self.available_scopes(module);

                let actions = definition
                    .actions()
                    .map(|(action, allowed)| ActionRow {
                        action: action.to_string(),
                        cells: scopes
                            .iter()
                            .map(|&scope| MatrixCell {
                                scope,
                                state: if !allowed.contains(&scope) {
                                    CellState::Unavailable
                                } else if has_permission(
                                    module,
                                    action,
                                    scope,
                                    is_super_user,
                                    permissions,
                                ) {
                                    CellState::Granted
                                } else {
                                    CellState::Denied
                                },
                            })
                            .collect(),
                    })
                    .collect();

                Some(ModuleMatrix {
                    module: module.clone(),
                    label: humanize(module),
                    scopes,
                    actions,
                })
            })
            .collect()
    }
}

fn parse_scopes(
    module: &str,
    action: &str,
    raw_scopes: &[String],
) -> Result<Vec<PermissionScope>, SchemaError> {
    if raw_scopes.is_empty() {
        return Err(SchemaError::EmptyScopes {
            module: module.to_string(),
            action: action.to_string(),
        });
    }

    let mut scopes: Vec<PermissionScope> = Vec::with_capacity(raw_scopes.len());
    for raw in raw_scopes {
        let scope: PermissionScope = raw.parse().map_err(|_| SchemaError::InvalidScope {
            module: module.to_string(),
            action: action.to_string(),
            scope: raw.clone(),
        })?;
        if scopes.contains(&scope) {
            return Err(SchemaError::DuplicateScope {
                module: module.to_string(),
                action: action.to_string(),
                scope: raw.clone(),
            });
        }
        scopes.push(scope);
    }

    if scopes.len() > 1 && scopes.contains(&PermissionScope::Global) {
        return Err(SchemaError::MixedGlobalScope {
            module: module.to_string(),
            action: action.to_string(),
        });
    }

    scopes.sort();
    Ok(scopes)
}

/// Expands word boundaries of an identifier into spaces:
/// `TrainingAndDevelopment` becomes `Training And Development`,
/// `HRActivities` becomes `HR Activities`. Underscores become spaces.
pub fn humanize(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut label = String::with_capacity(identifier.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !label.is_empty() && !label.ends_with(' ') {
                label.push(' ');
            }
            continue;
        }

        if i > 0 && c.is_uppercase() && !label.ends_with(' ') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                label.push(' ');
            }
        }
        label.push(c);
    }

    label.trim_end().to_string()
}

/// Grant state of one matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    /// The action does not allow this scope
    Unavailable,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MatrixCell {
    #[schema(value_type = String, example = "team")]
    pub scope: PermissionScope,
    pub state: CellState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActionRow {
    pub action: String,
    pub cells: Vec<MatrixCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModuleMatrix {
    pub module: String,
    pub label: String,
    #[schema(value_type = Vec<String>)]
    pub scopes: Vec<PermissionScope>,
    pub actions: Vec<ActionRow>,
}
