//! Command implementations.

use anyhow::{Context, Result};

use hrdesk_core::permissions::{
    PermissionSchema, PermissionScope, PermissionSet, PermissionToken, engine, humanize,
};

/// One line of the `modules` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLine {
    pub module: String,
    pub label: String,
    pub scopes: Vec<&'static str>,
}

pub fn load_schema(path: Option<&str>) -> Result<PermissionSchema> {
    match path {
        Some(path) => PermissionSchema::from_file(path)
            .with_context(|| format!("Failed to load schema from {path}")),
        None => PermissionSchema::builtin().context("Builtin schema is invalid"),
    }
}

pub fn modules(schema: &PermissionSchema) -> Vec<ModuleLine> {
    schema
        .list_modules()
        .iter()
        .map(|module| ModuleLine {
            module: module.clone(),
            label: humanize(module),
            scopes: schema
                .available_scopes(module)
                .into_iter()
                .map(PermissionScope::as_str)
                .collect(),
        })
        .collect()
}

/// Splits a comma-separated token list; blanks are skipped.
pub fn parse_csv(raw: &str) -> PermissionSet {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Decodes every token, then evaluates the grant.
pub fn check(
    module: &str,
    action: &str,
    scope: &str,
    is_super_user: bool,
    tokens: &[String],
) -> Result<bool> {
    let scope: PermissionScope = scope.parse()?;
    for token in tokens {
        token.parse::<PermissionToken>()?;
    }

    let permissions: PermissionSet = tokens.iter().map(String::as_str).collect();
    Ok(engine::has_permission(
        module,
        action,
        scope,
        is_super_user,
        &permissions,
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    pub has_changes: bool,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

pub fn diff(current: &PermissionSet, baseline: &PermissionSet) -> DiffReport {
    DiffReport {
        has_changes: engine::has_changes(current, baseline),
        added: current.difference(baseline),
        removed: baseline.difference(current),
    }
}
