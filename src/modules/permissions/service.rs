use tracing::{instrument, warn};

use hrdesk_core::AppError;
use hrdesk_core::permissions::{
    ModuleMatrix, PermissionSchema, PermissionScope, PermissionSet, PermissionToken, engine,
};

use super::model::{
    ActionSummary, CheckPermissionDto, CheckPermissionResponse, DiffPermissionsDto,
    DiffPermissionsResponse, MatrixDto, ModuleSummary, TogglePermissionDto,
    TogglePermissionResponse,
};

/// Decodes an incoming token array. Malformed tokens are rejected; tokens
/// the schema does not define are kept and logged.
pub fn decode_tokens(
    schema: &PermissionSchema,
    tokens: Vec<String>,
) -> Result<PermissionSet, AppError> {
    decode_tokens_over(schema, tokens, &PermissionSet::new())
}

/// Decodes a token array that will replace `saved`. Strings the HR API
/// already holds pass through as-is, even when they do not decode.
pub fn decode_tokens_over(
    schema: &PermissionSchema,
    tokens: Vec<String>,
    saved: &PermissionSet,
) -> Result<PermissionSet, AppError> {
    for raw in tokens.iter().filter(|raw| !saved.contains(raw.as_str())) {
        let token: PermissionToken = raw.parse().map_err(AppError::unprocessable)?;
        if !schema.defines(&token) {
            warn!(token = %raw, "Token is not defined by the permission schema");
        }
    }

    Ok(tokens.into())
}

/// Parses a wire scope identifier (`self`, `team`, `all` or `-`).
pub fn parse_scope(scope: &str) -> Result<PermissionScope, AppError> {
    scope.parse().map_err(AppError::unprocessable)
}

pub fn schema_summary(schema: &PermissionSchema) -> Vec<ModuleSummary> {
    schema
        .list_modules()
        .iter()
        .filter_map(|module| {
            let definition = schema.module(module)?;
            Some(ModuleSummary {
                module: module.clone(),
                label: hrdesk_core::permissions::humanize(module),
                scopes: schema.available_scopes(module),
                actions: definition
                    .actions()
                    .map(|(action, scopes)| ActionSummary {
                        action: action.to_string(),
                        scopes: scopes.to_vec(),
                    })
                    .collect(),
            })
        })
        .collect()
}

#[instrument(skip(schema, dto), fields(module = %dto.module, action = %dto.action, scope = %dto.scope))]
pub fn check(
    schema: &PermissionSchema,
    dto: CheckPermissionDto,
) -> Result<CheckPermissionResponse, AppError> {
    let scope = parse_scope(&dto.scope)?;
    let permissions = decode_tokens(schema, dto.permissions)?;

    Ok(CheckPermissionResponse {
        granted: engine::has_permission(
            &dto.module,
            &dto.action,
            scope,
            dto.is_super_user,
            &permissions,
        ),
    })
}

#[instrument(skip(schema, dto), fields(module = %dto.module, action = %dto.action, scope = %dto.scope))]
pub fn toggle(
    schema: &PermissionSchema,
    dto: TogglePermissionDto,
) -> Result<TogglePermissionResponse, AppError> {
    let scope = parse_scope(&dto.scope)?;
    let permissions = decode_tokens(schema, dto.permissions)?;
    let baseline = match dto.baseline {
        Some(baseline) => decode_tokens(schema, baseline)?,
        None => permissions.clone(),
    };

    if !schema.defines(&PermissionToken::grant(&dto.module, &dto.action, scope)) {
        warn!("Toggling a grant the permission schema does not define");
    }

    let next = engine::toggle_permission(
        &dto.module,
        &dto.action,
        scope,
        dto.is_super_user || permissions.is_super_user(),
        &permissions,
    );

    Ok(TogglePermissionResponse {
        has_changes: engine::has_changes(&next, &baseline),
        permissions: next,
    })
}

pub fn diff(
    schema: &PermissionSchema,
    dto: DiffPermissionsDto,
) -> Result<DiffPermissionsResponse, AppError> {
    let current = decode_tokens(schema, dto.current)?;
    let baseline = decode_tokens(schema, dto.baseline)?;

    Ok(DiffPermissionsResponse {
        has_changes: engine::has_changes(&current, &baseline),
        added: current.difference(&baseline),
        removed: baseline.difference(&current),
    })
}

pub fn matrix(schema: &PermissionSchema, dto: MatrixDto) -> Result<Vec<ModuleMatrix>, AppError> {
    let permissions = decode_tokens(schema, dto.permissions)?;
    let is_super_user = dto.is_super_user || permissions.is_super_user();
    Ok(schema.matrix(&permissions, is_super_user))
}
