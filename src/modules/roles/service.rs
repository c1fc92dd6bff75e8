use tracing::{info, instrument};

use hrdesk_core::AppError;
use hrdesk_core::permissions::{PermissionSchema, engine};

use crate::modules::permissions::service::{decode_tokens, decode_tokens_over};
use crate::store::{PermissionStore, StoreError, fetched_or_empty};

use super::model::{
    CreateRoleDto, Role, RoleId, RolePermissionsResponse, SaveResponse, SaveRolePermissionsDto,
};

#[instrument(skip(store))]
pub async fn list_roles(store: &dyn PermissionStore) -> Result<Vec<Role>, AppError> {
    store.list_roles().await.map_err(StoreError::into_app_error)
}

#[instrument(skip(store, schema, dto), fields(name = %dto.name))]
pub async fn create_role(
    store: &dyn PermissionStore,
    schema: &PermissionSchema,
    dto: CreateRoleDto,
) -> Result<Role, AppError> {
    let permissions = decode_tokens(schema, dto.permissions)?;
    let role = store
        .create_role(dto.name.trim(), &permissions)
        .await
        .map_err(StoreError::into_app_error)?;

    info!(role_id = %role.id, "Role created");
    Ok(role)
}

#[instrument(skip(store))]
pub async fn delete_role(store: &dyn PermissionStore, id: &RoleId) -> Result<(), AppError> {
    store
        .delete_role(id)
        .await
        .map_err(StoreError::into_app_error)?;

    info!(role_id = %id, "Role deleted");
    Ok(())
}

#[instrument(skip(store, schema))]
pub async fn get_role_permissions(
    store: &dyn PermissionStore,
    schema: &PermissionSchema,
    id: RoleId,
) -> Result<RolePermissionsResponse, AppError> {
    let fetched = fetched_or_empty(store.role_permissions(&id).await, id.as_str())?;

    Ok(RolePermissionsResponse {
        matrix: schema.matrix(&fetched.permissions, fetched.is_super_user),
        role_id: id,
        permissions: fetched.permissions,
        is_super_user: fetched.is_super_user,
    })
}

/// Saves the role's set when it differs from what the HR API holds.
#[instrument(skip(store, schema, dto))]
pub async fn save_role_permissions(
    store: &dyn PermissionStore,
    schema: &PermissionSchema,
    id: &RoleId,
    dto: SaveRolePermissionsDto,
) -> Result<SaveResponse, AppError> {
    // Strict read: a failed baseline fetch never becomes an empty set.
    let baseline = store
        .role_permissions(id)
        .await
        .map_err(StoreError::into_app_error)?;
    let permissions = decode_tokens_over(schema, dto.permissions, &baseline.permissions)?;

    if !engine::has_changes(&permissions, &baseline.permissions) {
        return Ok(SaveResponse {
            saved: false,
            permissions,
        });
    }

    store
        .save_role_permissions(id, &permissions)
        .await
        .map_err(StoreError::into_app_error)?;

    info!(
        role_id = %id,
        added = permissions.difference(&baseline.permissions).len(),
        removed = baseline.permissions.difference(&permissions).len(),
        "Role permissions saved"
    );

    Ok(SaveResponse {
        saved: true,
        permissions,
    })
}
