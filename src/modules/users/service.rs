use tracing::{debug, info, instrument};

use hrdesk_core::AppError;
use hrdesk_core::permissions::{PermissionEditor, PermissionSchema, engine};

use crate::modules::permissions::service::decode_tokens_over;
use crate::store::{PermissionStore, StoreError, fetched_or_empty};

use super::model::{
    PreviewRoleDto, PreviewRoleResponse, SaveResponse, SaveUserPermissionsDto, UpstreamUserSave,
    UserPermissionsResponse,
};

#[instrument(skip(store, schema))]
pub async fn get_user_permissions(
    store: &dyn PermissionStore,
    schema: &PermissionSchema,
    username: String,
) -> Result<UserPermissionsResponse, AppError> {
    let fetched = fetched_or_empty(store.user_permissions(&username).await, &username)?;

    Ok(UserPermissionsResponse {
        matrix: schema.matrix(&fetched.permissions, fetched.is_super_user),
        username,
        permissions: fetched.permissions,
        is_super_user: fetched.is_super_user,
    })
}

/// Layers the selected role over the user's own set without saving.
#[instrument(skip(store, schema, dto), fields(selected_role = ?dto.selected_role))]
pub async fn preview_role(
    store: &dyn PermissionStore,
    schema: &PermissionSchema,
    username: &str,
    dto: PreviewRoleDto,
) -> Result<PreviewRoleResponse, AppError> {
    let saved = fetched_or_empty(store.user_permissions(username).await, username)?;
    let staged = dto
        .permissions
        .map(|permissions| decode_tokens_over(schema, permissions, &saved.permissions))
        .transpose()?;

    let mut editor = PermissionEditor::new(saved.permissions, saved.is_super_user);
    if let Some(permissions) = staged {
        editor.stage(permissions);
    }

    match &dto.selected_role {
        Some(role_id) => {
            let role = fetched_or_empty(store.role_permissions(role_id).await, role_id.as_str())?;
            editor.select_role(Some((role_id.as_str(), &role.permissions)));
        }
        None => editor.select_role(None),
    }

    debug!(
        count = editor.permissions().len(),
        has_changes = editor.has_changes(),
        "Role preview computed"
    );

    Ok(PreviewRoleResponse {
        permissions: editor.permissions().clone(),
        is_super_user: editor.is_super_user(),
        has_changes: editor.has_changes(),
        selected_role: dto.selected_role,
    })
}

/// Saves the user's set when it differs from what the HR API holds.
#[instrument(skip(store, schema, dto), fields(selected_role = ?dto.selected_role))]
pub async fn save_user_permissions(
    store: &dyn PermissionStore,
    schema: &PermissionSchema,
    username: &str,
    dto: SaveUserPermissionsDto,
) -> Result<SaveResponse, AppError> {
    let baseline = store
        .user_permissions(username)
        .await
        .map_err(StoreError::into_app_error)?;
    let permissions = decode_tokens_over(schema, dto.permissions, &baseline.permissions)?;

    if !engine::has_changes(&permissions, &baseline.permissions) {
        return Ok(SaveResponse {
            saved: false,
            permissions,
        });
    }

    let save = UpstreamUserSave::new(username, &permissions, dto.selected_role);
    store
        .save_user_permissions(&save)
        .await
        .map_err(StoreError::into_app_error)?;

    info!(
        username,
        added = permissions.difference(&baseline.permissions).len(),
        removed = baseline.permissions.difference(&permissions).len(),
        "User permissions saved"
    );

    Ok(SaveResponse {
        saved: true,
        permissions,
    })
}
