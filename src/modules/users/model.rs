//! DTOs for the user permission editor.

pub use hrdesk_models::ids::RoleId;
pub use hrdesk_models::permissions::SaveResponse;
pub use hrdesk_models::users::{
    PreviewRoleDto, PreviewRoleResponse, SaveUserPermissionsDto, UpstreamUserSave,
    UserPermissionsResponse,
};
