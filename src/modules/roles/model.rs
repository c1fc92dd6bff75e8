//! Role models and DTOs for the role permission editor.

pub use hrdesk_models::ids::RoleId;
pub use hrdesk_models::roles::{
    CreateRoleDto, Role, RolePermissionsResponse, SaveRolePermissionsDto,
};
pub use hrdesk_models::permissions::SaveResponse;
