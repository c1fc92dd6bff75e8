use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{
    create_role, delete_role, get_role_permissions, get_roles, save_role_permissions,
};

pub fn init_roles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_roles).post(create_role))
        .route("/{id}", delete(delete_role))
        .route(
            "/{id}/permissions",
            get(get_role_permissions).put(save_role_permissions),
        )
}
