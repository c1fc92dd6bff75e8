use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_user_permissions, preview_role, save_user_permissions};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{username}/permissions",
            get(get_user_permissions).put(save_user_permissions),
        )
        .route("/{username}/permissions/preview", post(preview_role))
}
