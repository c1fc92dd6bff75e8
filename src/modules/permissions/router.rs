use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    check_permission, diff_permissions, get_schema, permission_matrix, toggle_permission,
};

pub fn init_permissions_router() -> Router<AppState> {
    Router::new()
        .route("/schema", get(get_schema))
        .route("/check", post(check_permission))
        .route("/toggle", post(toggle_permission))
        .route("/diff", post(diff_permissions))
        .route("/matrix", post(permission_matrix))
}
