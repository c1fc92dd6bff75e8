mod common;

use axum::http::StatusCode;
use common::{editor_token, send, setup_test_app, viewer_token};
use serde_json::json;

#[tokio::test]
async fn test_list_roles() {
    let (app, _) = setup_test_app();
    let (status, body) = send(app, "GET", "/api/roles", Some(&viewer_token()), None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Employee", "Manager", "HR Admin"]);
}

#[tokio::test]
async fn test_create_role() {
    let (app, _) = setup_test_app();
    let (status, body) = send(
        app,
        "POST",
        "/api/roles",
        Some(&editor_token()),
        Some(json!({ "name": "  Auditor ", "permissions": ["AuditLogs:view"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "4");
    assert_eq!(body["name"], "Auditor");
    assert_eq!(body["permissions"], json!(["AuditLogs:view"]));
}

#[tokio::test]
async fn test_create_role_requires_edit() {
    let (app, _) = setup_test_app();
    let (status, _) = send(
        app,
        "POST",
        "/api/roles",
        Some(&viewer_token()),
        Some(json!({ "name": "Auditor" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_duplicate_role_conflicts() {
    let (app, _) = setup_test_app();
    let (status, _) = send(
        app,
        "POST",
        "/api/roles",
        Some(&editor_token()),
        Some(json!({ "name": "manager" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_role_empty_name() {
    let (app, _) = setup_test_app();
    let (status, body) = send(
        app,
        "POST",
        "/api/roles",
        Some(&editor_token()),
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Name must be between 1 and 100 characters");
}

#[tokio::test]
async fn test_create_role_with_malformed_token() {
    let (app, _) = setup_test_app();
    let (status, _) = send(
        app,
        "POST",
        "/api/roles",
        Some(&editor_token()),
        Some(json!({ "name": "Broken", "permissions": ["Leave:apply:-"] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_role() {
    let (app, _) = setup_test_app();
    let (status, body) = send(
        app.clone(),
        "DELETE",
        "/api/roles/2",
        Some(&editor_token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(app, "DELETE", "/api/roles/2", Some(&editor_token()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_role_permissions() {
    let (app, _) = setup_test_app();
    let (status, body) = send(
        app,
        "GET",
        "/api/roles/3/permissions",
        Some(&viewer_token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roleId"], "3");
    assert_eq!(body["isSuperUser"], false);
    assert!(
        body["permissions"]
            .as_array()
            .unwrap()
            .contains(&json!("AuditLogs:view"))
    );
    assert_eq!(body["matrix"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_get_unknown_role_permissions() {
    let (app, _) = setup_test_app();
    let (status, _) = send(
        app,
        "GET",
        "/api/roles/99/permissions",
        Some(&viewer_token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_role_permissions() {
    let (app, _) = setup_test_app();
    let (status, body) = send(
        app.clone(),
        "PUT",
        "/api/roles/3/permissions",
        Some(&editor_token()),
        Some(json!({ "permissions": ["Roles:view", "AuditLogs:view"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], true);
    assert_eq!(body["permissions"], json!(["AuditLogs:view", "Roles:view"]));

    let (_, body) = send(
        app,
        "GET",
        "/api/roles/3/permissions",
        Some(&viewer_token()),
        None,
    )
    .await;
    assert_eq!(body["permissions"], json!(["AuditLogs:view", "Roles:view"]));
}

#[tokio::test]
async fn test_save_unchanged_role_permissions() {
    let (app, _) = setup_test_app();
    let (_, current) = send(
        app.clone(),
        "GET",
        "/api/roles/1/permissions",
        Some(&viewer_token()),
        None,
    )
    .await;

    let mut reversed = current["permissions"].as_array().unwrap().clone();
    reversed.reverse();
    let (status, body) = send(
        app,
        "PUT",
        "/api/roles/1/permissions",
        Some(&editor_token()),
        Some(json!({ "permissions": reversed })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], false);
}
