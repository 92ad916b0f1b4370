//! Course API integration tests
//!
//! CRUD through the full router, including the auth and role gates.

mod common;

use axum::http::{header::AUTHORIZATION, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{assert_error_body, bearer, TestApp};

async fn create_course(app: &TestApp, token: &str, title: &str, price: f64) -> Value {
    let response = app
        .server
        .post("/courses")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({ "title": title, "price": price }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["course"].clone()
}

#[tokio::test]
async fn test_course_lifecycle() {
    let app = TestApp::new();
    let token = app.token_for("admin@b.com", "ADMIN").await;

    let course = create_course(&app, &token, "Rust for beginners", 49.5).await;
    let id = course["id"].as_str().unwrap().to_string();
    assert_eq!(course["title"], "Rust for beginners");
    assert_eq!(course["price"], 49.5);

    let response = app.server.get(&format!("/courses/{}", id)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["course"]["id"], id.as_str());

    let response = app
        .server
        .patch(&format!("/courses/{}", id))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "price": 19.0 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["course"]["title"], "Rust for beginners");
    assert_eq!(body["data"]["course"]["price"], 19.0);

    let response = app
        .server
        .delete(&format!("/courses/{}", id))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "success", "data": null }));

    let response = app.server.get(&format!("/courses/{}", id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error_body(&response, "fail", "course not found");
}

#[tokio::test]
async fn test_empty_patch_leaves_course_untouched() {
    let app = TestApp::new();
    let token = app.token_for("user@b.com", "USER").await;
    let course = create_course(&app, &token, "Rust", 10.0).await;

    let response = app
        .server
        .patch(&format!("/courses/{}", course["id"].as_str().unwrap()))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["course"], course);

    let missing = format!("/courses/{}", Uuid::new_v4());
    let response = app
        .server
        .patch(&missing)
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_courses_is_public_and_paged() {
    let app = TestApp::new();
    let token = app.token_for("user@b.com", "USER").await;
    for title in ["Course A", "Course B", "Course C"] {
        create_course(&app, &token, title, 10.0).await;
    }

    let response = app
        .server
        .get("/courses")
        .add_query_param("limit", 2)
        .add_query_param("page", 2)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let titles: Vec<&str> = body["data"]["courses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Course C"]);

    let response = app.server.get("/courses").await;
    let body: Value = response.json();
    assert_eq!(body["data"]["courses"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_course_validation() {
    let app = TestApp::new();
    let token = app.token_for("user@b.com", "USER").await;

    let response = app
        .server
        .post("/courses")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "title": "A" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        json!([
            { "field": "title", "message": "title must be at least 2 characters" },
            { "field": "price", "message": "price is required" },
        ])
    );
}

#[tokio::test]
async fn test_create_course_requires_token() {
    let app = TestApp::new();
    let response = app
        .server
        .post("/courses")
        .json(&json!({ "title": "Rust", "price": 10 }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_error_body(&response, "error", "token is required");
}

#[tokio::test]
async fn test_delete_requires_admin_or_manager() {
    let app = TestApp::new();
    let user = app.token_for("user@b.com", "USER").await;
    let manager = app.token_for("manager@b.com", "MANAGER").await;

    let course = create_course(&app, &user, "Rust", 10.0).await;
    let path = format!("/courses/{}", course["id"].as_str().unwrap());

    let response = app.server.delete(&path).await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = app.server.delete(&path).add_header(AUTHORIZATION, bearer(&user)).await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_error_body(&response, "fail", "this role is not authorized");

    let response = app.server.delete(&path).add_header(AUTHORIZATION, bearer(&manager)).await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_missing_and_malformed_ids() {
    let app = TestApp::new();
    let token = app.token_for("admin@b.com", "ADMIN").await;

    let response = app.server.get("/courses/not-a-uuid").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], "fail");

    let missing = format!("/courses/{}", Uuid::new_v4());
    let response = app
        .server
        .patch(&missing)
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "title": "New title" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = app.server.delete(&missing).add_header(AUTHORIZATION, bearer(&token)).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error_body(&response, "fail", "course not found");
}
