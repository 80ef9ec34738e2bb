use super::helpers::{
    expect_status, get_request, json_request, read_json, send, sign_up, spawn_app,
};
use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn health_reports_memory_storage() {
    let app = spawn_app();
    let res = send(&app.app, get_request("/health", None)).await;
    let res = expect_status(res, StatusCode::OK).await;
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = read_json(res).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "memory");
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let app = spawn_app();
    sign_up(&app, "ada").await;

    let req = json_request(
        "POST",
        "/api/auth/register",
        None,
        json!({ "username": "someone", "email": "ada@example.com", "password": "secret123" }),
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "Email already registered");
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let app = spawn_app();
    sign_up(&app, "ada").await;

    let req = json_request(
        "POST",
        "/api/auth/login",
        None,
        json!({ "email": "ada@example.com", "password": "wrong-password" }),
    );
    expect_status(send(&app.app, req).await, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn invalid_verification_token_is_bad_request() {
    let app = spawn_app();
    let res = send(&app.app, get_request("/api/auth/verify-email/garbage", None)).await;
    expect_status(res, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn login_response_never_exposes_secrets() {
    let app = spawn_app();
    sign_up(&app, "ada").await;
    let req = json_request(
        "POST",
        "/api/auth/login",
        None,
        json!({ "email": "ada@example.com", "password": "StrongPass123" }),
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("two_factor_secret").is_none());
    assert_eq!(body["user"]["role"], "user");
}

#[tokio::test]
async fn two_factor_setup_requires_auth() {
    let app = spawn_app();
    let user = sign_up(&app, "ada").await;

    let anonymous = json_request("POST", "/api/auth/2fa/setup", None, json!({}));
    expect_status(send(&app.app, anonymous).await, StatusCode::UNAUTHORIZED).await;

    let setup = json_request("POST", "/api/auth/2fa/setup", Some(&user.token), json!({}));
    let res = expect_status(send(&app.app, setup).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    assert!(body["otpauth_url"].as_str().unwrap().starts_with("otpauth://totp/"));

    let enable = json_request(
        "POST",
        "/api/auth/2fa/enable",
        Some(&user.token),
        json!({ "code": "000000x" }),
    );
    expect_status(send(&app.app, enable).await, StatusCode::BAD_REQUEST).await;
}
