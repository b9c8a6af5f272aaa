mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{registration, session_from, TestServer, PASSWORD};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, body) = server.get("/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let (status, body) = server.get("/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    Ok(())
}

#[tokio::test]
async fn register_returns_token_and_user_id() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, body) = server.post("/auth/register", None, registration("alice")).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let session = session_from(&body)?;
    let (status, profile) = server.get("/user/profile", Some(&session.token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["data"]["id"], session.user_id.as_str());
    assert!(profile["data"].get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn mismatched_confirmation_creates_no_user() -> Result<()> {
    let server = TestServer::start().await?;

    let mut body = registration("alice");
    body["confirm_password"] = json!("something else entirely");
    let (status, response) = server.post("/auth/register", None, body).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "VALIDATION_ERROR");
    assert!(response["field_errors"]["confirm_password"].is_string());

    // The same email can still be used, so nothing was stored.
    let (status, _) = server.post("/auth/register", None, registration("alice")).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn invalid_fields_are_reported_per_field() -> Result<()> {
    let server = TestServer::start().await?;

    let body = json!({
        "username": "al",
        "email": "not-an-email",
        "phone": "5551234",
        "password": "short",
        "confirm_password": "short",
    });
    let (status, response) = server.post("/auth/register", None, body).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = &response["field_errors"];
    for field in ["username", "email", "phone", "password"] {
        assert!(errors[field].is_string(), "expected error for {}: {}", field, response);
    }
    Ok(())
}

#[tokio::test]
async fn email_wider_than_its_column_is_rejected() -> Result<()> {
    let server = TestServer::start().await?;

    // Syntactically valid: 64-char local part and 63-char labels.
    let label = "b".repeat(63);
    let email = format!("{}@{}.{}.{}.com", "a".repeat(64), label, label, label);
    assert_eq!(email.len(), 260);

    let mut body = registration("alice");
    body["email"] = json!(email);
    let (status, response) = server.post("/auth/register", None, body).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "VALIDATION_ERROR");
    assert!(response["field_errors"]["email"].is_string());
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected() -> Result<()> {
    let server = TestServer::start().await?;

    let response = reqwest::Client::new()
        .post(server.url("/auth/register"))
        .header("content-type", "application/json")
        .body("{\"username\": ")
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn duplicate_username_or_email_conflicts() -> Result<()> {
    let server = TestServer::start().await?;
    server.register("alice").await?;

    let mut same_username = registration("alice");
    same_username["email"] = json!("other@example.com");
    let (status, body) = server.post("/auth/register", None, same_username).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "username already taken");

    let mut same_email = registration("bob");
    same_email["email"] = json!("alice@example.com");
    let (status, body) = server.post("/auth/register", None, same_email).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "email already registered");
    Ok(())
}

#[tokio::test]
async fn login_issues_token_accepted_by_protected_routes() -> Result<()> {
    let server = TestServer::start().await?;
    let registered = server.register("alice").await?;

    let (status, body) = server
        .post(
            "/auth/login",
            None,
            json!({ "email": "alice@example.com", "password": PASSWORD }),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);

    let session = session_from(&body)?;
    assert_eq!(session.user_id, registered.user_id);

    let (status, _) = server.get("/space/details", Some(&session.token)).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() -> Result<()> {
    let server = TestServer::start().await?;
    server.register("alice").await?;

    let (wrong_status, wrong) = server
        .post(
            "/auth/login",
            None,
            json!({ "email": "alice@example.com", "password": "not the password" }),
        )
        .await?;
    let (unknown_status, unknown) = server
        .post(
            "/auth/login",
            None,
            json!({ "email": "nobody@example.com", "password": PASSWORD }),
        )
        .await?;

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong["code"], "AUTHENTICATION_FAILED");
    assert!(wrong.pointer("/data/token").is_none());
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown, wrong);
    Ok(())
}

#[tokio::test]
async fn protected_routes_reject_missing_or_bad_tokens() -> Result<()> {
    let server = TestServer::start().await?;

    for token in [None, Some("garbage"), Some("eyJhbGciOiJIUzI1NiJ9.e30.invalid")] {
        for _ in 0..2 {
            let (status, body) = server.get("/user/profile", token).await?;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["code"], "UNAUTHORIZED");
        }
    }
    Ok(())
}

#[tokio::test]
async fn rejected_request_performs_no_mutation() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.register("alice").await?;

    let (status, _) = server
        .post("/space/create-space", Some("forged"), json!({ "project_name": "Sneaky" }))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = server.get("/space/details", Some(&session.token)).await?;
    assert_eq!(body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn token_from_another_server_is_rejected() -> Result<()> {
    let ours = TestServer::start().await?;
    let theirs = TestServer::start_with(|config| {
        config.security.jwt_secret = "a-different-secret".to_string();
    })
    .await?;

    let foreign = theirs.register("mallory").await?;
    let (status, _) = ours.get("/user/profile", Some(&foreign.token)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}
