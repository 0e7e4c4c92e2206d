mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/signup")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "User registered successfully!");
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = TestApp::spawn().await;

    // Create first user
    app.post("/api/v1/auth/signup")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Same username, different email
    let response = app
        .post("/api/v1/auth/signup")
        .json(&json!({
            "username": "nicola",
            "email": "other@example.com",
            "password": "pass_word!2"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already taken"));
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::spawn().await;

    // Create first user
    app.post("/api/v1/auth/signup")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Different username, same email
    let response = app
        .post("/api/v1/auth/signup")
        .json(&json!({
            "username": "nicola2",
            "email": "nicola@example.com",
            "password": "pass_word!2"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already in use"));
}

#[tokio::test]
async fn test_signup_invalid_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/signup")
        .json(&json!({
            "username": "n",
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("minimum 3 characters"));
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/signup")
        .json(&json!({
            "username": "nicola",
            "email": "not-an-email",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_signup_short_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/signup")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "password": "pw"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("password"));
}

#[tokio::test]
async fn test_signin_success_with_default_role() {
    let app = TestApp::spawn().await;

    // Signup without requesting any role
    app.post("/api/v1/auth/signup")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/v1/auth/signin")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["token"].as_str().unwrap();
    assert!(!token.is_empty());
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["roles"], json!(["ROLE_USER"]));

    // Roles embedded in the token match the stored role set exactly
    let claims = app.jwt_handler.decode(token).expect("Failed to decode token");
    assert_eq!(claims.sub, body["data"]["id"].as_str().unwrap());
    assert_eq!(claims.username, "nicola");
    assert_eq!(claims.email, "nicola@example.com");
    assert_eq!(claims.roles, vec!["ROLE_USER".to_string()]);
}

#[tokio::test]
async fn test_signup_with_requested_roles() {
    let app = TestApp::spawn().await;

    // "admin" maps to the admin role, "bogus" falls back to the default
    let response = app
        .post("/api/v1/auth/signup")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "password": "pass_word!",
            "role": ["admin", "bogus"]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post("/api/v1/auth/signin")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["roles"], json!(["ROLE_ADMIN", "ROLE_USER"]));

    let claims = app
        .jwt_handler
        .decode(body["data"]["token"].as_str().unwrap())
        .expect("Failed to decode token");
    assert_eq!(
        claims.roles,
        vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()]
    );
}

#[tokio::test]
async fn test_signin_invalid_credentials_are_indistinguishable() {
    let app = TestApp::spawn().await;

    app.post("/api/v1/auth/signup")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "password": "Correct_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Wrong password for an existing user
    let wrong_password = app
        .post("/api/v1/auth/signin")
        .json(&json!({
            "username": "nicola",
            "password": "Wrong_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    // Unknown username entirely
    let unknown_user = app
        .post("/api/v1/auth/signin")
        .json(&json!({
            "username": "nonexistent",
            "password": "Correct_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    // Neither response reveals which field was wrong
    let wrong_password_body: serde_json::Value =
        wrong_password.json().await.expect("Failed to parse");
    let unknown_user_body: serde_json::Value =
        unknown_user.json().await.expect("Failed to parse");
    assert_eq!(
        wrong_password_body["data"]["message"],
        unknown_user_body["data"]["message"]
    );
}

#[tokio::test]
async fn test_current_user() {
    let app = TestApp::spawn().await;

    app.post("/api/v1/auth/signup")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "password": "pass_word!",
            "role": ["moderator"]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let signin_body: serde_json::Value = app
        .post("/api/v1/auth/signin")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let token = signin_body["data"]["token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/v1/auth/current-user", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], signin_body["data"]["id"]);
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["roles"], json!(["ROLE_MODERATOR"]));
}

#[tokio::test]
async fn test_current_user_requires_token() {
    let app = TestApp::spawn().await;

    // No Authorization header
    let response = app
        .get("/api/v1/auth/current-user")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let response = app
        .get_authenticated("/api/v1/auth/current-user", "invalid.token.here")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_home() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/home")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["service"], "authentication-service");
    assert!(body["data"]["version"].is_string());
}

#[tokio::test]
async fn test_concurrent_signups_share_new_role_row() {
    let app = TestApp::spawn().await;

    // Two first-time registrations race to create the moderator role
    let first = app
        .post("/api/v1/auth/signup")
        .json(&json!({
            "username": "first_user",
            "email": "first@example.com",
            "password": "pass_word!",
            "role": ["moderator"]
        }))
        .send();
    let second = app
        .post("/api/v1/auth/signup")
        .json(&json!({
            "username": "second_user",
            "email": "second@example.com",
            "password": "pass_word!",
            "role": ["moderator"]
        }))
        .send();

    let (first, second) = tokio::join!(first, second);
    assert_eq!(
        first.expect("Failed to execute request").status(),
        StatusCode::OK
    );
    assert_eq!(
        second.expect("Failed to execute request").status(),
        StatusCode::OK
    );

    // Exactly one role row exists for the name
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles WHERE name = $1")
        .bind("ROLE_MODERATOR")
        .fetch_one(&app.db.pool)
        .await
        .expect("Failed to count roles");
    assert_eq!(count, 1);
}
