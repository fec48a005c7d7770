mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use devconnector_api::domain::user::models::EmailAddress;
use devconnector_api::domain::user::ports::UserRepository;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_root_reports_api_running() {
    let app = TestApp::spawn().await;

    let response = app.get("/").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "API running");
}

#[tokio::test]
async fn test_register_then_fetch_current_user_then_duplicate() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({ "name": "A", "email": "a@x.com", "secret": "secret1" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("token missing").to_string();

    let response = app
        .get_authenticated("/api/auth", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "A");
    assert_eq!(body["email"], "a@x.com");
    assert!(body["id"].is_string());
    assert!(body["avatar"]
        .as_str()
        .unwrap()
        .starts_with("https://www.gravatar.com/avatar/"));
    let fields = body.as_object().unwrap();
    assert!(!fields.keys().any(|k| k.to_lowercase().contains("secret")));
    assert!(!fields.keys().any(|k| k.to_lowercase().contains("hash")));

    let response = app
        .post("/api/users")
        .json(&json!({ "name": "B", "email": "a@x.com", "secret": "another1" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "errors": [{ "msg": "User exists already." }] }));
}

#[tokio::test]
async fn test_register_token_subject_resolves_to_stored_user() {
    let app = TestApp::spawn().await;

    let token = app.register("Ada", "ada@x.com", "secret1").await;

    let subject = app.authenticator.verify_token(&token).expect("token should verify");
    let stored = app
        .users
        .find_by_email(&EmailAddress::new("ada@x.com".to_string()).unwrap())
        .await
        .unwrap()
        .expect("user should be stored");

    assert_eq!(subject, stored.id.to_string());
    assert_eq!(stored.name.as_str(), "Ada");
    assert_ne!(stored.secret_hash, "secret1");
    assert!(stored.secret_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_register_reports_every_invalid_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({ "name": "", "email": "nope", "secret": "12345" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({ "errors": [
            { "msg": "Name is required", "param": "name" },
            { "msg": "Please include a valid email", "param": "email" },
            { "msg": "Please enter a password with 6 or more characters", "param": "secret" },
        ]})
    );
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "errors": [{ "msg": "Malformed request body" }] }));
}

#[tokio::test]
async fn test_login_success_issues_fresh_tokens() {
    let app = TestApp::spawn().await;
    app.register("Ada", "ada@x.com", "secret1").await;

    for _ in 0..2 {
        let response = app
            .post("/api/auth")
            .json(&json!({ "email": "ada@x.com", "secret": "secret1" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        let token = body["token"].as_str().unwrap();
        assert!(app.authenticator.verify_token(token).is_ok());
    }
}

#[tokio::test]
async fn test_login_accepts_pass_alias() {
    let app = TestApp::spawn().await;
    app.register("Ada", "ada@x.com", "secret1").await;

    let response = app
        .post("/api/auth")
        .json(&json!({ "email": "ada@x.com", "pass": "secret1" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Ada", "ada@x.com", "secret1").await;

    let wrong_secret = app
        .post("/api/auth")
        .json(&json!({ "email": "ada@x.com", "secret": "wrong-secret" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_email = app
        .post("/api/auth")
        .json(&json!({ "email": "nobody@x.com", "secret": "secret1" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_secret.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);

    let wrong_secret: Value = wrong_secret.json().await.unwrap();
    let unknown_email: Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_secret, unknown_email);
    assert_eq!(
        wrong_secret,
        json!({ "errors": [{ "msg": "Invalid credentials" }] })
    );
}

#[tokio::test]
async fn test_login_validation() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth")
        .json(&json!({ "email": "ada@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "errors": [{ "msg": "Password is required", "param": "secret" }] })
    );
}

#[tokio::test]
async fn test_current_user_rejections() {
    let app = TestApp::spawn().await;
    let token = app.register("Ada", "ada@x.com", "secret1").await;
    let subject = app.authenticator.verify_token(&token).unwrap();

    let missing = app.get("/api/auth").send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        missing.json::<Value>().await.unwrap(),
        json!({ "msg": "No token, authorization denied" })
    );

    let malformed = app
        .get_authenticated("/api/auth", "definitely.not.valid")
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        malformed.json::<Value>().await.unwrap(),
        json!({ "msg": "Token is not valid" })
    );

    let expired_token = app
        .authenticator
        .token_service()
        .issue_at(subject, Utc::now() - Duration::hours(4) - Duration::minutes(1))
        .unwrap();
    let expired = app
        .get_authenticated("/api/auth", &expired_token)
        .send()
        .await
        .unwrap();
    assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deleted_account_token_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.register("Ada", "ada@x.com", "secret1").await;
    app.create_profile(&token).await;

    let response = app
        .delete_authenticated("/api/profile", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({ "msg": "User deleted" })
    );
    assert_eq!(app.profiles.count(), 0);

    let response = app.get_authenticated("/api/auth", &token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({ "msg": "User no longer exists" })
    );
}
