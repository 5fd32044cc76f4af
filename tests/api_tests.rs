// tests/api_tests.rs

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{login_new_user, spawn_app, test_state};
use paper_quiz::routes;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn signup_works() {
    // Arrange
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(format!("{}/api/auth/signup", app.address))
        .json(&serde_json::json!({
            "name": "Asha",
            "roll_number": "R001",
            "password": "secret1!",
            "confirm_password": "secret1!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["roll_number"], "R001");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn signup_rejects_weak_or_mismatched_password() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    for (password, confirm) in [("secret11", "secret11"), ("secret1!", "secret2!")] {
        let response = client
            .post(format!("{}/api/auth/signup", app.address))
            .json(&serde_json::json!({
                "name": "Asha",
                "roll_number": "R002",
                "password": password,
                "confirm_password": confirm
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status().as_u16(), 400);
    }
}

#[tokio::test]
async fn signup_rejects_duplicate_roll_number() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let payload = serde_json::json!({
        "name": "Asha",
        "roll_number": "R003",
        "password": "secret1!",
        "confirm_password": "secret1!"
    });

    let first = client
        .post(format!("{}/api/auth/signup", app.address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 201);

    let second = client
        .post(format!("{}/api/auth/signup", app.address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 409);
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/api/auth/signup", app.address))
        .json(&serde_json::json!({
            "name": "Asha",
            "roll_number": "R004",
            "password": "secret1!",
            "confirm_password": "secret1!"
        }))
        .send()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/api/auth/login", app.address))
        .json(&serde_json::json!({ "roll_number": "R004", "password": "wrong1!" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn profile_and_password_change_flow() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login_new_user(&client, &app.address).await;

    let me = client
        .get(format!("{}/api/profile/me", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(me["name"], "Test Student");
    let roll_number = me["roll_number"].as_str().unwrap().to_string();

    // Empty password is rejected
    let rejected = client
        .put(format!("{}/api/profile/password", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "new_password": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status().as_u16(), 400);

    let changed = client
        .put(format!("{}/api/profile/password", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "new_password": "fresh2@" }))
        .send()
        .await
        .unwrap();
    assert_eq!(changed.status().as_u16(), 200);

    let relogin = client
        .post(format!("{}/api/auth/login", app.address))
        .json(&serde_json::json!({ "roll_number": roll_number, "password": "fresh2@" }))
        .send()
        .await
        .unwrap();
    assert_eq!(relogin.status().as_u16(), 200);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let (state, _app) = test_state().await;
    let router = routes::create_router(state);

    for uri in ["/api/profile/me", "/api/quiz/current", "/api/results", "/api/overview"] {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn papers_are_listed_and_filtered() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let all: Vec<serde_json::Value> = client
        .get(format!("{}/api/papers", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0]["subject"], "Mathematics");
    assert_eq!(all[0]["papers"].as_array().unwrap().len(), 5);

    let filtered: Vec<serde_json::Value> = client
        .get(format!(
            "{}/api/papers?year=2017&subject=Electrical%20Engineering",
            app.address
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["papers"][0]["paper"], "ELEC1001 2017");
    assert_eq!(filtered[0]["papers"][0]["link"], "pyq/ELEC1001_2017.pdf");
}
