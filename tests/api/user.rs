use crate::helper::{spawn_app, TestUser};
use serde_json::{json, Value};

#[tokio::test]
async fn login_returns_tokens_and_never_the_password_hash() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(&format!("{}/users/login", &app.address))
        .json(&json!({
            "email": app.test_user.email,
            "password": app.test_user.password
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert!(body["token"].is_string(), "JWT token not found in response");
    assert!(body["refresh_token"].is_string());
    assert!(body.get("password_hash").is_none());
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn login_with_a_wrong_password_is_unauthorized() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(&format!("{}/users/login", &app.address))
        .json(&json!({"email": app.test_user.email, "password": "wrong-password"}))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn signup_rejects_a_taken_email_or_phone() {
    let app = spawn_app().await;

    let mut other = TestUser::generate();
    other.email = app.test_user.email.clone();
    let response = app
        .api_client
        .post(&format!("{}/users/signup", &app.address))
        .json(&other.signup_body())
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 409);

    let mut other = TestUser::generate();
    other.phone = app.test_user.phone.clone();
    let response = app
        .api_client
        .post(&format!("{}/users/signup", &app.address))
        .json(&other.signup_body())
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn signup_rejects_invalid_fields() {
    let app = spawn_app().await;
    let test_cases = vec![
        ("email", "not-an-email"),
        ("phone", "12ab"),
        ("first_name", "<script>"),
        ("password", "abc"),
    ];

    for (field, value) in test_cases {
        let mut body = TestUser::generate().signup_body();
        body[field] = json!(value);
        let response = app
            .api_client
            .post(&format!("{}/users/signup", &app.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(
            response.status().as_u16(),
            400,
            "signup did not reject an invalid {}",
            field
        );
    }
}

#[tokio::test]
async fn users_are_listed_page_by_page() {
    let app = spawn_app().await;
    for _ in 0..2 {
        let response = app
            .api_client
            .post(&format!("{}/users/signup", &app.address))
            .json(&TestUser::generate().signup_body())
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(response.status().as_u16(), 201);
    }

    let body: Value = app
        .get("/users?recordPerPage=2&page=2")
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["total_count"], 3);
    assert_eq!(body["user_items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn a_user_can_be_fetched_by_id() {
    let app = spawn_app().await;
    let login: Value = app
        .api_client
        .post(&format!("{}/users/login", &app.address))
        .json(&json!({"email": app.test_user.email, "password": app.test_user.password}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let user_id = login["user_id"].as_str().unwrap();

    let response = app.get(&format!("/users/{}", user_id)).await;
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], app.test_user.email.as_str());

    let response = app.get("/users/unknown").await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn a_page_past_every_record_is_empty_not_an_error() {
    let app = spawn_app().await;

    let response = app.get("/users?page=9223372036854775807").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total_count"], 1);
    assert!(body["user_items"].as_array().unwrap().is_empty());
}
