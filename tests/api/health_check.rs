use crate::helper::spawn_app;
use reqwest::Client;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;
    let client = Client::new();
    let response = client
        .get(&format!("{}/health_check", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn protected_routes_need_a_token() {
    let app = spawn_app().await;
    let response = Client::new()
        .get(&format!("{}/orders", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 401);

    let response = Client::new()
        .get(&format!("{}/orders", &app.address))
        .header("token", "not-a-jwt")
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn bearer_authorization_is_accepted() {
    let app = spawn_app().await;
    let response = Client::new()
        .get(&format!("{}/tables", &app.address))
        .bearer_auth(&app.token)
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());
}
