use dotenv::dotenv;
use once_cell::sync::Lazy;
use restaurant::config::configuration::JwtSettings;
use restaurant::startup::{AppState, Application};
use restaurant::store::{InMemoryStore, Stores};
use restaurant::telemetry::{get_subscriber, init_subscriber};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    dotenv().ok();
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // The sink is part of the subscriber's type, hence the two branches.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct TestUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}
impl TestUser {
    pub fn generate() -> Self {
        let unique = Uuid::new_v4().simple().to_string();
        let digits: String = unique
            .bytes()
            .map(|b| char::from(b'0' + b % 10))
            .take(10)
            .collect();
        Self {
            first_name: "Test".to_string(),
            last_name: "Waiter".to_string(),
            email: format!("{}@restaurant.com", &unique[..12]),
            phone: digits,
            password: Uuid::new_v4().to_string(),
        }
    }

    pub fn signup_body(&self) -> Value {
        json!({
            "first_name": self.first_name,
            "last_name": self.last_name,
            "email": self.email,
            "phone": self.phone,
            "password": self.password,
        })
    }
}

pub struct TestApp {
    pub port: u16,
    pub address: String,
    pub stores: Stores,
    pub test_user: TestUser,
    pub token: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", &self.address, path))
            .header("token", &self.token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}{}", &self.address, path))
            .header("token", &self.token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn patch(&self, path: &str, body: &Value) -> reqwest::Response {
        self.api_client
            .patch(&format!("{}{}", &self.address, path))
            .header("token", &self.token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Creates a table and a menu holding one dish; returns `(table_id, food_id)`.
    pub async fn seed_table_and_food(&self, price: f64) -> (String, String) {
        let table: Value = self
            .post("/tables", &json!({"number_of_guests": 4, "table_number": 9}))
            .await
            .json()
            .await
            .unwrap();
        let menu: Value = self
            .post("/menus", &json!({"name": "Lunch", "category": "Mains"}))
            .await
            .json()
            .await
            .unwrap();
        let food: Value = self
            .post(
                "/foods",
                &json!({"name": "Dal", "price": price, "menu_id": menu["menu_id"]}),
            )
            .await
            .json()
            .await
            .unwrap();
        (
            table["table_id"].as_str().unwrap().to_string(),
            food["food_id"].as_str().unwrap().to_string(),
        )
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Stores::from_backend(Arc::new(InMemoryStore::new()))).await
}

pub async fn spawn_app_with(stores: Stores) -> TestApp {
    // To Ensure that the tracing stack is only initialized once
    Lazy::force(&TRACING);

    let jwt = JwtSettings {
        secret: Uuid::new_v4().to_string(),
        access_ttl_hours: 24,
        refresh_ttl_hours: 168,
    };
    let state = AppState::new(stores.clone(), &jwt);

    let application = Application::build("127.0.0.1", 0, state)
        .await
        .expect("Failed to build application");
    let application_port = application.port();
    let address = format!("http://127.0.0.1:{}", application_port);
    let _ = tokio::spawn(application.run_until_stopped());

    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    let test_user = TestUser::generate();
    let signup = client
        .post(&format!("{}/users/signup", &address))
        .json(&test_user.signup_body())
        .send()
        .await
        .expect("Failed to sign up test user.");
    assert_eq!(signup.status().as_u16(), 201);
    let login: Value = client
        .post(&format!("{}/users/login", &address))
        .json(&json!({"email": test_user.email, "password": test_user.password}))
        .send()
        .await
        .expect("Failed to log in test user.")
        .json()
        .await
        .unwrap();
    let token = login["token"]
        .as_str()
        .expect("Token not found")
        .to_string();

    TestApp {
        port: application_port,
        address,
        stores,
        test_user,
        token,
        api_client: client,
    }
}
