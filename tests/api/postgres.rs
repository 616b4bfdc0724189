//! Runs against a real database only when `TEST_DATABASE_URL` points at a
//! scratch Postgres instance; otherwise every test here returns early.

use crate::helper::spawn_app_with;
use claim::{assert_matches, assert_none};
use dotenv::dotenv;
use restaurant::db::{establish_connection, run_migrations};
use restaurant::errors::custom::DbError;
use restaurant::models::{Order, OrderItem, Quantity};
use restaurant::store::{OrderItemStore, OrderStore, PgStore, Stores};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn test_database_url() -> Option<String> {
    dotenv().ok();
    std::env::var("TEST_DATABASE_URL").ok()
}

async fn migrated_store() -> Option<PgStore> {
    let url = test_database_url()?;
    let pool = establish_connection(&url).expect("Failed to build the test pool");
    run_migrations(&pool)
        .await
        .expect("Failed to migrate the test database");
    Some(PgStore::new(pool, Duration::from_secs(5)))
}

#[tokio::test]
async fn a_failing_batch_insert_leaves_no_order_behind() {
    let Some(store) = migrated_store().await else {
        return;
    };
    let order = Order::new(None);
    let order_id = order.order_id.clone();
    let item = OrderItem::new(&order_id, Quantity::S, 3.0, "f1".to_string());

    // The same item twice violates the unique order_item_id.
    let result = store
        .insert_order_items(Some(order), vec![item.clone(), item])
        .await;

    assert_matches!(result, Err(DbError::InsertionError(_)));
    assert_none!(store.find_order(&order_id).await.unwrap());
    assert!(store
        .find_order_items_by_order(&order_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn a_batch_is_stored_and_composed_over_postgres() {
    let Some(store) = migrated_store().await else {
        return;
    };
    let app = spawn_app_with(Stores::from_backend(Arc::new(store))).await;
    let (table_id, food_id) = app.seed_table_and_food(4.25).await;

    let created: Value = app
        .post(
            "/orderItems",
            &json!({
                "table_id": table_id,
                "order_items": [
                    {"quantity": "S", "unit_price": 4.25, "food_id": food_id},
                    {"quantity": "M", "unit_price": 4.25, "food_id": food_id}
                ]
            }),
        )
        .await
        .json()
        .await
        .unwrap();
    let order_id = created["order_id"].as_str().unwrap();

    let views: Value = app
        .get(&format!("/orderItems/order/{}", order_id))
        .await
        .json()
        .await
        .unwrap();
    let view = &views.as_array().unwrap()[0];
    assert_eq!(view["total_count"], 2);
    assert_eq!(view["payment_due"], 8.5);
    assert_eq!(view["table_number"], 9);
}

#[tokio::test]
async fn an_expired_deadline_is_reported_as_a_timeout() {
    let Some(url) = test_database_url() else {
        return;
    };
    // A fresh pool has no idle connection, so checkout cannot finish at once.
    let pool = establish_connection(&url).expect("Failed to build the test pool");
    let store = PgStore::new(pool, Duration::ZERO);

    let result = store.find_order("anything").await;

    assert_matches!(result, Err(DbError::Timeout(_)));
}
