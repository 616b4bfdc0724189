use crate::helper::spawn_app;
use restaurant::store::{OrderItemStore, OrderStore};
use serde_json::{json, Value};

#[tokio::test]
async fn batch_creates_the_order_and_the_composer_reads_it_back() {
    let app = spawn_app().await;
    let (table_id, food_id) = app.seed_table_and_food(12.5).await;

    let response = app
        .post(
            "/orderItems",
            &json!({
                "table_id": table_id,
                "order_items": [
                    {"quantity": "S", "unit_price": 2.005, "food_id": food_id},
                    {"quantity": "L", "unit_price": 12.5, "food_id": food_id},
                    {"quantity": "M", "unit_price": 12.5, "food_id": "not-on-the-menu-yet"}
                ]
            }),
        )
        .await;
    // The third item names an unknown dish, so the whole batch is refused.
    assert_eq!(response.status().as_u16(), 404);
    assert!(app.stores.orders.list_orders().await.unwrap().is_empty());

    let created: Value = app
        .post(
            "/orderItems",
            &json!({
                "table_id": table_id,
                "order_items": [
                    {"quantity": "S", "unit_price": 2.005, "food_id": food_id},
                    {"quantity": "L", "unit_price": 12.5, "food_id": food_id}
                ]
            }),
        )
        .await
        .json()
        .await
        .unwrap();
    let order_id = created["order_id"].as_str().unwrap();
    assert_eq!(created["order_items"][0]["unit_price"], 2.01);

    let views: Value = app
        .get(&format!("/orderItems/order/{}", order_id))
        .await
        .json()
        .await
        .unwrap();
    let views = views.as_array().unwrap();
    assert_eq!(views.len(), 1);
    let view = &views[0];
    assert_eq!(view["order_id"], order_id);
    assert_eq!(view["table_id"], table_id.as_str());
    assert_eq!(view["table_number"], 9);
    assert_eq!(view["total_count"], 2);
    assert_eq!(view["payment_due"], 25.0);
    assert_eq!(view["items"][0]["food_name"], "Dal");
    assert_eq!(view["items"][1]["quantity"], "L");
    assert!(view["items"][0].get("id").is_none());
}

#[tokio::test]
async fn a_batch_with_an_invalid_quantity_persists_nothing() {
    let app = spawn_app().await;
    let (table_id, food_id) = app.seed_table_and_food(3.0).await;

    let response = app
        .post(
            "/orderItems",
            &json!({
                "table_id": table_id,
                "order_items": [
                    {"quantity": "S", "unit_price": 3.0, "food_id": food_id},
                    {"quantity": "XL", "unit_price": 3.0, "food_id": food_id},
                    {"quantity": "M", "unit_price": 3.0, "food_id": food_id}
                ]
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(app.stores.order_items.list_order_items().await.unwrap().is_empty());
    assert!(app.stores.orders.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn composing_an_unknown_order_yields_an_empty_list() {
    let app = spawn_app().await;

    let response = app.get("/orderItems/order/nobody-ordered-this").await;

    assert!(response.status().is_success());
    let views: Value = response.json().await.unwrap();
    assert_eq!(views, json!([]));
}

#[tokio::test]
async fn direct_order_creation_checks_the_table() {
    let app = spawn_app().await;
    let (table_id, _) = app.seed_table_and_food(3.0).await;

    let response = app.post("/orders", &json!({"table_id": "missing"})).await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app.post("/orders", &json!({})).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.post("/orders", &json!({"table_id": table_id})).await;
    assert_eq!(response.status().as_u16(), 201);
    let order: Value = response.json().await.unwrap();

    let fetched: Value = app
        .get(&format!("/orders/{}", order["order_id"].as_str().unwrap()))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["table_id"], table_id.as_str());

    let listed: Value = app.get("/orders").await.json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn updating_only_the_quantity_keeps_dish_and_price() {
    let app = spawn_app().await;
    let (_, food_id) = app.seed_table_and_food(9.99).await;
    let created: Value = app
        .post(
            "/orderItems",
            &json!({"order_items": [{"quantity": "S", "unit_price": 9.99, "food_id": food_id}]}),
        )
        .await
        .json()
        .await
        .unwrap();
    let order_item_id = created["order_items"][0]["order_item_id"].as_str().unwrap();

    let response = app
        .patch(
            &format!("/orderItems/{}", order_item_id),
            &json!({"quantity": "M"}),
        )
        .await;
    assert!(response.status().is_success());

    let item: Value = app
        .get(&format!("/orderItems/{}", order_item_id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(item["quantity"], "M");
    assert_eq!(item["unit_price"], 9.99);
    assert_eq!(item["food_id"], food_id.as_str());

    let response = app
        .patch(
            &format!("/orderItems/{}", order_item_id),
            &json!({"food_id": "missing"}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app
        .patch("/orderItems/missing", &json!({"quantity": "L"}))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn food_prices_are_normalized_and_menus_must_exist() {
    let app = spawn_app().await;
    let (_, food_id) = app.seed_table_and_food(2.005).await;

    let food: Value = app
        .get(&format!("/foods/{}", food_id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(food["price"], 2.01);

    let response = app
        .post(
            "/foods",
            &json!({"name": "Naan", "price": 1.5, "menu_id": "missing"}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let page: Value = app.get("/foods").await.json().await.unwrap();
    assert_eq!(page["total_count"], 1);
    assert_eq!(page["food_items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn menu_windows_must_open_in_the_future() {
    let app = spawn_app().await;

    let response = app
        .post(
            "/menus",
            &json!({
                "name": "Brunch",
                "category": "Weekend",
                "start_date": "2001-01-01T10:00:00Z",
                "end_date": "2001-01-02T10:00:00Z"
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app
        .post(
            "/menus",
            &json!({
                "name": "Brunch",
                "category": "Weekend",
                "start_date": "2999-01-01T10:00:00Z",
                "end_date": "2999-01-02T10:00:00Z"
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn a_menu_end_date_alone_cannot_precede_the_stored_start() {
    let app = spawn_app().await;
    let menu: Value = app
        .post(
            "/menus",
            &json!({
                "name": "Brunch",
                "category": "Weekend",
                "start_date": "2999-01-01T10:00:00Z",
                "end_date": "2999-01-02T10:00:00Z"
            }),
        )
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/menus/{}", menu["menu_id"].as_str().unwrap());

    let response = app
        .patch(&path, &json!({"end_date": "2998-12-31T10:00:00Z"}))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let unchanged: Value = app.get(&path).await.json().await.unwrap();
    assert_eq!(unchanged["end_date"], menu["end_date"]);

    let response = app
        .patch(&path, &json!({"end_date": "2999-01-05T10:00:00Z"}))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app
        .patch("/menus/missing", &json!({"end_date": "2999-01-05T10:00:00Z"}))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}
