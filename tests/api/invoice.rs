use crate::helper::spawn_app;
use serde_json::{json, Value};

async fn order_with_items(app: &crate::helper::TestApp) -> String {
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
    created["order_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn invoice_view_wraps_the_composed_order() {
    let app = spawn_app().await;
    let order_id = order_with_items(&app).await;

    let response = app
        .post("/invoices", &json!({"order_id": order_id, "payment_method": ""}))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let invoice: Value = response.json().await.unwrap();
    assert_eq!(invoice["payment_status"], "PENDING");
    let invoice_id = invoice["invoice_id"].as_str().unwrap();

    let view: Value = app
        .get(&format!("/invoices/{}", invoice_id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(view["invoice_id"], invoice_id);
    assert_eq!(view["order_id"], order_id.as_str());
    assert_eq!(view["payment_method"], "null");
    assert_eq!(view["payment_due"], 8.5);
    assert_eq!(view["table_number"], 9);
    assert_eq!(view["order_items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn invoice_updates_are_partial() {
    let app = spawn_app().await;
    let order_id = order_with_items(&app).await;
    let invoice: Value = app
        .post(
            "/invoices",
            &json!({"order_id": order_id, "payment_method": "CARD", "payment_status": "PAID"}),
        )
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/invoices/{}", invoice["invoice_id"].as_str().unwrap());

    let updated: Value = app
        .patch(&path, &json!({"payment_method": "CASH"}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(updated["payment_method"], "CASH");
    assert_eq!(updated["payment_status"], "PAID");

    let response = app.patch(&path, &json!({"payment_status": "LATER"})).await;
    assert_eq!(response.status().as_u16(), 400);

    let cleared: Value = app
        .patch(&path, &json!({"payment_method": ""}))
        .await
        .json()
        .await
        .unwrap();
    assert!(cleared["payment_method"].is_null());
    assert_eq!(cleared["payment_status"], "PAID");

    let view: Value = app.get(&path).await.json().await.unwrap();
    assert_eq!(view["payment_method"], "null");
}

#[tokio::test]
async fn invoices_need_an_existing_order_and_items() {
    let app = spawn_app().await;

    let response = app.post("/invoices", &json!({"order_id": "missing"})).await;
    assert_eq!(response.status().as_u16(), 404);

    let (table_id, _) = app.seed_table_and_food(1.0).await;
    let order: Value = app
        .post("/orders", &json!({"table_id": table_id}))
        .await
        .json()
        .await
        .unwrap();
    let invoice: Value = app
        .post("/invoices", &json!({"order_id": order["order_id"]}))
        .await
        .json()
        .await
        .unwrap();

    let response = app
        .get(&format!("/invoices/{}", invoice["invoice_id"].as_str().unwrap()))
        .await;
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("has no items"));

    let response = app.get("/invoices/missing").await;
    assert_eq!(response.status().as_u16(), 404);
}
