use crate::helper::spawn_app;
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

fn order_body() -> Value {
    json!({
        "customerName": "Ravi Kumar",
        "productName": "Tomato",
        "quantity": "2kg",
        "address": "12 Market Road",
        "phone": "9876543210"
    })
}

#[tokio::test]
async fn placing_an_order_applies_the_defaults() {
    let app = spawn_app().await;
    let before = Utc::now();

    let response = app.post_json("/place-order", &order_body()).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Order placed successfully");

    let order = &body["order"];
    assert_eq!(order["customerName"], "Ravi Kumar");
    assert_eq!(order["productName"], "Tomato");
    assert_eq!(order["status"], "Pending");
    assert_eq!(order["_id"].as_str().map(str::len), Some(24));

    let placed_at: DateTime<Utc> = order["orderDate"]
        .as_str()
        .expect("orderDate must be a string")
        .parse()
        .unwrap();
    assert!(placed_at >= before - Duration::seconds(1));
    assert!(placed_at <= Utc::now() + Duration::seconds(1));
}

#[tokio::test]
async fn posted_status_is_kept() {
    let app = spawn_app().await;
    let mut body = order_body();
    body["status"] = json!("Delivered");
    body["orderDate"] = json!("2024-01-15T10:00:00Z");

    let response: Value = app.post_json("/place-order", &body).await.json().await.unwrap();

    assert_eq!(response["order"]["status"], "Delivered");
    assert_eq!(response["order"]["orderDate"], "2024-01-15T10:00:00.000Z");
}

#[tokio::test]
async fn listing_orders_includes_what_was_placed() {
    let app = spawn_app().await;
    let placed: Value = app
        .post_json("/place-order", &order_body())
        .await
        .json()
        .await
        .unwrap();

    let response = app.get("/orders").await;

    assert_eq!(response.status().as_u16(), 200);
    let orders: Vec<Value> = response.json().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0], placed["order"]);
}

#[tokio::test]
async fn orders_accept_form_bodies() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/place-order",
            &[("customerName", "Meera"), ("productName", "Okra"), ("quantity", "1kg")],
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["order"]["customerName"], "Meera");
    assert_eq!(body["order"]["status"], "Pending");
}

#[tokio::test]
async fn an_unreadable_order_date_is_rejected() {
    let app = spawn_app().await;
    let mut body = order_body();
    body["orderDate"] = json!("next tuesday");

    let response = app.post_json("/place-order", &body).await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Error placing order" }));
}
