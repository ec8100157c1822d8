use farm2customer::db::DocumentStore;
use crate::helper::spawn_app;

#[tokio::test]
async fn home_reports_the_backend_is_running() {
    let app = spawn_app().await;

    let response = app.get("/").await;

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "Backend is running 🚀");
}

#[tokio::test]
async fn hello_route_works() {
    let app = spawn_app().await;

    let response = app.get("/hello").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "Hello working ✅");
}

#[tokio::test]
async fn any_origin_passes_the_cors_preflight() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .request(reqwest::Method::OPTIONS, &format!("{}/register", &app.address))
        .header("Origin", "http://shop.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_some());
}

#[tokio::test]
async fn simple_requests_carry_the_cors_header() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(&format!("{}/products", &app.address))
        .header("Origin", "http://another.example")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_some());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(&format!("{}/add-product", &app.address))
        .header("Content-Type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Malformed request body");
    assert!(app.store().find_all("products").await.unwrap().is_empty());
}
