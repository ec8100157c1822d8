use crate::helper::{spawn_app, TestUser};
use bson::doc;
use serde_json::{json, Value};

#[tokio::test]
async fn registering_a_new_email_stores_the_user() {
    let app = spawn_app().await;
    let user = TestUser::generate();

    let response = app.register(&user).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Registration successful" }));

    let stored = app
        .users()
        .find_one(doc! { "email": &user.email })
        .await
        .unwrap()
        .expect("Registered user not found");
    assert_eq!(stored.fullname, user.fullname);
    assert_eq!(stored.password, user.password);
}

#[tokio::test]
async fn registering_the_same_email_twice_keeps_one_user() {
    let app = spawn_app().await;
    let user = TestUser::generate();

    app.register(&user).await;
    let response = app.register(&user).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User already exists");
    assert_eq!(app.users().find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_registrations_of_one_email_create_one_user() {
    let app = spawn_app().await;
    let user = TestUser::generate();

    let responses = futures::future::join_all((0..5).map(|_| app.register(&user))).await;

    let mut successes = 0;
    for response in responses {
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        match body["message"].as_str() {
            Some("Registration successful") => successes += 1,
            Some("User already exists") => {}
            other => panic!("unexpected registration message {:?}", other),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(app.users().find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn registration_accepts_form_bodies() {
    let app = spawn_app().await;
    let user = TestUser::generate();

    let response = app
        .post_form(
            "/register",
            &[
                ("fullname", user.fullname.as_str()),
                ("email", user.email.as_str()),
                ("password", user.password.as_str()),
            ],
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Registration successful");
}

#[tokio::test]
async fn registration_without_a_password_fails() {
    let app = spawn_app().await;

    let response = app
        .post_json(
            "/register",
            &json!({ "fullname": "Asha Rao", "email": "asha@farm.in" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Registration failed" }));
}

#[tokio::test]
async fn registration_with_empty_fields_fails() {
    let app = spawn_app().await;

    let response = app
        .post_json(
            "/register",
            &json!({ "fullname": "", "email": "", "password": "" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Registration failed" }));
    assert!(app.users().find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn login_accepts_form_bodies() {
    let app = spawn_app().await;
    let user = TestUser::generate();
    app.register(&user).await;

    let response = app
        .post_form(
            "/login",
            &[("email", user.email.as_str()), ("password", user.password.as_str())],
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], user.email);
}

#[tokio::test]
async fn login_with_matching_credentials_returns_the_user() {
    let app = spawn_app().await;
    let user = TestUser::generate();
    app.register(&user).await;
    let stored = app
        .users()
        .find_one(doc! { "email": &user.email })
        .await
        .unwrap()
        .unwrap();

    let response = app.login(&user.login_body()).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["_id"], stored.id.to_hex());
    assert_eq!(body["user"]["email"], user.email);
    assert_eq!(body["user"]["fullname"], user.fullname);
    assert_eq!(body["user"]["password"], user.password);
}

#[tokio::test]
async fn login_with_a_wrong_password_is_not_an_error() {
    let app = spawn_app().await;
    let user = TestUser::generate();
    app.register(&user).await;

    let response = app
        .login(&json!({ "email": user.email, "password": "not-the-password" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Invalid email or password" }));
}

#[tokio::test]
async fn login_for_an_unknown_email_is_invalid() {
    let app = spawn_app().await;

    let response = app.login(&TestUser::generate().login_body()).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid email or password");
    assert!(body.get("user").is_none());
}
