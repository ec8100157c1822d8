use dotenv::dotenv;
use farm2customer::config::configuration::{
    ApplicationSettings, DatabaseSettings, DefaultsSettings, Settings,
};
use farm2customer::context::AppContext;
use farm2customer::db::MemoryStore;
use farm2customer::repository::{OrderDefaults, UserRepository};
use farm2customer::startup::Application;
use farm2customer::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    dotenv().ok();
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // The sink is part of the subscriber's type, so each branch builds its own.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct TestUser {
    pub fullname: String,
    pub email: String,
    pub password: String,
}

impl TestUser {
    pub fn generate() -> Self {
        Self {
            fullname: "Asha Rao".to_string(),
            email: format!("{}@farm.in", Uuid::new_v4()),
            password: Uuid::new_v4().to_string(),
        }
    }

    pub fn registration_body(&self) -> Value {
        serde_json::json!({
            "fullname": self.fullname,
            "email": self.email,
            "password": self.password
        })
    }

    pub fn login_body(&self) -> Value {
        serde_json::json!({
            "email": self.email,
            "password": self.password
        })
    }
}

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// `None` when the app runs against an unreachable MongoDB server.
    pub store: Option<Arc<MemoryStore>>,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_form(&self, path: &str, body: &[(&str, &str)]) -> reqwest::Response {
        self.api_client
            .post(&format!("{}{}", &self.address, path))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn register(&self, user: &TestUser) -> reqwest::Response {
        self.post_json("/register", &user.registration_body()).await
    }

    pub async fn login(&self, body: &Value) -> reqwest::Response {
        self.post_json("/login", body).await
    }

    pub fn store(&self) -> Arc<MemoryStore> {
        self.store
            .clone()
            .expect("This app does not run on the in-memory store")
    }

    /// Reads users straight from the store, bypassing HTTP.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.store())
    }
}

fn test_application_settings() -> ApplicationSettings {
    ApplicationSettings {
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

async fn launch(application: Application, store: Option<Arc<MemoryStore>>) -> TestApp {
    let address = format!("http://127.0.0.1:{}", application.port());
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        api_client: reqwest::Client::new(),
        store,
    }
}

pub async fn spawn_app() -> TestApp {
    // To Ensure that the tracing stack is only initialized once
    Lazy::force(&TRACING);

    let store = Arc::new(MemoryStore::new());
    let context = AppContext::with_store(store.clone(), OrderDefaults::default())
        .await
        .expect("Failed to build application context");
    let application = Application::build_with_context(&test_application_settings(), context)
        .expect("Failed to build application");

    launch(application, Some(store)).await
}

/// Points the app at a port nobody listens on, with a short server selection
/// timeout so every database call fails quickly.
pub async fn spawn_app_with_unreachable_database() -> TestApp {
    Lazy::force(&TRACING);

    let settings = Settings {
        application: test_application_settings(),
        database: DatabaseSettings {
            backend: "mongo".to_string(),
            uri: "mongodb://127.0.0.1:1".to_string(),
            name: "farm2customer_test".to_string(),
            server_selection_timeout_ms: 300,
        },
        defaults: DefaultsSettings {
            order_status: "Pending".to_string(),
        },
    };
    let application = Application::build(settings)
        .await
        .expect("Startup must survive an unreachable database");

    launch(application, None).await
}
