use crate::config::configuration::{ApplicationSettings, Settings};
use crate::context::AppContext;
use crate::routes::{
    health_check::{hello, home},
    order::order::{list_orders, place_order},
    products::product::{add_product, list_products},
    user::user::{login_user, register_user},
};
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// Largest accepted request body, in bytes.
const BODY_LIMIT: usize = 100 * 1024;

/**************************************************************/
// Application State re reuse the same code in main and tests
/***************************************************************/
pub struct Application {
    port: u16,
    server: Server,
    context: web::Data<AppContext>,
}

impl Application {
    /// Connects the configured store, then binds the listener.
    pub async fn build(settings: Settings) -> Result<Self, std::io::Error> {
        let context = AppContext::connect(&settings).await?;
        Self::build_with_context(&settings.application, context)
    }

    /// Binds `settings.host:settings.port`; port `0` picks a free one.
    pub fn build_with_context(
        settings: &ApplicationSettings,
        context: AppContext,
    ) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind((settings.host.as_str(), settings.port))?;
        let port = listener.local_addr()?.port();

        let context = web::Data::new(context);
        let server = run_server(listener, context.clone())?;
        Ok(Self {
            port,
            server,
            context,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serves until a shutdown signal stops the server, then closes the
    /// persistence connection.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        let outcome = self.server.await;
        info!("Server stopped, closing the application context");
        self.context.close().await;
        outcome
    }
}

/// Every origin, method and header is allowed on every route.
fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
}

/******************************************/
// Running Server
/******************************************/
pub fn run_server(
    listener: TcpListener,
    context: web::Data<AppContext>,
) -> Result<Server, std::io::Error> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(TracingLogger::default())
            .app_data(context.clone())
            .app_data(web::PayloadConfig::new(BODY_LIMIT))
            .route("/", web::get().to(home))
            .route("/hello", web::get().to(hello))
            .route("/register", web::post().to(register_user))
            .route("/login", web::post().to(login_user))
            .route("/add-product", web::post().to(add_product))
            .route("/products", web::get().to(list_products))
            .route("/place-order", web::post().to(place_order))
            .route("/orders", web::get().to(list_orders))
    })
    .listen(listener)?
    .run();
    Ok(server)
}
