use dotenv::dotenv;
use farm2customer::config::configuration::Settings;
use farm2customer::startup::Application;
use farm2customer::telemetry::{get_subscriber, init_subscriber};
use std::io::{Error, ErrorKind};
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let subscriber = get_subscriber("farm2customer".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = Settings::new().map_err(|err| Error::new(ErrorKind::InvalidInput, err))?;
    let application = Application::build(settings).await?;
    info!("Server running on http://localhost:{}", application.port());

    application.run_until_stopped().await
}
