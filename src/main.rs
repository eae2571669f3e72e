use std::net::TcpListener;

use dotenv::dotenv;
use tracing::{info, warn};
use slack_relay::configuration::get_configuration;
use slack_relay::relay::NotificationRelay;
use slack_relay::startup::{run, SLACK_ROUTES};
use slack_relay::telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let subscriber = get_subscriber(
        "slack_relay".into(),
        "info".into(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let settings = get_configuration()?;
    if settings.slack_webhook_url.is_none() {
        warn!("SLACK_WEBHOOK_URL is not set; Slack endpoints will fail until it is configured");
    }

    let relay = NotificationRelay::from_settings(&settings)?;

    let listener = TcpListener::bind(settings.address())?;
    let port = listener.local_addr()?.port();

    info!("Proxy server running on port {}", port);
    info!("Health check: http://localhost:{}/health", port);
    info!("Slack endpoints:");
    for route in SLACK_ROUTES {
        info!("   - {}", route);
    }

    run(listener, relay)?.await?;

    Ok(())
}
