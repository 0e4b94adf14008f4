use std::sync::Arc;

use log::info;

use sms_alert_api::config::{self, TwilioConfig};
use sms_alert_api::handlers::{self, AppState};
use sms_alert_api::twilio::TwilioSender;

/// Number alerts are relayed to when `ALERT_RECIPIENT` is not set.
const DEFAULT_RECIPIENT: &str = "+919360331390";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();

    // A bad config is fatal here, before the listener ever binds.
    let config = match TwilioConfig::load(config::CONFIG_FILE) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };

    let recipient =
        std::env::var("ALERT_RECIPIENT").unwrap_or_else(|_| DEFAULT_RECIPIENT.to_string());
    let port: u16 = std::env::var("ALERT_API_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    info!("Alert recipient: {}", recipient);

    let state = Arc::new(AppState {
        sender: Box::new(TwilioSender::new(&config)),
        recipient,
    });

    let addr = format!("0.0.0.0:{}", port);
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, handlers::router(state)).await?;

    Ok(())
}
