use anyhow::Context;
use push_relay::configuration::get_configuration;
use push_relay::push::OneSignalClient;
use push_relay::startup::Application;
use push_relay::telemetry::{get_subscriber, init_subscriber};
use std::sync::Arc;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("push-relay".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let push_provider = OneSignalClient::from_settings(&configuration.onesignal)?;

    // Formatting a `rocket::Error` marks it handled; an unhandled one panics on drop.
    let application = Application::build(&configuration, Arc::new(push_provider))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build the application: {}", e))?;
    application
        .server
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("The server failed: {}", e))?;
    Ok(())
}
