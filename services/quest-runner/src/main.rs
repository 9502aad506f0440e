use crate::application::context::create_application_state;
use crate::application::context::start_application;
use crate::application::opentelemetry::OpentelemetryHandler;
use crate::application::settings::Settings;
use anyhow::Result;
mod application;
mod campaign;
mod http;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env()?;

    // Initialize logging, and the OpenTelemetry stack when enabled
    let _opentelemetry_handler = OpentelemetryHandler::new(settings.otlp_export_enabled())?;

    // Start the application
    let application_state = create_application_state(settings).await?;
    start_application(application_state).await?;

    Ok(())
}
