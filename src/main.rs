use crate::{
    configuration::Configuration,
    configuration_handler::ConfigurationHandler,
    http::create_app,
    local_slots::{generate_slots, LocalSlots},
};
use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod backend;
mod configuration;
mod configuration_handler;
mod error;
mod http;
mod local_slots;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let today = Utc::now().date_naive();
    let slots = generate_slots(
        today,
        configuration.days(),
        &configuration.slot_times(),
        &configuration.provider_name(),
    );
    info!(
        slots = slots.len(),
        days = configuration.days(),
        from = %today,
        provider = %configuration.provider_name(),
        "Generated slots"
    );
    let backend = LocalSlots::new(slots);

    let address = format!("{}:{}", configuration.address(), configuration.port());
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(?err, "Failed to bind to {address}");
            std::process::exit(1);
        }
    };
    info!("Accessible at http://{address}");

    let app = create_app(backend, configuration);
    if let Err(err) = axum::serve(listener, app).await {
        error!(?err, "Server stopped unexpectedly");
        std::process::exit(1);
    }
}
