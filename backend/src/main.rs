//! Backend entry-point: loads settings, wires adapters, and runs the HTTP
//! server alongside the donation queue consumer.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use floofloo::inbound::http::health::HealthState;
use floofloo::settings::AppSettings;

use server::{AppComponents, ServerConfig, build_components, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let AppComponents {
        http_state,
        queue,
        consumer,
    } = build_components(&settings)?;

    let health_state = web::Data::new(HealthState::new());
    let consumer_health = health_state.clone();
    let consumer = tokio::spawn(async move {
        consumer_health.mark_consumer_running();
        let report = consumer.run().await;
        consumer_health.mark_consumer_stopped();
        report
    });

    let config = ServerConfig::from_settings(&settings);
    let server = create_server(health_state.clone(), http_state, config)
        .wrap_err_with(|| format!("failed to bind {}", config.bind_addr()))?;
    info!(
        addr = %config.bind_addr(),
        environment = settings.environment(),
        "server listening"
    );

    let served = server.await;
    health_state.mark_draining();
    queue.close().await;
    let report = consumer.await.wrap_err("queue consumer task failed")?;
    info!(handled = report.total(), "shutdown complete");
    served.wrap_err("server terminated with an error")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}
