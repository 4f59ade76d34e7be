pub mod handlers;
mod types;

pub use types::HealthResponse;

use crate::{
    Result,
    classifier::HttpClassifier,
    config::Config,
    line::LineClient,
    relay::Relay,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Wires the outbound clients into a relay from configuration.
pub fn build_state(config: &Config) -> Result<handlers::AppState> {
    let http = reqwest::Client::builder()
        .user_agent(concat!("line-bmi-relay/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let messaging = LineClient::new(http.clone(), &config.line, &config.relay);
    let classifier = HttpClassifier::new(http, &config.classifier);
    let relay = Relay::new(
        Arc::new(messaging),
        Arc::new(classifier),
        config.relay.non_image_policy,
    );

    Ok(handlers::AppState {
        relay,
        service_name: Arc::from(config.server.service_name.as_str()),
    })
}

pub fn router(state: handlers::AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/webhook", post(handlers::webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let app = router(build_state(&config)?);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting {} on {} (classifier: {}, non-image policy: {:?})",
        config.server.service_name,
        addr,
        config.classifier.base_url,
        config.relay.non_image_policy
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
