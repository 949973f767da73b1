use std::sync::Arc;

use axum::{http::StatusCode, middleware, routing::post, Router};
use clap::ArgMatches;
use snsguard_auth::{
    sns_auth_middleware, Authenticator, HttpFetcher, SnsLayerState, SnsNotification,
};

use super::{load_config, CliError};
use crate::config::GatewayConfig;

pub fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let mut config = load_config(matches)?;
    apply_flags(&mut config, matches);
    config.validate()?;

    // The blocking client runs its own runtime; build it before entering ours.
    let fetcher = Arc::new(HttpFetcher::new(Some(config.fetch_timeout))?);
    let authenticator =
        Authenticator::new(config.require_topic_arn()?, &config.verifier, fetcher.clone())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(serve(config, authenticator));
    drop(runtime);
    drop(fetcher);
    result
}

fn apply_flags(config: &mut GatewayConfig, matches: &ArgMatches) {
    if let Some(topic_arn) = matches.get_one::<String>("topic-arn") {
        config.topic_arn = Some(topic_arn.clone());
    }
    if let Some(host) = matches.get_one::<String>("host") {
        config.bind_address = host.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config.port = *port;
    }
    if let Some(path) = matches.get_one::<String>("path") {
        config.path = path.clone();
    }
}

pub fn router(config: &GatewayConfig, authenticator: Authenticator) -> Router {
    let state =
        SnsLayerState::new(Arc::new(authenticator)).with_max_body_bytes(config.max_body_bytes);

    Router::new()
        .route(&config.path, post(accept_notification))
        .route_layer(middleware::from_fn_with_state(state, sns_auth_middleware))
}

async fn serve(config: GatewayConfig, authenticator: Authenticator) -> Result<(), CliError> {
    let addr = config.listen_addr();
    let app = router(&config, authenticator);

    tracing::info!(
        topic_arn = config.topic_arn.as_deref().unwrap_or_default(),
        path = %config.path,
        "Starting webhook gateway on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| CliError::Bind {
            addr: addr.clone(),
            source,
        })?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Webhook gateway stopped");
    Ok(())
}

async fn accept_notification(SnsNotification(notification): SnsNotification) -> StatusCode {
    tracing::info!(
        message_id = %notification.message_id,
        subject = notification.subject.as_deref().unwrap_or_default(),
        bytes = notification.message.len(),
        "Accepted notification"
    );
    StatusCode::OK
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
