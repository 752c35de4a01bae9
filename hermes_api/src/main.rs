mod error;
mod pagination;
mod pooling;
mod quote;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::http::Method;
use axum::routing::post;
use axum::{Router, serve};
use hermes_pooling::{engine::PoolingEngine, params::PoolingParams};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use crate::pooling::{notifications::spawn_notifier, pooling_routes};
use crate::quote::post_quote_handler;
use crate::state::AppState;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .merge(pooling_routes(state))
        .route("/quote", post(post_quote_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let params = match std::env::var("HERMES_POOL_PARAMS") {
        Ok(path) => PoolingParams::from_json_file(&path)
            .with_context(|| format!("Failed to load pooling params from {path}"))?,
        Err(_) => PoolingParams::default(),
    };

    let mut engine = PoolingEngine::new(params);
    let _notifier = spawn_notifier(engine.subscribe());

    let state = Arc::new(AppState {
        engine: engine.into_shared(),
    });

    let addr = std::env::var("HERMES_POOL_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Pooling API listening");

    serve(listener, app(state)).await?;

    Ok(())
}
