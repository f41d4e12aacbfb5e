use anyhow::Context;
use axum::{
    Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::{net::SocketAddr, sync::Arc};
use weather_dashboard_core::{Config, DashboardError, WeatherProvider, dashboard, provider_from_config};

use crate::page;

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { config: Arc::new(config), provider }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .layer(middleware::map_response(no_store))
        .with_state(state)
}

pub async fn run(addr: SocketAddr, config: Config) -> anyhow::Result<()> {
    let provider: Arc<dyn WeatherProvider> = Arc::from(provider_from_config(&config)?);
    let state = AppState::new(config, provider);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "serving weather dashboard");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn index(State(state): State<AppState>) -> Response {
    // The context is rebuilt per request; nothing survives between page loads.
    let result = match state.config.context() {
        Ok(ctx) => dashboard::load(state.provider.as_ref(), &ctx).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(board) => Html(page::dashboard(&board).into_string()).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to build dashboard");
            (status_for(&err), Html(page::error(&err.to_string()).into_string())).into_response()
        }
    }
}

fn status_for(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::InvalidCoordinates { .. }
        | DashboardError::UnknownTimezone(_)
        | DashboardError::InvalidOffset(_)
        | DashboardError::NoSunEvent(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    }
}

async fn no_store(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}
