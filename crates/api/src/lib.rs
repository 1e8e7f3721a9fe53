//! # Attendance API
//!
//! The web server of the room attendance service. It exposes rooms, their
//! scheduled time windows, check-in/check-out and monthly statistics over
//! JSON/HTTP.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Unpack requests and call into the core services
//! - **Middleware**: Caller identity, client address and error rendering
//! - **Config**: Environment configuration
//!
//! Business rules live in `attendance-core`; this crate only adapts HTTP to
//! them. Persistence is chosen by whoever builds the [`Stores`].

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Extractors and error rendering
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use attendance_core::{
    errors::AttendanceError,
    services::{ServiceContext, Services},
    store::Stores,
};
use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderName, HeaderValue, Method},
    response::IntoResponse,
    BoxError, Router,
};
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use middleware::{auth::USER_ID_HEADER, error_handling::AppError};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub services: Services,
    /// Whether the first `X-Forwarded-For` hop is taken as the client address
    pub trust_forwarded_for: bool,
}

impl ApiState {
    pub fn new(stores: Stores, config: &config::ApiConfig) -> Self {
        let ctx = ServiceContext::new(stores, config.calendar, config.store_timeout);
        Self {
            services: Services::new(ctx),
            trust_forwarded_for: config.trust_forwarded_for,
        }
    }
}

/// Builds the router with every endpoint attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::room::routes())
        .merge(routes::time::routes())
        .merge(routes::attendance::routes())
        .merge(routes::statistic::routes())
        .with_state(state)
}

async fn handle_timeout(err: BoxError) -> axum::response::Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("request timed out");
        AppError(AttendanceError::Timeout(
            "Request took too long, please retry".to_string(),
        ))
        .into_response()
    } else {
        AppError(AttendanceError::Internal(err)).into_response()
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the API server over the given stores
///
/// Installs logging, wires the services, applies CORS, request timeout and
/// tracing layers, and serves until the listener fails.
///
/// # Example
///
/// ```no_run
/// # async fn run(stores: attendance_core::store::Stores) -> eyre::Result<()> {
/// let config = attendance_api::config::ApiConfig::from_env()?;
/// attendance_api::start_server(config, stores).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, stores: Stores) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(stores, &config));
    let app = build_router(state);

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .timeout(Duration::from_secs(config.request_timeout)),
        )
        .layer(TraceLayer::new_for_http());

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        timezone = config.calendar.timezone().name(),
        trust_forwarded_for = config.trust_forwarded_for,
        "Server listening on http://{}",
        addr
    );
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
