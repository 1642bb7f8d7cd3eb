//! # hce-api: HTTP Surface for the HCE Forms Core
//!
//! Exposes the form schemas and the contact flow to non-interactive
//! clients. Field rules are the same ones the interactive forms use.
//!
//! ## API Surface
//!
//! | Route | Module | Purpose |
//! |---|---|---|
//! | `GET /health/liveness` | here | process is up |
//! | `GET /health/readiness` | here | ready to serve |
//! | `GET /v1/forms/catalog` | [`routes::forms`] | contact option lists |
//! | `POST /v1/forms/{form}/validate` | [`routes::forms`] | validate login, register or contact values |
//! | `POST /v1/contact` | [`routes::contact`] | validate and relay a contact request |
//!
//! ## Middleware Stack
//!
//! ```text
//! TraceLayer → CorsLayer (site origin only) → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let cors = cors_for(&state.config.adapter.site_origin);

    let api = Router::new()
        .merge(routes::forms::router())
        .merge(routes::contact::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Browsers may call the API from the site's own origin only.
fn cors_for(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(e) => {
            tracing::warn!(origin, error = %e, "site origin is not a valid header value, CORS disabled");
            layer
        }
    }
}

/// Liveness probe.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe.
async fn readiness() -> &'static str {
    "ready"
}
