//! Router assembly and the locale-redirect middleware.

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::config::Config;
use crate::handlers;
use crate::i18n::{LocaleRegistry, LocaleResolver, Resolution};

/// Shared application state: configuration plus the locale resolver.
///
/// Both halves are immutable after startup and shared across requests by
/// `Arc` clone; cloning the state is two pointer bumps.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: Arc<LocaleResolver>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let registry = LocaleRegistry::new(&config.locales, &config.default_locale)?;
        let resolver = LocaleResolver::new(registry, config.locale_policy);
        Ok(Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
        })
    }
}

/// Build the gateway router.
///
/// Form endpoints and the health probe sit under `/api`; everything else
/// falls through to the static file tree. The locale middleware wraps the
/// whole router so redirect decisions also cover static pages, and tracing
/// sits outermost so redirects are logged too.
pub fn build_router(state: AppState) -> Router {
    let public = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/api/contact", post(handlers::contact_handler))
        .route("/api/sendEmail", post(handlers::send_email_handler))
        .route("/api/health", get(handlers::health_handler))
        .fallback_service(public)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            locale_redirect_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Redirect page requests that carry no locale prefix to their localized
/// equivalent; excluded and already-localized paths pass through untouched.
///
/// The redirect is a 307, so non-GET requests keep their method, and the
/// query string is dropped along with anything else after the path, matching
/// how localized links are generated.
pub async fn locale_redirect_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let accept_language = request
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    let resolution = state.resolver.resolve(request.uri().path(), accept_language);

    match resolution {
        Resolution::Redirect(target) => {
            debug!(path = %request.uri().path(), %target, "Redirecting to localized path");
            Redirect::temporary(&target).into_response()
        }
        Resolution::PassThrough => next.run(request).await,
    }
}
