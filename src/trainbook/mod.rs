use crate::{
    guard::{CookieSessionStore, Guard, HttpNavigator, Navigator, SessionStore},
    trains::TrainClient,
};
use anyhow::Result;
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    routing::get,
    Extension, Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;
use utoipa::OpenApi;

pub mod handlers;

use handlers::{admin, health, login, trains};

/// Role required for the admin views.
pub const ADMIN_ROLE: &str = "admin";

#[derive(OpenApi)]
#[openapi(
    paths(health::health, login::login, trains::trains, admin::dashboard),
    components(
        schemas(health::Health, admin::Dashboard)
    ),
    tags(
        (name = "trainbook", description = "Train booking API"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Shared services handed to the handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub trains: Arc<TrainClient>,
    pub sessions: Arc<dyn SessionStore>,
    pub navigator: Arc<dyn Navigator>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, trains: TrainClient, session_cookie: &str) -> Self {
        Self {
            pool,
            trains: Arc::new(trains),
            sessions: Arc::new(CookieSessionStore::new(session_cookie)),
            navigator: Arc::new(HttpNavigator),
        }
    }
}

/// Build the application router.
///
/// `/trains` needs any session, `/admin` needs the admin role; everything
/// else is public.
pub fn router(state: AppState) -> Router {
    let any_session = Guard::new(state.sessions.clone(), state.navigator.clone());
    let admin_only = any_session.clone().allow_role(ADMIN_ROLE);

    let passenger_routes = any_session.protect(Router::new().route("/trains", get(trains::trains)));
    let admin_routes = admin_only.protect(Router::new().route("/admin", get(admin::dashboard)));

    Router::new()
        .merge(passenger_routes)
        .merge(admin_routes)
        .route("/", get(handlers::root))
        .route("/login", get(login::login))
        .route("/health", get(health::health).options(health::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state.trains))
                .layer(Extension(state.pool)),
        )
}

/// Serve the application until Ctrl-C or SIGTERM.
///
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn new(port: u16, state: AppState) -> Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, request_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_routes() {
        let doc = openapi();
        for path in ["/health", "/login", "/trains", "/admin"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
