//! Session gate for protected routes.
//!
//! Flow Overview: the middleware asks the [`SessionStore`] for the current
//! record, runs [`decide`] against the route's required role, and either
//! forwards the request to the wrapped handler or asks the [`Navigator`] for a
//! redirect to [`LOGIN_PATH`]. Nothing is cached between requests; a logout in
//! another tab takes effect on the next request.
//!
//! Security boundaries: the record is client held. The guard decides what is
//! rendered; handlers that act on sensitive data must still validate identity
//! against server-side state.

pub mod decision;
pub mod redirect;
pub mod session;

pub use self::decision::{decide, Access};
pub use self::redirect::{HttpNavigator, NavigateOptions, Navigator, LOGIN_PATH};
pub use self::session::{
    decode_session, encode_session, CookieSessionStore, SessionError, SessionRecord, SessionStore,
};

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::{self, Next},
    response::Response,
    Router,
};
use std::sync::Arc;
use tracing::debug;

/// Access requirement for one group of routes.
#[derive(Clone)]
pub struct Guard {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    allowed_role: Option<Arc<str>>,
}

impl Guard {
    /// Guard admitting any session.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            navigator,
            allowed_role: None,
        }
    }

    /// Restrict the guard to sessions holding exactly `role`.
    #[must_use]
    pub fn allow_role(mut self, role: impl Into<String>) -> Self {
        self.allowed_role = Some(Arc::from(role.into()));
        self
    }

    #[must_use]
    pub fn allowed_role(&self) -> Option<&str> {
        self.allowed_role.as_deref()
    }

    /// Read the session once and decide.
    #[must_use]
    pub fn evaluate(&self, headers: &HeaderMap) -> Access {
        decide(self.store.read(headers), self.allowed_role())
    }

    /// Mount the guard on every route currently registered in `router`.
    ///
    /// Routes added to the router afterwards are not protected.
    pub fn protect<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.route_layer(middleware::from_fn_with_state(self, require_session))
    }
}

/// Middleware running the protected handler only for authorized sessions.
pub async fn require_session(
    State(guard): State<Guard>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    match guard.evaluate(request.headers()) {
        Access::Authorized(session) => {
            debug!(path = %path, role = %session.role, "access granted");
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        denied => {
            debug!(
                path = %path,
                reason = denied.as_str(),
                required_role = guard.allowed_role().unwrap_or("any"),
                "access denied, redirecting to {LOGIN_PATH}"
            );
            guard
                .navigator
                .redirect(LOGIN_PATH, NavigateOptions::replace())
        }
    }
}
