use axum::{
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Redirect, Response},
};

/// Where denied requests are sent.
pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    #[must_use]
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// Transfers the client to another path.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str, options: NavigateOptions) -> Response;
}

/// Redirects with HTTP status codes.
///
/// A replacing redirect is a `303 See Other` marked `no-store`, so the denied
/// page is neither cached nor kept as a navigable entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpNavigator;

impl Navigator for HttpNavigator {
    fn redirect(&self, path: &str, options: NavigateOptions) -> Response {
        if options.replace {
            ([(CACHE_CONTROL, "no-store")], Redirect::to(path)).into_response()
        } else {
            Redirect::temporary(path).into_response()
        }
    }
}
