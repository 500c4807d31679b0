//! # Trainbook
//!
//! HTTP backend for a small train booking application. Listings come from an
//! upstream service, health is reported against Postgres, and every protected
//! view sits behind the session [`guard`].
//!
//! ## Access control
//!
//! The client keeps its session record in a cookie. For each request to a
//! protected route the guard reads that record once, decides whether the
//! request is authorized, and either runs the route handler or redirects to
//! `/login`. Missing or malformed records are treated as "no session"; the
//! guard never grants access on data it cannot parse.

pub mod cli;
pub mod database;
pub mod guard;
pub mod trainbook;
pub mod trains;

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
