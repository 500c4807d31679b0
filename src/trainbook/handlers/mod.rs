pub mod admin;
pub use self::admin::dashboard;

pub mod health;
pub use self::health::health;

pub mod login;
pub use self::login::login;

pub mod trains;
pub use self::trains::trains;

// axum handler for /
pub async fn root() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
