//! Client for the upstream train listings service.

use crate::APP_USER_AGENT;
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_TRAINS_URL: &str = "http://localhost:3001/";

/// Fetches train listings. Listings are passed through as opaque JSON.
#[derive(Clone, Debug)]
pub struct TrainClient {
    client: Client,
    listings_url: Url,
}

impl TrainClient {
    /// # Errors
    /// Returns an error if `base_url` is not an http(s) URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let listings_url = listings_url(base_url)?;

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            listings_url,
        })
    }

    #[must_use]
    pub fn listings_url(&self) -> &Url {
        &self.listings_url
    }

    /// Fetch all train listings.
    ///
    /// # Errors
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the body is not a JSON array.
    #[instrument(skip(self), fields(url = %self.listings_url))]
    pub async fn list(&self) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(self.listings_url.clone())
            .send()
            .await
            .context("Failed to reach train listings service")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "{} - {}",
                self.listings_url,
                response.status()
            ));
        }

        let trains: Vec<Value> = response
            .json()
            .await
            .context("Error parsing JSON response: expected an array of trains")?;

        debug!("fetched {} train listings", trains.len());

        Ok(trains)
    }
}

fn listings_url(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;

    match base.scheme() {
        "http" | "https" => {}
        scheme => return Err(anyhow!("Error parsing URL: unsupported scheme {}", scheme)),
    }

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    Ok(base.join("trains")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    /// Serve `app` on an ephemeral local port and return its base URL.
    async fn upstream(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app.into_make_service()).await;
        });
        format!("http://{addr}/")
    }

    #[test]
    fn listings_url_appends_trains() {
        assert_eq!(
            listings_url("http://localhost:3001").unwrap().as_str(),
            "http://localhost:3001/trains"
        );
        assert_eq!(
            listings_url("https://api.example.com/v1/").unwrap().as_str(),
            "https://api.example.com/v1/trains"
        );
    }

    #[test]
    fn listings_url_keeps_last_segment() {
        assert_eq!(
            listings_url("https://api.example.com/v1").unwrap().as_str(),
            "https://api.example.com/v1/trains"
        );
    }

    #[test]
    fn listings_url_rejects_other_schemes() {
        assert!(listings_url("ftp://example.com").is_err());
        assert!(listings_url("not a url").is_err());
    }

    #[test]
    fn client_exposes_target() {
        let client = TrainClient::new(DEFAULT_TRAINS_URL).unwrap();
        assert_eq!(client.listings_url().path(), "/trains");
    }

    #[tokio::test]
    async fn list_fails_when_service_is_unreachable() {
        // Port 9 (discard) is not expected to serve HTTP.
        let client = TrainClient::new("http://127.0.0.1:9/").unwrap();
        assert!(client.list().await.is_err());
    }

    #[tokio::test]
    async fn list_returns_listings() {
        let app = Router::new().route(
            "/trains",
            get(|| async {
                Json(json!([
                    {"number": "12951", "name": "Rajdhani"},
                    {"number": "22439", "name": "Vande Bharat"}
                ]))
            }),
        );
        let client = TrainClient::new(&upstream(app).await).unwrap();

        let trains = client.list().await.unwrap();
        assert_eq!(trains.len(), 2);
        assert_eq!(trains[0]["number"], "12951");
        assert_eq!(trains[1]["name"], "Vande Bharat");
    }

    #[tokio::test]
    async fn list_reports_upstream_status() {
        let app = Router::new().route(
            "/trains",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = TrainClient::new(&upstream(app).await).unwrap();

        let err = client.list().await.unwrap_err();
        assert!(err.to_string().contains("500"), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn list_rejects_non_array_body() {
        let app = Router::new().route(
            "/trains",
            get(|| async { Json(json!({"trains": []})) }),
        );
        let client = TrainClient::new(&upstream(app).await).unwrap();

        assert!(client.list().await.is_err());
    }
}
