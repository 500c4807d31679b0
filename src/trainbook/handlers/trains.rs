use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{debug, error};

use crate::{guard::SessionRecord, trains::TrainClient};

#[utoipa::path(
    get,
    path= "/trains",
    responses (
        (status = 200, description = "Train listings as returned by the listings service"),
        (status = 303, description = "No session, redirected to /login"),
        (status = 502, description = "Listings service unavailable"),
    ),
    tag= "trains"
)]
pub async fn trains(
    Extension(session): Extension<SessionRecord>,
    Extension(client): Extension<Arc<TrainClient>>,
) -> Response {
    debug!(role = %session.role, "listing trains");

    match client.list().await {
        Ok(trains) => Json(trains).into_response(),
        Err(err) => {
            error!("Failed to fetch train listings: {err:#}");

            (
                StatusCode::BAD_GATEWAY,
                "Train listings are unavailable".to_string(),
            )
                .into_response()
        }
    }
}
