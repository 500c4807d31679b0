use axum::{extract::Extension, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::guard::SessionRecord;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Dashboard {
    role: String,
    #[schema(value_type = Object)]
    identity: Map<String, Value>,
}

#[utoipa::path(
    get,
    path= "/admin",
    responses (
        (status = 200, description = "Admin dashboard", body = Dashboard),
        (status = 303, description = "No admin session, redirected to /login"),
    ),
    tag= "admin"
)]
pub async fn dashboard(Extension(session): Extension<SessionRecord>) -> impl IntoResponse {
    Json(Dashboard {
        role: session.role,
        identity: session.identity,
    })
}
