//! Recipient verification route.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::{AppState, error::ApiError, middleware::AuthClient};
use sarraf_db::ClientRepository;
use sarraf_shared::AppError;

/// Creates the client routes (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/clients/verify/{username}", get(verify_recipient))
}

/// GET /clients/verify/{username} - Resolve a transfer recipient before
/// submission. The requesting client's own username resolves to 404.
async fn verify_recipient(
    State(state): State<AppState>,
    auth: AuthClient,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let client_repo = ClientRepository::new((*state.db).clone());

    let client = client_repo
        .verify_recipient(auth.client_id(), &username)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

    Ok(Json(json!({
        "username": client.username,
        "name": client.name,
    })))
}
