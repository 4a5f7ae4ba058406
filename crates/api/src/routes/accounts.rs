//! Account listing routes.

use axum::{Json, Router, extract::State, routing::get};

use crate::{AppState, error::ApiError, middleware::AuthClient};
use sarraf_db::{AccountRepository, entities::accounts};

/// Creates the account routes (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/accounts", get(list_accounts))
}

/// GET /accounts - List the client's accounts, provisioning missing
/// currencies at zero balance.
async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthClient,
) -> Result<Json<Vec<accounts::Model>>, ApiError> {
    let account_repo = AccountRepository::new((*state.db).clone());

    let accounts = account_repo.ensure_all(auth.client_id()).await?;

    Ok(Json(accounts))
}
