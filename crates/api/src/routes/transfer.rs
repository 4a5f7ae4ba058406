//! Client-to-client transfer route.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, error::ApiError, middleware::AuthClient};
use sarraf_db::LedgerRepository;
use sarraf_shared::{AppError, Currency, types::round_money};

/// Creates the transfer routes (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/transfer", post(transfer))
}

/// Request body for a transfer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Username of the receiving client.
    pub recipient_username: String,
    /// Currency to move.
    pub currency: Currency,
    /// Amount to move.
    pub amount: Decimal,
    /// Optional message shown to both parties.
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /transfer - Move a balance to another client.
async fn transfer(
    State(state): State<AppState>,
    auth: AuthClient,
    Json(payload): Json<TransferRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.recipient_username.len() < 3 {
        return Err(AppError::Validation("Recipient username is required".to_string()).into());
    }
    if payload.amount <= Decimal::ZERO {
        return Err(AppError::Validation("Amount must be positive".to_string()).into());
    }

    let amount = round_money(payload.amount);
    let ledger = LedgerRepository::new((*state.db).clone());

    let outcome = ledger
        .transfer(
            auth.client_id(),
            &payload.recipient_username,
            payload.currency,
            amount,
            payload.message,
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "recipient": {
            "username": outcome.recipient.username,
            "name": outcome.recipient.name,
        },
        "newBalance": outcome.sender_account.balance,
    })))
}
