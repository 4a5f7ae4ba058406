//! Currency exchange route.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, error::ApiError, middleware::AuthClient};
use sarraf_db::LedgerRepository;
use sarraf_shared::{AppError, Currency, types::round_money};

/// Creates the exchange routes (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/exchange", post(exchange))
}

/// Request body for an exchange.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    /// Currency to debit.
    pub from_currency: Currency,
    /// Currency to credit.
    pub to_currency: Currency,
    /// Amount to exchange, in the source currency.
    pub amount: Decimal,
}

/// POST /exchange - Convert part of one balance into another currency.
async fn exchange(
    State(state): State<AppState>,
    auth: AuthClient,
    Json(payload): Json<ExchangeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.from_currency == payload.to_currency {
        return Err(AppError::Validation("Cannot exchange same currency".to_string()).into());
    }
    if payload.amount <= Decimal::ZERO {
        return Err(AppError::Validation("Amount must be positive".to_string()).into());
    }

    let amount = round_money(payload.amount);
    let ledger = LedgerRepository::new((*state.db).clone());

    let outcome = ledger
        .exchange(
            auth.client_id(),
            payload.from_currency,
            payload.to_currency,
            amount,
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "exchangeRate": outcome.rate,
        "convertedAmount": outcome.converted_amount,
        "newBalances": {
            (payload.from_currency.code()): outcome.source_account.balance,
            (payload.to_currency.code()): outcome.target_account.balance,
        }
    })))
}
