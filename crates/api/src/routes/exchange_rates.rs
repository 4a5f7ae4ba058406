//! Public exchange rate routes.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::{AppState, error::ApiError};
use sarraf_db::{ExchangeRateRepository, entities::exchange_rates};
use sarraf_shared::{AppError, Currency};

/// Creates the public exchange rate routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/exchange-rates", get(list_rates))
        .route("/exchange-rates/{from}/{to}", get(get_rate))
}

/// GET /exchange-rates - List all stored pair rates.
async fn list_rates(
    State(state): State<AppState>,
) -> Result<Json<Vec<exchange_rates::Model>>, ApiError> {
    let rate_repo = ExchangeRateRepository::new((*state.db).clone());

    let rates = rate_repo.list_all().await?;

    Ok(Json(rates))
}

/// GET /exchange-rates/{from}/{to} - Resolve the rate for one pair.
async fn get_rate(
    State(state): State<AppState>,
    Path((from, to)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let from = Currency::from_str(&from).map_err(AppError::Validation)?;
    let to = Currency::from_str(&to).map_err(AppError::Validation)?;

    let rate_repo = ExchangeRateRepository::new((*state.db).clone());
    let rate = rate_repo.resolve(from, to).await?;

    Ok(Json(json!({ "rate": rate })))
}
