//! Transaction analytics route.

use std::str::FromStr;

use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;

use crate::{AppState, error::ApiError, middleware::AuthClient};
use sarraf_core::analytics::{ActivityKind, ActivityRecord, AnalyticsSummary, summarize};
use sarraf_db::{
    TransactionRepository,
    entities::{sea_orm_active_enums::TransactionKind, transactions},
    repositories::TransactionFilter,
};
use sarraf_shared::Currency;

/// Creates the analytics routes (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/analytics", get(analytics))
}

/// GET /analytics - Summarize the client's full transaction history.
async fn analytics(
    State(state): State<AppState>,
    auth: AuthClient,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    let txn_repo = TransactionRepository::new((*state.db).clone());

    // Unfiltered, unpaginated: the summary covers the whole history.
    let rows = txn_repo
        .list_for_client(auth.client_id(), TransactionFilter::default())
        .await?;

    let records: Vec<ActivityRecord> = rows.iter().map(to_record).collect();

    Ok(Json(summarize(&records)))
}

fn to_record(row: &transactions::Model) -> ActivityRecord {
    ActivityRecord {
        kind: match row.kind {
            TransactionKind::Exchange => ActivityKind::Exchange,
            TransactionKind::Transfer => ActivityKind::Transfer,
            TransactionKind::Received => ActivityKind::Received,
        },
        amount: row.amount,
        currency_from: Currency::from_str(&row.currency_from).ok(),
        currency_to: Currency::from_str(&row.currency_to).ok(),
        exchange_rate: row.exchange_rate,
        created_at: row.created_at.with_timezone(&Utc),
    }
}
