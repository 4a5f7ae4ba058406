//! Transaction history routes.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{AppState, error::ApiError, middleware::AuthClient};
use sarraf_db::{
    TransactionRepository,
    entities::{sea_orm_active_enums::TransactionKind, transactions},
    repositories::TransactionFilter,
};
use sarraf_shared::{AppError, Currency};

const DEFAULT_LIMIT: u64 = 50;

/// Creates the transaction routes (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/transactions", get(list_transactions))
}

/// Query parameters for the transaction history.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    /// Row kind: exchange, transfer, received, or "all".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Currency on either side, or "all".
    pub currency: Option<String>,
    /// Inclusive lower bound on creation time (RFC 3339).
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on creation time (RFC 3339).
    pub date_to: Option<DateTime<Utc>>,
    /// Maximum rows to return (default 50).
    pub limit: Option<u64>,
    /// Rows to skip (default 0).
    pub offset: Option<u64>,
}

/// GET /transactions - List the client's transactions, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthClient,
    Query(query): Query<TransactionQuery>,
) -> Result<Json<Vec<transactions::Model>>, ApiError> {
    let filter = build_filter(&query)?;

    let txn_repo = TransactionRepository::new((*state.db).clone());
    let rows = txn_repo.list_for_client(auth.client_id(), filter).await?;

    Ok(Json(rows))
}

/// Turns the raw query into a typed filter; "all" means no filter.
fn build_filter(query: &TransactionQuery) -> Result<TransactionFilter, ApiError> {
    let kind = match query.kind.as_deref() {
        None | Some("all") => None,
        Some("exchange") => Some(TransactionKind::Exchange),
        Some("transfer") => Some(TransactionKind::Transfer),
        Some("received") => Some(TransactionKind::Received),
        Some(other) => {
            return Err(
                AppError::Validation(format!("Unknown transaction type: {other}")).into(),
            );
        }
    };

    let currency = match query.currency.as_deref() {
        None | Some("all") => None,
        Some(code) => Some(
            Currency::from_str(code)
                .map_err(|e| ApiError::from(AppError::Validation(e)))?,
        ),
    };

    Ok(TransactionFilter {
        kind,
        currency,
        date_from: query.date_from,
        date_to: query.date_to,
        limit: Some(query.limit.unwrap_or(DEFAULT_LIMIT)),
        offset: Some(query.offset.unwrap_or(0)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some("all"), None)]
    #[case(Some("exchange"), Some(TransactionKind::Exchange))]
    #[case(Some("received"), Some(TransactionKind::Received))]
    fn test_kind_filter(#[case] input: Option<&str>, #[case] expected: Option<TransactionKind>) {
        let query = TransactionQuery {
            kind: input.map(String::from),
            ..TransactionQuery::default()
        };

        let filter = build_filter(&query).unwrap();
        assert_eq!(filter.kind, expected);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let query = TransactionQuery {
            kind: Some("refund".to_string()),
            ..TransactionQuery::default()
        };

        assert!(build_filter(&query).is_err());
    }

    #[test]
    fn test_currency_filter_parses_code() {
        let query = TransactionQuery {
            currency: Some("sar".to_string()),
            ..TransactionQuery::default()
        };

        let filter = build_filter(&query).unwrap();
        assert_eq!(filter.currency, Some(Currency::Sar));
    }

    #[test]
    fn test_default_pagination() {
        let filter = build_filter(&TransactionQuery::default()).unwrap();
        assert_eq!(filter.limit, Some(DEFAULT_LIMIT));
        assert_eq!(filter.offset, Some(0));
    }
}
