//! Error-to-response mapping for route handlers.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

use sarraf_core::ledger::LedgerError as PostingError;
use sarraf_db::repositories::{ExchangeRateError, LedgerError};
use sarraf_shared::AppError;

/// Wrapper that renders an [`AppError`] as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let body = Json(json!({
            "error": self.0.error_code().to_ascii_lowercase(),
            "message": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let app = match err {
            LedgerError::AccountNotFound { .. } | LedgerError::RecipientNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            LedgerError::SelfTransfer => AppError::Validation(err.to_string()),
            LedgerError::Posting(posting) => match posting {
                PostingError::InsufficientBalance { .. } => {
                    AppError::InsufficientBalance(posting.to_string())
                }
                PostingError::SameCurrency(_)
                | PostingError::NonPositiveAmount(_)
                | PostingError::NonPositiveRate(_) => AppError::Validation(posting.to_string()),
            },
            LedgerError::Rate(rate) => return rate.into(),
            LedgerError::Database(db) => AppError::Database(db.to_string()),
        };

        Self(app)
    }
}

impl From<ExchangeRateError> for ApiError {
    fn from(err: ExchangeRateError) -> Self {
        let app = match err {
            ExchangeRateError::RateNotFound(_, _) => AppError::RateUnavailable(err.to_string()),
            ExchangeRateError::NonPositiveRate | ExchangeRateError::SameCurrency => {
                AppError::Validation(err.to_string())
            }
            ExchangeRateError::Database(db) => AppError::Database(db.to_string()),
        };

        Self(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_balance_maps_to_400() {
        let err: ApiError = LedgerError::Posting(PostingError::InsufficientBalance {
            available: dec!(5.00),
            requested: dec!(10.00),
        })
        .into();

        assert_eq!(err.0.status_code(), 400);
        assert_eq!(err.0.error_code(), "INSUFFICIENT_BALANCE");
    }

    #[test]
    fn test_missing_rate_maps_to_404() {
        use sarraf_shared::Currency;

        let err: ApiError =
            LedgerError::Rate(ExchangeRateError::RateNotFound(Currency::Usd, Currency::Yer))
                .into();

        assert_eq!(err.0.status_code(), 404);
        assert_eq!(err.0.error_code(), "RATE_UNAVAILABLE");
    }

    #[test]
    fn test_self_transfer_maps_to_400() {
        let err: ApiError = LedgerError::SelfTransfer.into();
        assert_eq!(err.0.status_code(), 400);
    }
}
