//! Ledger posting errors.

use rust_decimal::Decimal;
use sarraf_shared::Currency;
use thiserror::Error;

/// Errors produced while computing a balance posting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Amount must be strictly positive.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Exchange requires two distinct currencies.
    #[error("cannot exchange {0} for itself")]
    SameCurrency(Currency),

    /// Exchange rate must be strictly positive.
    #[error("exchange rate must be positive, got {0}")]
    NonPositiveRate(Decimal),

    /// The debited balance does not cover the requested amount.
    #[error("insufficient balance: have {available}, need {requested}")]
    InsufficientBalance {
        /// Balance currently held.
        available: Decimal,
        /// Amount requested.
        requested: Decimal,
    },
}
