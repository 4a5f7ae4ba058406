//! Exchange rate repository for published pair rates.
//!
//! Rates are keyed by the ordered (base, target) pair. Resolution prefers
//! the exact pair and falls back to the inverse of the reverse pair; a
//! same-currency pair trivially resolves to 1.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use sarraf_shared::{Currency, types::round_rate};

use crate::entities::exchange_rates;

/// Error types for exchange rate operations.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeRateError {
    /// Rate must be positive.
    #[error("Exchange rate must be positive")]
    NonPositiveRate,

    /// Currencies must be different.
    #[error("Base and target currencies must be different")]
    SameCurrency,

    /// No rate stored for the pair, in either direction.
    #[error("No exchange rate found for {0}/{1}")]
    RateNotFound(Currency, Currency),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Seed rates installed when the table is empty at startup.
const DEFAULT_RATES: [(Currency, Currency, Decimal); 6] = [
    (Currency::Usd, Currency::Sar, Decimal::from_parts(37500, 0, 0, false, 4)),
    (Currency::Usd, Currency::Yer, Decimal::from_parts(25000, 0, 0, false, 2)),
    (Currency::Sar, Currency::Usd, Decimal::from_parts(2667, 0, 0, false, 4)),
    (Currency::Sar, Currency::Yer, Decimal::from_parts(6667, 0, 0, false, 2)),
    (Currency::Yer, Currency::Usd, Decimal::from_parts(40, 0, 0, false, 4)),
    (Currency::Yer, Currency::Sar, Decimal::from_parts(150, 0, 0, false, 4)),
];

/// Resolves the rate for an ordered pair on any connection.
///
/// Lookup priority: same currency (1), direct row, inverse of the reverse
/// row. Used by ledger operations inside an open database transaction.
///
/// # Errors
///
/// Returns `ExchangeRateError::RateNotFound` if neither direction is stored.
pub async fn resolve_rate<C: ConnectionTrait>(
    conn: &C,
    from: Currency,
    to: Currency,
) -> Result<Decimal, ExchangeRateError> {
    if from == to {
        return Ok(Decimal::ONE);
    }

    if let Some(direct) = find_pair(conn, from, to).await? {
        return Ok(direct.rate);
    }

    if let Some(reverse) = find_pair(conn, to, from).await? {
        return Ok(invert_rate(reverse.rate));
    }

    Err(ExchangeRateError::RateNotFound(from, to))
}

/// Finds the stored row for an exact ordered pair.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn find_pair<C: ConnectionTrait>(
    conn: &C,
    base: Currency,
    target: Currency,
) -> Result<Option<exchange_rates::Model>, ExchangeRateError> {
    let rate = exchange_rates::Entity::find()
        .filter(exchange_rates::Column::BaseCurrency.eq(base.code()))
        .filter(exchange_rates::Column::TargetCurrency.eq(target.code()))
        .one(conn)
        .await?;

    Ok(rate)
}

/// Inverts a stored rate, keeping six decimal places.
#[must_use]
pub fn invert_rate(rate: Decimal) -> Decimal {
    round_rate(Decimal::ONE / rate)
}

/// Exchange rate repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExchangeRateRepository {
    db: DatabaseConnection,
}

impl ExchangeRateRepository {
    /// Creates a new exchange rate repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or updates the rate for an ordered pair (upsert behavior).
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is not positive or the currencies are
    /// equal.
    pub async fn upsert(
        &self,
        base: Currency,
        target: Currency,
        rate: Decimal,
    ) -> Result<exchange_rates::Model, ExchangeRateError> {
        if rate <= Decimal::ZERO {
            return Err(ExchangeRateError::NonPositiveRate);
        }
        if base == target {
            return Err(ExchangeRateError::SameCurrency);
        }

        let rate = round_rate(rate);
        let existing = find_pair(&self.db, base, target).await?;

        if let Some(existing_rate) = existing {
            let mut active: exchange_rates::ActiveModel = existing_rate.into();
            active.rate = Set(rate);
            active.updated_at = Set(chrono::Utc::now().into());

            let updated = active.update(&self.db).await?;
            Ok(updated)
        } else {
            let row = exchange_rates::ActiveModel {
                id: Set(Uuid::new_v4()),
                base_currency: Set(base.code().to_string()),
                target_currency: Set(target.code().to_string()),
                rate: Set(rate),
                updated_at: Set(chrono::Utc::now().into()),
            };

            let inserted = row.insert(&self.db).await?;
            Ok(inserted)
        }
    }

    /// Resolves the rate for an ordered pair.
    ///
    /// # Errors
    ///
    /// Returns `ExchangeRateError::RateNotFound` if neither direction is
    /// stored.
    pub async fn resolve(&self, from: Currency, to: Currency) -> Result<Decimal, ExchangeRateError> {
        resolve_rate(&self.db, from, to).await
    }

    /// Lists all stored rates, ordered by pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<exchange_rates::Model>, ExchangeRateError> {
        let rates = exchange_rates::Entity::find()
            .order_by_asc(exchange_rates::Column::BaseCurrency)
            .order_by_asc(exchange_rates::Column::TargetCurrency)
            .all(&self.db)
            .await?;

        Ok(rates)
    }

    /// Installs the hard-coded seed rates if the table is empty.
    ///
    /// Returns `true` when seeding happened.
    ///
    /// # Errors
    ///
    /// Returns an error if a query or insert fails.
    pub async fn seed_defaults(&self) -> Result<bool, ExchangeRateError> {
        let count = exchange_rates::Entity::find().count(&self.db).await?;
        if count > 0 {
            return Ok(false);
        }

        for (base, target, rate) in DEFAULT_RATES {
            self.upsert(base, target, rate).await?;
        }

        Ok(true)
    }
}

// ============================================================================
// Pure resolution logic for property testing
// ============================================================================

/// A stored pair rate, detached from the database row.
#[derive(Debug, Clone)]
pub struct StoredPair {
    /// Base currency.
    pub base: Currency,
    /// Target currency.
    pub target: Currency,
    /// Stored rate.
    pub rate: Decimal,
}

/// Resolution logic over an in-memory rate set (mirrors [`resolve_rate`]).
#[must_use]
pub fn resolve_stored(stored: &[StoredPair], from: Currency, to: Currency) -> Option<Decimal> {
    if from == to {
        return Some(Decimal::ONE);
    }

    if let Some(direct) = stored.iter().find(|p| p.base == from && p.target == to) {
        return Some(direct.rate);
    }

    stored
        .iter()
        .find(|p| p.base == to && p.target == from)
        .map(|reverse| invert_rate(reverse.rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_rates_cover_all_pairs() {
        for from in Currency::ALL {
            for to in Currency::ALL {
                if from == to {
                    continue;
                }
                assert!(
                    DEFAULT_RATES
                        .iter()
                        .any(|(base, target, _)| *base == from && *target == to),
                    "missing default rate for {from}/{to}"
                );
            }
        }
    }

    #[test]
    fn test_default_rate_values() {
        let usd_sar = DEFAULT_RATES
            .iter()
            .find(|(b, t, _)| *b == Currency::Usd && *t == Currency::Sar)
            .unwrap();
        assert_eq!(usd_sar.2, dec!(3.7500));

        let usd_yer = DEFAULT_RATES
            .iter()
            .find(|(b, t, _)| *b == Currency::Usd && *t == Currency::Yer)
            .unwrap();
        assert_eq!(usd_yer.2, dec!(250.00));
    }

    #[test]
    fn test_resolve_stored_direct() {
        let stored = vec![StoredPair {
            base: Currency::Usd,
            target: Currency::Sar,
            rate: dec!(3.75),
        }];

        assert_eq!(
            resolve_stored(&stored, Currency::Usd, Currency::Sar),
            Some(dec!(3.75))
        );
    }

    #[test]
    fn test_resolve_stored_inverse_fallback() {
        // Only USD -> SAR stored; SAR -> USD resolves via 1/3.75.
        let stored = vec![StoredPair {
            base: Currency::Usd,
            target: Currency::Sar,
            rate: dec!(3.75),
        }];

        assert_eq!(
            resolve_stored(&stored, Currency::Sar, Currency::Usd),
            Some(dec!(0.266667))
        );
    }

    #[test]
    fn test_resolve_stored_missing() {
        assert_eq!(resolve_stored(&[], Currency::Usd, Currency::Yer), None);
    }

    fn currency_strategy() -> impl Strategy<Value = Currency> {
        prop::sample::select(Currency::ALL.to_vec())
    }

    fn rate_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 4))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Direct rate takes priority over the inverse of the reverse row.
        #[test]
        fn prop_direct_rate_priority(
            from in currency_strategy(),
            to in currency_strategy(),
            direct in rate_strategy(),
            reverse in rate_strategy(),
        ) {
            prop_assume!(from != to);

            let stored = vec![
                StoredPair { base: from, target: to, rate: direct },
                StoredPair { base: to, target: from, rate: reverse },
            ];

            prop_assert_eq!(resolve_stored(&stored, from, to), Some(direct));
        }

        /// With only the reverse row stored, resolution inverts it.
        #[test]
        fn prop_inverse_rate_fallback(
            from in currency_strategy(),
            to in currency_strategy(),
            reverse in rate_strategy(),
        ) {
            prop_assume!(from != to);

            let stored = vec![StoredPair { base: to, target: from, rate: reverse }];

            prop_assert_eq!(
                resolve_stored(&stored, from, to),
                Some(invert_rate(reverse))
            );
        }

        /// A same-currency pair resolves to 1 regardless of the stored set.
        #[test]
        fn prop_same_currency_is_one(
            currency in currency_strategy(),
            rate in rate_strategy(),
        ) {
            let stored = vec![StoredPair {
                base: Currency::Usd,
                target: Currency::Sar,
                rate,
            }];

            prop_assert_eq!(
                resolve_stored(&stored, currency, currency),
                Some(Decimal::ONE)
            );
        }
    }
}
