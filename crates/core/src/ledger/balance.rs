//! Pure balance arithmetic for exchange and transfer operations.
//!
//! All money is `Decimal`; balances are written at two decimal places with
//! banker's rounding. Converted amounts are rounded once, before being
//! added to the target balance.

use rust_decimal::Decimal;
use sarraf_shared::{Currency, types::round_money};

use super::error::LedgerError;

/// Result of posting a currency exchange against two accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangePosting {
    /// Rate applied (1 source unit = `rate` target units).
    pub rate: Decimal,
    /// Amount credited to the target account, rounded to 2 dp.
    pub converted: Decimal,
    /// Source account balance after the debit.
    pub new_source_balance: Decimal,
    /// Target account balance after the credit.
    pub new_target_balance: Decimal,
}

/// Result of posting a same-currency transfer between two clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPosting {
    /// Sender balance after the debit.
    pub new_sender_balance: Decimal,
    /// Recipient balance after the credit.
    pub new_recipient_balance: Decimal,
}

/// Computes the postings for exchanging `amount` of `from` into `to`.
///
/// # Errors
///
/// Returns an error if the currencies are equal, the amount or rate is not
/// positive, or the source balance does not cover the amount.
pub fn post_exchange(
    from: Currency,
    to: Currency,
    source_balance: Decimal,
    target_balance: Decimal,
    amount: Decimal,
    rate: Decimal,
) -> Result<ExchangePosting, LedgerError> {
    if from == to {
        return Err(LedgerError::SameCurrency(from));
    }
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(amount));
    }
    if rate <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveRate(rate));
    }
    if source_balance < amount {
        return Err(LedgerError::InsufficientBalance {
            available: source_balance,
            requested: amount,
        });
    }

    let converted = round_money(amount * rate);

    Ok(ExchangePosting {
        rate,
        converted,
        new_source_balance: round_money(source_balance - amount),
        new_target_balance: round_money(target_balance + converted),
    })
}

/// Computes the postings for transferring `amount` between two clients.
///
/// # Errors
///
/// Returns an error if the amount is not positive or the sender balance
/// does not cover it.
pub fn post_transfer(
    sender_balance: Decimal,
    recipient_balance: Decimal,
    amount: Decimal,
) -> Result<TransferPosting, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(amount));
    }
    if sender_balance < amount {
        return Err(LedgerError::InsufficientBalance {
            available: sender_balance,
            requested: amount,
        });
    }

    Ok(TransferPosting {
        new_sender_balance: round_money(sender_balance - amount),
        new_recipient_balance: round_money(recipient_balance + amount),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exchange_usd_to_sar() {
        // 100.00 USD at 3.75 -> 375.00 SAR
        let posting = post_exchange(
            Currency::Usd,
            Currency::Sar,
            dec!(100.00),
            dec!(0.00),
            dec!(100.00),
            dec!(3.75),
        )
        .unwrap();

        assert_eq!(posting.converted, dec!(375.00));
        assert_eq!(posting.new_source_balance, dec!(0.00));
        assert_eq!(posting.new_target_balance, dec!(375.00));
        assert_eq!(posting.rate, dec!(3.75));
    }

    #[test]
    fn test_exchange_rounds_converted_once() {
        // 10.01 * 0.2667 = 2.669667 -> 2.67
        let posting = post_exchange(
            Currency::Sar,
            Currency::Usd,
            dec!(50.00),
            dec!(1.00),
            dec!(10.01),
            dec!(0.2667),
        )
        .unwrap();

        assert_eq!(posting.converted, dec!(2.67));
        assert_eq!(posting.new_target_balance, dec!(3.67));
        assert_eq!(posting.new_source_balance, dec!(39.99));
    }

    #[test]
    fn test_exchange_same_currency_rejected() {
        let result = post_exchange(
            Currency::Usd,
            Currency::Usd,
            dec!(100.00),
            dec!(0.00),
            dec!(10.00),
            dec!(1.00),
        );
        assert_eq!(result, Err(LedgerError::SameCurrency(Currency::Usd)));
    }

    #[test]
    fn test_exchange_insufficient_balance() {
        let result = post_exchange(
            Currency::Usd,
            Currency::Sar,
            dec!(5.00),
            dec!(0.00),
            dec!(10.00),
            dec!(3.75),
        );
        assert_eq!(
            result,
            Err(LedgerError::InsufficientBalance {
                available: dec!(5.00),
                requested: dec!(10.00),
            })
        );
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-1.00))]
    fn test_exchange_non_positive_amount_rejected(#[case] amount: Decimal) {
        let result = post_exchange(
            Currency::Usd,
            Currency::Sar,
            dec!(100.00),
            dec!(0.00),
            amount,
            dec!(3.75),
        );
        assert_eq!(result, Err(LedgerError::NonPositiveAmount(amount)));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-3.75))]
    fn test_exchange_non_positive_rate_rejected(#[case] rate: Decimal) {
        let result = post_exchange(
            Currency::Usd,
            Currency::Sar,
            dec!(100.00),
            dec!(0.00),
            dec!(10.00),
            rate,
        );
        assert_eq!(result, Err(LedgerError::NonPositiveRate(rate)));
    }

    #[test]
    fn test_transfer_example() {
        // Sender 500.00, transfer 50.00 to a recipient holding 0.00.
        let posting = post_transfer(dec!(500.00), dec!(0.00), dec!(50.00)).unwrap();
        assert_eq!(posting.new_sender_balance, dec!(450.00));
        assert_eq!(posting.new_recipient_balance, dec!(50.00));
    }

    #[test]
    fn test_transfer_full_balance() {
        let posting = post_transfer(dec!(50.00), dec!(10.00), dec!(50.00)).unwrap();
        assert_eq!(posting.new_sender_balance, dec!(0.00));
        assert_eq!(posting.new_recipient_balance, dec!(60.00));
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let result = post_transfer(dec!(10.00), dec!(0.00), dec!(10.01));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
    }

    // Strategy: cent-denominated decimals, the shape account rows hold.
    fn money_strategy(max_cents: i64) -> impl Strategy<Value = Decimal> {
        (0i64..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn rate_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10_000_000i64).prop_map(|n| Decimal::new(n, 6))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Transfers conserve the combined balance of both parties.
        #[test]
        fn prop_transfer_conserves_total(
            sender in money_strategy(1_000_000_00),
            recipient in money_strategy(1_000_000_00),
            amount_cents in 1i64..=1_000_000_00,
        ) {
            let amount = Decimal::new(amount_cents, 2);
            prop_assume!(sender >= amount);

            let posting = post_transfer(sender, recipient, amount).unwrap();
            prop_assert_eq!(
                posting.new_sender_balance + posting.new_recipient_balance,
                sender + recipient
            );
        }

        /// The source account is debited exactly the requested amount.
        #[test]
        fn prop_exchange_debits_exact_amount(
            source in money_strategy(1_000_000_00),
            target in money_strategy(1_000_000_00),
            amount_cents in 1i64..=1_000_000_00,
            rate in rate_strategy(),
        ) {
            let amount = Decimal::new(amount_cents, 2);
            prop_assume!(source >= amount);

            let posting = post_exchange(
                Currency::Usd, Currency::Yer, source, target, amount, rate,
            ).unwrap();

            prop_assert_eq!(posting.new_source_balance, source - amount);
            prop_assert_eq!(
                posting.new_target_balance,
                target + posting.converted
            );
        }

        /// A failed posting reports the inputs unchanged; the caller writes
        /// nothing.
        #[test]
        fn prop_insufficient_exchange_is_err(
            source in money_strategy(1_000_00),
            amount_cents in 1i64..=1_000_000_00,
            rate in rate_strategy(),
        ) {
            let amount = Decimal::new(amount_cents, 2);
            prop_assume!(source < amount);

            let result = post_exchange(
                Currency::Sar, Currency::Usd, source, Decimal::ZERO, amount, rate,
            );
            let is_insufficient =
                matches!(result, Err(LedgerError::InsufficientBalance { .. }));
            prop_assert!(is_insufficient);
        }
    }
}
