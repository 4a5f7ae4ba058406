//! Aggregation over a client's transaction history.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sarraf_shared::{Currency, types::round_money, types::round_rate};

use super::types::{
    ActivityKind, ActivityRecord, AnalyticsSummary, CurrencyActivity, MonthlyActivity,
    PairRateSummary,
};

/// Summarizes a client's transaction history.
///
/// Records are expected in any order; monthly buckets come back sorted
/// oldest first.
#[must_use]
pub fn summarize(records: &[ActivityRecord]) -> AnalyticsSummary {
    let total_transactions = records.len() as u64;

    let total_exchange_volume: Decimal = records
        .iter()
        .filter(|r| r.kind == ActivityKind::Exchange)
        .map(|r| r.amount)
        .sum();
    let total_transfer_volume: Decimal = records
        .iter()
        .filter(|r| r.kind == ActivityKind::Transfer)
        .map(|r| r.amount)
        .sum();

    let average_transaction_value = if total_transactions == 0 {
        Decimal::ZERO
    } else {
        round_money(
            (total_exchange_volume + total_transfer_volume) / Decimal::from(total_transactions),
        )
    };

    AnalyticsSummary {
        total_transactions,
        total_exchange_volume,
        total_transfer_volume,
        average_transaction_value,
        most_active_month: most_active_month(records),
        currency_distribution: currency_distribution(records),
        monthly_activity: monthly_activity(records),
        pair_rates: pair_rates(records),
    }
}

fn month_key(record: &ActivityRecord) -> String {
    record.created_at.format("%Y-%m").to_string()
}

fn most_active_month(records: &[ActivityRecord]) -> Option<String> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for record in records {
        *counts.entry(month_key(record)).or_default() += 1;
    }

    // max_by_key keeps the later month on ties; BTreeMap iteration is sorted.
    counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(month, _)| month)
}

fn currency_distribution(records: &[ActivityRecord]) -> Vec<CurrencyActivity> {
    Currency::ALL
        .into_iter()
        .map(|currency| {
            let touching = records.iter().filter(|r| {
                r.currency_from == Some(currency) || r.currency_to == Some(currency)
            });
            let count = touching.clone().count() as u64;
            let volume: Decimal = touching
                .filter(|r| r.currency_from == Some(currency))
                .filter(|r| r.kind != ActivityKind::Received)
                .map(|r| r.amount)
                .sum();

            CurrencyActivity {
                currency,
                count,
                volume,
            }
        })
        .collect()
}

fn monthly_activity(records: &[ActivityRecord]) -> Vec<MonthlyActivity> {
    let mut buckets: BTreeMap<String, MonthlyActivity> = BTreeMap::new();

    for record in records {
        let bucket = buckets
            .entry(month_key(record))
            .or_insert_with(|| MonthlyActivity {
                month: month_key(record),
                exchanges: 0,
                transfers: 0,
                volume: Decimal::ZERO,
            });

        match record.kind {
            ActivityKind::Exchange => {
                bucket.exchanges += 1;
                bucket.volume += record.amount;
            }
            ActivityKind::Transfer => {
                bucket.transfers += 1;
                bucket.volume += record.amount;
            }
            ActivityKind::Received => {}
        }
    }

    buckets.into_values().collect()
}

fn pair_rates(records: &[ActivityRecord]) -> Vec<PairRateSummary> {
    let mut buckets: BTreeMap<String, (Decimal, u64)> = BTreeMap::new();

    for record in records {
        if record.kind != ActivityKind::Exchange {
            continue;
        }
        let (Some(from), Some(to), Some(rate)) =
            (record.currency_from, record.currency_to, record.exchange_rate)
        else {
            continue;
        };

        let entry = buckets.entry(format!("{from}/{to}")).or_insert((Decimal::ZERO, 0));
        entry.0 += rate;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(pair, (rate_sum, count))| PairRateSummary {
            pair,
            average_rate: round_rate(rate_sum / Decimal::from(count)),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn record(
        kind: ActivityKind,
        amount: Decimal,
        from: Currency,
        to: Currency,
        rate: Option<Decimal>,
        month: u32,
    ) -> ActivityRecord {
        ActivityRecord {
            kind,
            amount,
            currency_from: Some(from),
            currency_to: Some(to),
            exchange_rate: rate,
            created_at: chrono::Utc.with_ymd_and_hms(2025, month, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_history() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_transactions, 0);
        assert_eq!(summary.total_exchange_volume, Decimal::ZERO);
        assert_eq!(summary.average_transaction_value, Decimal::ZERO);
        assert_eq!(summary.most_active_month, None);
        assert!(summary.monthly_activity.is_empty());
        assert!(summary.pair_rates.is_empty());
    }

    #[test]
    fn test_volumes_split_by_kind() {
        let records = vec![
            record(
                ActivityKind::Exchange,
                dec!(100.00),
                Currency::Usd,
                Currency::Sar,
                Some(dec!(3.75)),
                1,
            ),
            record(
                ActivityKind::Transfer,
                dec!(40.00),
                Currency::Usd,
                Currency::Usd,
                None,
                1,
            ),
            record(
                ActivityKind::Received,
                dec!(15.00),
                Currency::Usd,
                Currency::Usd,
                None,
                1,
            ),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.total_transactions, 3);
        assert_eq!(summary.total_exchange_volume, dec!(100.00));
        assert_eq!(summary.total_transfer_volume, dec!(40.00));
        // (100 + 40) / 3
        assert_eq!(summary.average_transaction_value, dec!(46.67));
    }

    #[test]
    fn test_monthly_buckets_sorted() {
        let records = vec![
            record(
                ActivityKind::Exchange,
                dec!(10.00),
                Currency::Usd,
                Currency::Yer,
                Some(dec!(250.00)),
                3,
            ),
            record(
                ActivityKind::Transfer,
                dec!(5.00),
                Currency::Sar,
                Currency::Sar,
                None,
                1,
            ),
            record(
                ActivityKind::Exchange,
                dec!(20.00),
                Currency::Usd,
                Currency::Yer,
                Some(dec!(250.00)),
                3,
            ),
        ];

        let summary = summarize(&records);
        let months: Vec<&str> = summary
            .monthly_activity
            .iter()
            .map(|m| m.month.as_str())
            .collect();
        assert_eq!(months, vec!["2025-01", "2025-03"]);
        assert_eq!(summary.monthly_activity[1].exchanges, 2);
        assert_eq!(summary.monthly_activity[1].volume, dec!(30.00));
        assert_eq!(summary.most_active_month.as_deref(), Some("2025-03"));
    }

    #[test]
    fn test_pair_rates_averaged() {
        let records = vec![
            record(
                ActivityKind::Exchange,
                dec!(10.00),
                Currency::Usd,
                Currency::Sar,
                Some(dec!(3.70)),
                1,
            ),
            record(
                ActivityKind::Exchange,
                dec!(10.00),
                Currency::Usd,
                Currency::Sar,
                Some(dec!(3.80)),
                2,
            ),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.pair_rates.len(), 1);
        assert_eq!(summary.pair_rates[0].pair, "USD/SAR");
        assert_eq!(summary.pair_rates[0].average_rate, dec!(3.750000));
        assert_eq!(summary.pair_rates[0].count, 2);
    }

    #[test]
    fn test_currency_distribution_counts_both_sides() {
        let records = vec![record(
            ActivityKind::Exchange,
            dec!(100.00),
            Currency::Usd,
            Currency::Sar,
            Some(dec!(3.75)),
            1,
        )];

        let summary = summarize(&records);
        let usd = &summary.currency_distribution[0];
        let sar = &summary.currency_distribution[1];
        let yer = &summary.currency_distribution[2];

        assert_eq!(usd.count, 1);
        assert_eq!(usd.volume, dec!(100.00));
        assert_eq!(sar.count, 1);
        assert_eq!(sar.volume, Decimal::ZERO);
        assert_eq!(yer.count, 0);
    }
}
