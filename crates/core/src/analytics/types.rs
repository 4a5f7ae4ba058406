//! Analytics input and summary types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sarraf_shared::Currency;
use serde::Serialize;

/// Kind of activity a transaction row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    /// Currency conversion within one client's accounts.
    Exchange,
    /// Outgoing transfer to another client.
    Transfer,
    /// Incoming transfer from another client.
    Received,
}

/// One transaction row, reduced to the fields analytics cares about.
#[derive(Debug, Clone)]
pub struct ActivityRecord {
    /// Activity kind.
    pub kind: ActivityKind,
    /// Transaction amount.
    pub amount: Decimal,
    /// Source currency.
    pub currency_from: Option<Currency>,
    /// Target currency.
    pub currency_to: Option<Currency>,
    /// Rate applied (exchanges only).
    pub exchange_rate: Option<Decimal>,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
}

/// Aggregated view of a client's transaction history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Total number of transactions.
    pub total_transactions: u64,
    /// Sum of exchange amounts.
    pub total_exchange_volume: Decimal,
    /// Sum of outgoing transfer amounts.
    pub total_transfer_volume: Decimal,
    /// Mean value across all transactions.
    pub average_transaction_value: Decimal,
    /// Calendar month (YYYY-MM) with the most transactions.
    pub most_active_month: Option<String>,
    /// Activity per supported currency.
    pub currency_distribution: Vec<CurrencyActivity>,
    /// Activity per calendar month, oldest first.
    pub monthly_activity: Vec<MonthlyActivity>,
    /// Average rate per exchanged currency pair.
    pub pair_rates: Vec<PairRateSummary>,
}

/// Transaction activity touching one currency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyActivity {
    /// Currency code.
    pub currency: Currency,
    /// Transactions with this currency on either side.
    pub count: u64,
    /// Amount moved out of this currency.
    pub volume: Decimal,
}

/// Transaction activity within one calendar month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyActivity {
    /// Month key, `YYYY-MM`.
    pub month: String,
    /// Exchange count.
    pub exchanges: u64,
    /// Outgoing transfer count.
    pub transfers: u64,
    /// Exchange plus transfer volume.
    pub volume: Decimal,
}

/// Average applied rate for one exchanged pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairRateSummary {
    /// Pair label, e.g. `USD/SAR`.
    pub pair: String,
    /// Mean rate across all exchanges of this pair.
    pub average_rate: Decimal,
    /// Number of exchanges of this pair.
    pub count: u64,
}
