//! Transaction history summaries.
//!
//! Pure aggregation over a client's transaction log, rendered by the
//! analytics endpoint. No database access; the caller maps rows into
//! [`ActivityRecord`]s.

pub mod summary;
pub mod types;

pub use summary::summarize;
pub use types::{
    ActivityKind, ActivityRecord, AnalyticsSummary, CurrencyActivity, MonthlyActivity,
    PairRateSummary,
};
