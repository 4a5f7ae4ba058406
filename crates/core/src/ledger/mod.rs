//! Exchange and transfer balance postings.
//!
//! This module is the only place new balances are computed. Repositories
//! load the affected account rows, call into here, and write the results
//! back inside a single database transaction.

pub mod balance;
pub mod error;

pub use balance::{ExchangePosting, TransferPosting, post_exchange, post_transfer};
pub use error::LedgerError;
