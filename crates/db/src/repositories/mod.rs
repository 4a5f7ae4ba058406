//! Repository abstractions for data access.

pub mod account;
pub mod client;
pub mod exchange_rate;
pub mod ledger;
pub mod transaction;

pub use account::AccountRepository;
pub use client::ClientRepository;
pub use exchange_rate::{ExchangeRateError, ExchangeRateRepository};
pub use ledger::{ExchangeOutcome, LedgerError, LedgerRepository, TransferOutcome};
pub use transaction::{TransactionFilter, TransactionRepository};
