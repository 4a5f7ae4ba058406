//! Database enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of a ledger transaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Currency conversion within one client's accounts.
    #[sea_orm(string_value = "exchange")]
    Exchange,
    /// Outgoing transfer to another client.
    #[sea_orm(string_value = "transfer")]
    Transfer,
    /// Incoming transfer from another client.
    #[sea_orm(string_value = "received")]
    Received,
}
