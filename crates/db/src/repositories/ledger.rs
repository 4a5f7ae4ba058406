//! Ledger operations: currency exchange and client-to-client transfer.
//!
//! These are the only writes to account balances. Each operation runs its
//! reads, balance updates, and transaction-log appends inside a single
//! database transaction, so a failed write rolls the whole operation back.
//! Balance arithmetic itself is pure and lives in `sarraf_core::ledger`.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use sarraf_core::ledger::{self as posting, LedgerError as PostingError};
use sarraf_shared::Currency;

use crate::entities::{accounts, clients, sea_orm_active_enums::TransactionKind};
use crate::repositories::{
    account,
    exchange_rate::{self, ExchangeRateError},
    transaction::{self, NewTransaction},
};

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The client holds no account in the debited currency.
    #[error("No {currency} account for client {client_id}")]
    AccountNotFound {
        /// Client whose account was requested.
        client_id: Uuid,
        /// Currency of the missing account.
        currency: Currency,
    },

    /// No client with the given username.
    #[error("Recipient '{0}' not found")]
    RecipientNotFound(String),

    /// A client cannot transfer to themselves.
    #[error("Cannot transfer to yourself")]
    SelfTransfer,

    /// Balance posting rejected (insufficient balance, bad amount, ...).
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// Rate lookup failed.
    #[error(transparent)]
    Rate(#[from] ExchangeRateError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result of a completed exchange.
#[derive(Debug, Clone)]
pub struct ExchangeOutcome {
    /// Rate applied.
    pub rate: Decimal,
    /// Amount credited to the target account.
    pub converted_amount: Decimal,
    /// Debited account, post-update.
    pub source_account: accounts::Model,
    /// Credited account, post-update.
    pub target_account: accounts::Model,
}

/// Result of a completed transfer.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// Receiving client.
    pub recipient: clients::Model,
    /// Sender's account, post-update.
    pub sender_account: accounts::Model,
}

/// Ledger repository: the balance-mutating operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Exchanges `amount` of `from` into `to` at the published rate.
    ///
    /// # Errors
    ///
    /// Returns an error if the source account is missing, the balance does
    /// not cover the amount, no rate is stored for the pair, or a database
    /// operation fails. Nothing is written on error.
    pub async fn exchange(
        &self,
        client_id: Uuid,
        from: Currency,
        to: Currency,
        amount: Decimal,
    ) -> Result<ExchangeOutcome, LedgerError> {
        if from == to {
            return Err(PostingError::SameCurrency(from).into());
        }
        if amount <= Decimal::ZERO {
            return Err(PostingError::NonPositiveAmount(amount).into());
        }

        let txn = self.db.begin().await?;

        let source = find_account(&txn, client_id, from).await?;

        // Balance check precedes rate lookup: an uncovered amount reports
        // InsufficientBalance even when the pair has no stored rate.
        if source.balance < amount {
            return Err(PostingError::InsufficientBalance {
                available: source.balance,
                requested: amount,
            }
            .into());
        }

        let rate = exchange_rate::resolve_rate(&txn, from, to).await?;
        let target = account::get_or_create(&txn, client_id, to).await?;

        let computed = posting::post_exchange(from, to, source.balance, target.balance, amount, rate)?;

        let mut active: accounts::ActiveModel = source.into();
        active.balance = Set(computed.new_source_balance);
        let source_account = active.update(&txn).await?;

        let mut active: accounts::ActiveModel = target.into();
        active.balance = Set(computed.new_target_balance);
        let target_account = active.update(&txn).await?;

        transaction::append(
            &txn,
            NewTransaction {
                client_id,
                kind: TransactionKind::Exchange,
                amount,
                currency_from: from,
                currency_to: to,
                receiver_id: None,
                exchange_rate: Some(computed.rate),
                message: None,
            },
        )
        .await?;

        txn.commit().await?;

        info!(
            client_id = %client_id,
            from = %from,
            to = %to,
            amount = %amount,
            rate = %computed.rate,
            "Exchange completed"
        );

        Ok(ExchangeOutcome {
            rate: computed.rate,
            converted_amount: computed.converted,
            source_account,
            target_account,
        })
    }

    /// Transfers `amount` of `currency` to the client named by
    /// `recipient_username`.
    ///
    /// Writes two transaction rows: the sender's `transfer` and the
    /// recipient's `received`, both inside the same database transaction as
    /// the balance updates.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipient is unknown or is the sender, the
    /// sender's account is missing or uncovered, or a database operation
    /// fails. Nothing is written on error.
    pub async fn transfer(
        &self,
        sender_id: Uuid,
        recipient_username: &str,
        currency: Currency,
        amount: Decimal,
        message: Option<String>,
    ) -> Result<TransferOutcome, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(PostingError::NonPositiveAmount(amount).into());
        }

        let txn = self.db.begin().await?;

        let recipient = clients::Entity::find()
            .filter(clients::Column::Username.eq(recipient_username))
            .one(&txn)
            .await?
            .ok_or_else(|| LedgerError::RecipientNotFound(recipient_username.to_string()))?;

        if recipient.id == sender_id {
            return Err(LedgerError::SelfTransfer);
        }

        let sender = find_account(&txn, sender_id, currency).await?;
        let recipient_account = account::get_or_create(&txn, recipient.id, currency).await?;

        let computed = posting::post_transfer(sender.balance, recipient_account.balance, amount)?;

        let mut active: accounts::ActiveModel = sender.into();
        active.balance = Set(computed.new_sender_balance);
        let sender_account = active.update(&txn).await?;

        let mut active: accounts::ActiveModel = recipient_account.into();
        active.balance = Set(computed.new_recipient_balance);
        active.update(&txn).await?;

        transaction::append(
            &txn,
            NewTransaction {
                client_id: sender_id,
                kind: TransactionKind::Transfer,
                amount,
                currency_from: currency,
                currency_to: currency,
                receiver_id: Some(recipient.id),
                exchange_rate: None,
                message: message.clone(),
            },
        )
        .await?;

        transaction::append(
            &txn,
            NewTransaction {
                client_id: recipient.id,
                kind: TransactionKind::Received,
                amount,
                currency_from: currency,
                currency_to: currency,
                receiver_id: Some(sender_id),
                exchange_rate: None,
                message,
            },
        )
        .await?;

        txn.commit().await?;

        info!(
            sender_id = %sender_id,
            recipient_id = %recipient.id,
            currency = %currency,
            amount = %amount,
            "Transfer completed"
        );

        Ok(TransferOutcome {
            recipient,
            sender_account,
        })
    }
}

/// Loads an existing account or fails with `AccountNotFound`.
async fn find_account(
    txn: &DatabaseTransaction,
    client_id: Uuid,
    currency: Currency,
) -> Result<accounts::Model, LedgerError> {
    accounts::Entity::find()
        .filter(accounts::Column::ClientId.eq(client_id))
        .filter(accounts::Column::Currency.eq(currency.code()))
        .one(txn)
        .await?
        .ok_or(LedgerError::AccountNotFound {
            client_id,
            currency,
        })
}
