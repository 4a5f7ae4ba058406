//! Transaction repository for the append-only transaction log.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use sarraf_shared::Currency;

use crate::entities::{sea_orm_active_enums::TransactionKind, transactions};

/// Input for appending one transaction row.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Owning client.
    pub client_id: Uuid,
    /// Row kind.
    pub kind: TransactionKind,
    /// Transaction amount.
    pub amount: Decimal,
    /// Source currency.
    pub currency_from: Currency,
    /// Target currency (equals source for transfer/received).
    pub currency_to: Currency,
    /// Counterparty (transfer/received only).
    pub receiver_id: Option<Uuid>,
    /// Rate applied (exchange only).
    pub exchange_rate: Option<Decimal>,
    /// Optional free-text message.
    pub message: Option<String>,
}

/// Filter options for listing a client's transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by row kind.
    pub kind: Option<TransactionKind>,
    /// Filter by currency on either side.
    pub currency: Option<Currency>,
    /// Filter by creation time, inclusive lower bound.
    pub date_from: Option<DateTime<Utc>>,
    /// Filter by creation time, inclusive upper bound.
    pub date_to: Option<DateTime<Utc>>,
    /// Maximum rows to return.
    pub limit: Option<u64>,
    /// Rows to skip.
    pub offset: Option<u64>,
}

/// Appends one transaction row on any connection.
///
/// Ledger operations call this inside their open database transaction so
/// the log row lands atomically with the balance updates.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub async fn append<C: ConnectionTrait>(
    conn: &C,
    input: NewTransaction,
) -> Result<transactions::Model, DbErr> {
    let row = transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(input.client_id),
        kind: Set(input.kind),
        amount: Set(input.amount),
        currency_from: Set(input.currency_from.code().to_string()),
        currency_to: Set(input.currency_to.code().to_string()),
        receiver_id: Set(input.receiver_id),
        exchange_rate: Set(input.exchange_rate),
        message: Set(input.message),
        created_at: Set(chrono::Utc::now().into()),
    };

    row.insert(conn).await
}

/// Transaction repository for history queries.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a client's transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_client(
        &self,
        client_id: Uuid,
        filter: TransactionFilter,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::ClientId.eq(client_id))
            .order_by_desc(transactions::Column::CreatedAt);

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind));
        }

        if let Some(currency) = filter.currency {
            query = query.filter(
                Condition::any()
                    .add(transactions::Column::CurrencyFrom.eq(currency.code()))
                    .add(transactions::Column::CurrencyTo.eq(currency.code())),
            );
        }

        if let Some(date_from) = filter.date_from {
            query = query.filter(transactions::Column::CreatedAt.gte(date_from));
        }

        if let Some(date_to) = filter.date_to {
            query = query.filter(transactions::Column::CreatedAt.lte(date_to));
        }

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }

        query.all(&self.db).await
    }
}
