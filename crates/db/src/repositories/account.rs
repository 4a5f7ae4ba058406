//! Account repository for per-client, per-currency balance records.
//!
//! Accounts are created lazily at zero balance; [`get_or_create`] is the
//! single entry point for that, shared by the ledger operations and the
//! account-listing endpoint.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use sarraf_shared::Currency;

use crate::entities::accounts;

/// Finds the account for (client, currency), creating it at 0.00 if absent.
///
/// Works on any connection so ledger operations can call it inside an open
/// database transaction.
///
/// # Errors
///
/// Returns an error if the database query or insert fails.
pub async fn get_or_create<C: ConnectionTrait>(
    conn: &C,
    client_id: Uuid,
    currency: Currency,
) -> Result<accounts::Model, DbErr> {
    let existing = accounts::Entity::find()
        .filter(accounts::Column::ClientId.eq(client_id))
        .filter(accounts::Column::Currency.eq(currency.code()))
        .one(conn)
        .await?;

    if let Some(account) = existing {
        return Ok(account);
    }

    let account = accounts::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        currency: Set(currency.code().to_string()),
        balance: Set(Decimal::new(0, 2)),
    };

    account.insert(conn).await
}

/// Account repository for balance lookups and lazy provisioning.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a client's account for one currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        client_id: Uuid,
        currency: Currency,
    ) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::ClientId.eq(client_id))
            .filter(accounts::Column::Currency.eq(currency.code()))
            .one(&self.db)
            .await
    }

    /// Lists a client's accounts, ordered by currency code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_client(&self, client_id: Uuid) -> Result<Vec<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::ClientId.eq(client_id))
            .order_by_asc(accounts::Column::Currency)
            .all(&self.db)
            .await
    }

    /// Ensures the client holds an account in every supported currency,
    /// then returns the full set.
    ///
    /// # Errors
    ///
    /// Returns an error if a query or insert fails.
    pub async fn ensure_all(&self, client_id: Uuid) -> Result<Vec<accounts::Model>, DbErr> {
        for currency in Currency::ALL {
            get_or_create(&self.db, client_id, currency).await?;
        }

        self.list_for_client(client_id).await
    }
}
