//! Client repository for identity lookups.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::clients;

/// Client repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    /// Creates a new client repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a client by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<clients::Model>, DbErr> {
        clients::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a client by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<clients::Model>, DbErr> {
        clients::Entity::find()
            .filter(clients::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Resolves a transfer recipient for pre-submission verification.
    ///
    /// Returns `None` if no such client exists or the username belongs to
    /// the requesting client.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn verify_recipient(
        &self,
        requesting_client: Uuid,
        username: &str,
    ) -> Result<Option<clients::Model>, DbErr> {
        let client = self.find_by_username(username).await?;

        Ok(client.filter(|c| c.id != requesting_client))
    }

    /// Checks if a username is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = clients::Entity::find()
            .filter(clients::Column::Username.eq(username))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<clients::Model, DbErr> {
        let client = clients::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        client.insert(&self.db).await
    }
}
