//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing registered member records.
//! It converts between entity models and domain models at the infrastructure boundary.

use crate::server::{
    error::AppError,
    model::user::{RegisterUserParam, User},
};
use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};

/// Repository providing database operations for registered members.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a member, or refreshes the name of one already registered.
    ///
    /// The registration timestamp is only written on first insert, so re-joining
    /// a guild never resets it.
    ///
    /// # Arguments
    /// - `param` - Discord ID and display name of the member
    ///
    /// # Returns
    /// - `Ok(User)` - The created or updated user
    /// - `Err(AppError::DbErr)` - Database error during insert or update
    pub async fn upsert(&self, param: RegisterUserParam) -> Result<User, AppError> {
        let entity = entity::prelude::User::insert(entity::user::ActiveModel {
            discord_id: ActiveValue::Set(param.discord_id.to_string()),
            name: ActiveValue::Set(param.name),
            registered_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::user::Column::DiscordId)
                .update_column(entity::user::Column::Name)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a registered member by Discord ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user registered with that Discord ID
    /// - `Err(AppError)` - Database error or malformed stored ID
    pub async fn find_by_discord_id(&self, discord_id: u64) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?;

        entity.map(User::from_entity).transpose()
    }

    /// Counts every registered member.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows in the user table
    /// - `Err(DbErr)` - Database error during count query
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }
}
