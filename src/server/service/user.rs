//! User service for business logic.
//!
//! Registration happens from the bot side whenever a member joins a guild the bot
//! is in. The dashboard only ever reads the resulting count.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{RegisterUserParam, User},
};

/// Service providing business logic for member registration.
pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a member, refreshing their name if they were registered before.
    ///
    /// # Returns
    /// - `Ok((User, true))` - Newly registered member
    /// - `Ok((User, false))` - Existing member whose name was refreshed
    /// - `Err(AppError)` - Database error
    pub async fn register(&self, param: RegisterUserParam) -> Result<(User, bool), AppError> {
        let user_repo = UserRepository::new(self.db);

        let is_new = user_repo
            .find_by_discord_id(param.discord_id)
            .await?
            .is_none();
        let user = user_repo.upsert(param).await?;

        Ok((user, is_new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::builder::TestBuilder;

    fn param(discord_id: u64, name: &str) -> RegisterUserParam {
        RegisterUserParam {
            discord_id,
            name: name.to_string(),
        }
    }

    /// Tests registering a member for the first time.
    ///
    /// Expected: Ok with is_new = true
    #[tokio::test]
    async fn registers_new_member() -> Result<(), AppError> {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (user, is_new) = UserService::new(db)
            .register(param(123456789, "Alice"))
            .await?;

        assert!(is_new);
        assert_eq!(user.discord_id, 123456789);
        assert_eq!(user.name, "Alice");

        Ok(())
    }

    /// Tests registering a member who rejoined under a new name.
    ///
    /// Expected: Ok with is_new = false and the new name stored
    #[tokio::test]
    async fn re_registration_refreshes_name() -> Result<(), AppError> {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = UserService::new(db);

        let (first, _) = service.register(param(123456789, "Alice")).await?;
        let (second, is_new) = service.register(param(123456789, "Alicia")).await?;

        assert!(!is_new);
        assert_eq!(second.name, "Alicia");
        assert_eq!(second.registered_at, first.registered_at);
        assert_eq!(UserRepository::new(db).count().await?, 1);

        Ok(())
    }
}
