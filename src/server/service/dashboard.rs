//! Aggregate counts for the status page.
//!
//! The member count comes from the gateway cache and the registered total from the
//! database, so the numbers can briefly disagree after a member joins.

use sea_orm::DatabaseConnection;
use serenity::cache::Cache;

use crate::{
    model::dashboard::DashboardStatsDto,
    server::{data::user::UserRepository, error::AppError},
};

/// Name shown before the gateway reports the bot's own user.
pub const DEFAULT_BOT_NAME: &str = "VoiceHub";

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a Cache,
}

impl<'a> DashboardService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a Cache) -> Self {
        Self { db, cache }
    }

    /// Collects the dashboard numbers.
    ///
    /// # Returns
    /// - `Ok(DashboardStatsDto)` - Bot name, summed guild member count and registered total
    /// - `Err(AppError::DbErr)` - Counting registered users failed
    pub async fn stats(&self) -> Result<DashboardStatsDto, AppError> {
        let total = UserRepository::new(self.db).count().await?;

        Ok(DashboardStatsDto {
            bot_name: self.bot_name(),
            member_count: self.member_count(),
            total,
        })
    }

    /// Sums the member counts of every guild in the cache.
    pub fn member_count(&self) -> u64 {
        self.cache
            .guilds()
            .into_iter()
            .filter_map(|guild_id| self.cache.guild(guild_id).map(|guild| guild.member_count))
            .sum()
    }

    fn bot_name(&self) -> String {
        let name = self.cache.current_user().name.clone();
        if name.is_empty() {
            DEFAULT_BOT_NAME.to_string()
        } else {
            name
        }
    }
}
