//! User domain models and parameters.
//!
//! Registered members are the rows the dashboard counts. They are recorded when a
//! member joins a guild the bot is in.

use chrono::{DateTime, Utc};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

/// Member registered with the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Discord ID of the user
    pub discord_id: u64,
    /// Display name of the user at registration (or last re-join).
    pub name: String,
    /// When the user was first registered.
    pub registered_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored Discord ID is not a u64
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let discord_id = parse_u64_from_string(entity.discord_id)?;

        Ok(Self {
            discord_id,
            name: entity.name,
            registered_at: entity.registered_at,
        })
    }
}

/// Parameters for registering a member.
///
/// Re-registering an existing member only refreshes the display name; the
/// original registration time is kept.
#[derive(Debug, Clone)]
pub struct RegisterUserParam {
    /// Discord ID of the user
    pub discord_id: u64,
    /// Display name of the user.
    pub name: String,
}
