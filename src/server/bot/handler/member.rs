use sea_orm::DatabaseConnection;
use serenity::all::{Context, Member};

use crate::server::{model::user::RegisterUserParam, service::user::UserService};

/// Handles the guild_member_addition event when a member joins a guild
pub async fn handle_guild_member_addition(
    db: &DatabaseConnection,
    _ctx: Context,
    new_member: Member,
) {
    if new_member.user.bot {
        return;
    }

    let param = RegisterUserParam {
        discord_id: new_member.user.id.get(),
        name: new_member.display_name().to_string(),
    };

    match UserService::new(db).register(param).await {
        Ok((user, true)) => {
            tracing::info!(
                "Registered {} ({}) from guild {}",
                user.name,
                user.discord_id,
                new_member.guild_id
            )
        }
        Ok((user, false)) => {
            tracing::debug!("Refreshed registration of {} ({})", user.name, user.discord_id)
        }
        Err(e) => tracing::error!(
            "Failed to register member {} of guild {}: {:?}",
            new_member.user.id,
            new_member.guild_id,
            e
        ),
    }
}
