//! Ready event handler for bot initialization.

use serenity::all::{ActivityData, Context, Ready};

/// Handles the ready event when the bot connects to Discord.
///
/// Logs the connected user and the number of guilds, and sets the bot's
/// activity so members can see it is online.
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guild(s))",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::custom("Join to create a room")));
}
