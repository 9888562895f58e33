//! Channel event handlers.
//!
//! A temporary room deleted by a moderator (or anyone but the bot) must be
//! forgotten, otherwise its pending timer would later try to delete it again.

use std::sync::Arc;

use serenity::all::{Context, GuildChannel, Message};

use crate::server::{
    bot::gateway::SerenityGateway,
    model::voice::J2cSettings,
    service::voice::{TempChannelLifecycle, TempChannelRegistry},
};

/// Handles the channel_delete event when a channel is deleted from a guild.
///
/// # Arguments
/// - `registry` - Shared room registry
/// - `settings` - Trigger channel, category and timing
/// - `ctx` - Discord context
/// - `channel` - The deleted guild channel from Discord
/// - `_messages` - Messages that were in the channel if available (unused)
pub async fn handle_channel_delete(
    registry: &TempChannelRegistry,
    settings: &J2cSettings,
    ctx: Context,
    channel: GuildChannel,
    _messages: Option<Vec<Message>>,
) {
    let lifecycle = TempChannelLifecycle::new(
        registry.clone(),
        Arc::new(SerenityGateway::from_context(&ctx)),
        *settings,
    );

    if !lifecycle.handle_channel_deleted(channel.id) {
        tracing::debug!(
            "Ignoring deletion of untracked channel {} in guild {}",
            channel.id,
            channel.guild_id
        );
    }
}
