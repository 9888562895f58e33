use sea_orm::DatabaseConnection;
use serenity::all::{
    Context, EventHandler, GuildChannel, Interaction, Member, Message, Ready, VoiceState,
};
use serenity::async_trait;

use crate::server::{model::voice::J2cSettings, service::voice::TempChannelRegistry};

pub mod channel;
pub mod interaction;
pub mod member;
pub mod ready;
pub mod voice;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub registry: TempChannelRegistry,
    pub settings: J2cSettings,
}

impl Handler {
    pub fn new(db: DatabaseConnection, registry: TempChannelRegistry, settings: J2cSettings) -> Self {
        Self {
            db,
            registry,
            settings,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a member joins, leaves or moves between voice channels, or
    /// changes their mute/deaf/stream state
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        voice::handle_voice_state_update(&self.registry, &self.settings, ctx, old, new).await;
    }

    /// Called when a member presses a button or uses a command
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.registry, &self.settings, ctx, interaction)
            .await;
    }

    /// Called when a channel is deleted from a guild
    async fn channel_delete(
        &self,
        ctx: Context,
        channel: GuildChannel,
        messages: Option<Vec<Message>>,
    ) {
        channel::handle_channel_delete(&self.registry, &self.settings, ctx, channel, messages)
            .await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(&self.db, ctx, new_member).await;
    }
}
