//! Platform operations the temporary room core depends on.
//!
//! The production implementation lives in `bot::gateway` and talks to Discord
//! through serenity; tests substitute a recording fake.

use std::time::Duration;

use serenity::all::{ChannelId, GuildId, MessageId, UserId};
use serenity::async_trait;

use crate::server::{
    error::AppError,
    model::voice::{CollectedMessage, PanelAction, PanelInteraction},
};

#[async_trait]
pub trait VoiceGateway: Send + Sync {
    /// Creates a voice channel under `category_id`.
    ///
    /// The owner is granted `Connect` and `Manage Channels`; the everyone role is
    /// granted `Connect`.
    async fn create_voice_channel(
        &self,
        guild_id: GuildId,
        name: &str,
        category_id: ChannelId,
        owner_id: UserId,
    ) -> Result<ChannelId, AppError>;

    async fn move_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        channel_id: ChannelId,
    ) -> Result<(), AppError>;

    async fn disconnect_member(&self, guild_id: GuildId, user_id: UserId) -> Result<(), AppError>;

    /// Allows or denies `Connect` for the everyone role on the channel.
    async fn set_everyone_connect(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        allow: bool,
    ) -> Result<(), AppError>;

    async fn set_user_limit(&self, channel_id: ChannelId, limit: u32) -> Result<(), AppError>;

    async fn set_channel_name(&self, channel_id: ChannelId, name: &str) -> Result<(), AppError>;

    async fn delete_channel(&self, channel_id: ChannelId) -> Result<(), AppError>;

    /// Posts `content` with one button per action into the channel's chat.
    async fn send_control_panel(
        &self,
        channel_id: ChannelId,
        content: &str,
        actions: &[PanelAction],
    ) -> Result<(), AppError>;

    /// Answers the interaction with a message only the interacting user sees.
    async fn reply_ephemeral(
        &self,
        interaction: &PanelInteraction,
        content: &str,
    ) -> Result<(), AppError>;

    /// Sends an additional ephemeral message after the interaction was answered.
    async fn followup_ephemeral(
        &self,
        interaction: &PanelInteraction,
        content: &str,
    ) -> Result<(), AppError>;

    /// Waits for the next message `user_id` sends in `channel_id`.
    ///
    /// # Returns
    /// - `Ok(Some(message))` - The first eligible message
    /// - `Ok(None)` - Nothing arrived within `timeout`
    async fn collect_message(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
        timeout: Duration,
    ) -> Result<Option<CollectedMessage>, AppError>;

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), AppError>;

    /// Removes the ephemeral reply the interaction was first answered with.
    async fn delete_prompt(&self, interaction: &PanelInteraction) -> Result<(), AppError>;

    /// Current user limit of the voice channel, 0 meaning unlimited.
    ///
    /// Read from the platform rather than a local cache so two quick presses
    /// see each other's edits.
    async fn user_limit(&self, channel_id: ChannelId) -> Result<u32, AppError>;

    /// Number of members currently connected to the voice channel.
    fn voice_member_count(&self, guild_id: GuildId, channel_id: ChannelId) -> usize;

    /// Voice channel the member is connected to, if any.
    fn member_voice_channel(&self, guild_id: GuildId, user_id: UserId) -> Option<ChannelId>;
}
