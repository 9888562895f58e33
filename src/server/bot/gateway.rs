//! Discord-backed implementation of [`VoiceGateway`].
//!
//! Writes go through the bot's HTTP client. Voice occupancy is read from the
//! gateway cache, which serenity updates before an event reaches the handler, so
//! occupancy read inside `voice_state_update` already reflects the change being
//! handled. User limits are fetched over HTTP because channel edits only reach
//! the cache once the gateway echoes them back.

use std::sync::Arc;
use std::time::Duration;

use serenity::all::{
    ChannelId, ChannelType, Context, CreateActionRow, CreateButton, CreateChannel,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, EditChannel, GuildId, MessageCollector,
    MessageId, PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, ShardMessenger,
    UserId,
};
use serenity::async_trait;
use serenity::cache::Cache;
use serenity::http::Http;

use crate::server::{
    error::AppError,
    model::voice::{CollectedMessage, PanelAction, PanelInteraction},
    service::voice::VoiceGateway,
};

/// [`VoiceGateway`] built from the context of the event being handled.
pub struct SerenityGateway {
    http: Arc<Http>,
    cache: Arc<Cache>,
    shard: ShardMessenger,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>, shard: ShardMessenger) -> Self {
        Self { http, cache, shard }
    }

    pub fn from_context(ctx: &Context) -> Self {
        Self::new(ctx.http.clone(), ctx.cache.clone(), ctx.shard.clone())
    }

    fn http(&self) -> &Http {
        &self.http
    }
}

/// The everyone role shares its ID with the guild.
fn everyone_role(guild_id: GuildId) -> RoleId {
    RoleId::new(guild_id.get())
}

fn panel_row(actions: &[PanelAction]) -> CreateActionRow {
    CreateActionRow::Buttons(
        actions
            .iter()
            .map(|action| {
                CreateButton::new(action.custom_id())
                    .label(action.label())
                    .style(action.button_style())
            })
            .collect(),
    )
}

#[async_trait]
impl VoiceGateway for SerenityGateway {
    async fn create_voice_channel(
        &self,
        guild_id: GuildId,
        name: &str,
        category_id: ChannelId,
        owner_id: UserId,
    ) -> Result<ChannelId, AppError> {
        let permissions = vec![
            PermissionOverwrite {
                allow: Permissions::CONNECT | Permissions::MANAGE_CHANNELS,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Member(owner_id),
            },
            PermissionOverwrite {
                allow: Permissions::CONNECT,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Role(everyone_role(guild_id)),
            },
        ];

        let builder = CreateChannel::new(name)
            .kind(ChannelType::Voice)
            .category(category_id)
            .permissions(permissions);

        let channel = guild_id.create_channel(self.http(), builder).await?;

        Ok(channel.id)
    }

    async fn move_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        channel_id: ChannelId,
    ) -> Result<(), AppError> {
        guild_id
            .move_member(self.http(), user_id, channel_id)
            .await?;
        Ok(())
    }

    async fn disconnect_member(&self, guild_id: GuildId, user_id: UserId) -> Result<(), AppError> {
        guild_id.disconnect_member(self.http(), user_id).await?;
        Ok(())
    }

    async fn set_everyone_connect(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        allow: bool,
    ) -> Result<(), AppError> {
        let (allow, deny) = if allow {
            (Permissions::CONNECT, Permissions::empty())
        } else {
            (Permissions::empty(), Permissions::CONNECT)
        };

        channel_id
            .create_permission(
                self.http(),
                PermissionOverwrite {
                    allow,
                    deny,
                    kind: PermissionOverwriteType::Role(everyone_role(guild_id)),
                },
            )
            .await?;
        Ok(())
    }

    async fn set_user_limit(&self, channel_id: ChannelId, limit: u32) -> Result<(), AppError> {
        channel_id
            .edit(self.http(), EditChannel::new().user_limit(limit))
            .await?;
        Ok(())
    }

    async fn set_channel_name(&self, channel_id: ChannelId, name: &str) -> Result<(), AppError> {
        channel_id
            .edit(self.http(), EditChannel::new().name(name))
            .await?;
        Ok(())
    }

    async fn delete_channel(&self, channel_id: ChannelId) -> Result<(), AppError> {
        channel_id.delete(self.http()).await?;
        Ok(())
    }

    async fn send_control_panel(
        &self,
        channel_id: ChannelId,
        content: &str,
        actions: &[PanelAction],
    ) -> Result<(), AppError> {
        let message = CreateMessage::new()
            .content(content)
            .components(vec![panel_row(actions)]);

        channel_id.send_message(self.http(), message).await?;
        Ok(())
    }

    async fn reply_ephemeral(
        &self,
        interaction: &PanelInteraction,
        content: &str,
    ) -> Result<(), AppError> {
        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(content)
                .ephemeral(true),
        );

        self.http
            .create_interaction_response(interaction.id, &interaction.token, &response, Vec::new())
            .await?;
        Ok(())
    }

    async fn followup_ephemeral(
        &self,
        interaction: &PanelInteraction,
        content: &str,
    ) -> Result<(), AppError> {
        let followup = CreateInteractionResponseFollowup::new()
            .content(content)
            .ephemeral(true);

        self.http
            .create_followup_message(&interaction.token, &followup, Vec::new())
            .await?;
        Ok(())
    }

    async fn collect_message(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
        timeout: Duration,
    ) -> Result<Option<CollectedMessage>, AppError> {
        let message = MessageCollector::new(&self.shard)
            .channel_id(channel_id)
            .author_id(user_id)
            .timeout(timeout)
            .next()
            .await;

        Ok(message.map(CollectedMessage::from))
    }

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), AppError> {
        channel_id.delete_message(self.http(), message_id).await?;
        Ok(())
    }

    async fn delete_prompt(&self, interaction: &PanelInteraction) -> Result<(), AppError> {
        self.http
            .delete_original_interaction_response(&interaction.token)
            .await?;
        Ok(())
    }

    async fn user_limit(&self, channel_id: ChannelId) -> Result<u32, AppError> {
        let channel = self.http.get_channel(channel_id).await?;

        Ok(channel
            .guild()
            .and_then(|channel| channel.user_limit)
            .unwrap_or(0))
    }

    fn voice_member_count(&self, guild_id: GuildId, channel_id: ChannelId) -> usize {
        self.cache
            .guild(guild_id)
            .map(|guild| {
                guild
                    .voice_states
                    .values()
                    .filter(|state| state.channel_id == Some(channel_id))
                    .count()
            })
            .unwrap_or(0)
    }

    fn member_voice_channel(&self, guild_id: GuildId, user_id: UserId) -> Option<ChannelId> {
        self.cache
            .guild(guild_id)
            .and_then(|guild| guild.voice_states.get(&user_id).and_then(|s| s.channel_id))
    }
}
