//! Owner-only control panel actions.
//!
//! Every button press is authorized the same way: the channel must be a tracked
//! room and the interacting member must be its owner. Rename and kick then ask
//! the owner for one chat message and wait for it with a timeout. The room is
//! looked up again after the wait because it may have been deleted meanwhile.

use std::sync::Arc;
use std::time::Duration;

use serenity::all::UserId;

use crate::server::{
    error::{voice::VoiceError, AppError},
    model::voice::{
        describe_user_limit, next_user_limit, CollectedMessage, PanelAction, PanelInteraction,
        MAX_CHANNEL_NAME_LEN,
    },
};

use super::{gateway::VoiceGateway, registry::TempChannelRegistry};

/// Handles control panel button presses.
pub struct ControlPanelService {
    registry: TempChannelRegistry,
    gateway: Arc<dyn VoiceGateway>,
    collect_timeout: Duration,
}

impl ControlPanelService {
    pub fn new(
        registry: TempChannelRegistry,
        gateway: Arc<dyn VoiceGateway>,
        collect_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            gateway,
            collect_timeout,
        }
    }

    /// Runs the action behind a control panel button.
    ///
    /// Authorization failures and member mistakes are answered ephemerally and do
    /// not count as errors.
    ///
    /// # Returns
    /// - `Ok(())` - The interaction was answered
    /// - `Err(AppError)` - A platform call failed
    pub async fn handle(&self, interaction: &PanelInteraction) -> Result<(), AppError> {
        if let Err(denied) = self.authorize(interaction) {
            tracing::debug!(
                "Denied {:?} by {} in {}: {:?}",
                interaction.action,
                interaction.user_id,
                interaction.channel_id,
                denied
            );
            return self
                .gateway
                .reply_ephemeral(interaction, &denied.to_string())
                .await;
        }

        match interaction.action {
            PanelAction::Lock => self.set_locked(interaction, true).await,
            PanelAction::Unlock => self.set_locked(interaction, false).await,
            PanelAction::Limit => self.cycle_limit(interaction).await,
            PanelAction::Rename => self.rename(interaction).await,
            PanelAction::Kick => self.kick(interaction).await,
        }
    }

    /// Checks that the interaction comes from the owner of a tracked room.
    pub fn authorize(&self, interaction: &PanelInteraction) -> Result<(), VoiceError> {
        match self.registry.owner_of(interaction.channel_id) {
            None => Err(VoiceError::ChannelNotManaged),
            Some(owner_id) if owner_id != interaction.user_id => Err(VoiceError::NotOwner),
            Some(_) => Ok(()),
        }
    }

    async fn set_locked(&self, interaction: &PanelInteraction, locked: bool) -> Result<(), AppError> {
        self.gateway
            .set_everyone_connect(interaction.guild_id, interaction.channel_id, !locked)
            .await?;

        let reply = if locked {
            "🔒 Room locked. Nobody else can join."
        } else {
            "🔓 Room unlocked. Everyone can join again."
        };
        tracing::info!(
            "Room {} {} by its owner",
            interaction.channel_id,
            if locked { "locked" } else { "unlocked" }
        );

        self.gateway.reply_ephemeral(interaction, reply).await
    }

    async fn cycle_limit(&self, interaction: &PanelInteraction) -> Result<(), AppError> {
        let current = self.gateway.user_limit(interaction.channel_id).await?;
        let next = next_user_limit(current);

        self.gateway
            .set_user_limit(interaction.channel_id, next)
            .await?;

        self.gateway
            .reply_ephemeral(
                interaction,
                &format!("👥 User limit set to {}.", describe_user_limit(next)),
            )
            .await
    }

    async fn rename(&self, interaction: &PanelInteraction) -> Result<(), AppError> {
        self.gateway
            .reply_ephemeral(
                interaction,
                &format!(
                    "✏️ Send the new room name in this chat within {} seconds.",
                    self.collect_timeout.as_secs()
                ),
            )
            .await?;

        let outcome = match self.collect_reply(interaction).await? {
            Ok(message) => self.apply_rename(interaction, &message).await?,
            Err(e) => Err(e),
        };

        self.finish(interaction, outcome).await
    }

    async fn apply_rename(
        &self,
        interaction: &PanelInteraction,
        message: &CollectedMessage,
    ) -> Result<Result<String, VoiceError>, AppError> {
        let name = message.content.trim();
        if name.is_empty() || name.chars().count() > MAX_CHANNEL_NAME_LEN {
            return Ok(Err(VoiceError::InvalidName {
                max: MAX_CHANNEL_NAME_LEN,
            }));
        }

        self.gateway
            .set_channel_name(interaction.channel_id, name)
            .await?;
        tracing::info!("Room {} renamed to {}", interaction.channel_id, name);

        Ok(Ok(format!("✅ Room renamed to **{}**.", name)))
    }

    async fn kick(&self, interaction: &PanelInteraction) -> Result<(), AppError> {
        self.gateway
            .reply_ephemeral(
                interaction,
                &format!(
                    "👢 Mention the member to kick in this chat within {} seconds.",
                    self.collect_timeout.as_secs()
                ),
            )
            .await?;

        let outcome = match self.collect_reply(interaction).await? {
            Ok(message) => self.apply_kick(interaction, &message).await?,
            Err(e) => Err(e),
        };

        self.finish(interaction, outcome).await
    }

    async fn apply_kick(
        &self,
        interaction: &PanelInteraction,
        message: &CollectedMessage,
    ) -> Result<Result<String, VoiceError>, AppError> {
        let Some(target) = message.mentions.first().copied() else {
            return Ok(Err(VoiceError::NoMention));
        };
        if target == interaction.user_id {
            return Ok(Err(VoiceError::CannotKickSelf));
        }
        if self
            .gateway
            .member_voice_channel(interaction.guild_id, target)
            != Some(interaction.channel_id)
        {
            return Ok(Err(VoiceError::TargetNotInChannel));
        }

        self.gateway
            .disconnect_member(interaction.guild_id, target)
            .await?;
        tracing::info!(
            "{} kicked from room {} by its owner",
            target,
            interaction.channel_id
        );

        Ok(Ok(format!("✅ {} was kicked from the room.", mention(target))))
    }

    /// Waits for the owner's answer, deletes it together with the prompt, and
    /// re-validates the room.
    ///
    /// The outer result carries platform failures, the inner one the outcome
    /// reported to the owner.
    async fn collect_reply(
        &self,
        interaction: &PanelInteraction,
    ) -> Result<Result<CollectedMessage, VoiceError>, AppError> {
        let collected = self
            .gateway
            .collect_message(
                interaction.channel_id,
                interaction.user_id,
                self.collect_timeout,
            )
            .await?;

        let Some(message) = collected else {
            return Ok(Err(VoiceError::CollectionTimeout));
        };

        if let Err(e) = self
            .gateway
            .delete_message(message.channel_id, message.id)
            .await
        {
            tracing::warn!(
                "Failed to delete answer {} in room {}: {}",
                message.id,
                message.channel_id,
                e
            );
        }
        if let Err(e) = self.gateway.delete_prompt(interaction).await {
            tracing::warn!(
                "Failed to delete prompt in room {}: {}",
                interaction.channel_id,
                e
            );
        }

        if !self.registry.contains(interaction.channel_id) {
            return Ok(Err(VoiceError::ChannelGone));
        }

        Ok(Ok(message))
    }

    async fn finish(
        &self,
        interaction: &PanelInteraction,
        outcome: Result<String, VoiceError>,
    ) -> Result<(), AppError> {
        let content = match outcome {
            Ok(success) => success,
            Err(failure) => failure.to_string(),
        };

        self.gateway.followup_ephemeral(interaction, &content).await
    }
}

fn mention(user_id: UserId) -> String {
    format!("<@{}>", user_id)
}
