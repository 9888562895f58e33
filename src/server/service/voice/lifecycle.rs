//! Creation and deferred deletion of temporary voice rooms.
//!
//! Each room moves through three states:
//!
//! - **Active** - tracked in the registry without a timer
//! - **PendingDeletion** - tracked with a deletion timer because the room is empty
//! - **NonExistent** - never created, or deleted and removed from the registry
//!
//! Joining the trigger channel creates an Active room. The last member leaving
//! starts the deletion timer; anybody joining before it fires cancels it. When the
//! timer fires it re-checks occupancy before deleting, since a join may have raced
//! the timer without being observed.

use std::sync::Arc;

use serenity::all::{ChannelId, GuildId, UserId};

use crate::server::{
    error::AppError,
    model::voice::{panel_greeting, room_name, J2cSettings, PanelAction, VoiceStateChange},
};

use super::{
    gateway::VoiceGateway,
    registry::TempChannelRegistry,
    timer::{self, TimerId},
};

/// Reacts to voice state changes on behalf of the Join-to-Create feature.
///
/// Cheap to clone; deletion timers carry a clone so they can outlive the event
/// that scheduled them.
#[derive(Clone)]
pub struct TempChannelLifecycle {
    registry: TempChannelRegistry,
    gateway: Arc<dyn VoiceGateway>,
    settings: J2cSettings,
}

impl TempChannelLifecycle {
    pub fn new(
        registry: TempChannelRegistry,
        gateway: Arc<dyn VoiceGateway>,
        settings: J2cSettings,
    ) -> Self {
        Self {
            registry,
            gateway,
            settings,
        }
    }

    /// Applies a voice state change to every room it touches.
    ///
    /// The channel that was left is handled before the channel that was joined, so
    /// a member hopping from their room into the trigger channel still starts the
    /// deletion of the room they left.
    ///
    /// # Returns
    /// - `Ok(Some(channel_id))` - A new room was created for the member
    /// - `Ok(None)` - Nothing was created
    /// - `Err(AppError)` - Creating the room failed; nothing was registered
    pub async fn handle_voice_state(
        &self,
        change: &VoiceStateChange,
    ) -> Result<Option<ChannelId>, AppError> {
        if !change.is_channel_change() {
            return Ok(None);
        }

        if let Some(left) = change.old_channel_id {
            if self.registry.contains(left) {
                self.handle_member_left(change.guild_id, left);
            }
        }

        let Some(joined) = change.new_channel_id else {
            return Ok(None);
        };

        if joined == self.settings.trigger_channel_id {
            let channel_id = self
                .create_room(change.guild_id, change.user_id, &change.display_name)
                .await?;
            return Ok(Some(channel_id));
        }

        if self.registry.contains(joined) {
            self.handle_member_joined(joined);
        }

        Ok(None)
    }

    /// Creates a room for `owner_id`, moves them in and posts the control panel.
    ///
    /// The room is registered only once both creation and the move succeeded. A
    /// failed move deletes the freshly created channel again. Failing to post the
    /// panel is logged but keeps the room.
    pub async fn create_room(
        &self,
        guild_id: GuildId,
        owner_id: UserId,
        display_name: &str,
    ) -> Result<ChannelId, AppError> {
        let name = room_name(display_name);

        let channel_id = self
            .gateway
            .create_voice_channel(guild_id, &name, self.settings.category_id, owner_id)
            .await?;

        if let Err(e) = self.gateway.move_member(guild_id, owner_id, channel_id).await {
            tracing::error!(
                "Failed to move {} into new room {}, removing it: {}",
                owner_id,
                channel_id,
                e
            );
            if let Err(delete_err) = self.gateway.delete_channel(channel_id).await {
                tracing::warn!(
                    "Failed to remove orphaned room {}: {}",
                    channel_id,
                    delete_err
                );
            }
            return Err(e);
        }

        self.registry.put(channel_id, owner_id);
        tracing::info!(
            "Created room {} ({}) for {} in guild {}",
            name,
            channel_id,
            owner_id,
            guild_id
        );

        if let Err(e) = self
            .gateway
            .send_control_panel(channel_id, &panel_greeting(owner_id), &PanelAction::ALL)
            .await
        {
            tracing::error!("Failed to send control panel to room {}: {}", channel_id, e);
        }

        // The owner may have left while the panel was being sent.
        if self.registry.contains(channel_id)
            && self.gateway.voice_member_count(guild_id, channel_id) == 0
        {
            self.handle_member_left(guild_id, channel_id);
        }

        Ok(channel_id)
    }

    /// Starts the deletion countdown if the room is now empty.
    ///
    /// A countdown already in progress is kept as is.
    pub fn handle_member_left(&self, guild_id: GuildId, channel_id: ChannelId) {
        let Some(entry) = self.registry.get(channel_id) else {
            return;
        };
        if entry.is_pending_deletion() {
            return;
        }
        if self.gateway.voice_member_count(guild_id, channel_id) > 0 {
            return;
        }

        let lifecycle = self.clone();
        let timer = timer::schedule(self.settings.deletion_delay, move |timer_id| async move {
            lifecycle.expire(guild_id, channel_id, timer_id).await;
        });

        if self.registry.set_timer(channel_id, timer.clone()) {
            tracing::info!(
                "Room {} is empty, deleting in {}s",
                channel_id,
                self.settings.deletion_delay.as_secs()
            );
        } else {
            timer.cancel();
        }
    }

    /// Cancels a pending deletion because somebody joined the room.
    pub fn handle_member_joined(&self, channel_id: ChannelId) {
        if self.registry.clear_timer(channel_id) {
            tracing::info!("Member rejoined room {}, deletion cancelled", channel_id);
        }
    }

    /// Forgets a room that was deleted by somebody else.
    ///
    /// # Returns
    /// - `true` - The channel was a tracked room
    pub fn handle_channel_deleted(&self, channel_id: ChannelId) -> bool {
        match self.registry.remove(channel_id) {
            Some(entry) => {
                if let Some(timer) = entry.pending_deletion {
                    timer.cancel();
                }
                tracing::info!("Room {} was deleted externally", channel_id);
                true
            }
            None => false,
        }
    }

    /// Runs when a deletion timer fires.
    async fn expire(&self, guild_id: GuildId, channel_id: ChannelId, timer_id: TimerId) {
        if !self.registry.take_timer(channel_id, timer_id) {
            tracing::debug!("Stale deletion timer for room {} ignored", channel_id);
            return;
        }

        let occupants = self.gateway.voice_member_count(guild_id, channel_id);
        if occupants > 0 {
            tracing::info!(
                "Room {} has {} member(s) again, keeping it",
                channel_id,
                occupants
            );
            return;
        }

        // Removed before the delete call so the room counts as gone even if Discord
        // rejects the request.
        self.registry.remove(channel_id);

        match self.gateway.delete_channel(channel_id).await {
            Ok(()) => tracing::info!("Deleted empty room {}", channel_id),
            Err(e) => tracing::error!("Failed to delete empty room {}: {}", channel_id, e),
        }
    }
}
