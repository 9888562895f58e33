//! Voice state handler driving the temporary room lifecycle.

use std::sync::Arc;

use serenity::all::{Context, VoiceState};

use crate::server::{
    bot::gateway::SerenityGateway,
    model::voice::{J2cSettings, VoiceStateChange},
    service::voice::{TempChannelLifecycle, TempChannelRegistry},
};

/// Handles the voice_state_update event.
///
/// Translates the old and new voice state into a [`VoiceStateChange`] and hands it
/// to the lifecycle manager. Updates without a guild (DM calls) are ignored.
/// Failures are logged; nothing is retried.
///
/// # Arguments
/// - `registry` - Shared room registry
/// - `settings` - Trigger channel, category and timing
/// - `ctx` - Discord context used to build the platform gateway
/// - `old` - Previous voice state if it was cached
/// - `new` - Voice state after the update
pub async fn handle_voice_state_update(
    registry: &TempChannelRegistry,
    settings: &J2cSettings,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(change) = VoiceStateChange::from_voice_states(old.as_ref(), &new) else {
        tracing::debug!("Ignoring voice state update without guild for {}", new.user_id);
        return;
    };

    let lifecycle = TempChannelLifecycle::new(
        registry.clone(),
        Arc::new(SerenityGateway::from_context(&ctx)),
        *settings,
    );

    if let Err(e) = lifecycle.handle_voice_state(&change).await {
        tracing::error!(
            "Failed to create room for {} in guild {}: {}",
            change.user_id,
            change.guild_id,
            e
        );
    }
}
