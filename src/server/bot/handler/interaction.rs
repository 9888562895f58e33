//! Interaction handler for control panel buttons.

use std::sync::Arc;

use serenity::all::{Context, Interaction};

use crate::server::{
    bot::gateway::SerenityGateway,
    model::voice::{J2cSettings, PanelInteraction},
    service::voice::{ControlPanelService, TempChannelRegistry},
};

/// Handles the interaction_create event.
///
/// Only component interactions whose custom ID names a control panel action are
/// handled; everything else belongs to somebody else and is ignored.
pub async fn handle_interaction_create(
    registry: &TempChannelRegistry,
    settings: &J2cSettings,
    ctx: Context,
    interaction: Interaction,
) {
    let Interaction::Component(component) = interaction else {
        return;
    };

    let Some(press) = PanelInteraction::from_component(&component) else {
        tracing::debug!(
            "Ignoring component {} in channel {}",
            component.data.custom_id,
            component.channel_id
        );
        return;
    };

    let panel = ControlPanelService::new(
        registry.clone(),
        Arc::new(SerenityGateway::from_context(&ctx)),
        settings.collect_timeout,
    );

    if let Err(e) = panel.handle(&press).await {
        tracing::error!(
            "Failed to handle {:?} from {} in room {}: {}",
            press.action,
            press.user_id,
            press.channel_id,
            e
        );
    }
}
