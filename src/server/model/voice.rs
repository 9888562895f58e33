//! Domain models for temporary voice rooms.
//!
//! Gateway payloads are converted into these types at the bot boundary so the
//! lifecycle manager and the control panel handler never touch serenity event
//! structs directly.

use std::time::Duration;

use serenity::all::{
    ButtonStyle, ChannelId, ComponentInteraction, GuildId, InteractionId, Message, MessageId,
    UserId, VoiceState,
};
use serenity::utils::parse_user_mention;

/// Delay between a room becoming empty and its deletion.
pub const DELETION_DELAY: Duration = Duration::from_secs(60);

/// How long the owner has to answer a rename or kick prompt.
pub const COLLECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Discord's upper bound for channel names.
pub const MAX_CHANNEL_NAME_LEN: usize = 100;

/// User limits the limit button cycles through, after unlimited (0).
pub const USER_LIMIT_STEPS: [u32; 3] = [2, 5, 10];

/// Namespace shared by every control panel button.
pub const PANEL_PREFIX: &str = "v_";

/// Static settings of the Join-to-Create feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct J2cSettings {
    /// Voice channel whose entry spawns a room.
    pub trigger_channel_id: ChannelId,
    /// Category new rooms are created under.
    pub category_id: ChannelId,
    /// Delay before an empty room is deleted.
    pub deletion_delay: Duration,
    /// Window for the owner to answer a rename or kick prompt.
    pub collect_timeout: Duration,
}

impl J2cSettings {
    pub fn new(trigger_channel_id: ChannelId, category_id: ChannelId) -> Self {
        Self {
            trigger_channel_id,
            category_id,
            deletion_delay: DELETION_DELAY,
            collect_timeout: COLLECT_TIMEOUT,
        }
    }
}

/// Owner actions exposed on the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelAction {
    Lock,
    Unlock,
    Limit,
    Rename,
    Kick,
}

impl PanelAction {
    /// Every action in the order the buttons are laid out.
    pub const ALL: [PanelAction; 5] = [
        PanelAction::Lock,
        PanelAction::Unlock,
        PanelAction::Limit,
        PanelAction::Rename,
        PanelAction::Kick,
    ];

    /// Button custom ID, namespaced under [`PANEL_PREFIX`].
    pub fn custom_id(self) -> &'static str {
        match self {
            PanelAction::Lock => "v_lock",
            PanelAction::Unlock => "v_unlock",
            PanelAction::Limit => "v_limit",
            PanelAction::Rename => "v_rename",
            PanelAction::Kick => "v_kick",
        }
    }

    /// Resolves a button custom ID, returning `None` for buttons that are not
    /// part of the control panel.
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        let action = custom_id.strip_prefix(PANEL_PREFIX)?;
        Self::ALL
            .into_iter()
            .find(|candidate| &candidate.custom_id()[PANEL_PREFIX.len()..] == action)
    }

    pub fn label(self) -> &'static str {
        match self {
            PanelAction::Lock => "🔒 Lock",
            PanelAction::Unlock => "🔓 Unlock",
            PanelAction::Limit => "👥 Limit",
            PanelAction::Rename => "✏️ Rename",
            PanelAction::Kick => "👢 Kick",
        }
    }

    pub fn button_style(self) -> ButtonStyle {
        match self {
            PanelAction::Limit => ButtonStyle::Primary,
            PanelAction::Kick => ButtonStyle::Danger,
            _ => ButtonStyle::Secondary,
        }
    }
}

/// Returns the user limit that follows `current` in the limit cycle.
///
/// `0 → 2 → 5 → 10 → 0`. Limits set outside the bot jump to the next larger
/// step, or back to unlimited past the last one.
pub fn next_user_limit(current: u32) -> u32 {
    USER_LIMIT_STEPS
        .into_iter()
        .find(|step| *step > current)
        .unwrap_or(0)
}

/// Human readable form of a user limit.
pub fn describe_user_limit(limit: u32) -> String {
    match limit {
        0 => "unlimited".to_string(),
        n => n.to_string(),
    }
}

/// Name of a freshly created room.
pub fn room_name(display_name: &str) -> String {
    format!("🎧 Room {}", display_name)
        .chars()
        .take(MAX_CHANNEL_NAME_LEN)
        .collect()
}

/// Greeting posted together with the control panel.
pub fn panel_greeting(owner_id: UserId) -> String {
    format!(
        "Hey <@{}>! Use the buttons below to manage your room.",
        owner_id
    )
}

/// A member moved between voice channels, joined voice, or left it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceStateChange {
    pub guild_id: GuildId,
    pub user_id: UserId,
    /// Guild display name of the member, or the raw ID when the gateway omitted
    /// the member payload.
    pub display_name: String,
    pub old_channel_id: Option<ChannelId>,
    pub new_channel_id: Option<ChannelId>,
}

impl VoiceStateChange {
    /// Builds the change from a voice state update event.
    ///
    /// # Returns
    /// - `Some(VoiceStateChange)` - The update belongs to a guild
    /// - `None` - Direct-message call state, which rooms never deal with
    pub fn from_voice_states(old: Option<&VoiceState>, new: &VoiceState) -> Option<Self> {
        let guild_id = new.guild_id.or_else(|| old.and_then(|state| state.guild_id))?;
        let display_name = new
            .member
            .as_ref()
            .map(|member| member.display_name().to_string())
            .unwrap_or_else(|| new.user_id.to_string());

        Some(Self {
            guild_id,
            user_id: new.user_id,
            display_name,
            old_channel_id: old.and_then(|state| state.channel_id),
            new_channel_id: new.channel_id,
        })
    }

    /// Whether the member actually changed channels, as opposed to muting,
    /// deafening or starting a stream.
    pub fn is_channel_change(&self) -> bool {
        self.old_channel_id != self.new_channel_id
    }
}

/// A button press on a control panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelInteraction {
    pub id: InteractionId,
    pub token: String,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub user_id: UserId,
    pub action: PanelAction,
}

impl PanelInteraction {
    /// Converts a component interaction, returning `None` for interactions
    /// outside a guild or buttons not owned by the control panel.
    pub fn from_component(interaction: &ComponentInteraction) -> Option<Self> {
        let action = PanelAction::from_custom_id(&interaction.data.custom_id)?;

        Some(Self {
            id: interaction.id,
            token: interaction.token.clone(),
            guild_id: interaction.guild_id?,
            channel_id: interaction.channel_id,
            user_id: interaction.user.id,
            action,
        })
    }
}

/// A message collected as the answer to a rename or kick prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub content: String,
    /// Mentioned users in the order they appear in the message.
    pub mentions: Vec<UserId>,
}

impl From<Message> for CollectedMessage {
    fn from(message: Message) -> Self {
        let resolved: Vec<UserId> = message.mentions.iter().map(|user| user.id).collect();

        Self {
            id: message.id,
            channel_id: message.channel_id,
            mentions: mentions_in_order(&message.content, &resolved),
            content: message.content,
        }
    }
}

/// Orders `resolved` by where each user's `<@id>` token first appears in
/// `content`.
///
/// Discord does not keep the mentions array in message order. Tokens for users
/// Discord did not resolve are skipped.
pub fn mentions_in_order(content: &str, resolved: &[UserId]) -> Vec<UserId> {
    let mut ordered = Vec::new();
    let mut rest = content;

    while let Some(start) = rest.find("<@") {
        rest = &rest[start..];
        let Some(end) = rest.find('>') else {
            break;
        };

        if let Some(user_id) = parse_user_mention(&rest[..=end]) {
            if resolved.contains(&user_id) && !ordered.contains(&user_id) {
                ordered.push(user_id);
            }
        }
        rest = &rest[2..];
    }

    ordered
}
