use thiserror::Error;

/// Failures of a control panel action that are reported back to the member.
///
/// None of these are fatal: the interaction handler converts each into an
/// ephemeral reply or follow-up and performs no state change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    /// The interaction came from a channel the registry does not track.
    #[error("❌ This is not a temporary room.")]
    ChannelNotManaged,

    /// The interacting member is not the owner of the room.
    #[error("❌ Only the owner of this room can use these controls.")]
    NotOwner,

    /// The owner did not answer a rename or kick prompt in time.
    #[error("⏰ Time's up! No changes were made.")]
    CollectionTimeout,

    /// The room was deleted while the handler was waiting for the owner.
    #[error("❌ This room no longer exists.")]
    ChannelGone,

    /// The submitted name is empty or longer than Discord allows.
    #[error("❌ Room names must be between 1 and {max} characters.")]
    InvalidName {
        /// Maximum channel name length
        max: usize,
    },

    /// The kick reply did not mention anybody.
    #[error("❌ Mention the member you want to kick.")]
    NoMention,

    /// The owner mentioned themself in a kick reply.
    #[error("❌ You can't kick yourself from your own room.")]
    CannotKickSelf,

    /// The mentioned member is not connected to this room.
    #[error("❌ That member is not in your room.")]
    TargetNotInChannel,
}
