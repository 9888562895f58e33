//! Test factory for creating Serenity VoiceState objects.

use serenity::all::VoiceState;

/// Creates a test Serenity VoiceState for a member.
///
/// The member payload is omitted, as the gateway does for cached-out members, so
/// consumers fall back to the raw user ID for display purposes.
///
/// # Arguments
/// - `user_id` - Discord user ID of the member
/// - `guild_id` - Discord guild ID the voice state belongs to
/// - `channel_id` - Voice channel the member is in, `None` when disconnected
///
/// # Returns
/// - `VoiceState` - A valid Serenity VoiceState struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a VoiceState (indicates invalid test data)
pub fn create_test_voice_state(user_id: u64, guild_id: u64, channel_id: Option<u64>) -> VoiceState {
    serde_json::from_value(serde_json::json!({
        "guild_id": guild_id.to_string(),
        "channel_id": channel_id.map(|id| id.to_string()),
        "user_id": user_id.to_string(),
        "member": null,
        "session_id": "90326bd25d71d39b9ef95b299e3872ff",
        "deaf": false,
        "mute": false,
        "self_deaf": false,
        "self_mute": false,
        "self_stream": false,
        "self_video": false,
        "suppress": false,
        "request_to_speak_timestamp": null,
    }))
    .expect("Failed to create test voice state - invalid JSON structure")
}
