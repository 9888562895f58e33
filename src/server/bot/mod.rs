//! Discord bot integration for temporary voice rooms.
//!
//! The bot turns gateway events into calls on the temporary room services and
//! provides [`gateway::SerenityGateway`], the serenity-backed implementation of the
//! platform operations those services need.
//!
//! The bot is initialized during startup and runs in a separate tokio task so the
//! dashboard keeps serving while the shard connects. Its cache is shared with the
//! dashboard, which reads guild member counts from it.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild and channel state, including channel deletion
//! - `GUILD_VOICE_STATES` - Members joining, leaving and moving between voice channels
//! - `GUILD_MESSAGES` - Messages collected as rename and kick answers
//! - `MESSAGE_CONTENT` - Reading the text of those answers (privileged intent)
//! - `GUILD_MEMBERS` - Member joins for registration (privileged intent)
//!
//! Note: `MESSAGE_CONTENT` and `GUILD_MEMBERS` are privileged intents and must be
//! explicitly enabled in the Discord Developer Portal for the bot application.

pub mod gateway;
pub mod handler;
pub mod start;
