//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating
//! what Discord's gateway would deliver.
//!
//! ```rust,ignore
//! use test_utils::serenity::create_test_voice_state;
//!
//! // Member 111 joins channel 500 in guild 1
//! let state = create_test_voice_state(111, 1, Some(500));
//! ```
//!
//! # Available Factories
//!
//! - `voice_state::create_test_voice_state` - Create Serenity VoiceState objects

pub mod voice_state;

pub use voice_state::create_test_voice_state;
