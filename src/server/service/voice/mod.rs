//! Join-to-Create temporary voice rooms.
//!
//! Joining the configured trigger channel creates a voice room owned by the
//! joining member. The owner manages the room through a control panel of buttons
//! (lock, unlock, user limit, rename, kick), and the room is deleted one minute
//! after the last member leaves unless somebody rejoins first.
//!
//! # Components
//!
//! - [`registry`] - In-memory room ownership and deletion timers
//! - [`timer`] - Cancellable one-shot timers
//! - [`lifecycle`] - Room creation and deferred deletion
//! - [`control_panel`] - Owner-only button actions
//! - [`gateway`] - Platform operations the components above depend on
//!
//! Room state is process-local and is lost on restart.

pub mod control_panel;
pub mod gateway;
pub mod lifecycle;
pub mod registry;
pub mod timer;

pub use control_panel::ControlPanelService;
pub use gateway::VoiceGateway;
pub use lifecycle::TempChannelLifecycle;
pub use registry::TempChannelRegistry;

#[cfg(test)]
mod test;
