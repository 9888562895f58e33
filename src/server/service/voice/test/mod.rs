//! Shared fixtures for temporary room tests.
//!
//! `FakeGateway` stands in for Discord: it records every platform call, keeps a
//! tiny model of who is connected where, and answers message collection from a
//! queue of scripted replies.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serenity::all::{ChannelId, GuildId, InteractionId, MessageId, UserId};
use serenity::async_trait;

use crate::server::{
    error::AppError,
    model::voice::{CollectedMessage, J2cSettings, PanelAction, PanelInteraction, VoiceStateChange},
};

use super::{
    gateway::VoiceGateway, lifecycle::TempChannelLifecycle, registry::TempChannelRegistry,
    ControlPanelService,
};


pub const GUILD: u64 = 1;
pub const TRIGGER: u64 = 900;
pub const CATEGORY: u64 = 800;
pub const OWNER: u64 = 111;
pub const OTHER: u64 = 222;

/// First channel ID handed out by `FakeGateway::create_voice_channel`.
pub const FIRST_ROOM: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateVoiceChannel {
        name: String,
        category_id: ChannelId,
        owner_id: UserId,
    },
    MoveMember {
        user_id: UserId,
        channel_id: ChannelId,
    },
    DisconnectMember {
        user_id: UserId,
    },
    SetEveryoneConnect {
        channel_id: ChannelId,
        allow: bool,
    },
    SetUserLimit {
        channel_id: ChannelId,
        limit: u32,
    },
    SetChannelName {
        channel_id: ChannelId,
        name: String,
    },
    DeleteChannel {
        channel_id: ChannelId,
    },
    SendControlPanel {
        channel_id: ChannelId,
        content: String,
        actions: Vec<PanelAction>,
    },
    ReplyEphemeral {
        content: String,
    },
    FollowupEphemeral {
        content: String,
    },
    CollectMessage {
        channel_id: ChannelId,
        user_id: UserId,
        timeout: Duration,
    },
    DeleteMessage {
        message_id: MessageId,
    },
    DeletePrompt,
    ReadUserLimit {
        channel_id: ChannelId,
    },
}

type Hook = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct FakeState {
    calls: Vec<Call>,
    created: u64,
    voice: HashMap<UserId, ChannelId>,
    user_limits: HashMap<ChannelId, u32>,
    replies: VecDeque<CollectedMessage>,
    before_collect: Option<Hook>,
    on_send_panel: Option<Hook>,
    fail_create: bool,
    fail_move: bool,
    fail_delete: bool,
    fail_panel: bool,
    fail_limit_read: bool,
}

#[derive(Default)]
pub struct FakeGateway {
    state: Mutex<FakeState>,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn record(&self, call: Call) {
        self.state().calls.push(call);
    }

    fn failure(what: &'static str) -> AppError {
        serenity::Error::Other(what).into()
    }

    /// Places a member in a voice channel without emitting any event.
    pub fn connect(&self, user_id: u64, channel_id: u64) {
        self.state()
            .voice
            .insert(UserId::new(user_id), ChannelId::new(channel_id));
    }

    /// Removes a member from voice without emitting any event.
    pub fn disconnect(&self, user_id: u64) {
        self.state().voice.remove(&UserId::new(user_id));
    }

    pub fn fail_create(&self) {
        self.state().fail_create = true;
    }

    pub fn fail_move(&self) {
        self.state().fail_move = true;
    }

    pub fn fail_delete(&self) {
        self.state().fail_delete = true;
    }

    pub fn fail_panel(&self) {
        self.state().fail_panel = true;
    }

    pub fn fail_limit_read(&self) {
        self.state().fail_limit_read = true;
    }

    /// Sets a user limit as if it had been changed outside the bot.
    pub fn set_limit(&self, channel_id: u64, limit: u32) {
        self.state()
            .user_limits
            .insert(ChannelId::new(channel_id), limit);
    }

    /// Queues the next message the owner "sends" after a prompt.
    pub fn queue_reply(&self, message: CollectedMessage) {
        self.state().replies.push_back(message);
    }

    /// Runs `hook` when the next collection starts, simulating an event that
    /// interleaves with the wait.
    pub fn before_collect(&self, hook: impl FnOnce() + Send + 'static) {
        self.state().before_collect = Some(Box::new(hook));
    }

    /// Runs `hook` while the next control panel is being posted, simulating an
    /// event that arrives before the post completes.
    pub fn on_send_panel(&self, hook: impl FnOnce() + Send + 'static) {
        self.state().on_send_panel = Some(Box::new(hook));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn deleted_channels(&self) -> Vec<ChannelId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::DeleteChannel { channel_id } => Some(channel_id),
                _ => None,
            })
            .collect()
    }

    pub fn replies(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ReplyEphemeral { content } => Some(content),
                _ => None,
            })
            .collect()
    }

    pub fn followups(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::FollowupEphemeral { content } => Some(content),
                _ => None,
            })
            .collect()
    }

    pub fn member_channel(&self, user_id: u64) -> Option<ChannelId> {
        self.state().voice.get(&UserId::new(user_id)).copied()
    }
}

#[async_trait]
impl VoiceGateway for FakeGateway {
    async fn create_voice_channel(
        &self,
        _guild_id: GuildId,
        name: &str,
        category_id: ChannelId,
        owner_id: UserId,
    ) -> Result<ChannelId, AppError> {
        self.record(Call::CreateVoiceChannel {
            name: name.to_string(),
            category_id,
            owner_id,
        });

        let mut state = self.state();
        if state.fail_create {
            return Err(Self::failure("create failed"));
        }
        let channel_id = ChannelId::new(FIRST_ROOM + state.created);
        state.created += 1;
        Ok(channel_id)
    }

    async fn move_member(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
        channel_id: ChannelId,
    ) -> Result<(), AppError> {
        self.record(Call::MoveMember {
            user_id,
            channel_id,
        });

        let mut state = self.state();
        if state.fail_move {
            return Err(Self::failure("move failed"));
        }
        state.voice.insert(user_id, channel_id);
        Ok(())
    }

    async fn disconnect_member(&self, _guild_id: GuildId, user_id: UserId) -> Result<(), AppError> {
        self.record(Call::DisconnectMember { user_id });
        self.state().voice.remove(&user_id);
        Ok(())
    }

    async fn set_everyone_connect(
        &self,
        _guild_id: GuildId,
        channel_id: ChannelId,
        allow: bool,
    ) -> Result<(), AppError> {
        self.record(Call::SetEveryoneConnect { channel_id, allow });
        Ok(())
    }

    async fn set_user_limit(&self, channel_id: ChannelId, limit: u32) -> Result<(), AppError> {
        self.record(Call::SetUserLimit { channel_id, limit });
        self.state().user_limits.insert(channel_id, limit);
        Ok(())
    }

    async fn set_channel_name(&self, channel_id: ChannelId, name: &str) -> Result<(), AppError> {
        self.record(Call::SetChannelName {
            channel_id,
            name: name.to_string(),
        });
        Ok(())
    }

    async fn delete_channel(&self, channel_id: ChannelId) -> Result<(), AppError> {
        self.record(Call::DeleteChannel { channel_id });

        let mut state = self.state();
        if state.fail_delete {
            return Err(Self::failure("delete failed"));
        }
        state.voice.retain(|_, channel| *channel != channel_id);
        Ok(())
    }

    async fn send_control_panel(
        &self,
        channel_id: ChannelId,
        content: &str,
        actions: &[PanelAction],
    ) -> Result<(), AppError> {
        self.record(Call::SendControlPanel {
            channel_id,
            content: content.to_string(),
            actions: actions.to_vec(),
        });

        let (hook, fail) = {
            let mut state = self.state();
            (state.on_send_panel.take(), state.fail_panel)
        };
        if let Some(hook) = hook {
            hook();
        }

        if fail {
            return Err(Self::failure("panel failed"));
        }
        Ok(())
    }

    async fn reply_ephemeral(
        &self,
        _interaction: &PanelInteraction,
        content: &str,
    ) -> Result<(), AppError> {
        self.record(Call::ReplyEphemeral {
            content: content.to_string(),
        });
        Ok(())
    }

    async fn followup_ephemeral(
        &self,
        _interaction: &PanelInteraction,
        content: &str,
    ) -> Result<(), AppError> {
        self.record(Call::FollowupEphemeral {
            content: content.to_string(),
        });
        Ok(())
    }

    async fn collect_message(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
        timeout: Duration,
    ) -> Result<Option<CollectedMessage>, AppError> {
        self.record(Call::CollectMessage {
            channel_id,
            user_id,
            timeout,
        });

        let (hook, reply) = {
            let mut state = self.state();
            (state.before_collect.take(), state.replies.pop_front())
        };
        if let Some(hook) = hook {
            hook();
        }

        match reply {
            Some(message) => Ok(Some(message)),
            None => {
                tokio::time::sleep(timeout).await;
                Ok(None)
            }
        }
    }

    async fn delete_message(
        &self,
        _channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), AppError> {
        self.record(Call::DeleteMessage { message_id });
        Ok(())
    }

    async fn delete_prompt(&self, _interaction: &PanelInteraction) -> Result<(), AppError> {
        self.record(Call::DeletePrompt);
        Ok(())
    }

    async fn user_limit(&self, channel_id: ChannelId) -> Result<u32, AppError> {
        self.record(Call::ReadUserLimit { channel_id });

        let state = self.state();
        if state.fail_limit_read {
            return Err(Self::failure("limit read failed"));
        }
        Ok(state.user_limits.get(&channel_id).copied().unwrap_or(0))
    }

    fn voice_member_count(&self, _guild_id: GuildId, channel_id: ChannelId) -> usize {
        self.state()
            .voice
            .values()
            .filter(|channel| **channel == channel_id)
            .count()
    }

    fn member_voice_channel(&self, _guild_id: GuildId, user_id: UserId) -> Option<ChannelId> {
        self.state().voice.get(&user_id).copied()
    }
}

pub fn settings() -> J2cSettings {
    J2cSettings::new(ChannelId::new(TRIGGER), ChannelId::new(CATEGORY))
}

/// Builds a registry, a fake gateway and a lifecycle manager sharing both.
pub fn lifecycle_setup() -> (TempChannelRegistry, Arc<FakeGateway>, TempChannelLifecycle) {
    let registry = TempChannelRegistry::new();
    let gateway = FakeGateway::new();
    let lifecycle = TempChannelLifecycle::new(registry.clone(), gateway.clone(), settings());
    (registry, gateway, lifecycle)
}

/// Builds a control panel around a room owned by [`OWNER`].
pub fn panel_setup(room: u64) -> (TempChannelRegistry, Arc<FakeGateway>, ControlPanelService) {
    let registry = TempChannelRegistry::new();
    registry.put(ChannelId::new(room), UserId::new(OWNER));

    let gateway = FakeGateway::new();
    gateway.connect(OWNER, room);

    let panel = ControlPanelService::new(
        registry.clone(),
        gateway.clone(),
        settings().collect_timeout,
    );
    (registry, gateway, panel)
}

pub fn voice_change(user_id: u64, old: Option<u64>, new: Option<u64>) -> VoiceStateChange {
    VoiceStateChange {
        guild_id: GuildId::new(GUILD),
        user_id: UserId::new(user_id),
        display_name: format!("member{}", user_id),
        old_channel_id: old.map(ChannelId::new),
        new_channel_id: new.map(ChannelId::new),
    }
}

pub fn press(user_id: u64, room: u64, action: PanelAction) -> PanelInteraction {
    PanelInteraction {
        id: InteractionId::new(42),
        token: "interaction-token".to_string(),
        guild_id: GuildId::new(GUILD),
        channel_id: ChannelId::new(room),
        user_id: UserId::new(user_id),
        action,
    }
}

pub fn chat_reply(room: u64, content: &str, mentions: &[u64]) -> CollectedMessage {
    CollectedMessage {
        id: MessageId::new(7000),
        channel_id: ChannelId::new(room),
        content: content.to_string(),
        mentions: mentions.iter().copied().map(UserId::new).collect(),
    }
}
