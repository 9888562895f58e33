//! In-memory registry of temporary voice rooms.
//!
//! The registry is the source of truth for who owns a room and whether the room
//! is waiting to be deleted. It never talks to Discord; the lifecycle manager and
//! the control panel handler read and mutate it around their platform calls.
//!
//! Every operation takes the lock for a single synchronous step. The lock is never
//! held across an `.await`, so callers that suspend between a read and a write
//! must look the entry up again after resuming.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serenity::all::{ChannelId, UserId};

use super::timer::{TimerHandle, TimerId};

/// A temporary voice room created by the lifecycle manager.
#[derive(Debug, Clone)]
pub struct ManagedChannel {
    /// Member the room was created for. Never reassigned.
    pub owner_id: UserId,
    /// Deferred deletion, present only while the room is empty.
    pub pending_deletion: Option<TimerHandle>,
}

impl ManagedChannel {
    pub fn is_pending_deletion(&self) -> bool {
        self.pending_deletion.is_some()
    }
}

/// Shared handle to the room registry.
///
/// Cloning is cheap and every clone sees the same rooms. One registry is
/// constructed at startup and handed to the bot and shutdown path.
#[derive(Debug, Clone, Default)]
pub struct TempChannelRegistry {
    channels: Arc<Mutex<HashMap<ChannelId, ManagedChannel>>>,
}

impl TempChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ChannelId, ManagedChannel>> {
        // Entries stay consistent even if a holder panicked: every critical
        // section is a single map operation.
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a snapshot of the room entry.
    pub fn get(&self, channel_id: ChannelId) -> Option<ManagedChannel> {
        self.lock().get(&channel_id).cloned()
    }

    pub fn contains(&self, channel_id: ChannelId) -> bool {
        self.lock().contains_key(&channel_id)
    }

    pub fn owner_of(&self, channel_id: ChannelId) -> Option<UserId> {
        self.lock().get(&channel_id).map(|entry| entry.owner_id)
    }

    /// Starts tracking a room without a pending deletion.
    ///
    /// An existing entry for the same channel is left untouched so ownership is
    /// never reassigned.
    pub fn put(&self, channel_id: ChannelId, owner_id: UserId) {
        self.lock()
            .entry(channel_id)
            .or_insert_with(|| ManagedChannel {
                owner_id,
                pending_deletion: None,
            });
    }

    /// Stops tracking a room and returns its last state.
    ///
    /// A pending timer is handed back untouched; callers decide whether to cancel it.
    pub fn remove(&self, channel_id: ChannelId) -> Option<ManagedChannel> {
        self.lock().remove(&channel_id)
    }

    /// Attaches a deletion timer to a room, cancelling any timer it replaces.
    ///
    /// # Returns
    /// - `true` - The timer is now owned by the entry
    /// - `false` - The room is not tracked; the timer was not stored
    pub fn set_timer(&self, channel_id: ChannelId, timer: TimerHandle) -> bool {
        let mut channels = self.lock();
        let Some(entry) = channels.get_mut(&channel_id) else {
            return false;
        };

        if let Some(previous) = entry.pending_deletion.replace(timer) {
            previous.cancel();
        }

        true
    }

    /// Cancels and clears the room's pending deletion.
    ///
    /// # Returns
    /// - `true` - A timer was pending and has been cancelled
    /// - `false` - Nothing to cancel, or the room is not tracked
    pub fn clear_timer(&self, channel_id: ChannelId) -> bool {
        let timer = self
            .lock()
            .get_mut(&channel_id)
            .and_then(|entry| entry.pending_deletion.take());

        match timer {
            Some(timer) => {
                timer.cancel();
                true
            }
            None => false,
        }
    }

    /// Detaches the timer identified by `timer_id` without cancelling it.
    ///
    /// Used by a firing timer to claim its own entry: once detached, a concurrent
    /// rejoin can no longer abort the deletion halfway through.
    ///
    /// # Returns
    /// - `true` - The entry held exactly this timer, which is now cleared
    /// - `false` - The room is gone or holds a different (or no) timer
    pub fn take_timer(&self, channel_id: ChannelId, timer_id: TimerId) -> bool {
        let mut channels = self.lock();
        match channels.get_mut(&channel_id) {
            Some(entry)
                if entry
                    .pending_deletion
                    .as_ref()
                    .is_some_and(|timer| timer.id() == timer_id) =>
            {
                entry.pending_deletion = None;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Cancels every pending deletion and forgets all rooms.
    ///
    /// # Returns
    /// - Number of rooms that were tracked
    pub fn shutdown(&self) -> usize {
        let drained: Vec<ManagedChannel> = self.lock().drain().map(|(_, entry)| entry).collect();

        for timer in drained.iter().filter_map(|entry| entry.pending_deletion.as_ref()) {
            timer.cancel();
        }

        drained.len()
    }
}
