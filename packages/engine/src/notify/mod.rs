//! Change notification fan-out.
//!
//! Every committed mutation announces "session changed" with the version the
//! commit produced. Delivery is best-effort and may arrive out of order
//! under concurrent commits; the version number, not arrival order, tells a
//! subscriber which snapshot is newest.

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::domain::session::SessionId;

/// Broadcast capacity used by [`ChangeHub::default`].
pub const DEFAULT_NOTIFY_CAPACITY: usize = 64;

/// Payload of one change announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionChanged {
    pub session_id: SessionId,
    /// Version the mutation committed at.
    pub version: u64,
}

/// Sink for change announcements.
///
/// Called synchronously right after a commit, so implementations must not
/// block. Anything slow belongs behind a channel.
pub trait SessionNotifier: Send + Sync {
    fn session_changed(&self, event: SessionChanged);
}

/// Notifier that drops every event. For embedders without listeners.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl SessionNotifier for NullNotifier {
    fn session_changed(&self, _event: SessionChanged) {}
}

/// Per-session broadcast registry.
///
/// Channels are created on first subscribe; announcements for sessions
/// nobody watches are dropped. A subscriber that falls more than `capacity`
/// events behind sees a lagged error from its receiver, which is harmless
/// here: only the latest version matters.
pub struct ChangeHub {
    channels: DashMap<SessionId, broadcast::Sender<SessionChanged>>,
    capacity: usize,
}

impl ChangeHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            capacity,
        }
    }

    /// Listen for change announcements about one session.
    pub fn subscribe(&self, session_id: SessionId) -> broadcast::Receiver<SessionChanged> {
        self.channels
            .entry(session_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Drop a session's channel. Existing receivers see the stream close.
    pub fn release(&self, session_id: &SessionId) {
        self.channels.remove(session_id);
    }
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFY_CAPACITY)
    }
}

impl SessionNotifier for ChangeHub {
    fn session_changed(&self, event: SessionChanged) {
        if let Some(sender) = self.channels.get(&event.session_id) {
            // Fails only when every receiver is gone; nothing to do then.
            let _ = sender.send(event);
        }
    }
}
