//! Transient user notifications.
//!
//! Notices expire after a fixed TTL. Expiry is lazy: nothing runs in the
//! background, [`NoticeBoard::active`] drops expired entries when it is read.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

struct Entry {
    notice: Notice,
    created_at: Instant,
}

#[derive(Default)]
struct BoardState {
    entries: Vec<Entry>,
    next_id: u64,
}

/// Shared, clonable notice queue.
#[derive(Clone)]
pub struct NoticeBoard {
    state: Arc<Mutex<BoardState>>,
    ttl: Duration,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(BoardState::default())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn push(&self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        let notice = Notice { id, kind, message: message.into() };
        debug!(id, kind = ?notice.kind, "Notice posted");
        state.entries.push(Entry { notice, created_at: Instant::now() });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, message)
    }

    /// Unexpired notices, oldest first.
    pub fn active(&self) -> Vec<Notice> {
        let mut state = self.state.lock();
        let ttl = self.ttl;
        state.entries.retain(|entry| entry.created_at.elapsed() < ttl);
        state.entries.iter().map(|entry| entry.notice.clone()).collect()
    }

    pub fn dismiss(&self, id: u64) -> bool {
        let mut state = self.state.lock();
        let before = state.entries.len();
        state.entries.retain(|entry| entry.notice.id != id);
        state.entries.len() != before
    }

    /// Drain every notice regardless of age.
    pub fn take_all(&self) -> Vec<Notice> {
        let mut state = self.state.lock();
        state.entries.drain(..).map(|entry| entry.notice).collect()
    }
}
