//! One-shot notices carried across a redirect.

use dashmap::DashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Server-side store of notices keyed by an opaque token.
///
/// A notice is returned by [`FlashStore::take`] at most once and expires
/// after the configured TTL if never read.
#[derive(Debug)]
pub struct FlashStore {
    entries: DashMap<Uuid, (NoticeKind, String, Instant)>,
    ttl: Duration,
}

impl FlashStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Store a notice and return the token that retrieves it.
    pub fn push(&self, kind: NoticeKind, message: impl Into<String>) -> Uuid {
        self.purge_expired();
        let token = Uuid::new_v4();
        self.entries
            .insert(token, (kind, message.into(), Instant::now()));
        token
    }

    /// Remove and return the notice for `token` if it has not expired.
    pub fn take(&self, token: &Uuid) -> Option<(NoticeKind, String)> {
        let (_, (kind, message, created)) = self.entries.remove(token)?;
        (created.elapsed() <= self.ttl).then_some((kind, message))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, (_, _, created)| created.elapsed() <= ttl);
    }
}
