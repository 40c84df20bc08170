//! Per-user serialization of detection passes.
//!
//! The pattern threshold check reads a count and then inserts; two passes for
//! the same user must not interleave there. Passes for different users never
//! contend. A user's entry is dropped once no pass holds it, so the map only
//! grows with the number of users being processed at the same time.

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;

use mindcast_core::errors::{MindcastError, MindcastResult};
use mindcast_core::models::UserId;

#[derive(Debug, Default)]
pub struct UserLocks {
    locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock handle for a user, created on first use.
    pub fn handle(&self, user_id: UserId) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.entry(user_id).or_default().value())
    }

    /// Run `f` while holding the user's lock, then drop the user's entry if
    /// no other pass is waiting on it.
    pub fn run_exclusive<T, F>(&self, user_id: UserId, f: F) -> MindcastResult<T>
    where
        F: FnOnce() -> MindcastResult<T>,
    {
        let handle = self.handle(user_id);
        let result = match acquire(&handle, user_id) {
            Ok(_guard) => f(),
            Err(e) => Err(e),
        };
        drop(handle);
        self.locks
            .remove_if(&user_id, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    /// Number of users with a lock handle.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Acquire a handle returned by [`UserLocks::handle`].
pub fn acquire(handle: &Mutex<()>, user_id: UserId) -> MindcastResult<MutexGuard<'_, ()>> {
    handle.lock().map_err(|_| {
        MindcastError::ConcurrencyError(format!("detection lock poisoned for user {user_id}"))
    })
}
