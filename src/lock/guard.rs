//! RAII lock guard implementation.

use super::handle::ObjectLock;
use crate::error::Result;
use crate::store::ObjectStore;
use tracing::warn;

/// RAII guard for a held lock.
///
/// When dropped, the lock is automatically released on every exit path,
/// including unwinding panics. If the release fails during drop, a
/// warning is logged but no panic occurs.
#[derive(Debug)]
pub struct LockGuard<'a, S: ObjectStore> {
    lock: &'a mut ObjectLock<S>,

    /// Whether the lock has been released manually.
    released: bool,
}

impl<'a, S: ObjectStore> LockGuard<'a, S> {
    pub(super) fn new(lock: &'a mut ObjectLock<S>) -> Self {
        Self {
            lock,
            released: false,
        }
    }

    /// The logical resource the guarded lock protects.
    pub fn resource(&self) -> &str {
        self.lock.resource()
    }

    /// Manually release the lock.
    ///
    /// This is useful when you want to release before the guard goes out
    /// of scope and handle errors explicitly.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.lock.release()
    }
}

impl<S: ObjectStore> Drop for LockGuard<'_, S> {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.lock.release()
        {
            warn!(
                resource = %self.lock.resource(),
                "failed to release lock during drop: {}",
                e
            );
        }
    }
}
