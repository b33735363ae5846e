//! The lock handle and its acquisition/release state machine.

use super::guard::LockGuard;
use super::metadata::ClaimMetadata;
use super::options::LockOptions;
use super::token::OwnerToken;
use super::types::{Claim, LockState};
use crate::error::{LockError, Result, StoreError};
use crate::store::ObjectStore;
use std::thread;
use std::time::Instant;
use tracing::debug;

/// One handle on a named advisory lock.
///
/// A handle carries one owner identity for its whole lifetime: repeated
/// acquire/release cycles reuse the same token. Handles in different
/// processes (or threads) contend purely through the shared store; there
/// is no in-memory coordination between them.
///
/// Driving one handle from two threads concurrently is unsupported; the
/// `&mut self` receivers on every state-changing operation make that
/// explicit.
///
/// # Example
///
/// ```no_run
/// use tidelock::{FsObjectStore, LockOptions, ObjectLock};
///
/// let store = FsObjectStore::new("/var/lib/myapp/locks");
/// let mut lock = ObjectLock::new(store, "jobs/nightly", LockOptions::new(1.0));
///
/// let guard = lock.guard()?;
/// // ... exclusive section ...
/// drop(guard);
/// # Ok::<(), tidelock::LockError>(())
/// ```
#[derive(Debug)]
pub struct ObjectLock<S: ObjectStore> {
    store: S,
    resource: String,
    key: String,
    token: OwnerToken,
    options: LockOptions,
    state: LockState,
}

impl<S: ObjectStore> ObjectLock<S> {
    /// Create a handle for `resource` with a freshly generated owner token.
    pub fn new<R: Into<String>>(store: S, resource: R, options: LockOptions) -> Self {
        Self::with_token(store, resource, options, OwnerToken::generate())
    }

    /// Create a handle with a caller-supplied owner token.
    pub fn with_token<R: Into<String>>(
        store: S,
        resource: R,
        options: LockOptions,
        token: OwnerToken,
    ) -> Self {
        let resource = resource.into();
        let key = format!("{}.lock", resource);

        Self {
            store,
            resource,
            key,
            token,
            options,
            state: LockState::Unlocked,
        }
    }

    /// The logical resource this handle guards.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The store key of the lock object (`{resource}.lock`).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// This handle's owner token.
    pub fn token(&self) -> &OwnerToken {
        &self.token
    }

    /// Current state of the handle.
    pub fn state(&self) -> LockState {
        self.state
    }

    /// Whether this handle currently holds a confirmed claim.
    pub fn is_locked(&self) -> bool {
        self.state == LockState::Locked
    }

    /// Acquire the lock, blocking until confirmed ownership or timeout.
    ///
    /// Idempotent: returns immediately when the handle is already locked,
    /// without touching the store.
    ///
    /// Each iteration of the retry loop claims only if no lock object is
    /// visible: write our token, sleep the consistency delay so a racing
    /// writer's claim can propagate, then read back and confirm ours is
    /// the content that survived. A failed confirmation never deletes the
    /// surviving claim; it belongs to the winner.
    ///
    /// # Errors
    ///
    /// [`LockError::Timeout`] once the deadline elapses without confirmed
    /// ownership; the handle is left unlocked. Store errors propagate
    /// unmodified, except that a `NotFound` from the confirmation read
    /// (the claim vanished under us) counts as an ordinary lost iteration.
    pub fn acquire(&mut self) -> Result<()> {
        if self.state == LockState::Locked {
            return Ok(());
        }

        let started = Instant::now();

        loop {
            if !self.store.exists(&self.key)? {
                debug!(key = %self.key, token = %self.token, "writing claim");
                self.store.create(&self.key, &self.claim_body())?;

                // The crux of the protocol: give any writer that raced us
                // time for its write to become visible before we read back.
                thread::sleep(self.options.consistency_delay());

                match self.store.read(&self.key) {
                    Ok(body) if body.starts_with(self.token.encoded()) => {
                        debug!(key = %self.key, "claim confirmed");
                        self.state = LockState::Locked;
                        return Ok(());
                    }
                    Ok(_) => {
                        debug!(key = %self.key, "claim lost to another writer");
                    }
                    Err(StoreError::NotFound(_)) => {
                        // Claim vanished between write and read; retry.
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            let waited = started.elapsed();
            if waited >= self.options.timeout() {
                return Err(LockError::Timeout {
                    resource: self.resource.clone(),
                    waited,
                });
            }

            thread::sleep(self.options.poll_interval());
        }
    }

    /// Release the lock by deleting the lock object.
    ///
    /// A no-op on an unlocked handle, so double-release and
    /// release-without-acquire are safe and silent.
    ///
    /// By default the delete is unconditional: the handle does not
    /// re-check that the store still carries its token, so a handle whose
    /// claim was overwritten after confirmation would delete the new
    /// owner's claim. With
    /// [`verify_owner_on_release`](LockOptions::verify_owner_on_release)
    /// the object is re-read first and a foreign claim is left in place.
    ///
    /// The handle stays locked if the delete fails, so the caller can
    /// retry.
    pub fn release(&mut self) -> Result<()> {
        if self.state != LockState::Locked {
            return Ok(());
        }

        if self.options.verify_owner_on_release {
            match self.store.read(&self.key) {
                Ok(body) if !body.starts_with(self.token.encoded()) => {
                    tracing::warn!(
                        key = %self.key,
                        "claim was overwritten by another owner; skipping delete"
                    );
                    self.state = LockState::Unlocked;
                    return Ok(());
                }
                Ok(_) => {}
                Err(StoreError::NotFound(_)) => {
                    // Nothing left to delete.
                    self.state = LockState::Unlocked;
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.store.delete(&self.key)?;
        self.state = LockState::Unlocked;
        Ok(())
    }

    /// Acquire and return an RAII guard that releases on drop.
    ///
    /// Idempotent like [`acquire`](Self::acquire); the guard releases the
    /// lock on every exit path of the enclosing scope, including panics.
    pub fn guard(&mut self) -> Result<LockGuard<'_, S>> {
        self.acquire()?;
        Ok(LockGuard::new(self))
    }

    /// Read the current claim on the lock object, whoever owns it.
    ///
    /// Returns `Ok(None)` when no lock object exists. Useful for operator
    /// diagnostics ("who is holding this?"); the result plays no part in
    /// the protocol itself.
    pub fn current_claim(&self) -> Result<Option<Claim>> {
        match self.store.read(&self.key) {
            Ok(body) => Ok(Some(Claim::parse(&body))),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// The lock object body: token line, then a best-effort diagnostic
    /// metadata block. The block is skipped if serialization fails; it is
    /// never load-bearing.
    fn claim_body(&self) -> String {
        let mut body = format!("{}\n", self.token.encoded());
        if let Ok(json) = ClaimMetadata::new().to_json() {
            body.push_str(&json);
            body.push('\n');
        }
        body
    }
}
