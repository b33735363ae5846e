//! Tidelock: advisory mutual-exclusion locks for eventually-consistent
//! object stores.
//!
//! A lock is one object in a store that offers only whole-object
//! create/read/delete, with no compare-and-swap and no bound on how fast a
//! write becomes visible to readers. Independent processes coordinate exclusive
//! access to a named resource through nothing but that object's existence
//! and content: each contender writes its owner token, then waits out the
//! store's propagation delay before reading back to learn whether its
//! claim survived.
//!
//! The guarantee is advisory and probabilistic: it binds only cooperating
//! participants, and it holds only as far as the caller's
//! `consistency_delay_secs` really bounds the store's propagation time.
//! This is not a consensus protocol.
//!
//! ```no_run
//! use tidelock::{FsObjectStore, LockOptions, ObjectLock};
//!
//! let store = FsObjectStore::new("/var/lib/myapp/locks");
//! let mut lock = ObjectLock::new(store, "jobs/nightly", LockOptions::new(1.0));
//!
//! {
//!     let _guard = lock.guard()?;
//!     // exclusive section; released on every exit path
//! }
//! # Ok::<(), tidelock::LockError>(())
//! ```

pub mod error;
pub mod lock;
pub mod store;

pub use error::{LockError, Result, StoreError};
pub use lock::{Claim, ClaimMetadata, LockGuard, LockOptions, LockState, ObjectLock, OwnerToken};
pub use store::{FsObjectStore, InMemoryStore, ObjectStore};
