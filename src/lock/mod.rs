//! The lock manager: acquisition, release, and scoped holding of one
//! named lock over an eventually-consistent object store.
//!
//! # Protocol
//!
//! The backing store has no atomic compare-and-swap, so a claim is
//! established by write-delay-reread:
//!
//! 1. If no lock object exists, write one carrying this handle's owner
//!    token.
//! 2. Sleep for the configured consistency delay, giving any racing
//!    writer's claim time to propagate.
//! 3. Read the object back; ownership is confirmed only if the content
//!    still starts with this handle's token.
//!
//! A losing writer's claim is simply overwritten in step 1, or overwrites
//! ours before step 3. Either way at most one handle confirms, provided
//! the consistency delay is a real upper bound on the store's propagation
//! time. That bound is the caller's to estimate; the protocol's guarantee
//! is exactly as good as the estimate.
//!
//! # Lock Objects
//!
//! One object per resource, at key `{resource}.lock`. The first line of
//! the body is the encoded owner token; an optional JSON diagnostic block
//! follows (owner `user@HOST`, pid, timestamp). Ownership comparison is a
//! prefix check on the token, so the trailing block never affects the
//! protocol.
//!
//! # Scoped Holding
//!
//! [`ObjectLock::guard`] returns an RAII guard that releases the lock when
//! dropped, on every exit path. If the release fails during drop, a
//! warning is logged but the program does not panic.

mod guard;
mod handle;
mod metadata;
mod options;
mod token;
mod types;


// Re-export public API
pub use guard::LockGuard;
pub use handle::ObjectLock;
pub use metadata::ClaimMetadata;
pub use options::LockOptions;
pub use token::OwnerToken;
pub use types::{Claim, LockState};
