//! Lock state and claim information structures.

use super::metadata::ClaimMetadata;
use super::token::OwnerToken;

/// Observable state of a lock handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    /// The handle does not hold the lock.
    #[default]
    Unlocked,
    /// The handle holds a confirmed claim on the lock object.
    Locked,
}

/// A claim read back from the store, describing the current holder.
///
/// Produced by [`ObjectLock::current_claim`](super::ObjectLock::current_claim).
#[derive(Debug, Clone)]
pub struct Claim {
    /// The token line of the lock object (the part ownership comparison
    /// uses).
    pub token: String,

    /// The diagnostic metadata block, when present and well-formed.
    pub metadata: Option<ClaimMetadata>,
}

impl Claim {
    /// Parse a lock object body: token line first, then an optional JSON
    /// metadata block. A missing or malformed block is not an error; the
    /// block is diagnostic only.
    pub(super) fn parse(body: &str) -> Self {
        let mut lines = body.lines();
        let token = lines.next().unwrap_or("").to_string();
        let metadata = lines.next().and_then(|line| serde_json::from_str(line).ok());

        Self { token, metadata }
    }

    /// Whether this claim belongs to `token`, using the same prefix
    /// comparison the acquisition protocol uses.
    pub fn is_held_by(&self, token: &OwnerToken) -> bool {
        self.token.starts_with(token.encoded())
    }
}

impl std::fmt::Display for Claim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token)?;
        if let Some(meta) = &self.metadata {
            write!(f, " (owner: {}, age: {})", meta.owner, meta.age_string())?;
        }
        Ok(())
    }
}
