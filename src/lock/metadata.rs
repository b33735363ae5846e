//! Diagnostic claim metadata.
//!
//! The lock object body is the encoded owner token on its first line,
//! optionally followed by a JSON metadata block. Ownership comparison is a
//! prefix check on the token line, so the block is free to exist purely
//! for humans and for [`current_claim`](crate::lock::ObjectLock::current_claim);
//! the protocol never reads it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Diagnostic metadata written alongside a claim token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimMetadata {
    /// Who wrote the claim (e.g., `user@HOST`).
    pub owner: String,

    /// Process ID of the claiming process.
    pub pid: u32,

    /// Timestamp when the claim was written (RFC3339).
    pub created_at: DateTime<Utc>,
}

impl ClaimMetadata {
    /// Metadata for a claim written now by this process.
    pub fn new() -> Self {
        Self {
            owner: owner_string(),
            pid: std::process::id(),
            created_at: Utc::now(),
        }
    }

    /// Serialize to a single-line JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Calculate the age of the claim.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.created_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let minutes = age.num_minutes();
        let hours = age.num_hours();
        let days = age.num_days();

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else {
            format!("{}m", minutes)
        }
    }

    /// Check if the claim is older than the given threshold in minutes.
    pub fn is_stale(&self, stale_minutes: u32) -> bool {
        self.age().num_minutes() > stale_minutes as i64
    }
}

impl Default for ClaimMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// The owner string for claim metadata.
pub(crate) fn owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
