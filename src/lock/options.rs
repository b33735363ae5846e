//! Lock configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for one lock handle, immutable after construction.
///
/// Serde-derived so applications can embed it in their own configuration
/// files; every field except `consistency_delay_secs` has a default. That
/// one is deliberately mandatory: it is the caller's estimate of the
/// store's real propagation bound, and the mutual-exclusion guarantee is
/// only as good as that estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockOptions {
    /// Wait inserted after a tentative claim write, letting racing writes
    /// propagate before the confirmation read.
    pub consistency_delay_secs: f64,

    /// Deadline for the whole acquisition attempt, measured from the
    /// `acquire` call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,

    /// Sleep between acquisition retries while the lock is held elsewhere.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: f64,

    /// Re-read the lock object before deleting it on release, and skip the
    /// delete if the claim was overwritten by another owner. Off by
    /// default: the historical behavior deletes unconditionally.
    #[serde(default)]
    pub verify_owner_on_release: bool,
}

impl LockOptions {
    /// Options with the given consistency delay and defaults for the rest.
    pub fn new(consistency_delay_secs: f64) -> Self {
        Self {
            consistency_delay_secs,
            timeout_secs: default_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            verify_owner_on_release: false,
        }
    }

    /// Set the acquisition timeout in seconds.
    pub fn timeout_secs(mut self, secs: f64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the retry poll interval in seconds.
    pub fn poll_interval_secs(mut self, secs: f64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    /// Enable or disable owner re-verification before the release delete.
    pub fn verify_owner_on_release(mut self, verify: bool) -> Self {
        self.verify_owner_on_release = verify;
        self
    }

    pub(crate) fn consistency_delay(&self) -> Duration {
        Duration::from_secs_f64(self.consistency_delay_secs)
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_secs_f64(self.poll_interval_secs)
    }
}

// Default value functions for serde
fn default_timeout_secs() -> f64 {
    10.0
}
fn default_poll_interval_secs() -> f64 {
    0.05
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_documented_defaults() {
        let options = LockOptions::new(1.0);

        assert_eq!(options.consistency_delay_secs, 1.0);
        assert_eq!(options.timeout_secs, 10.0);
        assert_eq!(options.poll_interval_secs, 0.05);
        assert!(!options.verify_owner_on_release);
    }

    #[test]
    fn builder_style_setters_override_defaults() {
        let options = LockOptions::new(0.5)
            .timeout_secs(2.0)
            .poll_interval_secs(0.1)
            .verify_owner_on_release(true);

        assert_eq!(options.timeout_secs, 2.0);
        assert_eq!(options.poll_interval_secs, 0.1);
        assert!(options.verify_owner_on_release);
    }

    #[test]
    fn deserializing_fills_defaults_for_omitted_fields() {
        let options: LockOptions =
            serde_json::from_str(r#"{"consistency_delay_secs": 1.5}"#).unwrap();

        assert_eq!(options.consistency_delay_secs, 1.5);
        assert_eq!(options.timeout_secs, 10.0);
        assert_eq!(options.poll_interval_secs, 0.05);
        assert!(!options.verify_owner_on_release);
    }

    #[test]
    fn consistency_delay_is_required_when_deserializing() {
        let result: Result<LockOptions, _> = serde_json::from_str(r#"{"timeout_secs": 5.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn duration_accessors_convert_fractional_seconds() {
        let options = LockOptions::new(0.25).poll_interval_secs(0.05);

        assert_eq!(options.consistency_delay(), Duration::from_millis(250));
        assert_eq!(options.poll_interval(), Duration::from_millis(50));
        assert_eq!(options.timeout(), Duration::from_secs(10));
    }
}
