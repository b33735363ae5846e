//! Owner token generation and encoding.

use std::fmt;

/// Identity of one lock handle, written into the lock object to mark which
/// attempt currently claims ownership.
///
/// The generated form is `<pid.instance>`: the local process id plus a
/// random 64-bit instance id from a cryptographically sound generator.
/// The pid disambiguates attempts across processes on one host; the random
/// instance id disambiguates concurrent attempts within one process.
///
/// The encoding is human-diagnosable but is never parsed for meaning;
/// ownership comparison is prefix equality on the stored object content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerToken {
    encoded: String,
}

impl OwnerToken {
    /// Generate a fresh token for this process.
    pub fn generate() -> Self {
        let instance: u64 = rand::random();
        Self {
            encoded: format!("<{}.{}>", std::process::id(), instance),
        }
    }

    /// Use a caller-supplied token verbatim.
    ///
    /// The caller is responsible for its uniqueness across all handles
    /// that may contend for the same resource.
    pub fn custom<S: Into<String>>(token: S) -> Self {
        Self {
            encoded: token.into(),
        }
    }

    /// The encoded token string, as written to the lock object.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }
}

impl fmt::Display for OwnerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}
