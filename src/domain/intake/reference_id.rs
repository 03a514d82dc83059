//! Reference identifier handed to the caller for a filed intake.
//!
//! Format: 8 uppercase hexadecimal characters encoding 4 bytes from the OS
//! random source (e.g. `9F03A1C4`). Uniqueness is probabilistic and is not
//! checked against the store.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;

/// Human-facing correlation code for one completed intake.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceId(String);

impl ReferenceId {
    /// Number of characters in every reference identifier.
    pub const LEN: usize = 8;

    /// Generates a fresh identifier from 4 cryptographically random bytes.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        Self::from_bytes(bytes)
    }

    /// Hex-encodes the given bytes, most significant first.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(format!("{:08X}", u32::from_be_bytes(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReferenceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
