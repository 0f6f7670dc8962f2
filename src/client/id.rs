//! Client handle identifier type.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for client ID generation.
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of one client handle instance.
///
/// Every handle the manager constructs gets a fresh ID from an atomic
/// counter, so two handles compare equal only if they are the same
/// instance. Displayed as `client-XXXXXXXX` in hexadecimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl ClientId {
    /// Allocate the next unique client ID.
    pub fn next() -> Self {
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Create a ClientId from a raw u64 value.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client-{:08x}", self.0)
    }
}
