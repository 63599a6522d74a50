//! Response envelopes shared by every service behind the gateway.

use serde::{Deserialize, Serialize};

/// Wrapper the services put around every list response.
///
/// The `collection` key is part of the contract: it must be present even
/// when the list is empty, and deserialization fails when it is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    /// The wrapped items, possibly empty.
    pub collection: Vec<T>,
}

impl<T> Collection<T> {
    /// Number of items in the collection.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.collection.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }
}

/// Actuator-style health envelope (`{"status": "UP"}`).
///
/// The status is kept as a raw string so unexpected values (`DOWN`,
/// `OUT_OF_SERVICE`, anything else) surface in diagnostics verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Reported status value.
    pub status: String,
}

impl HealthStatus {
    /// Whether the component reports itself ready.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.status == "UP"
    }
}
