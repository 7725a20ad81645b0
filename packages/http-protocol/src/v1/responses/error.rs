//! The bencoded error response.
use serde::Serialize;

/// The error response carries a human-readable failure reason, bencoded the
/// way BitTorrent clients expect it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub failure_reason: String,
}

impl Error {
    /// The bencoded response body.
    #[must_use]
    pub fn write(&self) -> String {
        format!("d14:failure reason{}:{}e", self.failure_reason.len(), self.failure_reason)
    }
}
