//! The internal key of the swarm index.
use std::fmt;

use bittorrent_primitives::info_hash::InfoHash;
use sha1::{Digest, Sha1};

/// The swarm hash is a SHA-1 digest, so it is always 20 bytes long.
pub const SWARM_HASH_BYTES_LEN: usize = 20;

/// SHA-1 over the room name concatenated with the info-hash, both taken as the
/// raw percent-decoded bytes received in the request.
///
/// The room acts as a cryptographic partition: two swarms with the same
/// info-hash but different rooms hash to different keys, so their peers can
/// never see each other. No normalization is applied to either input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SwarmHash([u8; SWARM_HASH_BYTES_LEN]);

impl SwarmHash {
    /// Derives the swarm hash for an info-hash announced inside a room.
    #[must_use]
    pub fn from_room_and_info_hash(room: &[u8], info_hash: &InfoHash) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(room);
        hasher.update(info_hash.0);
        Self(hasher.finalize().into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SWARM_HASH_BYTES_LEN] {
        &self.0
    }
}

impl From<[u8; SWARM_HASH_BYTES_LEN]> for SwarmHash {
    fn from(bytes: [u8; SWARM_HASH_BYTES_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for SwarmHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = [0u8; SWARM_HASH_BYTES_LEN * 2];

        let hex = binascii::bin2hex(&self.0, &mut output).map_err(|_| fmt::Error)?;

        write!(f, "{}", std::str::from_utf8(hex).map_err(|_| fmt::Error)?)
    }
}
