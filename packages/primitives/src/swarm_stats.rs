use derive_more::Constructor;

/// Swarm statistics for one (room, info-hash) pair.
///
/// These are the `complete`/`incomplete` integers of the announce and scrape
/// responses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Constructor)]
pub struct SwarmStats {
    /// (i.e `seeders`): The number of active peers that have the complete
    /// content.
    pub complete: u32,

    /// (i.e `leechers`): The number of active peers that are still
    /// downloading.
    pub incomplete: u32,
}

impl SwarmStats {
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn seeders(&self) -> u32 {
        self.complete
    }

    #[must_use]
    pub fn leechers(&self) -> u32 {
        self.incomplete
    }

    /// Total number of peers in the swarm, seeders and leechers together.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.complete + self.incomplete
    }
}
