use serde::{Deserialize, Serialize};

use crate::network::Network;

/// Core configuration of the tracker.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Core {
    /// Interval in seconds for the cleanup job that evicts inactive peers and
    /// drops empty swarms.
    #[serde(default = "Core::default_inactive_peer_cleanup_interval")]
    pub inactive_peer_cleanup_interval: u64,

    /// Maximum time in seconds a peer stays in a swarm without announcing.
    /// It must exceed the maximum announce interval, or live clients would be
    /// evicted between two announces.
    #[serde(default = "Core::default_max_peer_timeout")]
    pub max_peer_timeout: u64,

    /// The policy for the `interval` field of announce responses.
    #[serde(default)]
    pub announce_policy: AnnouncePolicy,

    /// Network configuration.
    #[serde(default)]
    pub net: Network,
}

impl Default for Core {
    fn default() -> Self {
        Self {
            inactive_peer_cleanup_interval: Self::default_inactive_peer_cleanup_interval(),
            max_peer_timeout: Self::default_max_peer_timeout(),
            announce_policy: AnnouncePolicy::default(),
            net: Network::default(),
        }
    }
}

impl Core {
    fn default_inactive_peer_cleanup_interval() -> u64 {
        960
    }

    fn default_max_peer_timeout() -> u64 {
        960
    }
}

/// The policy for the `interval` field of announce responses.
///
/// Clients in small swarms are told to come back early, clients in crowded
/// swarms are told to come back late. Whatever the swarm size, the interval
/// stays between `interval_min` and `interval_max`.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub struct AnnouncePolicy {
    /// The base interval in seconds.
    #[serde(default = "AnnouncePolicy::default_interval")]
    pub interval: u32,

    /// Lower bound for the interval in seconds.
    #[serde(default = "AnnouncePolicy::default_interval_min")]
    pub interval_min: u32,

    /// Upper bound for the interval in seconds.
    #[serde(default = "AnnouncePolicy::default_interval_max")]
    pub interval_max: u32,
}

impl Default for AnnouncePolicy {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
            interval_min: Self::default_interval_min(),
            interval_max: Self::default_interval_max(),
        }
    }
}

impl AnnouncePolicy {
    fn default_interval() -> u32 {
        480
    }

    fn default_interval_min() -> u32 {
        60
    }

    fn default_interval_max() -> u32 {
        1500
    }
}
