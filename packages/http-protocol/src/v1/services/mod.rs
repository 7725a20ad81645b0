//! Services shared by the HTTP tracker handlers.
pub mod peer_ip_resolver;
