//! The compact peer address used by the swarm index.
//!
//! A peer is identified by 18 bytes: the IP address in IPv6 form (IPv4
//! addresses use the IPv4-mapped form, `::ffff:a.b.c.d`) followed by the TCP
//! port in big-endian. Two peers are equal iff their 18 bytes are equal.
//!
//! The same bytes double as the BitTorrent compact wire encoding: the
//! trailing 6 bytes for an IPv4 peer, all 18 bytes for an IPv6 peer, so no
//! re-encoding happens between the index and the response body.
use std::fmt;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};

/// Prefix that marks an IPv4-mapped IPv6 address.
pub const V4_IN_V6_PREFIX: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff];

pub const COMPACT_PEER_ADDR_BYTES_LEN: usize = 18;

/// A peer address in its fixed 18-byte form: identity key and wire encoding
/// at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompactPeerAddr([u8; COMPACT_PEER_ADDR_BYTES_LEN]);

impl CompactPeerAddr {
    #[must_use]
    pub fn new(ip: &IpAddr, port: u16) -> Self {
        let ip_bytes = match ip {
            IpAddr::V4(ipv4) => ipv4.to_ipv6_mapped().octets(),
            IpAddr::V6(ipv6) => ipv6.octets(),
        };

        let mut bytes = [0u8; COMPACT_PEER_ADDR_BYTES_LEN];
        bytes[..16].copy_from_slice(&ip_bytes);
        bytes[16..].copy_from_slice(&port.to_be_bytes());

        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; COMPACT_PEER_ADDR_BYTES_LEN] {
        &self.0
    }

    /// `true` when the address bytes carry an IPv4 address in its mapped form.
    #[must_use]
    pub fn is_ipv4_mapped(&self) -> bool {
        self.0[..12] == V4_IN_V6_PREFIX
    }

    #[must_use]
    pub fn ip(&self) -> IpAddr {
        let mut ip_bytes = [0u8; 16];
        ip_bytes.copy_from_slice(&self.0[..16]);

        let ipv6 = Ipv6Addr::from(ip_bytes);

        match ipv6.to_ipv4_mapped() {
            Some(ipv4) => IpAddr::V4(ipv4),
            None => IpAddr::V6(ipv6),
        }
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        u16::from_be_bytes([self.0[16], self.0[17]])
    }

    #[must_use]
    pub fn to_socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip(), self.port())
    }
}

impl From<SocketAddr> for CompactPeerAddr {
    fn from(socket_addr: SocketAddr) -> Self {
        Self::new(&socket_addr.ip(), socket_addr.port())
    }
}

impl fmt::Display for CompactPeerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_socket_addr())
    }
}

/// Selected peers already in their compact wire form, partitioned by address
/// family: concatenated 6-byte records for IPv4 and concatenated 18-byte
/// records for IPv6.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompactPeerList {
    v4: Vec<u8>,
    v6: Vec<u8>,
}

impl CompactPeerList {
    pub fn push(&mut self, addr: &CompactPeerAddr) {
        if addr.is_ipv4_mapped() {
            self.v4.extend_from_slice(&addr.as_bytes()[12..]);
        } else {
            self.v6.extend_from_slice(addr.as_bytes());
        }
    }

    /// Number of peers in both buffers together.
    #[must_use]
    pub fn len(&self) -> usize {
        self.v4.len() / 6 + self.v6.len() / COMPACT_PEER_ADDR_BYTES_LEN
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }

    #[must_use]
    pub fn v4(&self) -> &[u8] {
        &self.v4
    }

    #[must_use]
    pub fn v6(&self) -> &[u8] {
        &self.v6
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.v4, self.v6)
    }
}

#[cfg(test)]
mod tests {

    mod the_compact_peer_addr {
        use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
        use std::str::FromStr;

        use crate::peer::CompactPeerAddr;

        #[test]
        fn it_should_store_an_ipv4_address_in_its_mapped_form() {
            let addr = CompactPeerAddr::new(&IpAddr::V4(Ipv4Addr::new(192, 0, 2, 7)), 6881);

            assert_eq!(
                addr.as_bytes(),
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 0xc0, 0x00, 0x02, 0x07, 0x1a, 0xe1]
            );
            assert!(addr.is_ipv4_mapped());
        }

        #[test]
        fn it_should_store_an_ipv6_address_verbatim() {
            let ip = IpAddr::V6(Ipv6Addr::from_str("2001:db8::1").unwrap());

            let addr = CompactPeerAddr::new(&ip, 51413);

            assert_eq!(
                addr.as_bytes(),
                &[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01, 0xc8, 0xd5]
            );
            assert!(!addr.is_ipv4_mapped());
        }

        #[test]
        fn it_should_round_trip_the_ip_and_port() {
            let ip = IpAddr::V4(Ipv4Addr::new(126, 0, 0, 1));

            let addr = CompactPeerAddr::new(&ip, 8080);

            assert_eq!(addr.ip(), ip);
            assert_eq!(addr.port(), 8080);
        }

        #[test]
        fn it_should_compare_equal_only_when_all_bytes_match() {
            let ip = IpAddr::V4(Ipv4Addr::new(126, 0, 0, 1));

            assert_eq!(CompactPeerAddr::new(&ip, 8080), CompactPeerAddr::new(&ip, 8080));
            assert_ne!(CompactPeerAddr::new(&ip, 8080), CompactPeerAddr::new(&ip, 8081));
        }
    }

    mod the_compact_peer_list {
        use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
        use std::str::FromStr;

        use crate::peer::{CompactPeerAddr, CompactPeerList};

        #[test]
        fn it_should_emit_the_trailing_six_bytes_for_an_ipv4_peer() {
            let mut peers = CompactPeerList::default();

            peers.push(&CompactPeerAddr::new(&IpAddr::V4(Ipv4Addr::new(192, 0, 2, 7)), 6881));

            assert_eq!(peers.v4(), &[0xc0, 0x00, 0x02, 0x07, 0x1a, 0xe1]);
            assert!(peers.v6().is_empty());
            assert_eq!(peers.len(), 1);
        }

        #[test]
        fn it_should_emit_all_eighteen_bytes_for_an_ipv6_peer() {
            let mut peers = CompactPeerList::default();

            let ip = IpAddr::V6(Ipv6Addr::from_str("2001:db8::1").unwrap());
            peers.push(&CompactPeerAddr::new(&ip, 51413));

            assert!(peers.v4().is_empty());
            assert_eq!(
                peers.v6(),
                &[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01, 0xc8, 0xd5]
            );
            assert_eq!(peers.len(), 1);
        }
    }
}
