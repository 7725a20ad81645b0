//! Percent decoding of the binary query values.
//!
//! The `info_hash` and `peer_id` parameters carry raw bytes, so they cannot
//! go through a generic string deserializer; they are decoded straight into
//! their fixed-size types.
use std::panic::Location;

use ::percent_encoding::percent_decode_str;
use aquatic_udp_protocol::PeerId;
use bittorrent_primitives::info_hash::InfoHash;
use thiserror::Error;

/// Error returned when a percent-decoded binary value does not have the
/// expected number of bytes.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("invalid byte length {len}, expected {expected} in {location}")]
    InvalidByteLength {
        location: &'static Location<'static>,
        len: usize,
        expected: usize,
    },
}

/// Decodes a percent-encoded info-hash.
///
/// # Errors
///
/// Returns an error if the decoded value is not exactly 20 bytes long.
pub fn percent_decode_info_hash(raw_param: &str) -> Result<InfoHash, ConversionError> {
    let bytes: Vec<u8> = percent_decode_str(raw_param).collect();

    let len = bytes.len();

    let bytes: [u8; 20] = bytes.try_into().map_err(|_| ConversionError::InvalidByteLength {
        location: Location::caller(),
        len,
        expected: 20,
    })?;

    Ok(InfoHash::from(bytes))
}

/// Decodes a percent-encoded peer id.
///
/// # Errors
///
/// Returns an error if the decoded value is not exactly 20 bytes long.
pub fn percent_decode_peer_id(raw_param: &str) -> Result<PeerId, ConversionError> {
    let bytes: Vec<u8> = percent_decode_str(raw_param).collect();

    let len = bytes.len();

    let bytes: [u8; 20] = bytes.try_into().map_err(|_| ConversionError::InvalidByteLength {
        location: Location::caller(),
        len,
        expected: 20,
    })?;

    Ok(PeerId(bytes))
}
