//! The `announce` request and its parsing.
use std::panic::Location;
use std::str::FromStr;

use aquatic_udp_protocol::{AnnounceEvent, PeerId};
use bittorrent_primitives::info_hash::InfoHash;
use thiserror::Error;

use crate::percent_encoding::{percent_decode_info_hash, percent_decode_peer_id, ConversionError};
use crate::v1::query::Query;

const INFO_HASH: &str = "info_hash";
const PEER_ID: &str = "peer_id";
const PORT: &str = "port";
const LEFT: &str = "left";
const EVENT: &str = "event";
const NUMWANT: &str = "numwant";

/// The parsed `announce` request.
///
/// `uploaded`, `downloaded`, `key`, `compact`, `supportcrypto` and `ip` are
/// accepted on the wire and discarded: the tracker does no byte accounting,
/// always answers in compact form and always derives the peer address from
/// the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announce {
    pub info_hash: InfoHash,
    pub port: u16,
    /// Accepted and discarded; the peer identity is its address.
    pub peer_id: Option<PeerId>,
    /// Bytes the client still has to download. Absent counts as zero.
    pub left: Option<u64>,
    pub event: Option<Event>,
    pub numwant: Option<u32>,
}

impl Announce {
    /// A client with nothing left to download is a seeder.
    #[must_use]
    pub fn is_seeding(&self) -> bool {
        self.left.unwrap_or(0) == 0
    }

    /// The event driving the index transition. Absent and `updated` events
    /// both mean a plain refresh.
    #[must_use]
    pub fn announce_event(&self) -> AnnounceEvent {
        match self.event {
            Some(event) => event.into(),
            None => AnnounceEvent::None,
        }
    }
}

/// The `event` announce parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Started,
    Stopped,
    Completed,
    Updated,
}

impl FromStr for Event {
    type Err = ParseAnnounceQueryError;

    fn from_str(raw_param: &str) -> Result<Self, Self::Err> {
        match raw_param {
            "started" => Ok(Self::Started),
            "stopped" => Ok(Self::Stopped),
            "completed" => Ok(Self::Completed),
            "updated" => Ok(Self::Updated),
            _ => Err(ParseAnnounceQueryError::InvalidParam {
                location: Location::caller(),
                param_name: EVENT.to_string(),
                param_value: raw_param.to_string(),
            }),
        }
    }
}

impl From<Event> for AnnounceEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Started => AnnounceEvent::Started,
            Event::Stopped => AnnounceEvent::Stopped,
            Event::Completed => AnnounceEvent::Completed,
            Event::Updated => AnnounceEvent::None,
        }
    }
}

/// Errors parsing an `announce` request from the query string.
#[derive(Error, Debug)]
pub enum ParseAnnounceQueryError {
    #[error("missing param {param_name} in {location}")]
    MissingParam {
        location: &'static Location<'static>,
        param_name: String,
    },

    #[error("invalid param value {param_value} for {param_name} in {location}")]
    InvalidParam {
        location: &'static Location<'static>,
        param_name: String,
        param_value: String,
    },

    #[error("invalid param {param_name}: {source}")]
    ConversionError {
        param_name: String,
        source: ConversionError,
    },
}

impl TryFrom<Query> for Announce {
    type Error = ParseAnnounceQueryError;

    fn try_from(query: Query) -> Result<Self, Self::Error> {
        Ok(Self {
            info_hash: extract_info_hash(&query)?,
            port: extract_port(&query)?,
            peer_id: extract_peer_id(&query)?,
            left: extract_left(&query)?,
            event: extract_event(&query)?,
            numwant: extract_numwant(&query)?,
        })
    }
}

fn extract_info_hash(query: &Query) -> Result<InfoHash, ParseAnnounceQueryError> {
    let raw_param = query.get_param(INFO_HASH).ok_or(ParseAnnounceQueryError::MissingParam {
        location: Location::caller(),
        param_name: INFO_HASH.to_string(),
    })?;

    percent_decode_info_hash(&raw_param).map_err(|source| ParseAnnounceQueryError::ConversionError {
        param_name: INFO_HASH.to_string(),
        source,
    })
}

fn extract_port(query: &Query) -> Result<u16, ParseAnnounceQueryError> {
    let raw_param = query.get_param(PORT).ok_or(ParseAnnounceQueryError::MissingParam {
        location: Location::caller(),
        param_name: PORT.to_string(),
    })?;

    let port = raw_param.parse::<u16>().map_err(|_| ParseAnnounceQueryError::InvalidParam {
        location: Location::caller(),
        param_name: PORT.to_string(),
        param_value: raw_param.clone(),
    })?;

    // Port zero is not listenable, so the announce is useless.
    if port == 0 {
        return Err(ParseAnnounceQueryError::InvalidParam {
            location: Location::caller(),
            param_name: PORT.to_string(),
            param_value: raw_param,
        });
    }

    Ok(port)
}

fn extract_peer_id(query: &Query) -> Result<Option<PeerId>, ParseAnnounceQueryError> {
    match query.get_param(PEER_ID) {
        None => Ok(None),
        Some(raw_param) => {
            let peer_id = percent_decode_peer_id(&raw_param).map_err(|source| ParseAnnounceQueryError::ConversionError {
                param_name: PEER_ID.to_string(),
                source,
            })?;

            Ok(Some(peer_id))
        }
    }
}

fn extract_left(query: &Query) -> Result<Option<u64>, ParseAnnounceQueryError> {
    match query.get_param(LEFT) {
        None => Ok(None),
        Some(raw_param) => {
            let left = raw_param.parse::<u64>().map_err(|_| ParseAnnounceQueryError::InvalidParam {
                location: Location::caller(),
                param_name: LEFT.to_string(),
                param_value: raw_param.clone(),
            })?;

            Ok(Some(left))
        }
    }
}

fn extract_event(query: &Query) -> Result<Option<Event>, ParseAnnounceQueryError> {
    match query.get_param(EVENT) {
        None => Ok(None),
        // An empty event is the same as no event at all.
        Some(raw_param) if raw_param.is_empty() => Ok(None),
        Some(raw_param) => Ok(Some(raw_param.parse::<Event>()?)),
    }
}

fn extract_numwant(query: &Query) -> Result<Option<u32>, ParseAnnounceQueryError> {
    match query.get_param(NUMWANT) {
        None => Ok(None),
        Some(raw_param) => {
            let numwant = raw_param.parse::<u32>().map_err(|_| ParseAnnounceQueryError::InvalidParam {
                location: Location::caller(),
                param_name: NUMWANT.to_string(),
                param_value: raw_param.clone(),
            })?;

            Ok(Some(numwant))
        }
    }
}
