//! The `scrape` request and its parsing.
use std::panic::Location;

use bittorrent_primitives::info_hash::InfoHash;
use thiserror::Error;

use crate::percent_encoding::{percent_decode_info_hash, ConversionError};
use crate::v1::query::Query;

const INFO_HASH: &str = "info_hash";

/// The parsed `scrape` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scrape {
    pub info_hash: InfoHash,
}

/// Errors parsing a `scrape` request from the query string.
#[derive(Error, Debug)]
pub enum ParseScrapeQueryError {
    #[error("missing param {param_name} in {location}")]
    MissingParam {
        location: &'static Location<'static>,
        param_name: String,
    },

    #[error("invalid param {param_name}: {source}")]
    ConversionError {
        param_name: String,
        source: ConversionError,
    },
}

impl TryFrom<Query> for Scrape {
    type Error = ParseScrapeQueryError;

    fn try_from(query: Query) -> Result<Self, Self::Error> {
        let raw_param = query.get_param(INFO_HASH).ok_or(ParseScrapeQueryError::MissingParam {
            location: Location::caller(),
            param_name: INFO_HASH.to_string(),
        })?;

        let info_hash = percent_decode_info_hash(&raw_param).map_err(|source| ParseScrapeQueryError::ConversionError {
            param_name: INFO_HASH.to_string(),
            source,
        })?;

        Ok(Self { info_hash })
    }
}

#[cfg(test)]
mod tests {

    mod parsing_the_scrape_request {
        use crate::v1::query::Query;
        use crate::v1::requests::scrape::{ParseScrapeQueryError, Scrape};

        #[test]
        fn it_should_parse_the_info_hash() {
            let query = Query::from("info_hash=%3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EA%6A%6B%F4%5A%EE%1B%C0");

            let scrape = Scrape::try_from(query).unwrap();

            assert_eq!(scrape.info_hash.to_string(), "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0");
        }

        #[test]
        fn it_should_fail_without_an_info_hash() {
            let query = Query::from("");

            assert!(matches!(
                Scrape::try_from(query).unwrap_err(),
                ParseScrapeQueryError::MissingParam { .. }
            ));
        }
    }
}
