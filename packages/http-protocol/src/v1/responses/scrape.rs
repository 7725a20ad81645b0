//! The bencoded `scrape` response.
use roomtracker_primitives::core::ScrapeData;

/// The `scrape` response body.
///
/// It is built by hand because the `files` dictionary is keyed by the raw
/// 20 info-hash bytes, which a generic serializer cannot express as a struct
/// field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bencoded {
    scrape_data: ScrapeData,
}

impl From<ScrapeData> for Bencoded {
    fn from(scrape_data: ScrapeData) -> Self {
        Self { scrape_data }
    }
}

impl Bencoded {
    /// The bencoded response body:
    ///
    /// ```text
    /// d5:filesd20:<info-hash bytes>d8:completei..e10:incompletei..eee
    /// ```
    #[must_use]
    pub fn body(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();

        bytes.extend_from_slice(b"d5:filesd20:");
        bytes.extend_from_slice(&self.scrape_data.info_hash.0);
        bytes.extend_from_slice(
            format!(
                "d8:completei{}e10:incompletei{}ee",
                self.scrape_data.stats.seeders(),
                self.scrape_data.stats.leechers()
            )
            .as_bytes(),
        );
        bytes.extend_from_slice(b"ee");

        bytes
    }
}
