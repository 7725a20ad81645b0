//! The query string of tracker HTTP requests.
use multimap::MultiMap;

/// A parsed query string.
///
/// Parameter values are kept still percent-encoded: some of them (the
/// `info_hash`) decode to raw bytes rather than UTF-8, so decoding is left to
/// the typed request fields.
#[derive(Debug, Clone, Default)]
pub struct Query {
    params: MultiMap<String, String>,
}

impl Query {
    /// Returns the first value for the parameter, still percent-encoded, or
    /// `None` when the parameter is absent.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }
}

impl From<&str> for Query {
    fn from(raw_query: &str) -> Self {
        let mut params = MultiMap::new();

        for pair in raw_query.split('&').filter(|pair| !pair.is_empty()) {
            let mut name_and_value = pair.splitn(2, '=');

            let name = name_and_value.next().unwrap_or_default();
            let value = name_and_value.next().unwrap_or_default();

            params.insert(name.to_string(), value.to_string());
        }

        Self { params }
    }
}
