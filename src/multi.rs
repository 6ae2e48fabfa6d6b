//! Several independent reads folded into one round trip.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::encoder_oauth1::percent_encode;
use crate::query::{Query, UrlQuery};

/// Path of the combined endpoint.
pub const MULTI_PATH: &str = "multi";
/// The single outer parameter carrying the JSON envelope.
pub const MULTI_QUERY_PARAM: &str = "queries";

/// A batch of `(path, query)` pairs keyed `q0`, `q1`, ...
///
/// Adding takes `&mut self`, so a batch has one writer at a time; wrap it in
/// a `Mutex` to fill it from several tasks. Sending does not clear it, build
/// a new batch for the next round.
#[derive(Clone, Debug, Default)]
pub struct MultiQuery {
    entries: Vec<(String, String)>,
}

impl MultiQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `path?query` and return the key its result will come back under.
    pub fn add_query<Q>(&mut self, path: impl AsRef<str>, query: &Q) -> String
    where
        Q: UrlQuery + ?Sized,
    {
        let key = format!("q{}", self.entries.len());
        let query = query.to_url_query();
        let target = if query.is_empty() {
            path.as_ref().to_string()
        } else {
            format!("{}?{}", path.as_ref(), query)
        };
        self.entries.push((key.clone(), target));
        key
    }

    /// Queue a read against `table`.
    pub fn add_fetch(&mut self, table: &str, query: &Query) -> String {
        self.add_query(format!("/t/{}", percent_encode(table)), query)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// The JSON object mapping each key to its `path?query`, in queue order.
    pub fn to_json(&self) -> String {
        let members: Vec<String> = self
            .entries
            .iter()
            .map(|(key, target)| {
                format!("{}:{}", Value::from(key.as_str()), Value::from(target.as_str()))
            })
            .collect();
        format!("{{{}}}", members.join(","))
    }
}

impl Serialize for MultiQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, target) in &self.entries {
            map.serialize_entry(key, target)?;
        }
        map.end()
    }
}

impl UrlQuery for MultiQuery {
    fn to_url_query(&self) -> String {
        format!("{}={}", MULTI_QUERY_PARAM, percent_encode(&self.to_json()))
    }
}
