use serde_json::{Map, Value};

use super::{QueryParams, UrlQuery};

/// Resolve a partial entity description to candidate rows.
#[derive(Clone, Debug, Default)]
pub struct ResolveQuery {
    values: Map<String, Value>,
    debug: bool,
}

impl ResolveQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Ask the API to explain its resolution.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl UrlQuery for ResolveQuery {
    fn to_url_query(&self) -> String {
        let mut params = QueryParams::default();
        params.push_json("values", &Value::Object(self.values.clone()));
        if self.debug {
            params.push("debug", true);
        }
        params.to_url_query()
    }
}

/// Match an entity description to at most one existing row.
#[derive(Clone, Debug, Default)]
pub struct MatchQuery {
    values: Map<String, Value>,
}

impl MatchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }
}

impl UrlQuery for MatchQuery {
    fn to_url_query(&self) -> String {
        let mut params = QueryParams::default();
        params.push_json("values", &Value::Object(self.values.clone()));
        params.to_url_query()
    }
}
