//! Query builders for the Factual endpoints.
//!
//! Each builder only knows how to render itself as a pre-escaped query
//! string through [`UrlQuery`]; the client never looks inside.

mod diffs;
mod facet;
mod raw;
mod read;
mod resolve;
mod write;

pub use self::diffs::DiffsQuery;
pub use self::facet::FacetQuery;
pub use self::raw::RawQuery;
pub use self::read::{Field, Query};
pub use self::resolve::{MatchQuery, ResolveQuery};
pub use self::write::{Boost, Clear, Flag, FlagProblem, Metadata, Submit};

use serde_json::Value;

use crate::encoder_oauth1::percent_encode;

/// Anything that can be sent as the query string (or form body) of a request.
pub trait UrlQuery {
    /// Pre-escaped `key=value&...` string with no leading `?`.
    fn to_url_query(&self) -> String;
}

impl UrlQuery for str {
    fn to_url_query(&self) -> String {
        self.trim_start_matches('?').to_string()
    }
}

impl UrlQuery for String {
    fn to_url_query(&self) -> String {
        self.as_str().to_url_query()
    }
}

/// Ordered parameter list shared by the builders.
#[derive(Clone, Debug, Default)]
pub(crate) struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub(crate) fn push(&mut self, key: &str, value: impl ToString) {
        self.0.push((key.to_string(), value.to_string()));
    }

    pub(crate) fn push_opt(&mut self, key: &str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub(crate) fn push_json(&mut self, key: &str, value: &Value) {
        self.push(key, value);
    }

    pub(crate) fn push_list(&mut self, key: &str, values: &[String]) {
        if !values.is_empty() {
            self.push(key, values.join(","));
        }
    }
}

impl UrlQuery for QueryParams {
    fn to_url_query(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<String>>()
            .join("&")
    }
}
