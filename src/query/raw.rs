use super::{QueryParams, UrlQuery};

/// Free-form parameters for endpoints without a dedicated builder.
#[derive(Clone, Debug, Default)]
pub struct RawQuery {
    params: QueryParams,
}

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push(key, value);
        self
    }
}

impl UrlQuery for RawQuery {
    fn to_url_query(&self) -> String {
        self.params.to_url_query()
    }
}
