use super::{QueryParams, UrlQuery};

/// Changes to a table between two points in time (epoch milliseconds).
#[derive(Clone, Copy, Debug, Default)]
pub struct DiffsQuery {
    start: Option<i64>,
    end: Option<i64>,
}

impl DiffsQuery {
    pub fn new(start: i64) -> Self {
        DiffsQuery {
            start: Some(start),
            end: None,
        }
    }

    pub fn between(start: i64, end: i64) -> Self {
        DiffsQuery {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn end(mut self, end: i64) -> Self {
        self.end = Some(end);
        self
    }
}

impl UrlQuery for DiffsQuery {
    fn to_url_query(&self) -> String {
        let mut params = QueryParams::default();
        params.push_opt("start", self.start);
        params.push_opt("end", self.end);
        params.to_url_query()
    }
}
