use super::{Query, QueryParams, UrlQuery};

/// Facet counts for one or more fields over the rows a [`Query`] selects.
#[derive(Clone, Debug, Default)]
pub struct FacetQuery {
    rows: Query,
    fields: Vec<String>,
    min_count_per_facet: Option<u32>,
    max_values_per_facet: Option<u32>,
}

impl FacetQuery {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FacetQuery {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Restrict the counted rows. Paging and sorting of `rows` are ignored.
    pub fn rows(mut self, rows: Query) -> Self {
        self.rows = rows;
        self
    }

    pub fn min_count_per_facet(mut self, min_count: u32) -> Self {
        self.min_count_per_facet = Some(min_count);
        self
    }

    pub fn max_values_per_facet(mut self, limit: u32) -> Self {
        self.max_values_per_facet = Some(limit);
        self
    }
}

impl UrlQuery for FacetQuery {
    fn to_url_query(&self) -> String {
        let mut params = QueryParams::default();
        self.rows.push_row_selection(&mut params);
        params.push_list("select", &self.fields);
        params.push_opt("min_count", self.min_count_per_facet);
        params.push_opt("limit", self.max_values_per_facet);
        params.to_url_query()
    }
}
