use serde_json::{json, Value};

use super::{QueryParams, UrlQuery};

/// Read (search) query against a table.
///
/// ```
/// use factual::query::{Query, UrlQuery};
///
/// let query = Query::new()
///     .search("coffee")
///     .field("region").equal("CA")
///     .limit(10);
/// assert!(query.to_url_query().starts_with("q=coffee&filters="));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Query {
    full_text: Vec<String>,
    filters: Vec<Value>,
    geo: Option<Value>,
    select: Vec<String>,
    sort: Vec<String>,
    limit: Option<u32>,
    offset: Option<u32>,
    include_count: bool,
    threshold: Option<String>,
    user: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a full text search term; terms are joined with spaces.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.full_text.push(term.into());
        self
    }

    /// Start a filter on `name`.
    pub fn field(self, name: impl Into<String>) -> Field {
        Field {
            query: self,
            name: name.into(),
        }
    }

    /// Add a raw filter object, e.g. `{"name": {"$bw": "Star"}}`.
    pub fn filter(mut self, filter: Value) -> Self {
        self.filters.push(filter);
        self
    }

    /// Match rows satisfying any of `queries`' filters.
    pub fn or(self, queries: impl IntoIterator<Item = Query>) -> Self {
        self.group("$or", queries)
    }

    /// Match rows satisfying all of `queries`' filters.
    pub fn and(self, queries: impl IntoIterator<Item = Query>) -> Self {
        self.group("$and", queries)
    }

    fn group(mut self, op: &str, queries: impl IntoIterator<Item = Query>) -> Self {
        let parts = queries
            .into_iter()
            .filter_map(|q| q.filters_value())
            .collect::<Vec<Value>>();
        if !parts.is_empty() {
            self.filters.push(json!({ op: parts }));
        }
        self
    }

    /// Rows within `meters` of the given point.
    pub fn within_circle(mut self, latitude: f64, longitude: f64, meters: u32) -> Self {
        self.geo = Some(json!({
            "$circle": {"$center": [latitude, longitude], "$meters": meters}
        }));
        self
    }

    /// Rows ordered by distance from the given point.
    pub fn near(mut self, latitude: f64, longitude: f64) -> Self {
        self.geo = Some(json!({ "$point": [latitude, longitude] }));
        self
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn sort_asc(mut self, field: impl AsRef<str>) -> Self {
        self.sort.push(format!("{}:asc", field.as_ref()));
        self
    }

    pub fn sort_desc(mut self, field: impl AsRef<str>) -> Self {
        self.sort.push(format!("{}:desc", field.as_ref()));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Ask the API for the total row count alongside the page.
    pub fn include_row_count(mut self, include: bool) -> Self {
        self.include_count = include;
        self
    }

    /// Data quality threshold, e.g. `confident` or `default`.
    pub fn threshold(mut self, threshold: impl Into<String>) -> Self {
        self.threshold = Some(threshold.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    fn filters_value(&self) -> Option<Value> {
        match self.filters.len() {
            0 => None,
            1 => Some(self.filters[0].clone()),
            _ => Some(json!({ "$and": self.filters })),
        }
    }

    /// Search, filter and geo parameters, shared with facet queries.
    pub(crate) fn push_row_selection(&self, params: &mut QueryParams) {
        if !self.full_text.is_empty() {
            params.push("q", self.full_text.join(" "));
        }
        if let Some(filters) = self.filters_value() {
            params.push_json("filters", &filters);
        }
        if let Some(geo) = &self.geo {
            params.push_json("geo", geo);
        }
        if self.include_count {
            params.push("include_count", true);
        }
        params.push_opt("threshold", self.threshold.as_ref());
        params.push_opt("user", self.user.as_ref());
    }
}

impl UrlQuery for Query {
    fn to_url_query(&self) -> String {
        let mut params = QueryParams::default();
        self.push_row_selection(&mut params);
        params.push_list("select", &self.select);
        params.push_list("sort", &self.sort);
        params.push_opt("limit", self.limit);
        params.push_opt("offset", self.offset);
        params.to_url_query()
    }
}

/// A pending filter on one field; every operator hands back the [`Query`].
#[derive(Clone, Debug)]
pub struct Field {
    query: Query,
    name: String,
}

impl Field {
    fn op(self, op: &str, value: Value) -> Query {
        let Field { query, name } = self;
        query.filter(json!({ name: { op: value } }))
    }

    pub fn equal(self, value: impl Into<Value>) -> Query {
        self.op("$eq", value.into())
    }

    pub fn not_equal(self, value: impl Into<Value>) -> Query {
        self.op("$neq", value.into())
    }

    pub fn in_list<I, V>(self, values: I) -> Query
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.op("$in", values.into_iter().collect())
    }

    pub fn not_in_list<I, V>(self, values: I) -> Query
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.op("$nin", values.into_iter().collect())
    }

    pub fn begins_with(self, prefix: impl Into<String>) -> Query {
        self.op("$bw", Value::String(prefix.into()))
    }

    pub fn not_begins_with(self, prefix: impl Into<String>) -> Query {
        self.op("$nbw", Value::String(prefix.into()))
    }

    pub fn begins_with_any<I, S>(self, prefixes: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.op(
            "$bwin",
            prefixes.into_iter().map(|p| Value::String(p.into())).collect(),
        )
    }

    pub fn blank(self) -> Query {
        self.op("$blank", Value::Bool(true))
    }

    pub fn not_blank(self) -> Query {
        self.op("$blank", Value::Bool(false))
    }

    pub fn greater_than(self, value: impl Into<Value>) -> Query {
        self.op("$gt", value.into())
    }

    pub fn greater_than_or_equal(self, value: impl Into<Value>) -> Query {
        self.op("$gte", value.into())
    }

    pub fn less_than(self, value: impl Into<Value>) -> Query {
        self.op("$lt", value.into())
    }

    pub fn less_than_or_equal(self, value: impl Into<Value>) -> Query {
        self.op("$lte", value.into())
    }

    /// Full text search restricted to this field.
    pub fn search(self, term: impl Into<String>) -> Query {
        self.op("$search", Value::String(term.into()))
    }

    /// Array field contains `value`.
    pub fn includes(self, value: impl Into<Value>) -> Query {
        self.op("$includes", value.into())
    }

    /// Array field contains any of `values`.
    pub fn includes_any<I, V>(self, values: I) -> Query
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.op("$includes_any", values.into_iter().collect())
    }
}
