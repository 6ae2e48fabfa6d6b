use std::fmt;

use serde_json::{Map, Value};

use super::{QueryParams, UrlQuery};

/// Who is making a write and why.
#[derive(Clone, Debug, Default)]
pub struct Metadata {
    user: Option<String>,
    comment: Option<String>,
    reference: Option<String>,
}

impl Metadata {
    pub fn new(user: impl Into<String>) -> Self {
        Metadata {
            user: Some(user.into()),
            ..Default::default()
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// URL or other pointer backing the write.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    fn push_into(&self, params: &mut QueryParams) {
        params.push_opt("user", self.user.as_ref());
        params.push_opt("comment", self.comment.as_ref());
        params.push_opt("reference", self.reference.as_ref());
    }
}

/// Add a new row or update fields of an existing one.
#[derive(Clone, Debug, Default)]
pub struct Submit {
    values: Map<String, Value>,
    metadata: Metadata,
}

impl Submit {
    pub fn new(metadata: Metadata) -> Self {
        Submit {
            values: Map::new(),
            metadata,
        }
    }

    pub fn value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Mark `field` for removal.
    pub fn remove(mut self, field: impl Into<String>) -> Self {
        self.values.insert(field.into(), Value::Null);
        self
    }
}

impl UrlQuery for Submit {
    fn to_url_query(&self) -> String {
        let mut params = QueryParams::default();
        params.push_json("values", &Value::Object(self.values.clone()));
        self.metadata.push_into(&mut params);
        params.to_url_query()
    }
}

/// Request that fields of a row be cleared.
#[derive(Clone, Debug, Default)]
pub struct Clear {
    fields: Vec<String>,
    metadata: Metadata,
}

impl Clear {
    pub fn new(metadata: Metadata) -> Self {
        Clear {
            fields: Vec::new(),
            metadata,
        }
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }
}

impl UrlQuery for Clear {
    fn to_url_query(&self) -> String {
        let mut params = QueryParams::default();
        params.push_list("fields", &self.fields);
        self.metadata.push_into(&mut params);
        params.to_url_query()
    }
}

/// Signal that a row was the right answer for a search.
#[derive(Clone, Debug, Default)]
pub struct Boost {
    factual_id: String,
    q: Option<String>,
    user: Option<String>,
}

impl Boost {
    pub fn new(factual_id: impl Into<String>) -> Self {
        Boost {
            factual_id: factual_id.into(),
            ..Default::default()
        }
    }

    /// The full text search the row answered.
    pub fn search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

impl UrlQuery for Boost {
    fn to_url_query(&self) -> String {
        let mut params = QueryParams::default();
        params.push("factual_id", &self.factual_id);
        params.push_opt("q", self.q.as_ref());
        params.push_opt("user", self.user.as_ref());
        params.to_url_query()
    }
}

/// What is wrong with a flagged row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagProblem {
    Duplicate,
    Nonexistent,
    Inaccurate,
    Inappropriate,
    Spam,
    Closed,
    Relocated,
    Other,
}

impl fmt::Display for FlagProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlagProblem::Duplicate => "duplicate",
            FlagProblem::Nonexistent => "nonexistent",
            FlagProblem::Inaccurate => "inaccurate",
            FlagProblem::Inappropriate => "inappropriate",
            FlagProblem::Spam => "spam",
            FlagProblem::Closed => "closed",
            FlagProblem::Relocated => "relocated",
            FlagProblem::Other => "other",
        };
        f.write_str(s)
    }
}

/// Report a problem with a row.
///
/// For duplicates and relocations, [`Flag::preferred`] names the row that
/// should survive.
#[derive(Clone, Debug)]
pub struct Flag {
    problem: FlagProblem,
    preferred: Option<String>,
    fields: Vec<String>,
    metadata: Metadata,
}

impl Flag {
    pub fn new(problem: FlagProblem, metadata: Metadata) -> Self {
        Flag {
            problem,
            preferred: None,
            fields: Vec::new(),
            metadata,
        }
    }

    pub fn preferred(mut self, factual_id: impl Into<String>) -> Self {
        self.preferred = Some(factual_id.into());
        self
    }

    /// Narrow an inaccuracy report to specific fields.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }
}

impl UrlQuery for Flag {
    fn to_url_query(&self) -> String {
        let mut params = QueryParams::default();
        params.push("problem", self.problem);
        params.push_opt("preferred", self.preferred.as_ref());
        if !self.fields.is_empty() {
            let fields = self.fields.iter().cloned().map(Value::String).collect();
            params.push_json("fields", &Value::Array(fields));
        }
        self.metadata.push_into(&mut params);
        params.to_url_query()
    }
}
