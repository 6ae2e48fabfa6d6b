//! Signed HTTP access to the Factual API.

use log::{log, warn, Level};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use url::Url;

use crate::config::Config;
use crate::encoder_oauth1::{percent_decode, percent_encode};
use crate::error::{Error, Result};
use crate::multi::{MultiQuery, MULTI_PATH};
use crate::query::{
    Boost, Clear, DiffsQuery, FacetQuery, Flag, MatchQuery, Query, RawQuery, ResolveQuery,
    Submit, UrlQuery,
};
use crate::response::{parse_id_remap, parse_match_id, IdRemap};
use crate::v1::OAuthV1Client;
use crate::DRIVER_HEADER_TAG;

/// Header identifying the driver and its version.
pub const DRIVER_HEADER_NAME: &str = "X-Factual-Lib";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A request decided but not yet signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PreparedRequest {
    method: Method,
    path: String,
    query: String,
    body: Option<String>,
}

impl PreparedRequest {
    fn get(path: &str, query: String) -> Self {
        PreparedRequest {
            method: Method::GET,
            path: path.trim_start_matches('/').to_string(),
            query,
            body: None,
        }
    }

    fn post(path: &str, query: String, body: String) -> Self {
        PreparedRequest {
            method: Method::POST,
            path: path.trim_start_matches('/').to_string(),
            query,
            body: Some(body),
        }
    }

    fn url(&self, base_url: &Url) -> Result<Url> {
        let root = base_url.as_str().trim_end_matches('/');
        let url = if self.query.is_empty() {
            format!("{}/{}", root, self.path)
        } else {
            format!("{}/{}?{}", root, self.path, self.query)
        };
        Ok(Url::parse(&url)?)
    }

    /// Same request against the path with the replaced ID swapped in.
    fn redirected(&self, remap: &IdRemap) -> Self {
        let deprecated = percent_encode(&remap.deprecated_id);
        let current = percent_encode(&remap.current_id);
        PreparedRequest {
            path: self.path.replace(&deprecated, &current),
            ..self.clone()
        }
    }
}

/// Where a response leaves the request.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Success(String),
    Redirected(IdRemap),
}

/// `t/{table}/{rest...}` with every segment percent-encoded.
pub(crate) fn table_path(table: &str, rest: &[&str]) -> String {
    let mut path = format!("t/{}", percent_encode(table));
    for segment in rest {
        path.push('/');
        path.push_str(&percent_encode(segment));
    }
    path
}

/// Sort a finished response into success, ID remap or error.
pub(crate) fn classify_response(status: StatusCode, body: String, path: &str) -> Result<Outcome> {
    if status == StatusCode::MOVED_PERMANENTLY {
        if let Some(remap) = parse_id_remap(&body) {
            return Ok(Outcome::Redirected(remap));
        }
    }
    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            body,
            path: percent_decode(path).into_owned(),
        });
    }
    if body.is_empty() {
        return Err(Error::NoData {
            path: percent_decode(path).into_owned(),
        });
    }
    Ok(Outcome::Success(body))
}

/// Client for the Factual API.
///
/// Every call is signed with two-legged OAuth and returns the raw response
/// body. One client can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Factual {
    config: Config,
    base_url: Url,
    signer: OAuthV1Client,
    http: reqwest::Client,
}

impl Factual {
    /// Validates credentials and base URL up front.
    pub fn new(config: Config) -> Result<Self> {
        let signer = OAuthV1Client::new(config.key.as_str(), config.secret.as_str())?;
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "base url {} cannot carry paths",
                config.base_url
            )));
        }
        // ID remaps arrive as 301 and are followed here, not by reqwest.
        let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = config.timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Factual {
            config,
            base_url,
            signer,
            http,
        })
    }

    /// Rows of `table` matching `query`.
    pub async fn fetch(&self, table: &str, query: &Query) -> Result<String> {
        self.get(&table_path(table, &[]), query).await
    }

    /// A single row by its Factual ID.
    pub async fn fetch_row(&self, table: &str, factual_id: &str) -> Result<String> {
        self.get(&table_path(table, &[factual_id]), "").await
    }

    pub async fn schema(&self, table: &str) -> Result<String> {
        self.get(&table_path(table, &["schema"]), "").await
    }

    pub async fn facets(&self, table: &str, query: &FacetQuery) -> Result<String> {
        self.get(&table_path(table, &["facets"]), query).await
    }

    pub async fn resolve(&self, table: &str, query: &ResolveQuery) -> Result<String> {
        self.get(&table_path(table, &["resolve"]), query).await
    }

    /// Factual ID of the row matching `query`, if any.
    pub async fn match_row(&self, table: &str, query: &MatchQuery) -> Result<Option<String>> {
        let body = self.get(&table_path(table, &["match"]), query).await?;
        parse_match_id(&body)
    }

    pub async fn diffs(&self, table: &str, query: &DiffsQuery) -> Result<String> {
        self.get(&table_path(table, &["diffs"]), query).await
    }

    /// Submit a new row, or an update to `factual_id`.
    pub async fn submit(
        &self,
        table: &str,
        factual_id: Option<&str>,
        submit: &Submit,
    ) -> Result<String> {
        let path = match factual_id {
            Some(id) => table_path(table, &[id, "submit"]),
            None => table_path(table, &["submit"]),
        };
        self.post(&path, "", submit).await
    }

    pub async fn clear(&self, table: &str, factual_id: &str, clear: &Clear) -> Result<String> {
        self.post(&table_path(table, &[factual_id, "clear"]), "", clear)
            .await
    }

    pub async fn boost(&self, table: &str, boost: &Boost) -> Result<String> {
        self.post(&table_path(table, &["boost"]), "", boost).await
    }

    pub async fn flag(&self, table: &str, factual_id: &str, flag: &Flag) -> Result<String> {
        self.post(&table_path(table, &[factual_id, "flag"]), "", flag)
            .await
    }

    /// Send every queued query of `multi` in one request.
    pub async fn send_multi(&self, multi: &MultiQuery) -> Result<String> {
        self.get(MULTI_PATH, multi).await
    }

    pub async fn raw_get(&self, path: &str, query: &RawQuery) -> Result<String> {
        self.get(path, query).await
    }

    pub async fn raw_post(&self, path: &str, query: &RawQuery, body: &RawQuery) -> Result<String> {
        self.post(path, query, body).await
    }

    /// Signed GET of `path?query`.
    pub async fn get<Q>(&self, path: &str, query: &Q) -> Result<String>
    where
        Q: UrlQuery + ?Sized,
    {
        self.execute(PreparedRequest::get(path, query.to_url_query()))
            .await
    }

    /// Signed POST of a form body to `path?query`.
    pub async fn post<Q, B>(&self, path: &str, query: &Q, body: &B) -> Result<String>
    where
        Q: UrlQuery + ?Sized,
        B: UrlQuery + ?Sized,
    {
        self.execute(PreparedRequest::post(
            path,
            query.to_url_query(),
            body.to_url_query(),
        ))
        .await
    }

    async fn execute(&self, mut request: PreparedRequest) -> Result<String> {
        let mut hops = 0;
        loop {
            let (status, body) = self.send(&request).await?;
            match classify_response(status, body, &request.path)? {
                Outcome::Success(body) => return Ok(body),
                Outcome::Redirected(remap) => {
                    if hops >= self.config.max_redirects {
                        return Err(Error::TooManyRedirects {
                            path: percent_decode(&request.path).into_owned(),
                            hops,
                        });
                    }
                    hops += 1;
                    warn!(
                        "{} moved: {} is now {}",
                        request.path, remap.deprecated_id, remap.current_id
                    );
                    request = request.redirected(&remap);
                }
            }
        }
    }

    async fn send(&self, request: &PreparedRequest) -> Result<(StatusCode, String)> {
        let level = if self.config.debug {
            Level::Info
        } else {
            Level::Debug
        };
        let url = request.url(&self.base_url)?;
        let headers = self.signer.sign(request.method.as_str(), &url)?;
        log!(level, "{} {}", request.method, url);

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(DRIVER_HEADER_NAME, DRIVER_HEADER_TAG)
            .header(AUTHORIZATION, headers.authorization());
        for (name, value) in headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body.clone());
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        log!(level, "{} {} -> {}: {}", request.method, request.path, status, body);
        if !status.is_success() && status != StatusCode::MOVED_PERMANENTLY {
            warn!("{} {} failed with status {}", request.method, request.path, status);
        }
        Ok((status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_redirected_path() {
        let request = PreparedRequest::get("/t/places/A/schema", String::new());
        let remap = IdRemap {
            deprecated_id: "A".to_string(),
            current_id: "B".to_string(),
        };
        let next = request.redirected(&remap);
        assert_eq!(next.path, "t/places/B/schema");
        assert_eq!(next.method, Method::GET);
    }

    #[test]
    fn test_table_path_escapes_segments() {
        assert_eq!(table_path("places", &[]), "t/places");
        assert_eq!(table_path("places", &["abc-123", "flag"]), "t/places/abc-123/flag");
        let path = table_path("places", &["a?b#c/d e"]);
        assert_eq!(path, "t/places/a%3Fb%23c%2Fd%20e");

        let base = Url::parse("https://api.v3.factual.com/").unwrap();
        let url = PreparedRequest::get(&path, String::new()).url(&base).unwrap();
        assert_eq!(url.path(), "/t/places/a%3Fb%23c%2Fd%20e");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_redirect_swaps_escaped_id() {
        let request = PreparedRequest::get(&table_path("places", &["old id"]), String::new());
        let remap = IdRemap {
            deprecated_id: "old id".to_string(),
            current_id: "new/id".to_string(),
        };
        assert_eq!(request.redirected(&remap).path, "t/places/new%2Fid");
    }

    #[test]
    fn test_request_url() {
        let base = Url::parse("https://api.v3.factual.com/").unwrap();
        let request = PreparedRequest::get("t/places", "q=coffee%20shop".to_string());
        assert_eq!(
            request.url(&base).unwrap().as_str(),
            "https://api.v3.factual.com/t/places?q=coffee%20shop"
        );
        let request = PreparedRequest::post("t/places/submit", String::new(), "a=1".to_string());
        assert_eq!(
            request.url(&base).unwrap().as_str(),
            "https://api.v3.factual.com/t/places/submit"
        );
    }

    #[test]
    fn test_classify_response() {
        assert_eq!(
            classify_response(StatusCode::OK, "{}".to_string(), "t/places").unwrap(),
            Outcome::Success("{}".to_string())
        );

        let redirect = classify_response(
            StatusCode::MOVED_PERMANENTLY,
            r#"{"deprecated_id":"A","current_id":"B"}"#.to_string(),
            "t/places/A",
        )
        .unwrap();
        assert!(matches!(redirect, Outcome::Redirected(r) if r.current_id == "B"));

        match classify_response(StatusCode::NOT_FOUND, "not found".to_string(), "t/my%20table") {
            Err(Error::Api { status, body, path }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "not found");
                assert_eq!(path, "t/my table");
            }
            other => panic!("unexpected: {:?}", other),
        }

        assert!(matches!(
            classify_response(StatusCode::OK, String::new(), "t/places"),
            Err(Error::NoData { .. })
        ));
    }

    #[test]
    fn test_moved_without_remap_is_api_error() {
        let bodies = [
            "moved",
            "<html>Moved</html>",
            r#"{"deprecated_id":"","current_id":"B"}"#,
        ];
        for body in bodies {
            let outcome =
                classify_response(StatusCode::MOVED_PERMANENTLY, body.to_string(), "t/places/A");
            match outcome {
                Err(Error::Api { status, body: got, path }) => {
                    assert_eq!(status, 301);
                    assert_eq!(got, body);
                    assert_eq!(path, "t/places/A");
                }
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(matches!(
            Factual::new(Config::new("", "secret")),
            Err(Error::InvalidCredential(_))
        ));
        assert!(matches!(
            Factual::new(Config::new("key", "secret").with_base_url("not a url")),
            Err(Error::Url(_))
        ));
    }
}
