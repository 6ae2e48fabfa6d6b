use crate::encoder_oauth1::percent_decode;

/// Split a URL into its normalized endpoint and its decoded query pairs.
///
/// The endpoint is `scheme://host[:port]/path` with the host lowercased, the
/// default port dropped and no query or fragment. Query pairs keep their
/// order and duplicates.
pub fn url_to_endpoint_and_queries(url: &url::Url) -> (String, Vec<(String, String)>) {
    let pairs = url.query().map(query_to_pairs).unwrap_or_default();
    let host = url.host_str().unwrap_or("").to_ascii_lowercase();
    // `port()` is None when the port is the scheme default.
    let endpoint = match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    };
    (endpoint, pairs)
}

/// Parse a pre-escaped query string into decoded `(key, value)` pairs.
///
/// The query is read as `application/x-www-form-urlencoded`, so `+` is a
/// space. A segment with no `=` yields an empty value; empty segments are
/// skipped.
pub fn query_to_pairs(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|s| {
            let mut parts = s.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let value = parts.next().unwrap_or("");
            (form_decode(key), form_decode(value))
        })
        .collect()
}

fn form_decode(s: &str) -> String {
    percent_decode(&s.replace('+', " ")).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url_to_endpoint_and_queries() {
        let u = url::Url::parse("HTTP://Example.COM:80/r%20v/x?b=2&a=1&a=%E3%83%91").unwrap();
        let (endpoint, pairs) = url_to_endpoint_and_queries(&u);
        assert_eq!(endpoint, "http://example.com/r%20v/x");
        assert_eq!(
            pairs,
            vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string()),
                ("a".to_string(), "パ".to_string()),
            ]
        );

        let u = url::Url::parse("https://example.com:8443/").unwrap();
        let (endpoint, pairs) = url_to_endpoint_and_queries(&u);
        assert_eq!(endpoint, "https://example.com:8443/");
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_query_to_pairs() {
        let pairs = query_to_pairs("?q=coffee%20shop&&flag&empty=&eq=a=b");
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "coffee shop".to_string()),
                ("flag".to_string(), "".to_string()),
                ("empty".to_string(), "".to_string()),
                ("eq".to_string(), "a=b".to_string()),
            ]
        );
        assert!(query_to_pairs("").is_empty());

        let pairs = query_to_pairs("q=a+b%2Bc&k+1=v");
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "a b+c".to_string()),
                ("k 1".to_string(), "v".to_string()),
            ]
        );
    }
}
