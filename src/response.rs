//! The few response shapes the driver reads itself.
//!
//! Everything else is handed back to the caller as raw text.

use serde::Deserialize;

use crate::error::Result;

/// Body of a "moved permanently" answer: a row ID was replaced.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct IdRemap {
    pub deprecated_id: String,
    pub current_id: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RemapEnvelope {
    Wrapped { response: IdRemap },
    Bare(IdRemap),
}

/// Parse an ID remap, bare or inside the usual `response` envelope.
///
/// `None` when the body is not a remap or either ID is empty.
pub fn parse_id_remap(body: &str) -> Option<IdRemap> {
    let remap = match serde_json::from_str(body).ok()? {
        RemapEnvelope::Wrapped { response } => response,
        RemapEnvelope::Bare(remap) => remap,
    };
    if remap.deprecated_id.is_empty() || remap.current_id.is_empty() {
        return None;
    }
    Some(remap)
}

#[derive(Deserialize)]
struct MatchEnvelope {
    response: MatchResponse,
}

#[derive(Deserialize)]
struct MatchResponse {
    #[serde(default)]
    included_rows: u64,
    #[serde(default)]
    data: Vec<MatchedRow>,
}

#[derive(Deserialize)]
struct MatchedRow {
    factual_id: Option<String>,
}

/// `factual_id` of the matched row, `None` when nothing matched.
pub fn parse_match_id(body: &str) -> Result<Option<String>> {
    let envelope: MatchEnvelope = serde_json::from_str(body)?;
    let response = envelope.response;
    if response.included_rows == 0 {
        return Ok(None);
    }
    Ok(response
        .data
        .into_iter()
        .next()
        .and_then(|row| row.factual_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_remap() {
        let expected = IdRemap {
            deprecated_id: "A".to_string(),
            current_id: "B".to_string(),
        };
        assert_eq!(
            parse_id_remap(r#"{"deprecated_id":"A","current_id":"B"}"#).unwrap(),
            expected
        );
        assert_eq!(
            parse_id_remap(
                r#"{"version":3,"status":"ok","response":{"deprecated_id":"A","current_id":"B"}}"#
            )
            .unwrap(),
            expected
        );
        assert_eq!(parse_id_remap(r#"{"current_id":"B"}"#), None);
        assert_eq!(parse_id_remap("moved"), None);
        assert_eq!(parse_id_remap("<html>Moved</html>"), None);
    }

    #[test]
    fn test_parse_id_remap_rejects_empty_ids() {
        assert_eq!(
            parse_id_remap(r#"{"deprecated_id":"","current_id":"B"}"#),
            None
        );
        assert_eq!(
            parse_id_remap(r#"{"response":{"deprecated_id":"A","current_id":""}}"#),
            None
        );
    }

    #[test]
    fn test_parse_match_id() {
        let body = r#"{"version":3,"status":"ok","response":{"data":[{"factual_id":"03c26917-5d66-4de9-96bc-b13066173c65","resolved":true}],"included_rows":1}}"#;
        assert_eq!(
            parse_match_id(body).unwrap().as_deref(),
            Some("03c26917-5d66-4de9-96bc-b13066173c65")
        );

        let body = r#"{"version":3,"status":"ok","response":{"data":[],"included_rows":0}}"#;
        assert_eq!(parse_match_id(body).unwrap(), None);

        assert!(parse_match_id("[]").is_err());
    }
}
