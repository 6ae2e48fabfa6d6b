use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use log::debug;
use sha1::Sha1;

use crate::encoder_oauth1::percent_encode;
use crate::error::{Error, Result};
use crate::parameters::OAuthParameters;
use crate::util;
use crate::v1::values::*;

type HmacSha1 = Hmac<Sha1>;

/// Random nonce, 16 bytes rendered as 32 hex characters.
pub fn generate_nonce() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

/// Current Unix time in whole seconds.
pub fn generate_timestamp() -> String {
    Utc::now().timestamp().to_string()
}

/// Normalize request parameters (RFC 5849 section 3.4.1.3.2).
///
/// Keys and values are encoded exactly once, then pairs are sorted by
/// encoded key and encoded value. Repeated keys are all kept.
pub fn normalize_parameters<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut encoded = params
        .iter()
        .map(|(k, v)| (percent_encode(k.as_ref()), percent_encode(v.as_ref())))
        .collect::<Vec<(String, String)>>();
    encoded.sort();
    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&")
}

/// Build the signature base string from a normalized URL and a normalized
/// parameter string.
pub fn build_base_string(
    http_method: &str,
    normalized_url: &str,
    normalized_params: &str,
) -> String {
    format!(
        "{}&{}&{}",
        http_method.to_ascii_uppercase(),
        percent_encode(normalized_url),
        percent_encode(normalized_params)
    )
}

/// HMAC-SHA1 key. The `&` separator is present even with no token secret.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// Sign `base_string` and return the base64 signature.
pub fn sign_hmac_sha1(
    base_string: &str,
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String> {
    let key = signing_key(consumer_secret, token_secret);
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| Error::InvalidCredential(format!("unusable HMAC key: {e}")))?;
    mac.update(base_string.as_bytes());
    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

/// Ordered OAuth header fields produced for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthHeaders {
    fields: Vec<(&'static str, String)>,
}

impl OAuthHeaders {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Same fields folded into a single `Authorization` header value.
    pub fn authorization(&self) -> String {
        let parts = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, v))
            .collect::<Vec<String>>();
        format!("{} {}", OAUTH_HEADER, parts.join(", "))
    }
}

/// Assemble header fields in wire order. Values are already encoded except
/// the signature method constant.
pub fn assemble_headers(params: &OAuthParameters, signature: &str) -> OAuthHeaders {
    let mut fields = Vec::with_capacity(8);
    if let Some(nonce) = &params.nonce {
        fields.push((OAUTH_PARAM_KEY_NONCE, percent_encode(nonce)));
    }
    if let Some(timestamp) = &params.timestamp {
        fields.push((OAUTH_PARAM_KEY_TIMESTAMP, percent_encode(timestamp)));
    }
    fields.push((
        OAUTH_PARAM_KEY_CONSUMER_KEY,
        percent_encode(&params.consumer_key),
    ));
    if let Some(verifier) = params.base_properties.get(OAUTH_PARAM_KEY_VERIFIER) {
        fields.push((OAUTH_PARAM_KEY_VERIFIER, percent_encode(verifier)));
    }
    if !params.token.is_empty() {
        fields.push((OAUTH_PARAM_KEY_TOKEN, percent_encode(&params.token)));
    }
    if let Some(callback) = params.base_properties.get(OAUTH_PARAM_KEY_CALLBACK) {
        fields.push((OAUTH_PARAM_KEY_CALLBACK, percent_encode(callback)));
    }
    fields.push((
        OAUTH_PARAM_KEY_SIGNATURE_METHOD,
        params.signature_method().to_string(),
    ));
    fields.push((OAUTH_PARAM_KEY_SIGNATURE, percent_encode(signature)));
    OAuthHeaders { fields }
}

/// Sign a request for `url` and return its OAuth header fields.
///
/// Nonce and timestamp are generated when `params` does not carry them yet.
pub fn sign_request(
    params: &mut OAuthParameters,
    http_method: &str,
    url: &url::Url,
) -> Result<OAuthHeaders> {
    if params.nonce.is_none() {
        params.nonce = Some(generate_nonce());
    }
    if params.timestamp.is_none() {
        params.timestamp = Some(generate_timestamp());
    }

    let (endpoint, mut pairs) = util::url_to_endpoint_and_queries(url);
    pairs.extend(params.signed_parameters());
    let normalized = normalize_parameters(&pairs);
    let base_string = build_base_string(http_method, &endpoint, &normalized);
    debug!("oauth base string: {}", base_string);

    let signature = sign_hmac_sha1(&base_string, &params.consumer_secret, &params.token_secret)?;
    Ok(assemble_headers(params, &signature))
}
