use std::collections::BTreeMap;
use std::fmt;

use crate::v1::values::*;

/// OAuth protocol state for exactly one signed request.
///
/// A fresh instance is built per request; nonce and timestamp are filled in
/// right before signing and the whole value is dropped once the headers are
/// assembled.
#[derive(Clone, Default)]
pub struct OAuthParameters {
    pub consumer_key: String,
    pub consumer_secret: String,
    /// Empty in the two-legged flow.
    pub token: String,
    /// Empty in the two-legged flow.
    pub token_secret: String,
    pub nonce: Option<String>,
    pub timestamp: Option<String>,
    /// Extra signed protocol properties such as `oauth_verifier` or
    /// `oauth_callback`, keyed by their full parameter name.
    pub base_properties: BTreeMap<String, String>,
}

impl OAuthParameters {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        OAuthParameters {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            ..Default::default()
        }
    }

    pub fn token(mut self, token: impl Into<String>, token_secret: impl Into<String>) -> Self {
        self.token = token.into();
        self.token_secret = token_secret.into();
        self
    }

    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn verifier(self, verifier: impl Into<String>) -> Self {
        self.base_property(OAUTH_PARAM_KEY_VERIFIER, verifier)
    }

    pub fn callback(self, callback: impl Into<String>) -> Self {
        self.base_property(OAUTH_PARAM_KEY_CALLBACK, callback)
    }

    pub fn base_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.base_properties.insert(key.into(), value.into());
        self
    }

    pub fn signature_method(&self) -> &'static str {
        OAUTH_VALUE_SIGMETHOD_HMACSHA1
    }

    /// Every protocol parameter that takes part in the signature, unencoded.
    ///
    /// The signature itself is not included; it does not exist yet. Missing
    /// nonce or timestamp are skipped, callers fill them in first.
    pub(crate) fn signed_parameters(&self) -> Vec<(String, String)> {
        let mut params = vec![
            (
                OAUTH_PARAM_KEY_CONSUMER_KEY.to_string(),
                self.consumer_key.clone(),
            ),
            (
                OAUTH_PARAM_KEY_SIGNATURE_METHOD.to_string(),
                self.signature_method().to_string(),
            ),
        ];
        if let Some(nonce) = &self.nonce {
            params.push((OAUTH_PARAM_KEY_NONCE.to_string(), nonce.clone()));
        }
        if let Some(timestamp) = &self.timestamp {
            params.push((OAUTH_PARAM_KEY_TIMESTAMP.to_string(), timestamp.clone()));
        }
        if !self.token.is_empty() {
            params.push((OAUTH_PARAM_KEY_TOKEN.to_string(), self.token.clone()));
        }
        params.extend(
            self.base_properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        params
    }
}

// Secrets stay out of logs.
impl fmt::Debug for OAuthParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthParameters")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &self.token)
            .field("token_secret", &"<redacted>")
            .field("nonce", &self.nonce)
            .field("timestamp", &self.timestamp)
            .field("base_properties", &self.base_properties)
            .finish()
    }
}
