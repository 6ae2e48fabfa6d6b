use std::fmt;

use crate::error::{Error, Result};
use crate::parameters::OAuthParameters;
use crate::v1::signer::{sign_request, OAuthHeaders};

/// Two-legged OAuth 1.0a signer bound to one consumer.
///
/// Every call to [`OAuthV1Client::sign`] builds its own [`OAuthParameters`],
/// so a shared client never reuses a nonce.
#[derive(Clone)]
pub struct OAuthV1Client {
    consumer_key: String,
    consumer_secret: String,
}

impl OAuthV1Client {
    /// Fails when either the key or the secret is empty.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Result<Self> {
        let consumer_key = consumer_key.into();
        let consumer_secret = consumer_secret.into();
        if consumer_key.trim().is_empty() {
            return Err(Error::InvalidCredential("consumer key is empty".to_string()));
        }
        if consumer_secret.trim().is_empty() {
            return Err(Error::InvalidCredential(
                "consumer secret is empty".to_string(),
            ));
        }
        Ok(OAuthV1Client {
            consumer_key,
            consumer_secret,
        })
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Fresh protocol parameters for one request.
    pub fn parameters(&self) -> OAuthParameters {
        OAuthParameters::new(self.consumer_key.as_str(), self.consumer_secret.as_str())
    }

    /// Sign `http_method url`, query parameters of `url` included.
    pub fn sign(&self, http_method: &str, url: &url::Url) -> Result<OAuthHeaders> {
        let mut params = self.parameters();
        sign_request(&mut params, http_method, url)
    }
}

impl fmt::Debug for OAuthV1Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthV1Client")
            .field("consumer_key", &self.consumer_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_credentials() {
        assert!(matches!(
            OAuthV1Client::new("", "secret"),
            Err(Error::InvalidCredential(_))
        ));
        assert!(matches!(
            OAuthV1Client::new("key", "  "),
            Err(Error::InvalidCredential(_))
        ));
        assert!(OAuthV1Client::new("key", "secret").is_ok());
    }

    #[test]
    fn test_each_signature_gets_a_fresh_nonce() {
        let client = OAuthV1Client::new("key", "secret").unwrap();
        let url = url::Url::parse("https://api.v3.factual.com/t/places").unwrap();
        let first = client.sign("GET", &url).unwrap();
        let second = client.sign("GET", &url).unwrap();
        assert_ne!(first.get("oauth_nonce"), second.get("oauth_nonce"));
        assert_eq!(first.get("oauth_consumer_key"), Some("key"));
    }
}
