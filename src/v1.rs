//! OAuth 1.0a, two-legged HMAC-SHA1 signing.

mod client;
pub mod signer;
pub mod values;

pub use client::OAuthV1Client;
pub use signer::{
    assemble_headers, build_base_string, generate_nonce, generate_timestamp,
    normalize_parameters, sign_hmac_sha1, sign_request, signing_key, OAuthHeaders,
};
