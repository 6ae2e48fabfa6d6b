//! Driver for the Factual API.
//!
//! Requests are signed with two-legged OAuth 1.0a (HMAC-SHA1, consumer key
//! and secret only) and answered with the raw response body.
//!
//! ```no_run
//! # async fn run() -> factual::Result<()> {
//! use factual::query::Query;
//! use factual::{Config, Factual};
//!
//! let factual = Factual::new(Config::new("key", "secret"))?;
//! let body = factual
//!     .fetch("places", &Query::new().search("coffee").limit(3))
//!     .await?;
//! println!("{}", body);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod encoder_oauth1;
pub mod error;
pub mod multi;
pub mod parameters;
pub mod query;
pub mod response;
pub mod v1;

#[cfg(feature = "reqwest")]
mod client;

mod util;

#[cfg(feature = "reqwest")]
pub use client::{Factual, DRIVER_HEADER_NAME};
pub use config::Config;
pub use error::{Error, Result};
pub use multi::MultiQuery;
pub use parameters::OAuthParameters;

/// Sent with every request to identify the driver build.
pub const DRIVER_HEADER_TAG: &str = concat!("factual-rust-driver-v", env!("CARGO_PKG_VERSION"));
