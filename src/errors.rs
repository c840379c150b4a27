// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types surfaced by the Withings client.
//!
//! Credential preconditions fail synchronously before any network activity;
//! everything else passes through from the transport or parser unmodified.
//! The client performs no retries and no local recovery.

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Access token or access token secret is missing. Raised before any
    /// network call is attempted.
    #[error("authenticate before making API calls")]
    Unauthenticated,

    /// User ID is missing. Raised before any network call is attempted.
    /// Withings does not return the user ID during the token exchange; the
    /// caller must capture it from the authorization callback and supply it.
    #[error("API calls require a user ID")]
    MissingUser,

    /// Network failure, signing-layer failure, or non-2xx response from the
    /// provider. Passed through unmodified.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be parsed where structured data was expected.
    /// Never produced for a request the transport already failed.
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint or base URL could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A token endpoint answered 2xx but the form-encoded body lacked a
    /// required field.
    #[error("token exchange response missing `{0}`")]
    TokenExchange(&'static str),

    /// Configuration could not be loaded or was incomplete.
    #[error("configuration error: {0}")]
    Config(String),
}
