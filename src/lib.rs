// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Withings API Client
//!
//! A typed client for the Withings health-data API. It walks the
//! three-legged OAuth 1.0a exchange (request token → user authorization →
//! access token), then issues HMAC-SHA1-signed calls for activity, body
//! measurement, sleep and notification endpoints, projecting typed shapes
//! out of the provider's generic `{status, body}` envelope.
//!
//! ## Design
//!
//! - **Client**: credential state, token exchange, and the shared
//!   authenticated dispatcher every adapter delegates to
//! - **Adapters**: thin per-endpoint methods that format parameters and
//!   project one response field
//! - **Models**: typed envelope bodies; values pass through untransformed
//! - **OAuth**: URL signing with a deterministic, independently testable core
//!
//! Errors pass through unmodified: no retries, no refresh policy, no rate
//! limiting. The two credential preconditions fail synchronously before any
//! network activity. The library emits `tracing` events but never installs a
//! subscriber; without one it stays silent.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use withings_api::client::WithingsClient;
//! use withings_api::config::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Pre-authenticated client from persisted credentials
//!     let config = ClientConfig::new("consumer_key", "consumer_secret")
//!         .with_access_token("access_token", "access_token_secret")
//!         .with_user_id("user_id");
//!     let client = WithingsClient::new(config);
//!
//!     let date = chrono::NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
//!     let steps = client.get_daily_steps(date).await?;
//!     println!("steps: {}", steps);
//!
//!     Ok(())
//! }
//! ```
//!
//! To start from nothing, run the three-legged flow (see the
//! `withings-auth-setup` binary for an end-to-end walkthrough):
//!
//! ```rust,no_run
//! # use withings_api::client::WithingsClient;
//! # use withings_api::config::ClientConfig;
//! # async fn flow() -> anyhow::Result<()> {
//! let config = ClientConfig::new("consumer_key", "consumer_secret")
//!     .with_callback_url("http://localhost:3000/oauth_callback");
//! let mut client = WithingsClient::new(config);
//!
//! let request_token = client.request_token().await?;
//! println!("authorize at: {}", client.authorize_url(&request_token)?);
//!
//! // after the user authorizes, the callback carries a verifier and userid
//! let verifier = "verifier-from-callback";
//! let access = client.exchange_access_token(&request_token, verifier).await?;
//! client.set_access_token(access);
//! client.set_user_id("userid-from-callback");
//! # Ok(())
//! # }
//! ```

/// Client construction, token exchange, and the authenticated dispatcher
pub mod client;

/// Client configuration and provider endpoint sets
pub mod config;

/// Default endpoint URLs and environment variable names
pub mod constants;

/// Error types surfaced to callers
pub mod errors;

/// Activity, body-measurement and sleep adapters
pub mod measures;

/// Typed response shapes
pub mod models;

/// Notification subscription adapters
pub mod notifications;

/// OAuth 1.0a URL signing
pub mod oauth;
