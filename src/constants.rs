// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Provider endpoint constants and environment variable names.
//!
//! The OAuth triplet is the legacy OAuth 1.0a scheme; it is the one that
//! matches the request-token/verifier flow this crate implements. These are
//! only defaults: [`crate::config::Endpoints`] carries the live values so
//! tests and alternative schemes can inject their own.

/// Three-legged OAuth 1.0a endpoints
pub mod oauth {
    pub const REQUEST_TOKEN_URL: &str = "https://oauth.withings.com/account/request_token";
    pub const ACCESS_TOKEN_URL: &str = "https://oauth.withings.com/account/access_token";
    pub const AUTHORIZE_URL: &str = "https://oauth.withings.com/account/authorize";
}

/// Data API base paths
pub mod api {
    /// Legacy base: `getmeas` and every `notify`/POST call route here
    pub const BASE_URL: &str = "https://wbsapi.withings.net/";
    /// Versioned base used by every other GET call
    pub const BASE_URL_V2: &str = "https://wbsapi.withings.net/v2/";
}

/// Environment variable names read by [`crate::config::ClientConfig::from_env`]
pub mod env_vars {
    pub const CONSUMER_KEY: &str = "WITHINGS_CONSUMER_KEY";
    pub const CONSUMER_SECRET: &str = "WITHINGS_CONSUMER_SECRET";
    pub const CALLBACK_URL: &str = "WITHINGS_CALLBACK_URL";
    pub const ACCESS_TOKEN: &str = "WITHINGS_ACCESS_TOKEN";
    pub const ACCESS_TOKEN_SECRET: &str = "WITHINGS_ACCESS_TOKEN_SECRET";
    pub const USER_ID: &str = "WITHINGS_USER_ID";
}
