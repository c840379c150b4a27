// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! OAuth 1.0a request signing.
//!
//! Withings signs every call by appending the `oauth_*` protocol parameters,
//! including an HMAC-SHA1 signature, to the URL query string rather than
//! using an `Authorization` header. [`Signer`] produces such signed URLs from
//! the consumer credentials and an optional token pair.
//!
//! Signing is split into an entropy-free core ([`Signer::signed_url_with`])
//! that takes the nonce and timestamp as arguments, and a thin public wrapper
//! that supplies fresh values. Given the same nonce and timestamp the core is
//! fully deterministic.

use std::borrow::Cow;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use ring::hmac;
use serde::{Deserialize, Serialize};
use url::Url;

/// An ephemeral OAuth (token, secret) tuple.
///
/// One is produced by each exchange step of the three-legged flow and
/// consumed by the next. The client never retains these between steps; the
/// caller owns them (typically in a session) until the exchange completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub secret: String,
}

impl TokenPair {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

/// Signs URLs with the consumer credentials using HMAC-SHA1.
#[derive(Debug, Clone)]
pub struct Signer {
    consumer_key: String,
    consumer_secret: String,
}

impl Signer {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Sign `url` for the given HTTP method, with a fresh nonce and the
    /// current timestamp.
    ///
    /// `token` is `None` only for the request-token step; `extra` carries
    /// step-specific protocol parameters such as `oauth_callback` or
    /// `oauth_verifier`. Query parameters already present on `url` are kept
    /// and covered by the signature.
    pub fn signed_url(
        &self,
        url: &Url,
        method: &str,
        token: Option<&TokenPair>,
        extra: &[(&str, &str)],
    ) -> Url {
        self.signed_url_with(url, method, token, extra, &nonce(), Utc::now().timestamp())
    }

    /// Entropy-free signing core. Deterministic for fixed inputs.
    pub fn signed_url_with(
        &self,
        url: &Url,
        method: &str,
        token: Option<&TokenPair>,
        extra: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> Url {
        let mut base_url = url.clone();
        base_url.set_query(None);
        base_url.set_fragment(None);

        let mut params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        params.push(("oauth_consumer_key".into(), self.consumer_key.clone()));
        params.push(("oauth_nonce".into(), nonce.into()));
        params.push(("oauth_signature_method".into(), "HMAC-SHA1".into()));
        params.push(("oauth_timestamp".into(), timestamp.to_string()));
        params.push(("oauth_version".into(), "1.0".into()));
        if let Some(pair) = token {
            params.push(("oauth_token".into(), pair.token.clone()));
        }
        for (key, value) in extra {
            params.push(((*key).into(), (*value).into()));
        }

        let token_secret = token.map(|pair| pair.secret.as_str());
        let signature = self.signature(method, &base_url, &params, token_secret);
        params.push(("oauth_signature".into(), signature));

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut signed = base_url;
        signed.set_query(Some(&query));
        signed
    }

    /// HMAC-SHA1 over the RFC 5849 signature base string, base64-encoded.
    fn signature(
        &self,
        method: &str,
        base_url: &Url,
        params: &[(String, String)],
        token_secret: Option<&str>,
    ) -> String {
        let mut encoded: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| {
                (
                    percent_encode(k).into_owned(),
                    percent_encode(v).into_owned(),
                )
            })
            .collect();
        encoded.sort();

        let param_string = encoded
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        let base_string = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            percent_encode(base_url.as_str()),
            percent_encode(&param_string)
        );

        let signing_key = format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(token_secret.unwrap_or(""))
        );
        let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, signing_key.as_bytes());
        let tag = hmac::sign(&key, base_string.as_bytes());
        STANDARD.encode(tag.as_ref())
    }
}

/// RFC 3986 percent-encoding, as OAuth 1.0a requires. `urlencoding` leaves
/// exactly the unreserved set (`A-Z a-z 0-9 - _ . ~`) untouched.
pub(crate) fn percent_encode(input: &str) -> Cow<'_, str> {
    urlencoding::encode(input)
}

fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
