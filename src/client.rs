// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The Withings client: three-legged token exchange and the authenticated
//! call dispatcher shared by every endpoint adapter.
//!
//! A client is constructed once from a [`ClientConfig`] and an optional
//! [`Endpoints`] override. Credentials are either present at construction
//! (pre-authenticated) or attached after a successful access-token exchange
//! via [`WithingsClient::set_access_token`] and
//! [`WithingsClient::set_user_id`]; after that they are treated as
//! read-only. Concurrent calls from the same client are independent and may
//! complete in any order.

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::{ClientConfig, Endpoints};
use crate::errors::{Error, Result};
use crate::oauth::{percent_encode, Signer, TokenPair};

/// The two HTTP methods the provider accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Flat string/scalar query parameters, consumed by value per call.
#[derive(Debug, Clone, Default)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Typed client for the Withings health-data API.
pub struct WithingsClient {
    signer: Signer,
    endpoints: Endpoints,
    http: Client,
    callback_url: Option<String>,
    access: Option<TokenPair>,
    user_id: Option<String>,
}

impl WithingsClient {
    /// Build a client against the default provider endpoints.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_endpoints(config, Endpoints::default())
    }

    /// Build a client against a custom endpoint set (alternative scheme or
    /// mock server).
    pub fn with_endpoints(config: ClientConfig, endpoints: Endpoints) -> Self {
        let access = match (config.access_token, config.access_token_secret) {
            (Some(token), Some(secret)) => Some(TokenPair::new(token, secret)),
            _ => None,
        };
        Self {
            signer: Signer::new(config.consumer_key, config.consumer_secret),
            endpoints,
            http: Client::new(),
            callback_url: config.callback_url,
            access,
            user_id: config.user_id,
        }
    }

    /// Attach the access token pair returned by
    /// [`exchange_access_token`](Self::exchange_access_token).
    pub fn set_access_token(&mut self, pair: TokenPair) {
        self.access = Some(pair);
    }

    /// Attach the user ID captured from the authorization callback. The
    /// provider does not return it during the token exchange.
    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.user_id = Some(user_id.into());
    }

    pub fn is_authenticated(&self) -> bool {
        self.access.is_some() && self.user_id.is_some()
    }

    // --- three-legged token exchange -------------------------------------

    /// Step one: obtain an ephemeral request token.
    pub async fn request_token(&self) -> Result<TokenPair> {
        let url = Url::parse(&self.endpoints.request_token_url)?;
        let extra: Vec<(&str, &str)> = match self.callback_url.as_deref() {
            Some(callback) => vec![("oauth_callback", callback)],
            None => vec![],
        };
        let signed = self.signer.signed_url(&url, "GET", None, &extra);

        debug!("requesting OAuth request token");
        let body = self
            .http
            .get(signed)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_token_response(&body)
    }

    /// Step two: the URL to send the user to for authorization, signed with
    /// the request-token pair. No I/O.
    pub fn authorize_url(&self, request_token: &TokenPair) -> Result<Url> {
        let url = Url::parse(&self.endpoints.authorize_url)?;
        Ok(self.signer.signed_url(&url, "GET", Some(request_token), &[]))
    }

    /// Step three: trade the authorized request token and verifier for an
    /// access token pair.
    ///
    /// The client itself is not modified; store the returned pair (and the
    /// user ID from the callback) via [`set_access_token`](Self::set_access_token)
    /// and [`set_user_id`](Self::set_user_id), or build a new
    /// pre-authenticated client from them.
    pub async fn exchange_access_token(
        &self,
        request_token: &TokenPair,
        verifier: &str,
    ) -> Result<TokenPair> {
        let url = Url::parse(&self.endpoints.access_token_url)?;
        let signed = self.signer.signed_url(
            &url,
            "GET",
            Some(request_token),
            &[("oauth_verifier", verifier)],
        );

        debug!("exchanging request token for access token");
        let body = self
            .http
            .get(signed)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_token_response(&body)
    }

    // --- authenticated dispatcher ----------------------------------------

    /// Sign and perform one authenticated call, returning the raw body.
    ///
    /// Fails with [`Error::Unauthenticated`] or [`Error::MissingUser`]
    /// before any network activity when credentials are incomplete.
    pub async fn api_call(&self, url: Url, method: Method) -> Result<String> {
        let access = self.access.as_ref().ok_or(Error::Unauthenticated)?;
        if self.user_id.is_none() {
            return Err(Error::MissingUser);
        }

        let signed = self.signer.signed_url(&url, method.as_str(), Some(access), &[]);

        debug!(method = method.as_str(), path = url.path(), "dispatching API call");
        let response = match method {
            Method::Get => self.http.get(signed).send().await?,
            Method::Post => self.http.post(signed).send().await?,
        };
        Ok(response.error_for_status()?.text().await?)
    }

    /// Authenticated GET against a service, parsed as JSON.
    ///
    /// `getmeas` and the `notify` service route to the legacy base path;
    /// everything else goes to the versioned base. The body is parsed only
    /// after the transport succeeded; a transport failure is returned as-is
    /// and never mixed with a parse error.
    pub async fn get(
        &self,
        service: &str,
        action: &str,
        params: Params,
    ) -> Result<serde_json::Value> {
        let base = if action == "getmeas" || service == "notify" {
            &self.endpoints.api_base
        } else {
            &self.endpoints.api_base_v2
        };
        let url = self.service_url(base, service, action, params)?;
        let raw = self.api_call(url, Method::Get).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Authenticated POST against a service. Always the legacy base path;
    /// the raw body is returned without parsing.
    pub async fn post(&self, service: &str, action: &str, params: Params) -> Result<String> {
        let url = self.service_url(&self.endpoints.api_base, service, action, params)?;
        self.api_call(url, Method::Post).await
    }

    /// Compose `{base}{service}?{params}` with `action` and `userid`
    /// appended and every value percent-encoded.
    fn service_url(
        &self,
        base: &str,
        service: &str,
        action: &str,
        mut params: Params,
    ) -> Result<Url> {
        params.insert("action", action);
        if let Some(user_id) = &self.user_id {
            params.insert("userid", user_id);
        }

        let mut url = Url::parse(&format!("{}{}", base, service))?;
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(&query));
        Ok(url)
    }
}

/// Token endpoints answer with a form-encoded body
/// (`oauth_token=…&oauth_token_secret=…`).
fn parse_token_response(body: &str) -> Result<TokenPair> {
    let mut token = None;
    let mut secret = None;
    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "oauth_token" => token = Some(value.into_owned()),
            "oauth_token_secret" => secret = Some(value.into_owned()),
            _ => {}
        }
    }

    let token = token.ok_or(Error::TokenExchange("oauth_token"))?;
    let secret = secret.ok_or(Error::TokenExchange("oauth_token_secret"))?;
    Ok(TokenPair { token, secret })
}
