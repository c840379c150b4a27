// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Client configuration: consumer credentials, optional pre-existing access
//! credentials, and the provider endpoint set.
//!
//! Configuration is immutable once a client is constructed. Credentials can
//! be supplied directly, read from the environment, or loaded from a TOML
//! file (`~/.config/withings-api/config.toml` by default).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{api, env_vars, oauth};
use crate::errors::{Error, Result};

/// Construction parameters for a [`crate::client::WithingsClient`].
///
/// `consumer_key` and `consumer_secret` are always required. `callback_url`
/// is needed only to start the OAuth flow. `access_token` and
/// `access_token_secret` must be supplied together with `user_id` to
/// construct a pre-authenticated client; a client built without them starts
/// unauthenticated and must complete the three-legged exchange first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ClientConfig {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            callback_url: None,
            access_token: None,
            access_token_secret: None,
            user_id: None,
        }
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    pub fn with_access_token(
        mut self,
        token: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        self.access_token = Some(token.into());
        self.access_token_secret = Some(secret.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Read configuration from `WITHINGS_*` environment variables, loading a
    /// `.env` file first if one is present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let consumer_key = std::env::var(env_vars::CONSUMER_KEY)
            .map_err(|_| Error::Config(format!("{} is not set", env_vars::CONSUMER_KEY)))?;
        let consumer_secret = std::env::var(env_vars::CONSUMER_SECRET)
            .map_err(|_| Error::Config(format!("{} is not set", env_vars::CONSUMER_SECRET)))?;

        Ok(Self {
            consumer_key,
            consumer_secret,
            callback_url: std::env::var(env_vars::CALLBACK_URL).ok(),
            access_token: std::env::var(env_vars::ACCESS_TOKEN).ok(),
            access_token_secret: std::env::var(env_vars::ACCESS_TOKEN_SECRET).ok(),
            user_id: std::env::var(env_vars::USER_ID).ok(),
        })
    }

    /// Load configuration from a TOML file, falling back to the environment
    /// when the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .map_err(|e| Error::Config(format!("failed to read {:?}: {}", config_path, e)))?;
            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("failed to parse {:?}: {}", config_path, e)))
        } else {
            Self::from_env()
        }
    }

    /// Write configuration to a TOML file, creating parent directories as
    /// needed. Returns the path written.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("failed to create {:?}: {}", parent, e)))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)
            .map_err(|e| Error::Config(format!("failed to write {:?}: {}", config_path, e)))?;

        Ok(config_path)
    }
}

fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join("withings-api/config.toml"))
        .unwrap_or_else(|| "config.toml".into())
}

/// The fixed provider endpoints, injectable for tests.
///
/// Two historical endpoint schemes exist for this provider; this crate ships
/// the OAuth 1.0a triplet because the verifier-based exchange it implements
/// is an OAuth1 flow. Construct a custom `Endpoints` to target a different
/// scheme or a mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    pub request_token_url: String,
    pub access_token_url: String,
    pub authorize_url: String,
    /// Legacy API base; `getmeas`, `notify` and all POST calls route here
    pub api_base: String,
    /// Versioned API base for every other GET call
    pub api_base_v2: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            request_token_url: oauth::REQUEST_TOKEN_URL.into(),
            access_token_url: oauth::ACCESS_TOKEN_URL.into(),
            authorize_url: oauth::AUTHORIZE_URL.into(),
            api_base: api::BASE_URL.into(),
            api_base_v2: api::BASE_URL_V2.into(),
        }
    }
}
