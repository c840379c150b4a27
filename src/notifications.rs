// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Notification subscription adapters (`notify` service).
//!
//! Subscriptions tell Withings to ping a callback URL when new data arrives
//! for a device class. The `appli` code selects that class; where the
//! provider treats it as optional, so do these adapters.

use crate::client::{Params, WithingsClient};
use crate::errors::Result;
use crate::models::{Envelope, NotificationProfile};

/// Device classes addressable by the `appli` parameter
pub mod appli {
    /// Scales and body composition
    pub const WEIGHT: u32 = 1;
    /// Blood pressure monitors and pulse
    pub const HEART: u32 = 4;
    /// Activity trackers
    pub const ACTIVITY: u32 = 16;
    /// Sleep monitors
    pub const SLEEP: u32 = 44;
}

impl WithingsClient {
    /// Subscribe `callback_url` to notifications for a device class.
    /// Returns the full response envelope.
    pub async fn create_notification(
        &self,
        callback_url: &str,
        comment: &str,
        appli: u32,
    ) -> Result<Envelope> {
        let mut params = Params::new();
        params.insert("callbackurl", callback_url);
        params.insert("comment", comment);
        params.insert("appli", appli);

        let value = self.get("notify", "subscribe", params).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Look up the subscription registered for `callback_url`.
    pub async fn get_notification(
        &self,
        callback_url: &str,
        appli: Option<u32>,
    ) -> Result<NotificationProfile> {
        let mut params = Params::new();
        params.insert("callbackurl", callback_url);
        if let Some(appli) = appli {
            params.insert("appli", appli);
        }

        let value = self.get("notify", "get", params).await?;
        let envelope: Envelope = serde_json::from_value(value)?;
        Ok(serde_json::from_value(
            envelope.body.unwrap_or(serde_json::Value::Null),
        )?)
    }

    /// All active subscriptions, optionally narrowed to one device class.
    pub async fn list_notifications(
        &self,
        appli: Option<u32>,
    ) -> Result<Vec<NotificationProfile>> {
        let mut params = Params::new();
        if let Some(appli) = appli {
            params.insert("appli", appli);
        }

        let value = self.get("notify", "list", params).await?;
        let envelope: Envelope = serde_json::from_value(value)?;
        Ok(serde_json::from_value(envelope.field("profiles"))?)
    }

    /// Remove the subscription for `callback_url`. Returns the full
    /// response envelope.
    pub async fn revoke_notification(
        &self,
        callback_url: &str,
        appli: Option<u32>,
    ) -> Result<Envelope> {
        let mut params = Params::new();
        params.insert("callbackurl", callback_url);
        if let Some(appli) = appli {
            params.insert("appli", appli);
        }

        let value = self.get("notify", "revoke", params).await?;
        Ok(serde_json::from_value(value)?)
    }
}
