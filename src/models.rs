// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Typed shapes for Withings API responses. Every endpoint answers with the
//! same generic envelope, `{status, body}`, where `body` holds the
//! endpoint-specific fields. The adapters in [`crate::measures`] and
//! [`crate::notifications`] project one field out of the body; the structs
//! here give those projections a shape without transforming any values.
//!
//! Fields the provider may omit are optional and default-constructed, so a
//! partial body deserializes rather than failing the whole call.

use serde::{Deserialize, Serialize};

/// The generic `{status, body}` wrapper every endpoint response follows.
///
/// `status` is the provider's own result code (0 means success); it is
/// passed through without validation, matching the raw-passthrough error
/// policy of the crate.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub body: Option<T>,
}

impl Envelope {
    /// Project a single field out of the body, `Null` when absent.
    pub fn field(&self, name: &str) -> serde_json::Value {
        self.body
            .as_ref()
            .and_then(|body| body.get(name))
            .cloned()
            .unwrap_or(serde_json::Value::Null)
    }
}

/// One group of body measurements taken at the same time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureGroup {
    #[serde(default)]
    pub grpid: Option<i64>,
    #[serde(default)]
    pub attrib: Option<i64>,
    /// Unix timestamp of the measurement
    #[serde(default)]
    pub date: Option<i64>,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub measures: Vec<Measure>,
}

/// A single measurement inside a [`MeasureGroup`].
///
/// The provider encodes real values as `value * 10^unit`; both parts are
/// kept verbatim and [`Measure::real_value`] derives the float on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub value: i64,
    #[serde(rename = "type")]
    pub kind: i64,
    pub unit: i32,
}

impl Measure {
    /// The measurement as a float, e.g. `value: 79300, unit: -3` → `79.3` kg.
    pub fn real_value(&self) -> f64 {
        self.value as f64 * 10f64.powi(self.unit)
    }
}

/// One entry of a sleep summary series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSeries {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub startdate: Option<i64>,
    #[serde(default)]
    pub enddate: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub model: Option<i64>,
    /// Per-night aggregates; shape varies by device, kept unprojected
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// A notification subscription as returned by the `notify` service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationProfile {
    #[serde(default)]
    pub appli: Option<i64>,
    #[serde(default)]
    pub callbackurl: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Unix timestamp after which the subscription lapses
    #[serde(default)]
    pub expires: Option<i64>,
}
