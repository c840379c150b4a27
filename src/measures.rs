// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Activity, body-measurement and sleep endpoint adapters.
//!
//! Each adapter formats its parameters, delegates to the shared dispatcher
//! and projects one field out of the response envelope. Values are passed
//! through untouched; in particular the provider has historically encoded
//! scalars like `steps` as either numbers or strings, so the scalar
//! projections return raw [`serde_json::Value`]s.

use chrono::{DateTime, NaiveDate, Utc};

use crate::client::{Params, WithingsClient};
use crate::errors::Result;
use crate::models::{Envelope, MeasureGroup, SleepSeries};

/// Body metric codes accepted by `measure/getmeas`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureType {
    Weight = 1,
    Height = 4,
    FatFreeMass = 5,
    FatRatio = 6,
    FatMassWeight = 8,
    DiastolicBloodPressure = 9,
    SystolicBloodPressure = 10,
    HeartPulse = 11,
}

impl MeasureType {
    pub fn as_code(self) -> u32 {
        self as u32
    }
}

impl WithingsClient {
    /// Activity summary for one day: the full response envelope.
    pub async fn get_daily_activity(&self, date: NaiveDate) -> Result<Envelope> {
        let mut params = Params::new();
        params.insert("date", date.format("%Y-%m-%d"));

        let value = self.get("measure", "getactivity", params).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `body.steps` of the day's activity summary, unparsed.
    pub async fn get_daily_steps(&self, date: NaiveDate) -> Result<serde_json::Value> {
        Ok(self.get_daily_activity(date).await?.field("steps"))
    }

    /// `body.calories` of the day's activity summary, unparsed.
    pub async fn get_daily_calories(&self, date: NaiveDate) -> Result<serde_json::Value> {
        Ok(self.get_daily_activity(date).await?.field("calories"))
    }

    /// Body measures of one metric over a date range: the full envelope.
    pub async fn get_measures(
        &self,
        kind: MeasureType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Envelope> {
        let mut params = Params::new();
        params.insert("startdate", start.timestamp());
        params.insert("enddate", end.timestamp());
        params.insert("meastype", kind.as_code());

        let value = self.get("measure", "getmeas", params).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Weight measurement groups over a date range.
    pub async fn get_weight_measures(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MeasureGroup>> {
        let envelope = self.get_measures(MeasureType::Weight, start, end).await?;
        Ok(serde_json::from_value(envelope.field("measuregrps"))?)
    }

    /// Heart pulse measurement groups over a date range.
    pub async fn get_pulse_measures(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MeasureGroup>> {
        let envelope = self.get_measures(MeasureType::HeartPulse, start, end).await?;
        Ok(serde_json::from_value(envelope.field("measuregrps"))?)
    }

    /// Per-night sleep summary series between two days inclusive.
    pub async fn get_sleep_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SleepSeries>> {
        let mut params = Params::new();
        params.insert("startdateymd", start.format("%Y-%m-%d"));
        params.insert("enddateymd", end.format("%Y-%m-%d"));

        let value = self.get("sleep", "getsummary", params).await?;
        let envelope: Envelope = serde_json::from_value(value)?;
        Ok(serde_json::from_value(envelope.field("series"))?)
    }
}
