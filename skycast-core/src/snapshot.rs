//! Pure reshaping of the provider's One Call payload into the canonical
//! display snapshot. No network, no clock: everything comes from the payload
//! and the requested forecast hour offset.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{
    api::weather::{RawCondition, RawWeatherResponse},
    error::{Error, Result},
};

/// Canonical weather snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub timezone_offset_secs: i64,
    /// Observation time rendered in the location's own timezone,
    /// `%Y-%m-%d %H:%M:%S %:z`.
    pub observed_at_local: String,
    /// At least one entry, provider order.
    pub conditions: Vec<Condition>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub dew_point: f64,
    pub uv_index: f64,
    pub cloud_pct: u8,
    pub visibility_m: Option<u32>,
    pub wind_speed: f64,
    pub wind_deg: u16,
    /// Always taken from the `current` block, even for a forecast hour:
    /// hourly entries carry no sunrise/sunset, and the values are the same
    /// for any hour of the day anyway.
    pub sunrise_epoch: Option<i64>,
    pub sunset_epoch: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub code: u32,
    pub category: String,
    pub description: String,
    pub icon: String,
}

impl From<&RawCondition> for Condition {
    fn from(raw: &RawCondition) -> Self {
        Self {
            code: raw.id,
            category: raw.main.clone(),
            description: raw.description.clone(),
            icon: raw.icon.clone(),
        }
    }
}

/// Select the active observation and reshape it.
///
/// `hour_offset == 0` selects `current`; `hour_offset == k > 0` selects
/// `hourly[k - 1]` (the offset is 1-indexed on the wire). An offset past the
/// end of the hourly series is an error, never a silent fallback.
pub fn normalize(raw: &RawWeatherResponse, hour_offset: usize) -> Result<WeatherSnapshot> {
    let active = if hour_offset == 0 {
        &raw.current
    } else {
        raw.hourly
            .get(hour_offset - 1)
            .ok_or(Error::HourOutOfRange {
                requested: hour_offset,
                available: raw.hourly.len(),
            })?
    };

    Ok(WeatherSnapshot {
        latitude: raw.lat,
        longitude: raw.lon,
        timezone: raw.timezone.clone(),
        timezone_offset_secs: raw.timezone_offset,
        observed_at_local: local_time_string(active.dt, raw.timezone_offset)?,
        conditions: active.weather.iter().map(Condition::from).collect(),
        temperature: active.temp,
        feels_like: active.feels_like,
        humidity_pct: active.humidity,
        pressure_hpa: active.pressure,
        dew_point: active.dew_point,
        uv_index: active.uvi,
        cloud_pct: active.clouds,
        visibility_m: active.visibility,
        wind_speed: active.wind_speed,
        wind_deg: active.wind_deg,
        sunrise_epoch: raw.current.sunrise,
        sunset_epoch: raw.current.sunset,
    })
}

/// Render a UTC epoch at the provider-reported fixed offset.
pub fn local_time_string(epoch: i64, offset_secs: i64) -> Result<String> {
    let offset = i32::try_from(offset_secs)
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or(Error::BadTimezoneOffset(offset_secs))?;

    let utc = DateTime::from_timestamp(epoch, 0).ok_or(Error::BadTimestamp(epoch))?;

    Ok(utc
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S %:z")
        .to_string())
}
