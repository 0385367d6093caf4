use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::{
    api::WeatherApi,
    config::ProviderConfig,
    error::{Error, Result},
    http::ApiClient,
    model::{Coordinate, UnitSystem},
};

const ONECALL_PATH: &str = "/data/2.5/onecall";

/// Minutely, alert and daily blocks are never displayed, so they are excluded
/// from every request.
const EXCLUDE_BLOCKS: &str = "minutely,alerts,daily";

/// Adapter for the OpenWeather One Call endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api: ApiClient,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::MissingApiKey("weather"));
        }

        Ok(Self {
            api: ApiClient::new()?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl WeatherApi for WeatherClient {
    async fn one_call(
        &self,
        coordinate: Coordinate,
        units: UnitSystem,
    ) -> Result<RawWeatherResponse> {
        info!(
            lat = coordinate.latitude,
            lon = coordinate.longitude,
            units = units.as_str(),
            "fetching weather"
        );

        self.api
            .get_json(
                &self.base_url,
                ONECALL_PATH,
                &[
                    ("appid", self.api_key.clone()),
                    ("lat", coordinate.latitude.to_string()),
                    ("lon", coordinate.longitude.to_string()),
                    ("units", units.as_str().to_string()),
                    ("exclude", EXCLUDE_BLOCKS.to_string()),
                ],
            )
            .await
    }
}

/// Provider-shaped One Call payload, decoded as-is. The normalizer in
/// [`crate::snapshot`] reshapes this into the canonical snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWeatherResponse {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    pub timezone_offset: i64,
    pub current: RawObservation,
    /// Up to 48 entries, hour 1 first.
    #[serde(default)]
    pub hourly: Vec<RawObservation>,
}

/// One point-in-time reading, shared between `current` and `hourly`.
/// `sunrise`/`sunset` are only present on `current`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObservation {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: u8,
    pub dew_point: f64,
    #[serde(default)]
    pub uvi: f64,
    pub clouds: u8,
    #[serde(default)]
    pub visibility: Option<u32>,
    pub wind_speed: f64,
    pub wind_deg: u16,
    pub weather: Vec<RawCondition>,
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_rejected_at_construction() {
        let cfg = ProviderConfig {
            base_url: "https://api.openweathermap.org".to_string(),
            api_key: String::new(),
        };

        let err = WeatherClient::new(&cfg).unwrap_err();
        assert!(err.to_string().contains("no API key configured"));
    }

    #[test]
    fn decodes_a_onecall_payload() {
        let raw: RawWeatherResponse = serde_json::from_str(
            r#"{
                "lat": 59.5,
                "lon": 18.0,
                "timezone": "Europe/Stockholm",
                "timezone_offset": 7200,
                "current": {
                    "dt": 1651510800,
                    "sunrise": 1651459565,
                    "sunset": 1651517025,
                    "temp": 12.19,
                    "feels_like": 10.8,
                    "pressure": 1005,
                    "humidity": 51,
                    "dew_point": 2.36,
                    "uvi": 0.26,
                    "clouds": 54,
                    "visibility": 10000,
                    "wind_speed": 4.97,
                    "wind_deg": 16,
                    "weather": [
                        {"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}
                    ]
                },
                "hourly": [
                    {
                        "dt": 1651514400,
                        "temp": 11.4,
                        "feels_like": 10.1,
                        "pressure": 1006,
                        "humidity": 55,
                        "dew_point": 2.4,
                        "clouds": 60,
                        "wind_speed": 4.2,
                        "wind_deg": 20,
                        "weather": [
                            {"id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04n"}
                        ]
                    }
                ]
            }"#,
        )
        .expect("payload should decode");

        assert_eq!(raw.timezone, "Europe/Stockholm");
        assert_eq!(raw.current.dt, 1651510800);
        assert_eq!(raw.current.sunrise, Some(1651459565));
        assert_eq!(raw.hourly.len(), 1);
        // uvi and visibility may be absent on hourly entries
        assert_eq!(raw.hourly[0].uvi, 0.0);
        assert_eq!(raw.hourly[0].visibility, None);
        assert_eq!(raw.hourly[0].sunrise, None);
        assert_eq!(raw.hourly[0].weather[0].description, "overcast clouds");
    }
}
