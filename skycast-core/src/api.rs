use async_trait::async_trait;

use crate::{
    Config,
    api::{geocode::GeocodeClient, weather::WeatherClient},
    error::Result,
    model::{Coordinate, PlaceCandidate, UnitSystem},
};

pub mod geocode;
pub mod weather;

/// Weather lookup seam. Implemented by [`WeatherClient`]; the controller and
/// its tests only depend on this trait.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn one_call(
        &self,
        coordinate: Coordinate,
        units: UnitSystem,
    ) -> Result<weather::RawWeatherResponse>;
}

/// Geocoding seam covering forward autocomplete and reverse lookup.
#[async_trait]
pub trait GeocodeApi: Send + Sync {
    /// Ranked candidates for a free-text query. Blank input must resolve to an
    /// empty list without touching the network.
    async fn suggest(&self, text: &str) -> Result<Vec<PlaceCandidate>>;

    /// Places at a coordinate, best match first. Empty means "no address here".
    async fn reverse(&self, coordinate: Coordinate) -> Result<Vec<PlaceCandidate>>;
}

/// Construct the weather adapter from config; fails when no API key is set.
pub fn weather_client(config: &Config) -> Result<WeatherClient> {
    WeatherClient::new(&config.weather)
}

/// Construct the geocoding adapter from config; fails when no API key is set.
pub fn geocode_client(config: &Config) -> Result<GeocodeClient> {
    GeocodeClient::new(&config.geocoding)
}
