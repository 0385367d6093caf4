use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    api::GeocodeApi,
    config::ProviderConfig,
    error::{Error, Result},
    http::ApiClient,
    model::{Coordinate, PlaceCandidate},
};

const AUTOCOMPLETE_PATH: &str = "/v1/geocode/autocomplete";
const REVERSE_PATH: &str = "/v1/geocode/reverse";

/// Adapter for the Geoapify geocoding endpoints.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    api: ApiClient,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::MissingApiKey("geocoding"));
        }

        Ok(Self {
            api: ApiClient::new()?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl GeocodeApi for GeocodeClient {
    async fn suggest(&self, text: &str) -> Result<Vec<PlaceCandidate>> {
        if text.trim().is_empty() {
            debug!("blank autocomplete query, skipping request");
            return Ok(Vec::new());
        }

        info!(%text, "autocomplete lookup");

        let collection: FeatureCollection = self
            .api
            .get_json(
                &self.base_url,
                AUTOCOMPLETE_PATH,
                &[
                    ("apiKey", self.api_key.clone()),
                    ("text", text.to_string()),
                ],
            )
            .await?;

        Ok(collection.into_candidates())
    }

    async fn reverse(&self, coordinate: Coordinate) -> Result<Vec<PlaceCandidate>> {
        info!(
            lat = coordinate.latitude,
            lon = coordinate.longitude,
            "reverse lookup"
        );

        let collection: FeatureCollection = self
            .api
            .get_json(
                &self.base_url,
                REVERSE_PATH,
                &[
                    ("apiKey", self.api_key.clone()),
                    ("lat", coordinate.latitude.to_string()),
                    ("lon", coordinate.longitude.to_string()),
                ],
            )
            .await?;

        Ok(collection.into_candidates())
    }
}

// Both geocoding endpoints answer GeoJSON feature collections; only the
// `properties` block carries anything we display.
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    formatted: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl FeatureCollection {
    /// Provider rank order is kept; no re-sorting.
    fn into_candidates(self) -> Vec<PlaceCandidate> {
        self.features
            .into_iter()
            .map(|feature| PlaceCandidate {
                formatted: feature.properties.formatted,
                latitude: feature.properties.lat,
                longitude: feature.properties.lon,
                city: feature.properties.city,
                country: feature.properties.country,
            })
            .collect()
    }
}
