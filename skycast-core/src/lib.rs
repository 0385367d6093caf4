//! Core library for `skycast`.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - A shared HTTP client and the weather/geocoding provider adapters
//! - The snapshot normalizer (provider payload → canonical display shape)
//! - The debouncer and the application controller wiring them together
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod api;
pub mod app;
pub mod config;
pub mod debounce;
pub mod error;
pub mod http;
pub mod model;
pub mod snapshot;

pub use api::{GeocodeApi, WeatherApi, geocode_client, weather_client};
pub use app::{App, PositionSource, Render, ViewState};
pub use config::{Config, ProviderConfig};
pub use debounce::Debouncer;
pub use error::{Error, Result};
pub use model::{Coordinate, PlaceCandidate, UnitSystem};
pub use snapshot::{Condition, WeatherSnapshot, normalize};
