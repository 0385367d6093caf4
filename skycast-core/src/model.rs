use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Geographic position used for every weather and reverse-geocoding lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Checked constructor; rejects values outside -90..=90 / -180..=180.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidCoordinate { latitude, longitude });
        }

        Ok(Self { latitude, longitude })
    }
}

/// Unit system sent to the weather provider as the `units` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
            UnitSystem::Standard => "standard",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial, UnitSystem::Standard]
    }

    /// Temperature suffix shown next to a reading.
    ///
    /// The legacy table (`corrected = false`) is the one the original web client
    /// shipped: `standard` → "°F" and `imperial` → "K". That is the opposite of
    /// what the provider actually returns (`standard` is Kelvin, `imperial` is
    /// Fahrenheit). The corrected table follows the provider semantics and is
    /// opt-in via `corrected_unit_labels` in the config.
    pub fn temperature_suffix(&self, corrected: bool) -> &'static str {
        match (self, corrected) {
            (UnitSystem::Metric, _) => "°C",
            (UnitSystem::Standard, false) | (UnitSystem::Imperial, true) => "°F",
            (UnitSystem::Imperial, false) | (UnitSystem::Standard, true) => "K",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            "standard" => Ok(UnitSystem::Standard),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial, standard."
            )),
        }
    }
}

/// One geocoding match, in provider rank order.
///
/// Forward autocomplete and reverse lookup answer with the same payload shape,
/// so both directions share this type. An empty candidate list is a valid
/// "no match" outcome, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub formatted: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl PlaceCandidate {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_system_as_str_roundtrip() {
        for units in UnitSystem::all() {
            let parsed = UnitSystem::try_from(units.as_str()).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn unknown_unit_system_error() {
        let err = UnitSystem::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }

    // The legacy table is knowingly wrong about the provider's semantics
    // (standard is Kelvin, imperial is Fahrenheit on the wire); it is kept
    // because the shipped UI always displayed it this way.
    #[test]
    fn legacy_suffix_table_is_preserved_verbatim() {
        assert_eq!(UnitSystem::Metric.temperature_suffix(false), "°C");
        assert_eq!(UnitSystem::Standard.temperature_suffix(false), "°F");
        assert_eq!(UnitSystem::Imperial.temperature_suffix(false), "K");
    }

    #[test]
    fn corrected_suffix_table_matches_provider_semantics() {
        assert_eq!(UnitSystem::Metric.temperature_suffix(true), "°C");
        assert_eq!(UnitSystem::Standard.temperature_suffix(true), "K");
        assert_eq!(UnitSystem::Imperial.temperature_suffix(true), "°F");
    }

    #[test]
    fn coordinate_range_is_checked() {
        assert!(Coordinate::new(59.3326, 18.0649).is_ok());
        assert!(Coordinate::new(90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.5).is_err());
    }
}
