use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Built-in provider endpoints; overridable per config file.
pub const WEATHER_BASE_URL: &str = "https://api.openweathermap.org";
pub const GEOCODING_BASE_URL: &str = "https://api.geoapify.com";

const DEFAULT_SUGGEST_QUIET_MS: u64 = 500;

/// Endpoint and credentials for a single provider. Keys are never hard-coded;
/// they live in the config file and are injected at adapter construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [weather]
/// base_url = "https://api.openweathermap.org"
/// api_key = "..."
///
/// [geocoding]
/// base_url = "https://api.geoapify.com"
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_weather_provider")]
    pub weather: ProviderConfig,

    #[serde(default = "default_geocoding_provider")]
    pub geocoding: ProviderConfig,

    /// When true, temperature suffixes follow the provider's real unit
    /// semantics instead of the legacy display table.
    #[serde(default)]
    pub corrected_unit_labels: bool,

    /// Quiet period for debounced autocomplete lookups.
    #[serde(default = "default_suggest_quiet_ms")]
    pub suggest_quiet_ms: u64,
}

fn default_weather_provider() -> ProviderConfig {
    ProviderConfig {
        base_url: WEATHER_BASE_URL.to_string(),
        api_key: String::new(),
    }
}

fn default_geocoding_provider() -> ProviderConfig {
    ProviderConfig {
        base_url: GEOCODING_BASE_URL.to_string(),
        api_key: String::new(),
    }
}

fn default_suggest_quiet_ms() -> u64 {
    DEFAULT_SUGGEST_QUIET_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather: default_weather_provider(),
            geocoding: default_geocoding_provider(),
            corrected_unit_labels: false,
            suggest_quiet_ms: DEFAULT_SUGGEST_QUIET_MS,
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_builtin_endpoints_with_no_keys() {
        let cfg = Config::default();

        assert_eq!(cfg.weather.base_url, WEATHER_BASE_URL);
        assert_eq!(cfg.geocoding.base_url, GEOCODING_BASE_URL);
        assert!(cfg.weather.api_key.is_empty());
        assert!(cfg.geocoding.api_key.is_empty());
        assert!(!cfg.corrected_unit_labels);
        assert_eq!(cfg.suggest_quiet_ms, 500);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [weather]
            base_url = "https://api.openweathermap.org"
            api_key = "OPEN_KEY"
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(cfg.weather.api_key, "OPEN_KEY");
        assert_eq!(cfg.geocoding.base_url, GEOCODING_BASE_URL);
        assert!(cfg.geocoding.api_key.is_empty());
        assert_eq!(cfg.suggest_quiet_ms, 500);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.weather.api_key = "OPEN_KEY".to_string();
        cfg.geocoding.api_key = "GEO_KEY".to_string();
        cfg.corrected_unit_labels = true;
        cfg.suggest_quiet_ms = 250;

        let serialized = toml::to_string_pretty(&cfg).expect("config should serialize");
        let parsed: Config = toml::from_str(&serialized).expect("config should parse back");

        assert_eq!(parsed.weather.api_key, "OPEN_KEY");
        assert_eq!(parsed.geocoding.api_key, "GEO_KEY");
        assert!(parsed.corrected_unit_labels);
        assert_eq!(parsed.suggest_quiet_ms, 250);
    }
}
