use anyhow::bail;
use clap::{Parser, Subcommand};

use skycast_core::{
    Config, Coordinate, GeocodeApi, UnitSystem, WeatherApi, WeatherSnapshot, geocode_client,
    normalize, snapshot::local_time_string, weather_client,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather lookup for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure API keys for the weather and geocoding providers.
    Configure,

    /// Show current or forecast weather for an address or a coordinate.
    Show {
        /// Address or place name; resolved via geocoding (best match wins).
        address: Option<String>,

        /// Latitude, used together with --lon instead of an address.
        #[arg(long, requires = "lon", conflicts_with = "address")]
        lat: Option<f64>,

        /// Longitude, used together with --lat instead of an address.
        #[arg(long, requires = "lat", conflicts_with = "address")]
        lon: Option<f64>,

        /// Forecast hour offset; 0 means current conditions.
        #[arg(long, default_value_t = 0)]
        hour: usize,

        /// Unit system: metric, imperial or standard.
        #[arg(long, default_value = "metric")]
        units: String,
    },

    /// List geocoding candidates for a free-text query.
    Search {
        /// Free-text query, e.g. "Stock".
        text: String,
    },

    /// Reverse geocode a coordinate to the nearest address.
    Locate {
        #[arg(long)]
        lat: f64,

        #[arg(long)]
        lon: f64,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config),
            Command::Show {
                address,
                lat,
                lon,
                hour,
                units,
            } => {
                let units = UnitSystem::try_from(units.as_str())?;
                show(&config, address, lat, lon, hour, units).await
            }
            Command::Search { text } => search(&config, &text).await,
            Command::Locate { lat, lon } => locate(&config, lat, lon).await,
        }
    }
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let weather_key = inquire::Text::new("OpenWeather API key:")
        .with_help_message("Leave blank to keep the current value")
        .prompt()?;
    if !weather_key.trim().is_empty() {
        config.weather.api_key = weather_key.trim().to_string();
    }

    let geocoding_key = inquire::Text::new("Geoapify API key:")
        .with_help_message("Leave blank to keep the current value")
        .prompt()?;
    if !geocoding_key.trim().is_empty() {
        config.geocoding.api_key = geocoding_key.trim().to_string();
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(
    config: &Config,
    address: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    hour: usize,
    units: UnitSystem,
) -> anyhow::Result<()> {
    let coordinate = match (address, lat, lon) {
        (Some(address), _, _) => {
            let geocoder = geocode_client(config)?;
            let candidates = geocoder.suggest(&address).await?;

            let Some(best) = candidates.first() else {
                bail!("No geocoding match for '{address}'.");
            };

            println!("{}", best.formatted);
            best.coordinate()
        }
        (None, Some(lat), Some(lon)) => Coordinate::new(lat, lon)?,
        _ => bail!("Provide an ADDRESS, or both --lat and --lon."),
    };

    let weather = weather_client(config)?;
    let raw = weather.one_call(coordinate, units).await?;
    let snapshot = normalize(&raw, hour)?;

    print_snapshot(&snapshot, units, config.corrected_unit_labels);

    Ok(())
}

async fn search(config: &Config, text: &str) -> anyhow::Result<()> {
    let geocoder = geocode_client(config)?;
    let candidates = geocoder.suggest(text).await?;

    if candidates.is_empty() {
        println!("No matches for '{text}'.");
        return Ok(());
    }

    for (index, candidate) in candidates.iter().enumerate() {
        println!(
            "{:>2}. {}  ({:.4}, {:.4})",
            index + 1,
            candidate.formatted,
            candidate.latitude,
            candidate.longitude
        );
    }

    Ok(())
}

async fn locate(config: &Config, lat: f64, lon: f64) -> anyhow::Result<()> {
    let coordinate = Coordinate::new(lat, lon)?;

    let geocoder = geocode_client(config)?;
    let places = geocoder.reverse(coordinate).await?;

    // First entry is the best match; an empty list is a valid "nothing here".
    match places.first() {
        Some(place) => println!("{}", place.formatted),
        None => println!("No address found at ({lat}, {lon})."),
    }

    Ok(())
}

fn print_snapshot(snapshot: &WeatherSnapshot, units: UnitSystem, corrected_labels: bool) {
    let suffix = units.temperature_suffix(corrected_labels);

    let conditions = snapshot
        .conditions
        .iter()
        .map(|c| c.description.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    println!(
        "{} ({:.4}, {:.4})",
        snapshot.timezone, snapshot.latitude, snapshot.longitude
    );
    println!("Observed:    {}", snapshot.observed_at_local);
    println!("Conditions:  {conditions}");
    println!(
        "Temperature: {:.1}{suffix} (feels like {:.1}{suffix})",
        snapshot.temperature, snapshot.feels_like
    );
    println!(
        "Humidity:    {}%   Pressure: {:.0} hPa   Dew point: {:.1}{suffix}",
        snapshot.humidity_pct, snapshot.pressure_hpa, snapshot.dew_point
    );
    println!(
        "Wind:        {:.1} at {}°   Clouds: {}%   UV index: {:.1}",
        snapshot.wind_speed, snapshot.wind_deg, snapshot.cloud_pct, snapshot.uv_index
    );

    if let Some(visibility) = snapshot.visibility_m {
        println!("Visibility:  {visibility} m");
    }

    let offset = snapshot.timezone_offset_secs;
    if let (Some(sunrise), Some(sunset)) = (snapshot.sunrise_epoch, snapshot.sunset_epoch)
        && let (Ok(sunrise), Ok(sunset)) = (
            local_time_string(sunrise, offset),
            local_time_string(sunset, offset),
        )
    {
        println!("Sunrise:     {sunrise}");
        println!("Sunset:      {sunset}");
    }
}
