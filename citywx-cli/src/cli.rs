use anyhow::{Context, anyhow};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;

use citywx_core::{
    Config, CoordinateStyle, Credentials, FileStore, KeyValueStore, LocationQuery, LookupRequest,
    MemoryStore, SnapshotShape, UnitPreference, WeatherService,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citywx", version, about = "City weather card")]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save (or clear) the OpenWeather API key and default units.
    Configure {
        /// Remove the saved API key instead of prompting for a new one.
        #[arg(long)]
        clear: bool,
    },

    /// Show weather for a city.
    Show {
        /// City name, e.g. "Jerusalem" or "Springfield, IL, US".
        city: String,

        /// Day whose daylight hours are listed (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,

        /// Fahrenheit and mph instead of the configured default.
        #[arg(long)]
        imperial: bool,

        /// Celsius and km/h instead of the configured default.
        #[arg(long, conflicts_with = "imperial")]
        metric: bool,

        /// Which endpoint to query.
        #[arg(long, value_enum)]
        shape: Option<ShapeArg>,

        /// Degrees and minutes only.
        #[arg(long)]
        short_coords: bool,

        /// Skip geocoding and ask the weather endpoint by name (flat shape only).
        #[arg(long)]
        direct: bool,

        /// Print the view model as JSON.
        #[arg(long)]
        json: bool,

        /// API key; falls back to the saved key.
        #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Drop the cached geocode entry for a city.
    Forget {
        city: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShapeArg {
    Flat,
    CurrentHourly,
}

impl From<ShapeArg> for SnapshotShape {
    fn from(value: ShapeArg) -> Self {
        match value {
            ShapeArg::Flat => SnapshotShape::Flat,
            ShapeArg::CurrentHourly => SnapshotShape::CurrentHourly,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { clear } => {
                // a key saved to a throwaway store would be lost on exit
                let store = FileStore::open_default().context("Cannot open the key store")?;
                configure(&store, clear)
            }
            Command::Show {
                city,
                date,
                imperial,
                metric,
                shape,
                short_coords,
                direct,
                json,
                api_key,
            } => {
                let store = open_store();
                let mut config = Config::load()?;
                if short_coords {
                    config.coordinates = CoordinateStyle::Minutes;
                }

                let credentials = api_key
                    .map(Credentials::new)
                    .or_else(|| Credentials::load_saved(store.as_ref()))
                    .ok_or_else(|| {
                        anyhow!(
                            "No API key configured.\n\
                             Hint: run `citywx configure` or set OPENWEATHER_API_KEY."
                        )
                    })?;

                let units = if imperial {
                    UnitPreference::Imperial
                } else if metric {
                    UnitPreference::Metric
                } else {
                    config.units
                };

                let shape = match (shape, direct) {
                    (Some(shape), _) => shape.into(),
                    (None, true) => SnapshotShape::Flat,
                    (None, false) => config.shape,
                };

                let request = LookupRequest {
                    query: LocationQuery::new(city),
                    units,
                    shape,
                    date: date.as_deref().map(parse_date).transpose()?,
                    credentials,
                };

                let service = WeatherService::from_config(&config, store);
                let view = if direct {
                    service.lookup_direct(&request).await?
                } else {
                    service.lookup(&request).await?
                };

                if json {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                } else {
                    print!("{}", render::card(&view)?);
                }
                Ok(())
            }
            Command::Forget { city } => {
                let store = open_store();
                let config = Config::load()?;
                let service = WeatherService::from_config(&config, store);
                service
                    .resolver()
                    .forget(&LocationQuery::new(city.as_str()))
                    .with_context(|| format!("Failed to remove cached location for '{city}'"))?;
                println!("Forgot cached location for {city}.");
                Ok(())
            }
        }
    }
}

/// The on-disk store, or a process-lifetime one when the cache directory
/// can't be used.
fn open_store() -> Arc<dyn KeyValueStore> {
    match FileStore::open_default() {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "Using file store");
            Arc::new(store)
        }
        Err(err) => {
            tracing::warn!("Persistent store unavailable, caching in memory only: {err:#}");
            Arc::new(MemoryStore::default())
        }
    }
}

fn configure(store: &dyn KeyValueStore, clear: bool) -> anyhow::Result<()> {
    if clear {
        Credentials::forget(store).context("Failed to remove saved API key")?;
        println!("Saved API key removed.");
        return Ok(());
    }

    let key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    let credentials = Credentials::new(key);
    if credentials.is_empty() {
        return Err(anyhow!("API key must not be empty."));
    }

    let mut config = Config::load()?;
    let units = inquire::Select::new("Default units:", vec!["metric", "imperial"])
        .with_starting_cursor(if config.units.is_metric() { 0 } else { 1 })
        .prompt()
        .context("Failed to read unit preference")?;
    config.units =
        if units == "imperial" { UnitPreference::Imperial } else { UnitPreference::Metric };

    credentials.save(store).context("Failed to save API key")?;
    config.save()?;

    println!("Saved. Config: {}", Config::config_file_path()?.display());
    Ok(())
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{raw}', expected YYYY-MM-DD"))
}
