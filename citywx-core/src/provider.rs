use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    credentials::Credentials,
    error::WeatherError,
    model::{GeocodeResult, SnapshotShape, UnitPreference, WeatherTarget},
    snapshot::WeatherSnapshot,
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Network side of the pipeline: raw geocode and weather queries.
///
/// Results are returned exactly as the provider sent them; normalization and
/// caching happen in the resolver and fetcher.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Top geocoding matches for `city` (the client asks for one).
    async fn geocode(
        &self,
        city: &str,
        credentials: &Credentials,
    ) -> Result<Vec<GeocodeResult>, WeatherError>;

    async fn weather(
        &self,
        target: &WeatherTarget,
        units: UnitPreference,
        shape: SnapshotShape,
        credentials: &Credentials,
    ) -> Result<WeatherSnapshot, WeatherError>;
}
