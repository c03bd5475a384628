//! In-crate test doubles.

use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::sync::Notify;

use crate::{
    credentials::Credentials,
    error::WeatherError,
    model::{Coordinates, GeocodeResult, SnapshotShape, UnitPreference, WeatherTarget},
    provider::WeatherProvider,
    snapshot::{Clouds, Condition, FlatMain, FlatSnapshot, FlatSys, WeatherSnapshot, Wind},
};

pub(crate) fn geocode(name: &str, country: &str, lat: f64, lon: f64) -> GeocodeResult {
    GeocodeResult {
        name: name.to_string(),
        state: None,
        country_code: country.to_string(),
        local_names: BTreeMap::new(),
        latitude: lat,
        longitude: lon,
    }
}

pub(crate) fn flat_snapshot(temp: f64) -> FlatSnapshot {
    FlatSnapshot {
        coord: Coordinates { lat: 48.8534, lon: 2.3488 },
        weather: vec![Condition { description: "scattered clouds".into(), icon: "03d".into() }],
        main: FlatMain {
            temp,
            feels_like: temp - 1.0,
            temp_min: temp - 2.0,
            temp_max: temp + 2.0,
            pressure: 1015.0,
            humidity: 55.0,
        },
        visibility: Some(10_000.0),
        wind: Wind { speed: Some(4.0), deg: Some(250.0), gust: None },
        clouds: Clouds { all: 40.0 },
        // 2024-03-10 12:00:00 UTC
        dt: 1_710_072_000,
        sys: FlatSys {
            country: Some("FR".into()),
            // 06:00 and 17:45 UTC
            sunrise: 1_710_050_400,
            sunset: 1_710_092_700,
        },
        timezone: 3_600,
        name: "Paris".into(),
    }
}

/// Scripted provider that counts calls.
///
/// When `slow_city` is set, geocoding that city signals `entered` and then
/// waits on `gate`; every weather call releases `gate`.
#[derive(Debug, Default)]
pub(crate) struct MockProvider {
    pub geocode_results: Vec<GeocodeResult>,
    pub geocode_error: Option<fn() -> WeatherError>,
    pub snapshot: Option<WeatherSnapshot>,
    pub geocode_calls: AtomicUsize,
    pub weather_calls: AtomicUsize,
    pub slow_city: Option<String>,
    pub entered: Arc<Notify>,
    pub gate: Arc<Notify>,
}

impl MockProvider {
    pub fn with_geocode(results: Vec<GeocodeResult>) -> Self {
        Self { geocode_results: results, ..Self::default() }
    }

    pub fn with_snapshot(snapshot: WeatherSnapshot) -> Self {
        Self { snapshot: Some(snapshot), ..Self::default() }
    }

    pub fn failing_geocode(error: fn() -> WeatherError) -> Self {
        Self { geocode_error: Some(error), ..Self::default() }
    }
}

#[async_trait]
impl WeatherProvider for MockProvider {
    async fn geocode(
        &self,
        city: &str,
        _credentials: &Credentials,
    ) -> Result<Vec<GeocodeResult>, WeatherError> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);

        if self.slow_city.as_deref() == Some(city) {
            self.entered.notify_one();
            self.gate.notified().await;
        }

        match self.geocode_error {
            Some(error) => Err(error()),
            None => Ok(self.geocode_results.clone()),
        }
    }

    async fn weather(
        &self,
        _target: &WeatherTarget,
        _units: UnitPreference,
        _shape: SnapshotShape,
        _credentials: &Credentials,
    ) -> Result<WeatherSnapshot, WeatherError> {
        self.weather_calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notify_one();

        self.snapshot
            .clone()
            .ok_or_else(|| WeatherError::NotFound("No weather data for this city.".into()))
    }
}
