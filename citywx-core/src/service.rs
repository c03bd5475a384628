//! One submission in, one view model (or error) out.

use chrono::NaiveDate;
use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::{
    assemble::{AssemblerSettings, assemble},
    config::Config,
    credentials::Credentials,
    error::WeatherError,
    model::{
        DisplayViewModel, GeocodeResult, LocationQuery, SnapshotShape, UnitPreference,
        WeatherTarget,
    },
    provider::{OpenWeatherProvider, WeatherProvider},
    resolver::GeocodeResolver,
    snapshot::{FlatSnapshot, WeatherSnapshot},
    store::KeyValueStore,
    weather::WeatherFetcher,
};

#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub query: LocationQuery,
    pub units: UnitPreference,
    pub shape: SnapshotShape,
    /// Day whose daylight hours are listed; `None` means the observation day.
    pub date: Option<NaiveDate>,
    pub credentials: Credentials,
}

/// Geocode → weather → assemble.
///
/// Overlapping submissions are latest-wins: a lookup that completes after a
/// newer one has started returns [`WeatherError::Superseded`].
#[derive(Debug)]
pub struct WeatherService {
    resolver: GeocodeResolver,
    fetcher: WeatherFetcher,
    settings: AssemblerSettings,
    generation: AtomicU64,
}

impl WeatherService {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        store: Arc<dyn KeyValueStore>,
        settings: AssemblerSettings,
    ) -> Self {
        Self {
            resolver: GeocodeResolver::new(provider.clone(), store),
            fetcher: WeatherFetcher::new(provider),
            settings,
            generation: AtomicU64::new(0),
        }
    }

    /// Service backed by OpenWeather at the configured endpoints.
    pub fn from_config(config: &Config, store: Arc<dyn KeyValueStore>) -> Self {
        let provider = Arc::new(OpenWeatherProvider::new(config.endpoints.clone()));
        Self::new(provider, store, config.assembler_settings())
    }

    pub fn resolver(&self) -> &GeocodeResolver {
        &self.resolver
    }

    pub async fn lookup(&self, request: &LookupRequest) -> Result<DisplayViewModel, WeatherError> {
        let ticket = self.begin();
        let outcome = self.run(request).await;
        self.finish(ticket)?;
        outcome
    }

    /// Single-request variant: query the current-weather endpoint by city
    /// text and take the location from the response itself.
    pub async fn lookup_direct(
        &self,
        request: &LookupRequest,
    ) -> Result<DisplayViewModel, WeatherError> {
        let ticket = self.begin();
        let outcome = self.run_direct(request).await;
        self.finish(ticket)?;
        outcome
    }

    async fn run(&self, request: &LookupRequest) -> Result<DisplayViewModel, WeatherError> {
        validate(request)?;

        let geo = self.resolver.resolve(&request.query, &request.credentials).await?;
        tracing::debug!(name = %geo.name, country = %geo.country_code, "Resolved city");

        let target = WeatherTarget::Coordinates(geo.coordinates());
        let snapshot =
            self.fetcher.fetch(&target, request.units, request.shape, &request.credentials).await?;

        Ok(assemble(&geo, &snapshot, request.units, request.date, &self.settings))
    }

    async fn run_direct(&self, request: &LookupRequest) -> Result<DisplayViewModel, WeatherError> {
        validate(request)?;
        if request.shape != SnapshotShape::Flat {
            return Err(WeatherError::InvalidRequest(
                "Direct lookups only support current conditions.".to_string(),
            ));
        }

        let target = WeatherTarget::City(request.query.city.trim().to_string());
        let snapshot =
            self.fetcher.fetch(&target, request.units, request.shape, &request.credentials).await?;

        let geo = match &snapshot {
            WeatherSnapshot::Flat(flat) => location_of(flat),
            WeatherSnapshot::CurrentHourly(_) => {
                return Err(WeatherError::InvalidRequest("Unexpected hourly response".to_string()));
            }
        };

        Ok(assemble(&geo, &snapshot, request.units, request.date, &self.settings))
    }

    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn finish(&self, ticket: u64) -> Result<(), WeatherError> {
        if self.generation.load(Ordering::SeqCst) == ticket {
            Ok(())
        } else {
            tracing::debug!(ticket, "Discarding result of superseded lookup");
            Err(WeatherError::Superseded)
        }
    }
}

fn validate(request: &LookupRequest) -> Result<(), WeatherError> {
    if request.query.city.trim().is_empty() {
        return Err(WeatherError::InvalidRequest("City is required.".to_string()));
    }
    if request.credentials.is_empty() {
        return Err(WeatherError::InvalidRequest("API key is required.".to_string()));
    }
    Ok(())
}

/// Location carried by a current-weather response.
fn location_of(flat: &FlatSnapshot) -> GeocodeResult {
    GeocodeResult {
        name: flat.name.clone(),
        state: None,
        country_code: flat.sys.country.clone().unwrap_or_default(),
        local_names: BTreeMap::new(),
        latitude: flat.coord.lat,
        longitude: flat.coord.lon,
    }
}
