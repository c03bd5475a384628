//! City name → coordinates, memoized in the key-value store.
//!
//! Entries are written once per city and never expire. The store is
//! best-effort: a failing store only costs an extra geocode request.

use std::sync::Arc;

use crate::{
    credentials::Credentials,
    error::{GEOCODE_NOT_FOUND, StoreError, WeatherError},
    model::{GeocodeResult, LocationQuery},
    provider::WeatherProvider,
    store::KeyValueStore,
};

pub const CACHE_KEY_PREFIX: &str = "geoData_";

/// Store key for a city: prefix plus trimmed, lowercased text.
pub fn cache_key(query: &LocationQuery) -> String {
    format!("{CACHE_KEY_PREFIX}{}", query.normalized())
}

#[derive(Debug, Clone)]
pub struct GeocodeResolver {
    provider: Arc<dyn WeatherProvider>,
    store: Arc<dyn KeyValueStore>,
}

impl GeocodeResolver {
    pub fn new(provider: Arc<dyn WeatherProvider>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { provider, store }
    }

    pub async fn resolve(
        &self,
        query: &LocationQuery,
        credentials: &Credentials,
    ) -> Result<GeocodeResult, WeatherError> {
        let key = cache_key(query);

        if let Some(hit) = self.cached(&key) {
            tracing::debug!(city = %query.city, "Using cached geocode");
            return Ok(hit);
        }

        tracing::debug!(city = %query.city, "Geocode cache miss");
        let mut results = self.provider.geocode(query.city.trim(), credentials).await?;
        results.truncate(1);

        let Some(top) = results.first_mut() else {
            return Err(WeatherError::NotFound(GEOCODE_NOT_FOUND.to_string()));
        };
        top.normalize();
        let resolved = top.clone();

        self.remember(&key, &results);
        Ok(resolved)
    }

    /// Drop the cached entry for one city.
    pub fn forget(&self, query: &LocationQuery) -> Result<(), StoreError> {
        self.store.remove(&cache_key(query))
    }

    fn cached(&self, key: &str) -> Option<GeocodeResult> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::debug!("Geocode cache unavailable: {err}");
                return None;
            }
        };

        let entries: Vec<GeocodeResult> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(key, "Ignoring unreadable geocode cache entry: {err}");
                return None;
            }
        };

        // Entries written before normalization existed still get rewritten.
        entries.into_iter().next().map(|mut geo| {
            geo.normalize();
            geo
        })
    }

    fn remember(&self, key: &str, results: &[GeocodeResult]) {
        let json = match serde_json::to_string(results) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("Could not serialize geocode result: {err}");
                return;
            }
        };

        if let Err(err) = self.store.set(key, &json) {
            tracing::debug!("Continuing without geocode cache: {err}");
        }
    }
}
