use std::sync::Arc;

use crate::{
    credentials::Credentials,
    error::WeatherError,
    model::{SnapshotShape, UnitPreference, WeatherTarget},
    provider::WeatherProvider,
    snapshot::WeatherSnapshot,
};

/// Uncached weather queries; weather changes, geography doesn't.
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherFetcher {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn fetch(
        &self,
        target: &WeatherTarget,
        units: UnitPreference,
        shape: SnapshotShape,
        credentials: &Credentials,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let mut snapshot = self.provider.weather(target, units, shape, credentials).await?;
        snapshot.normalize();
        Ok(snapshot)
    }
}
