//! Core library for the `citywx` CLI.
//!
//! This crate defines:
//! - Configuration, credentials and the best-effort key-value store
//! - The OpenWeather client and the cached geocode resolver
//! - Display formatting and the view-model assembler
//! - The request pipeline tying them together
//!
//! It is used by `citywx-cli`, but any front end can call
//! [`WeatherService::lookup`] and render the returned [`DisplayViewModel`].

pub mod assemble;
pub mod bearing;
pub mod config;
pub mod credentials;
pub mod error;
pub mod format;
pub mod hebrew;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod service;
pub mod snapshot;
pub mod store;
pub mod weather;
pub mod zone;

#[cfg(test)]
mod testing;

pub use assemble::{AssemblerSettings, assemble};
pub use config::{Config, Endpoints};
pub use credentials::Credentials;
pub use error::{StoreError, WeatherError};
pub use format::CoordinateStyle;
pub use model::{
    Coordinates, DisplayViewModel, GeocodeResult, LocationQuery, SnapshotShape, UnitPreference,
    WeatherTarget,
};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use resolver::GeocodeResolver;
pub use service::{LookupRequest, WeatherService};
pub use snapshot::WeatherSnapshot;
pub use store::{FileStore, KeyValueStore, MemoryStore, NoopStore};
pub use weather::WeatherFetcher;
pub use zone::LocalZone;
