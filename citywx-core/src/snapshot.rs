//! Weather payloads as returned by the provider.
//!
//! The two endpoint families return differently nested documents; both are
//! kept as-is here and flattened by the assembler.

use serde::{Deserialize, Serialize};

use crate::model::{Coordinates, normalize_country_code};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum WeatherSnapshot {
    Flat(FlatSnapshot),
    CurrentHourly(OneCallSnapshot),
}

impl WeatherSnapshot {
    /// Apply the country-code rule to every country field present.
    pub fn normalize(&mut self) {
        match self {
            WeatherSnapshot::Flat(flat) => {
                if let Some(country) = flat.sys.country.as_mut() {
                    normalize_country_code(country);
                }
            }
            // One Call responses carry no country field.
            WeatherSnapshot::CurrentHourly(_) => {}
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        match self {
            WeatherSnapshot::Flat(flat) => flat.coord,
            WeatherSnapshot::CurrentHourly(one) => Coordinates { lat: one.lat, lon: one.lon },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatSnapshot {
    pub coord: Coordinates,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: FlatMain,
    /// Meters.
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub clouds: Clouds,
    #[serde(default)]
    pub dt: i64,
    pub sys: FlatSys,
    /// UTC offset in seconds.
    #[serde(default)]
    pub timezone: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    pub speed: Option<f64>,
    pub deg: Option<f64>,
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Clouds {
    pub all: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatSys {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneCallSnapshot {
    pub lat: f64,
    pub lon: f64,
    /// IANA zone name, e.g. `Asia/Jerusalem`.
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub timezone_offset: i64,
    pub current: OneCallCurrent,
    #[serde(default)]
    pub hourly: Vec<HourlyPoint>,
    #[serde(default)]
    pub daily: Vec<DailyPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneCallCurrent {
    pub dt: i64,
    // Absent during polar day/night.
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: f64,
    #[serde(default)]
    pub clouds: f64,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_deg: Option<f64>,
    #[serde(default)]
    pub wind_gust: Option<f64>,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub dt: i64,
    pub temp: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub dt: i64,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
    pub temp: DailyTemp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTemp {
    pub min: f64,
    pub max: f64,
}
