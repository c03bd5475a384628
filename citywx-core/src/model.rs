use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Country code the provider reports for the disputed territory.
pub const DISPUTED_COUNTRY_CODE: &str = "PS";
/// Code of the administering country that replaces it.
pub const ADMINISTERING_COUNTRY_CODE: &str = "IL";

/// Rewrite the disputed country code in place.
pub fn normalize_country_code(code: &mut String) {
    if code == DISPUTED_COUNTRY_CODE {
        *code = ADMINISTERING_COUNTRY_CODE.to_string();
    }
}

/// Unit system requested from the provider and used for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Metric,
    Imperial,
}

impl UnitPreference {
    /// Value of the provider's `units` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            UnitPreference::Metric => "metric",
            UnitPreference::Imperial => "imperial",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            UnitPreference::Metric => "°C",
            UnitPreference::Imperial => "°F",
        }
    }

    pub fn is_metric(&self) -> bool {
        matches!(self, UnitPreference::Metric)
    }
}

/// Which weather endpoint to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotShape {
    /// Single current-conditions document (`/data/2.5/weather`).
    Flat,
    /// Current conditions plus hourly and daily series (`/data/3.0/onecall`).
    #[default]
    CurrentHourly,
}

/// Free-text city entered by the user for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub city: String,
}

impl LocationQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }

    /// Case-insensitive, whitespace-trimmed form used for cache lookups.
    pub fn normalized(&self) -> String {
        self.city.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// What the weather endpoint is asked about.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherTarget {
    Coordinates(Coordinates),
    City(String),
}

/// Country and language whose native-script place names are preferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub country: String,
    pub language: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self { country: ADMINISTERING_COUNTRY_CODE.to_string(), language: "he".to_string() }
    }
}

/// One entry of the geocoding response.
///
/// Field names follow the provider JSON so the same type round-trips through
/// the geocode cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "country", default)]
    pub country_code: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub local_names: BTreeMap<String, String>,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl GeocodeResult {
    pub fn normalize(&mut self) {
        normalize_country_code(&mut self.country_code);
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates { lat: self.latitude, lon: self.longitude }
    }

    pub fn localized_name(&self, language: &str) -> Option<&str> {
        self.local_names.get(language).map(String::as_str).filter(|s| !s.is_empty())
    }

    /// Label shown for the city: the native-script name inside the local
    /// country, `"name[, state], country"` everywhere else.
    pub fn display_name(&self, locale: &Locale) -> String {
        if self.country_code == locale.country {
            if let Some(local) = self.localized_name(&locale.language) {
                return local.to_string();
            }
        }

        match self.state.as_deref().filter(|s| !s.is_empty()) {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country_code),
            None => format!("{}, {}", self.name, self.country_code),
        }
    }
}

/// Everything the presentation layer renders for one lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayViewModel {
    pub city: String,
    pub coordinates: String,
    /// Direction towards the reference point, e.g. `"ESE (112°)"`.
    pub bearing: String,
    pub date: String,
    /// Same day in the Hebrew calendar, e.g. `"ל׳ באדר א׳ תשפ״ד"`.
    pub hebrew_date: String,
    pub timezone: String,
    pub temperature: TemperatureBlock,
    pub humidity: String,
    pub clouds: String,
    pub pressure: String,
    pub visibility: Option<String>,
    pub wind: WindBlock,
    pub sun: SunTimes,
    pub observed_at: String,
    pub icon_url: Option<String>,
    pub hourly: Vec<HourlyRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureBlock {
    pub current: String,
    pub feels_like: String,
    pub min_max: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindBlock {
    pub speed: String,
    pub direction: Option<String>,
    pub gust: Option<String>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunTimes {
    pub sunrise: String,
    pub sunset: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRow {
    pub time: String,
    pub temperature: String,
    pub pressure: String,
}
