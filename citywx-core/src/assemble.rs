//! Raw snapshot + resolved location → display strings.
//!
//! Each snapshot shape is first reduced to a [`Conditions`] record; a single
//! formatting pass then builds the view model from it.

use chrono::NaiveDate;

use crate::{
    bearing::{bearing_label, bearing_to_reference},
    config::Endpoints,
    format::{
        CoordinateStyle, capitalize, compass_sector, coordinates_label, round_half_up, time_12h,
        time_12h_seconds, wind_speed,
    },
    hebrew::hebrew_date,
    model::{
        Coordinates, DisplayViewModel, GeocodeResult, HourlyRow, Locale, SunTimes,
        TemperatureBlock, UnitPreference, WindBlock,
    },
    snapshot::{DailyPoint, FlatSnapshot, HourlyPoint, OneCallSnapshot, WeatherSnapshot},
    zone::LocalZone,
};

pub const DAY_SECONDS: i64 = 86_400;

/// Presentation options that don't change per request.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblerSettings {
    pub locale: Locale,
    pub coordinate_style: CoordinateStyle,
    /// Template with an `{icon}` placeholder.
    pub icon_url: String,
}

impl Default for AssemblerSettings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            coordinate_style: CoordinateStyle::default(),
            icon_url: Endpoints::default().icon_url,
        }
    }
}

/// Shape-independent current conditions.
struct Conditions<'a> {
    coordinates: Coordinates,
    description: &'a str,
    icon: Option<&'a str>,
    temp: f64,
    feels_like: f64,
    min_max: Option<(f64, f64)>,
    humidity: f64,
    clouds: f64,
    pressure: f64,
    visibility_m: Option<f64>,
    wind_speed: Option<f64>,
    wind_deg: Option<f64>,
    wind_gust: Option<f64>,
    observed: i64,
    sunrise: i64,
    sunset: i64,
    zone: LocalZone,
    timezone_name: Option<&'a str>,
    hourly: Vec<&'a HourlyPoint>,
}

fn flat_conditions(flat: &FlatSnapshot) -> Conditions<'_> {
    let condition = flat.weather.first();
    Conditions {
        coordinates: flat.coord,
        description: condition.map(|c| c.description.as_str()).unwrap_or_default(),
        icon: condition.map(|c| c.icon.as_str()),
        temp: flat.main.temp,
        feels_like: flat.main.feels_like,
        min_max: Some((flat.main.temp_min, flat.main.temp_max)),
        humidity: flat.main.humidity,
        clouds: flat.clouds.all,
        pressure: flat.main.pressure,
        visibility_m: flat.visibility,
        wind_speed: flat.wind.speed,
        wind_deg: flat.wind.deg,
        wind_gust: flat.wind.gust,
        observed: flat.dt,
        sunrise: flat.sys.sunrise,
        sunset: flat.sys.sunset,
        zone: LocalZone::fixed(flat.timezone),
        timezone_name: None,
        hourly: Vec::new(),
    }
}

fn one_call_conditions(one: &OneCallSnapshot, reference_date: Option<NaiveDate>) -> Conditions<'_> {
    let current = &one.current;
    let condition = current.weather.first();
    let zone = LocalZone::new(&one.timezone, one.timezone_offset);
    let day = reference_date.and_then(|date| day_entry(one, &zone, date));
    let (sunrise, sunset) = day.map_or((current.sunrise, current.sunset), |d| (d.sunrise, d.sunset));
    let min_max = day.or(one.daily.first()).map(|d| (d.temp.min, d.temp.max));

    Conditions {
        coordinates: Coordinates { lat: one.lat, lon: one.lon },
        description: condition.map(|c| c.description.as_str()).unwrap_or_default(),
        icon: condition.map(|c| c.icon.as_str()),
        temp: current.temp,
        feels_like: current.feels_like,
        min_max,
        humidity: current.humidity,
        clouds: current.clouds,
        pressure: current.pressure,
        visibility_m: current.visibility,
        wind_speed: current.wind_speed,
        wind_deg: current.wind_deg,
        wind_gust: current.wind_gust,
        observed: current.dt,
        sunrise,
        sunset,
        zone,
        timezone_name: Some(one.timezone.as_str()).filter(|tz| !tz.is_empty()),
        hourly: daylight_hours(&one.hourly, sunrise, sunset),
    }
}

/// Daily entry whose location-local date is `date`.
fn day_entry<'a>(
    one: &'a OneCallSnapshot,
    zone: &LocalZone,
    date: NaiveDate,
) -> Option<&'a DailyPoint> {
    one.daily
        .iter()
        .find(|d| zone.local_time(d.dt).map(|t| t.date()) == Some(date))
}

/// Hourly points inside `[sunrise, sunset]`; when there are none (asked
/// after sunset), the same window one day later.
pub fn daylight_hours(hourly: &[HourlyPoint], sunrise: i64, sunset: i64) -> Vec<&HourlyPoint> {
    let within = |start: i64, end: i64| {
        hourly.iter().filter(|p| (start..=end).contains(&p.dt)).collect::<Vec<_>>()
    };

    let rows = within(sunrise, sunset);
    if !rows.is_empty() {
        return rows;
    }
    within(sunrise + DAY_SECONDS, sunset + DAY_SECONDS)
}

pub fn assemble(
    geo: &GeocodeResult,
    snapshot: &WeatherSnapshot,
    units: UnitPreference,
    reference_date: Option<NaiveDate>,
    settings: &AssemblerSettings,
) -> DisplayViewModel {
    let conditions = match snapshot {
        WeatherSnapshot::Flat(flat) => flat_conditions(flat),
        WeatherSnapshot::CurrentHourly(one) => one_call_conditions(one, reference_date),
    };
    build(geo, &conditions, units, reference_date, settings)
}

fn build(
    geo: &GeocodeResult,
    c: &Conditions<'_>,
    units: UnitPreference,
    reference_date: Option<NaiveDate>,
    settings: &AssemblerSettings,
) -> DisplayViewModel {
    let symbol = units.temperature_symbol();
    let temperature = |value: f64| format!("{}{symbol}", round_half_up(value));
    let clock = |epoch: i64| c.zone.local_time(epoch).map(|t| time_12h(&t)).unwrap_or_default();

    let day = reference_date.or_else(|| c.zone.local_time(c.observed).map(|t| t.date()));
    let date = day.map(|d| d.format("%A, %B %-d, %Y").to_string()).unwrap_or_default();

    // offset in effect on the displayed day, not at observation time
    let instant = reference_date.and_then(|d| c.zone.noon_on(d)).unwrap_or(c.observed);
    let offset = c.zone.describe_at(instant);
    let timezone = match c.timezone_name {
        Some(name) => format!("{name} ({offset})"),
        None => offset,
    };

    let sunrise = clock(c.sunrise);
    let sunset = clock(c.sunset);

    DisplayViewModel {
        city: geo.display_name(&settings.locale),
        coordinates: coordinates_label(c.coordinates.lat, c.coordinates.lon, settings.coordinate_style),
        bearing: bearing_label(bearing_to_reference(c.coordinates)),
        date,
        hebrew_date: day.and_then(hebrew_date).unwrap_or_default(),
        timezone,
        temperature: TemperatureBlock {
            current: temperature(c.temp),
            feels_like: temperature(c.feels_like),
            min_max: c.min_max.map(|(min, max)| format!("{} / {}", temperature(min), temperature(max))),
            description: capitalize(c.description),
        },
        humidity: format!("{}%", c.humidity),
        clouds: format!("{}%", c.clouds),
        pressure: format!("{} mb", c.pressure),
        visibility: c.visibility_m.map(|m| format!("{} km", round_half_up(m / 1000.0))),
        wind: wind_block(c, units),
        sun: SunTimes { label: format!("{sunrise} / {sunset}"), sunrise, sunset },
        observed_at: c
            .zone
            .local_time(c.observed)
            .map(|t| time_12h_seconds(&t))
            .unwrap_or_default(),
        icon_url: c
            .icon
            .filter(|icon| !icon.is_empty())
            .map(|icon| settings.icon_url.replace("{icon}", icon)),
        hourly: c
            .hourly
            .iter()
            .map(|p| HourlyRow {
                time: clock(p.dt),
                temperature: temperature(p.temp),
                pressure: format!("{} mb", p.pressure),
            })
            .collect(),
    }
}

fn wind_block(c: &Conditions<'_>, units: UnitPreference) -> WindBlock {
    let speed = c.wind_speed.map(|s| wind_speed(s, units)).unwrap_or_default();
    let direction = c.wind_deg.map(|d| compass_sector(d).to_string());
    // a zero gust is reported as no gust
    let gust = c.wind_gust.filter(|g| *g != 0.0).map(|g| wind_speed(g, units));

    let mut label = [speed.as_str(), direction.as_deref().unwrap_or_default()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(gust) = &gust {
        label.push_str(&format!(" • Gusts: {gust}"));
    }

    WindBlock { speed, direction, gust, label }
}
