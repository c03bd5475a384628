//! Display formatting for raw provider numbers.
//!
//! Every function here is pure and total over finite input.

use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::model::UnitPreference;

const SECTORS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// How coordinates are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateStyle {
    /// `D°MM'SS"H`
    #[default]
    Seconds,
    /// `D°MM'H`
    Minutes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn hemisphere(self, value: f64) -> char {
        match (self, value < 0.0) {
            (Axis::Latitude, false) => 'N',
            (Axis::Latitude, true) => 'S',
            (Axis::Longitude, false) => 'E',
            (Axis::Longitude, true) => 'W',
        }
    }
}

/// Round to the nearest integer, halves towards positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn latitude(value: f64, style: CoordinateStyle) -> String {
    coordinate(value, Axis::Latitude, style)
}

pub fn longitude(value: f64, style: CoordinateStyle) -> String {
    coordinate(value, Axis::Longitude, style)
}

/// `"<lat> <lon>"` in the chosen style.
pub fn coordinates_label(lat: f64, lon: f64, style: CoordinateStyle) -> String {
    format!("{} {}", latitude(lat, style), longitude(lon, style))
}

fn coordinate(value: f64, axis: Axis, style: CoordinateStyle) -> String {
    let abs = value.abs();
    let mut degrees = abs.trunc() as i64;
    let fraction = abs - abs.trunc();
    let hemisphere = axis.hemisphere(value);

    match style {
        CoordinateStyle::Seconds => {
            let raw_minutes = fraction * 60.0;
            let mut minutes = raw_minutes.trunc() as i64;
            let mut seconds = round_half_up((raw_minutes - raw_minutes.trunc()) * 60.0);
            if seconds == 60 {
                seconds = 0;
                minutes += 1;
            }
            if minutes == 60 {
                minutes = 0;
                degrees += 1;
            }
            format!("{degrees}°{minutes:02}'{seconds:02}\"{hemisphere}")
        }
        CoordinateStyle::Minutes => {
            let mut minutes = round_half_up(fraction * 60.0);
            if minutes == 60 {
                minutes = 0;
                degrees += 1;
            }
            format!("{degrees}°{minutes:02}'{hemisphere}")
        }
    }
}

/// One of 16 compass sectors, each 22.5° wide with `N` centered on 0°.
pub fn compass_sector(degrees: f64) -> &'static str {
    let index = ((degrees + 11.25).rem_euclid(360.0) / 22.5).floor() as usize;
    SECTORS[index % SECTORS.len()]
}

/// Provider speed with the unit label.
///
/// The provider is queried in the target unit system, so only the metric
/// m/s value needs converting (to km/h).
pub fn wind_speed(speed: f64, units: UnitPreference) -> String {
    match units {
        UnitPreference::Metric => format!("{:.1} km/h", speed * 3.6),
        UnitPreference::Imperial => format!("{speed:.1} mph"),
    }
}

/// Location wall-clock time: the epoch shifted by the UTC offset and read
/// as UTC. Never consults the host timezone.
pub fn local_time(epoch_seconds: i64, utc_offset_seconds: i64) -> Option<NaiveDateTime> {
    let shifted = epoch_seconds.checked_add(utc_offset_seconds)?;
    DateTime::from_timestamp(shifted, 0).map(|dt| dt.naive_utc())
}

/// `H:MM` on a 12-hour clock, no AM/PM.
pub fn time_12h(time: &NaiveDateTime) -> String {
    format!("{}:{:02}", hour_12(time.hour()), time.minute())
}

/// `H:MM:SS` on a 12-hour clock, no AM/PM.
pub fn time_12h_seconds(time: &NaiveDateTime) -> String {
    format!("{}:{:02}:{:02}", hour_12(time.hour()), time.minute(), time.second())
}

fn hour_12(hour: u32) -> u32 {
    match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    }
}

/// `UTC+HH:MM` / `UTC-HH:MM`.
pub fn utc_offset_label(offset_seconds: i64) -> String {
    let minutes = offset_seconds / 60;
    let sign = if minutes >= 0 { '+' } else { '-' };
    let abs = minutes.abs();
    format!("UTC{sign}{:02}:{:02}", abs / 60, abs % 60)
}

/// Uppercase the first character only.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn seconds_style_latitude() {
        assert_eq!(latitude(31.7780, CoordinateStyle::Seconds), "31°46'41\"N");
    }

    #[test]
    fn seconds_style_negative_longitude() {
        assert_eq!(longitude(-35.2353, CoordinateStyle::Seconds), "35°14'07\"W");
    }

    #[test]
    fn minutes_style_rounds_minutes() {
        assert_eq!(latitude(31.7780, CoordinateStyle::Minutes), "31°47'N");
        assert_eq!(longitude(-35.2353, CoordinateStyle::Minutes), "35°14'W");
        assert_eq!(latitude(-33.8688, CoordinateStyle::Minutes), "33°52'S");
    }

    #[test]
    fn rounding_carries_into_next_unit() {
        // 0.99999° is 59'59.964", which rounds up to a full degree.
        assert_eq!(latitude(10.99999, CoordinateStyle::Seconds), "11°00'00\"N");
        assert_eq!(longitude(20.9999, CoordinateStyle::Minutes), "21°00'E");
    }

    #[test]
    fn hemisphere_follows_sign_below_one_degree() {
        assert_eq!(latitude(0.5, CoordinateStyle::Minutes), "0°30'N");
        assert_eq!(latitude(-0.5, CoordinateStyle::Minutes), "0°30'S");
    }

    #[test]
    fn compass_sector_boundaries() {
        assert_eq!(compass_sector(0.0), "N");
        assert_eq!(compass_sector(11.24), "N");
        assert_eq!(compass_sector(11.26), "NNE");
        assert_eq!(compass_sector(45.0), "NE");
        assert_eq!(compass_sector(180.0), "S");
        assert_eq!(compass_sector(348.74), "NNW");
        assert_eq!(compass_sector(348.76), "N");
        assert_eq!(compass_sector(360.0), "N");
        assert_eq!(compass_sector(-90.0), "W");
    }

    #[test]
    fn wind_speed_metric_converts_to_kmh() {
        assert_eq!(wind_speed(10.0, UnitPreference::Metric), "36.0 km/h");
    }

    #[test]
    fn wind_speed_imperial_is_not_converted() {
        assert_eq!(wind_speed(10.0, UnitPreference::Imperial), "10.0 mph");
    }

    #[test]
    fn local_time_shifts_by_offset() {
        // 2024-03-10 04:00:00 UTC, +2h
        let t = local_time(1_710_043_200, 7_200).unwrap();
        assert_eq!(t, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(6, 0, 0).unwrap());
    }

    #[test]
    fn twelve_hour_clock() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(time_12h(&day.and_hms_opt(0, 5, 0).unwrap()), "12:05");
        assert_eq!(time_12h(&day.and_hms_opt(9, 7, 0).unwrap()), "9:07");
        assert_eq!(time_12h(&day.and_hms_opt(12, 30, 0).unwrap()), "12:30");
        assert_eq!(time_12h(&day.and_hms_opt(17, 45, 0).unwrap()), "5:45");
        assert_eq!(time_12h_seconds(&day.and_hms_opt(18, 4, 9).unwrap()), "6:04:09");
    }

    #[test]
    fn utc_offset_labels() {
        assert_eq!(utc_offset_label(10_800), "UTC+03:00");
        assert_eq!(utc_offset_label(-16_200), "UTC-04:30");
        assert_eq!(utc_offset_label(0), "UTC+00:00");
    }

    #[test]
    fn capitalize_first_char_only() {
        assert_eq!(capitalize("light rain"), "Light rain");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    #[test]
    fn round_half_up_matches_display_rounding() {
        assert_eq!(round_half_up(21.5), 22);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }
}
