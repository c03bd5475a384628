//! UTC offsets for a location.
//!
//! A named IANA zone is resolved with its own rules, so dates on the other
//! side of a DST switch get their own offset. Without a usable name the fixed
//! offset the provider reported is used everywhere.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::{OffsetComponents, Tz};

use crate::format::{local_time, utc_offset_label};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalZone {
    zone: Option<Tz>,
    fallback_offset: i64,
}

impl LocalZone {
    /// Zone named `name` (e.g. `Asia/Jerusalem`), falling back to
    /// `fallback_offset` seconds when the name is empty or unknown.
    pub fn new(name: &str, fallback_offset: i64) -> Self {
        let zone = match name.trim() {
            "" => None,
            name => match name.parse::<Tz>() {
                Ok(tz) => Some(tz),
                Err(_) => {
                    tracing::debug!(zone = name, "Unknown timezone, using fixed offset");
                    None
                }
            },
        };
        Self { zone, fallback_offset }
    }

    pub fn fixed(offset_seconds: i64) -> Self {
        Self { zone: None, fallback_offset: offset_seconds }
    }

    /// Offset in seconds in effect at `epoch_seconds`.
    pub fn offset_at(&self, epoch_seconds: i64) -> i64 {
        match (self.zone, DateTime::from_timestamp(epoch_seconds, 0)) {
            (Some(tz), Some(utc)) => {
                tz.offset_from_utc_datetime(&utc.naive_utc()).fix().local_minus_utc() as i64
            }
            _ => self.fallback_offset,
        }
    }

    /// Wall-clock time at `epoch_seconds`.
    pub fn local_time(&self, epoch_seconds: i64) -> Option<NaiveDateTime> {
        local_time(epoch_seconds, self.offset_at(epoch_seconds))
    }

    /// Instant of local noon on `date`.
    pub fn noon_on(&self, date: NaiveDate) -> Option<i64> {
        let noon = date.and_hms_opt(12, 0, 0)?;
        match self.zone {
            Some(tz) => tz.from_local_datetime(&noon).earliest().map(|dt| dt.timestamp()),
            None => Some(noon.and_utc().timestamp() - self.fallback_offset),
        }
    }

    /// `UTC+03:00, daylight time` for a named zone, `UTC+03:00` otherwise.
    pub fn describe_at(&self, epoch_seconds: i64) -> String {
        let offset = utc_offset_label(self.offset_at(epoch_seconds));
        let Some((tz, utc)) = self.zone.zip(DateTime::from_timestamp(epoch_seconds, 0)) else {
            return offset;
        };

        let dst = tz.offset_from_utc_datetime(&utc.naive_utc()).dst_offset() != TimeDelta::zero();
        if dst {
            format!("{offset}, daylight time")
        } else {
            format!("{offset}, standard time")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-03-10 12:00 UTC and 2024-04-09 12:00 UTC, either side of
    // Israel's 2024-03-29 switch to summer time.
    const MARCH: i64 = 1_710_072_000;
    const APRIL: i64 = 1_712_664_000;

    #[test]
    fn named_zone_follows_dst() {
        let zone = LocalZone::new("Asia/Jerusalem", 7_200);

        assert_eq!(zone.offset_at(MARCH), 7_200);
        assert_eq!(zone.offset_at(APRIL), 10_800);
        assert_eq!(zone.describe_at(MARCH), "UTC+02:00, standard time");
        assert_eq!(zone.describe_at(APRIL), "UTC+03:00, daylight time");
    }

    #[test]
    fn unknown_or_missing_zone_uses_fixed_offset() {
        for zone in [LocalZone::new("Mars/Olympus", 7_200), LocalZone::new("", 7_200)] {
            assert_eq!(zone.offset_at(APRIL), 7_200);
            assert_eq!(zone.describe_at(APRIL), "UTC+02:00");
        }
    }

    #[test]
    fn noon_on_date_uses_that_dates_offset() {
        let zone = LocalZone::new("Asia/Jerusalem", 7_200);
        let april_9 = NaiveDate::from_ymd_opt(2024, 4, 9).unwrap();

        // 12:00 IDT is 09:00 UTC
        assert_eq!(zone.noon_on(april_9), Some(APRIL - 3 * 3_600));
        assert_eq!(LocalZone::fixed(7_200).noon_on(april_9), Some(APRIL - 2 * 3_600));
    }

    #[test]
    fn local_time_uses_offset_of_the_instant() {
        let zone = LocalZone::new("Asia/Jerusalem", 7_200);
        let t = zone.local_time(APRIL).unwrap();
        assert_eq!(t.format("%H:%M").to_string(), "15:00");
    }
}
