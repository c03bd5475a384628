//! Initial great-circle bearing towards a fixed reference point.

use crate::format::compass_sector;
use crate::model::Coordinates;

/// The point every bearing label is computed towards.
pub const REFERENCE_POINT: Coordinates = Coordinates { lat: 31.7780, lon: 35.2353 };

/// Initial bearing in degrees, `[0, 360)`, from the observer to the
/// reference coordinate on a sphere.
pub fn bearing_to(observer_lat: f64, observer_lon: f64, reference_lat: f64, reference_lon: f64) -> f64 {
    let lat1 = observer_lat.to_radians();
    let lat2 = reference_lat.to_radians();
    let d_lon = (reference_lon - observer_lon).to_radians();

    let y = d_lon.sin();
    let x = lat1.cos() * lat2.tan() - lat1.sin() * d_lon.cos();

    let degrees = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if degrees >= 360.0 { 0.0 } else { degrees }
}

/// Bearing from `observer` to [`REFERENCE_POINT`].
pub fn bearing_to_reference(observer: Coordinates) -> f64 {
    bearing_to(observer.lat, observer.lon, REFERENCE_POINT.lat, REFERENCE_POINT.lon)
}

/// `"<SECTOR> (<degrees>°)"`, e.g. `"ESE (112°)"`. Degrees are whole and in
/// `[0, 359]`.
pub fn bearing_label(bearing: f64) -> String {
    let degrees = (bearing.round() as i64).rem_euclid(360);
    format!("{} ({degrees}°)", compass_sector(bearing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn due_east_along_equator() {
        assert_abs_diff_eq!(bearing_to(0.0, 0.0, 0.0, 10.0), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn due_west_is_normalized_into_range() {
        assert_abs_diff_eq!(bearing_to(0.0, 10.0, 0.0, 0.0), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn due_north_and_south() {
        assert_abs_diff_eq!(bearing_to(10.0, 35.2353, 31.7780, 35.2353), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bearing_to(50.0, 35.2353, 31.7780, 35.2353), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn invariant_under_longitude_wrapping() {
        let base = bearing_to(40.7128, -74.0060, REFERENCE_POINT.lat, REFERENCE_POINT.lon);
        for k in [-2.0, -1.0, 1.0, 3.0] {
            let wrapped =
                bearing_to(40.7128, -74.0060 + 360.0 * k, REFERENCE_POINT.lat, REFERENCE_POINT.lon);
            assert_abs_diff_eq!(base, wrapped, epsilon = 1e-6);
        }
    }

    #[test]
    fn new_york_faces_east_north_east() {
        let bearing = bearing_to_reference(Coordinates { lat: 40.7128, lon: -74.0060 });
        assert!((50.0..60.0).contains(&bearing), "bearing was {bearing}");
        assert!(bearing_label(bearing).starts_with("NE ("));
    }

    #[test]
    fn label_wraps_near_north() {
        assert_eq!(bearing_label(359.7), "N (0°)");
        assert_eq!(bearing_label(359.4), "N (359°)");
        assert_eq!(bearing_label(112.4), "ESE (112°)");
    }

    #[test]
    fn result_is_always_in_range() {
        for lat in [-80.0, -30.0, 0.0, 30.0, 80.0] {
            for lon in [-179.0, -90.0, 0.0, 35.2353, 90.0, 179.0] {
                let b = bearing_to_reference(Coordinates { lat, lon });
                assert!((0.0..360.0).contains(&b), "{lat},{lon} -> {b}");
            }
        }
    }
}
