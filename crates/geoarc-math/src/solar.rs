//! Low-precision solar position used to orient the day/night terminator.
//!
//! Mean anomaly and equation-of-center series follow the usual almanac
//! approximation. Right ascension is approximated by mapping the UTC time of
//! day linearly onto a full turn, which is enough to place the sub-solar
//! meridian for shading but is not the astronomical right ascension.

use std::f64::consts::PI;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::map::linear_map;

const RAD: f64 = PI / 180.0;
/// Obliquity of the ecliptic.
const OBLIQUITY: f64 = RAD * 23.439281;
const DAY_MS: f64 = 1000.0 * 60.0 * 60.0 * 24.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const J1970: f64 = 2_440_588.0;
const J2000: f64 = 2_451_545.0;

/// Solar coordinates for a wall-clock instant. All angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarPosition {
    pub ecliptic_longitude: f64,
    pub declination: f64,
    pub right_ascension: f64,
}

impl SolarPosition {
    pub fn compute(date: DateTime<Utc>) -> Self {
        let days = days_since_j2000(date);
        let ecliptic_longitude = ecliptic_longitude(solar_mean_anomaly(days));
        let seconds_today = date.num_seconds_from_midnight() as f64;

        Self {
            ecliptic_longitude,
            declination: declination(ecliptic_longitude, 0.0),
            right_ascension: linear_map(seconds_today, 0.0, SECONDS_PER_DAY, 0.0, 2.0 * PI),
        }
    }

    pub fn now() -> Self {
        Self::compute(Utc::now())
    }

    pub fn declination_degrees(&self) -> f64 {
        self.declination.to_degrees()
    }
}

fn to_julian(date: DateTime<Utc>) -> f64 {
    date.timestamp_millis() as f64 / DAY_MS - 0.5 + J1970
}

fn days_since_j2000(date: DateTime<Utc>) -> f64 {
    to_julian(date) - J2000
}

fn solar_mean_anomaly(days: f64) -> f64 {
    RAD * (357.5291 + 0.98560028 * days)
}

fn ecliptic_longitude(m: f64) -> f64 {
    let center = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    let perihelion = RAD * 102.9372;
    m + center + perihelion + PI
}

/// Declination for ecliptic longitude `l` and latitude `b`.
fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    #[test]
    fn test_december_solstice() {
        let date = Utc.with_ymd_and_hms(2024, 12, 21, 12, 0, 0).unwrap();
        let sun = SolarPosition::compute(date);
        assert_abs_diff_eq!(sun.declination_degrees(), -23.44, epsilon = 0.5);
    }

    #[test]
    fn test_june_solstice() {
        let date = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
        let sun = SolarPosition::compute(date);
        assert_abs_diff_eq!(sun.declination_degrees(), 23.44, epsilon = 0.5);
    }

    #[test]
    fn test_equinox_near_zero() {
        let date = Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap();
        let sun = SolarPosition::compute(date);
        assert_abs_diff_eq!(sun.declination_degrees(), 0.0, epsilon = 0.5);
    }

    #[test]
    fn test_right_ascension_tracks_time_of_day() {
        let midnight = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let six_pm = Utc.with_ymd_and_hms(2025, 1, 1, 18, 0, 0).unwrap();
        assert_eq!(SolarPosition::compute(midnight).right_ascension, 0.0);
        assert_abs_diff_eq!(SolarPosition::compute(noon).right_ascension, PI, epsilon = 1e-12);
        assert_abs_diff_eq!(
            SolarPosition::compute(six_pm).right_ascension,
            1.5 * PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_j2000_epoch() {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_abs_diff_eq!(days_since_j2000(epoch), 0.0, epsilon = 1e-9);
    }
}
