//! Greenwich mean sidereal time.
//!
//! UT1 is taken equal to UTC; the sub-second difference is far below what the
//! viewer can show.

use sky_core::constants::DAYS_PER_JULIAN_CENTURY;
use sky_core::time::days_since_j2000;
use sky_core::units::{DEGREES_PER_HOUR, wrap_deg_360};

pub const GMST_BASE_DEG: f64 = 280.460_618_37;
pub const GMST_ROTATION_PER_DAY_DEG: f64 = 360.985_647_366_29;
pub const GMST_CORRECTION_DEG: f64 = 0.000_387_933;

/// Greenwich mean sidereal time in degrees, `[0, 360)`.
pub fn gmst_deg(time_ms: f64) -> f64 {
    let d = days_since_j2000(time_ms);
    let t = d / DAYS_PER_JULIAN_CENTURY;
    let gmst = GMST_BASE_DEG + GMST_ROTATION_PER_DAY_DEG * d + GMST_CORRECTION_DEG * t * t
        - t * t * t / 38_710_000.0;
    wrap_deg_360(gmst)
}

/// Greenwich mean sidereal time in hours, `[0, 24)`.
pub fn gmst_hours(time_ms: f64) -> f64 {
    gmst_deg(time_ms) / DEGREES_PER_HOUR
}

/// Local sidereal time in hours for an east-positive longitude.
pub fn local_sidereal_hours(gst_hours: f64, longitude_deg: f64) -> f64 {
    (gst_hours + longitude_deg / DEGREES_PER_HOUR).rem_euclid(24.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sky_core::time::J2000_UNIX_MS;

    #[test]
    fn gmst_at_j2000_noon() {
        let hours = gmst_hours(J2000_UNIX_MS);
        assert!((hours - 18.697_374_558).abs() < 1e-6, "GMST = {hours}");
    }

    #[test]
    fn gmst_gains_about_four_minutes_per_solar_day() {
        let a = gmst_hours(J2000_UNIX_MS);
        let b = gmst_hours(J2000_UNIX_MS + 86_400_000.0);
        let gain_minutes = (b - a).rem_euclid(24.0) * 60.0;
        assert!((gain_minutes - 3.943).abs() < 0.01, "gain = {gain_minutes}");
    }

    #[test]
    fn local_sidereal_wraps() {
        assert!((local_sidereal_hours(23.0, 30.0) - 1.0).abs() < 1e-12);
        assert!((local_sidereal_hours(1.0, -30.0) - 23.0).abs() < 1e-12);
    }
}
