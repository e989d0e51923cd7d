//! Equatorial → horizontal coordinate conversion.

use sky_core::units::{hours_to_deg, wrap_deg_180, wrap_deg_360};
use sky_core::vector::{Vector3, norm};

use crate::Observer;
use crate::sidereal::local_sidereal_hours;

/// Observer-local sky position. Azimuth is measured from north through east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizon {
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
}

impl Horizon {
    /// Strictly above the mathematical horizon. An altitude of exactly zero counts as below.
    pub fn is_above_horizon(&self) -> bool {
        self.altitude_deg > 0.0
    }

    /// Sixteen-point compass label for the azimuth.
    pub fn compass_point(&self) -> &'static str {
        const POINTS: [&str; 16] = [
            "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
            "NW", "NNW",
        ];
        let idx = ((wrap_deg_360(self.azimuth_deg) + 11.25) / 22.5) as usize % POINTS.len();
        POINTS[idx]
    }
}

/// Right ascension (hours, `[0, 24)`) and declination (degrees) of a geocentric vector.
pub fn ra_dec(geo: &Vector3) -> (f64, f64) {
    let r = norm(geo);
    let ra_hours = geo[1].atan2(geo[0]).to_degrees().rem_euclid(360.0) / 15.0;
    let dec_deg = if r == 0.0 {
        0.0
    } else {
        (geo[2] / r).clamp(-1.0, 1.0).asin().to_degrees()
    };
    (ra_hours, dec_deg)
}

/// Local hour angle in degrees, `[-180, 180)`; positive west of the meridian.
pub fn hour_angle_deg(ra_hours: f64, gst_hours: f64, longitude_deg: f64) -> f64 {
    let lst = local_sidereal_hours(gst_hours, longitude_deg);
    wrap_deg_180(hours_to_deg(lst - ra_hours))
}

/// Convert a geocentric equatorial vector into altitude/azimuth for `observer`.
///
/// Refraction and topocentric parallax are ignored.
pub fn from_equatorial(geo: &Vector3, gst_hours: f64, observer: &Observer) -> Horizon {
    let (ra_hours, dec_deg) = ra_dec(geo);
    let h = hour_angle_deg(ra_hours, gst_hours, observer.longitude_deg).to_radians();
    let dec = dec_deg.to_radians();
    let lat = observer.latitude_deg.to_radians();

    let sin_alt = lat.sin() * dec.sin() + lat.cos() * dec.cos() * h.cos();
    let altitude_deg = sin_alt.clamp(-1.0, 1.0).asin().to_degrees();

    let y = -dec.cos() * h.sin();
    let x = dec.sin() * lat.cos() - dec.cos() * lat.sin() * h.cos();
    let azimuth_deg = wrap_deg_360(y.atan2(x).to_degrees());

    Horizon {
        altitude_deg,
        azimuth_deg,
    }
}
