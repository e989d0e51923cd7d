use std::f64::consts::FRAC_PI_2;

use sky_viewer::core::vector::Vector3;
use sky_viewer::ephemeris::{
    AnalyticEphemeris, Body, EphemerisError, EphemerisProvider, Horizon, Observer,
};
use sky_viewer::sim::panels::PanelError;
use sky_viewer::sim::panels::earth::{
    derive_orientation, is_daylight, overlay_lines, spin_angle_rad, subsolar_longitude_deg,
};

/// Fixed Sun direction and sidereal time.
struct FixedSky {
    sun_geo: Vector3,
    gst_hours: f64,
}

impl EphemerisProvider for FixedSky {
    fn helio_vector(&self, body: Body, _time_ms: f64) -> Result<Vector3, EphemerisError> {
        match body {
            Body::Sun => Ok([0.0; 3]),
            Body::Earth => Ok([-self.sun_geo[0], -self.sun_geo[1], -self.sun_geo[2]]),
            other => Err(EphemerisError::UnsupportedBody {
                body: other.name(),
                operation: "fixed sky",
            }),
        }
    }

    fn geo_vector(&self, body: Body, _time_ms: f64) -> Result<Vector3, EphemerisError> {
        match body {
            Body::Sun => Ok(self.sun_geo),
            other => Err(EphemerisError::UnsupportedBody {
                body: other.name(),
                operation: "fixed sky",
            }),
        }
    }

    fn sidereal_time(&self, _time_ms: f64) -> Result<f64, EphemerisError> {
        Ok(self.gst_hours)
    }
}

const JUNE_SOLSTICE_NOON_MS: f64 = 1_718_971_200_000.0;

#[test]
fn spin_follows_negative_sidereal_angle_plus_texture_offset() {
    assert!((spin_angle_rad(6.0, 0.0) + FRAC_PI_2).abs() < 1e-12);
    assert!(spin_angle_rad(6.0, 90.0).abs() < 1e-12);
    assert!(spin_angle_rad(0.0, 0.0).abs() < 1e-12);
}

#[test]
fn sun_on_the_local_meridian_is_overhead_at_the_equator() {
    // RA 6h, Dec 0; GST 6h puts it on the Greenwich meridian.
    let sky = FixedSky {
        sun_geo: [0.0, 1.0, 0.0],
        gst_hours: 6.0,
    };
    let observer = Observer::new(0.0, 0.0);
    let orientation = derive_orientation(&sky, 0.0, &observer, 0.0).unwrap();

    assert!((orientation.sun_horizon.altitude_deg - 90.0).abs() < 1e-9);
    assert!(orientation.daylight);
    assert!(orientation.subsolar_longitude_deg.abs() < 1e-9);
    assert!(orientation.subsolar_latitude_deg.abs() < 1e-9);
    assert!((orientation.sun_direction[2] + 1.0).abs() < 1e-12);
    assert!((orientation.spin_angle_rad + FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn sun_on_the_antimeridian_means_night() {
    let sky = FixedSky {
        sun_geo: [0.0, 1.0, 0.0],
        gst_hours: 18.0,
    };
    let observer = Observer::new(0.0, 0.0);
    let orientation = derive_orientation(&sky, 0.0, &observer, 0.0).unwrap();

    assert!((orientation.sun_horizon.altitude_deg + 90.0).abs() < 1e-9);
    assert!(!orientation.daylight);
    assert!((orientation.subsolar_longitude_deg.abs() - 180.0).abs() < 1e-9);
}

#[test]
fn subsolar_longitude_moves_west_as_sidereal_time_grows() {
    assert!((subsolar_longitude_deg(7.0, 6.0) + 15.0).abs() < 1e-9);
    assert!((subsolar_longitude_deg(5.0, 6.0) - 15.0).abs() < 1e-9);
}

#[test]
fn altitude_exactly_zero_counts_as_night() {
    let on_horizon = Horizon {
        altitude_deg: 0.0,
        azimuth_deg: 90.0,
    };
    assert!(!is_daylight(&on_horizon));
    assert!(is_daylight(&Horizon {
        altitude_deg: 0.1,
        azimuth_deg: 90.0,
    }));
    assert!(!is_daylight(&Horizon {
        altitude_deg: -0.1,
        azimuth_deg: 270.0,
    }));
}

#[test]
fn june_solstice_noon_over_greenwich() {
    let provider = AnalyticEphemeris::default();
    let observer = Observer::new(51.4779, -0.0015);
    let orientation = derive_orientation(&provider, JUNE_SOLSTICE_NOON_MS, &observer, 0.0).unwrap();

    assert!(orientation.daylight);
    assert!((orientation.subsolar_latitude_deg - 23.44).abs() < 0.3);
    assert!(orientation.subsolar_longitude_deg.abs() < 3.0);
    assert!((orientation.sun_horizon.altitude_deg - 62.0).abs() < 1.5);
    assert_eq!(orientation.sun_horizon.compass_point(), "S");
    // The Sun sits north of the equator, so scene +Y is positive.
    assert!(orientation.sun_direction[1] > 0.3);

    let lines = overlay_lines(&orientation, &observer, JUNE_SOLSTICE_NOON_MS);
    assert_eq!(lines[0], "Time: 2024-06-21 12:00:00 UTC");
    assert!(lines.iter().any(|l| l == "Local sky: day"));
}

#[test]
fn provider_failure_becomes_an_earth_panel_error() {
    let provider = AnalyticEphemeris::default();
    let observer = Observer::new(0.0, 0.0);
    let year_2100_ms = 4_102_444_800_000.0;
    let err = derive_orientation(&provider, year_2100_ms, &observer, 0.0).unwrap_err();
    match err {
        PanelError::Computation { panel, source } => {
            assert_eq!(panel, "earth");
            assert!(matches!(source, EphemerisError::OutOfRange { .. }));
        }
    }
}
