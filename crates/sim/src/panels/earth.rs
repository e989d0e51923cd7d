//! Earth orientation and local Sun geometry.
//!
//! Spin follows Greenwich sidereal time: `spin = −GST·15° + texture_offset`.
//! As sidereal time grows the globe turns eastward under a fixed sky. Seasons
//! come from the provider's equatorial frame, so no separate axial tilt is
//! applied to the mesh. The subsolar longitude is derived from the Sun's hour
//! angle and only reported; it never feeds the spin.

use sky_core::units::hours_to_rad;
use sky_core::vector::{CelestialVector, Frame, Vector3, normalize};
use sky_ephem::horizon::ra_dec;
use sky_ephem::{Body, EphemerisProvider, Horizon, Observer};

use crate::clock::format_sim_time;
use crate::mapper::CoordinateMapper;
use crate::panels::PanelError;

/// Everything the Earth panel derives for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthOrientation {
    /// Unit vector from Earth toward the Sun, scene frame.
    pub sun_direction: Vector3,
    /// Rotation of the globe about scene +Y, radians.
    pub spin_angle_rad: f64,
    pub sidereal_hours: f64,
    pub subsolar_longitude_deg: f64,
    /// Equal to the Sun's declination.
    pub subsolar_latitude_deg: f64,
    pub sun_horizon: Horizon,
    pub daylight: bool,
}

/// Spin angle about the polar axis from sidereal time and the texture meridian offset.
pub fn spin_angle_rad(sidereal_hours: f64, texture_offset_deg: f64) -> f64 {
    -hours_to_rad(sidereal_hours) + texture_offset_deg.to_radians()
}

/// Longitude (east-positive, `(-180, 180]`) where the Sun is overhead.
pub fn subsolar_longitude_deg(gst_hours: f64, sun_ra_hours: f64) -> f64 {
    -(((gst_hours - sun_ra_hours) * 15.0 + 540.0).rem_euclid(360.0) - 180.0)
}

/// Daylight means the Sun is strictly above the horizon; exactly zero is night.
pub fn is_daylight(sun: &Horizon) -> bool {
    sun.is_above_horizon()
}

/// Derive the Earth panel state at `time_ms`.
pub fn derive_orientation<P: EphemerisProvider + ?Sized>(
    provider: &P,
    time_ms: f64,
    observer: &Observer,
    texture_offset_deg: f64,
) -> Result<EarthOrientation, PanelError> {
    let wrap = |err| PanelError::computation("earth", err);

    let sun_geo = provider.geo_vector(Body::Sun, time_ms).map_err(wrap)?;
    let sidereal_hours = provider.sidereal_time(time_ms).map_err(wrap)?;
    let sun_horizon = provider
        .horizon(observer, Body::Sun, time_ms)
        .map_err(wrap)?;

    let scene = CoordinateMapper::to_scene(
        &CelestialVector::new(Frame::EquatorialGeocentric, sun_geo),
        1.0,
    );
    let (sun_ra_hours, sun_dec_deg) = ra_dec(&sun_geo);

    Ok(EarthOrientation {
        sun_direction: normalize(&scene.xyz()),
        spin_angle_rad: spin_angle_rad(sidereal_hours, texture_offset_deg),
        sidereal_hours,
        subsolar_longitude_deg: subsolar_longitude_deg(sidereal_hours, sun_ra_hours),
        subsolar_latitude_deg: sun_dec_deg,
        sun_horizon,
        daylight: is_daylight(&sun_horizon),
    })
}

/// Overlay text for the Earth panel.
pub fn overlay_lines(orientation: &EarthOrientation, observer: &Observer, time_ms: f64) -> Vec<String> {
    let gst = orientation.sidereal_hours;
    let gst_h = gst.floor();
    let gst_m = ((gst - gst_h) * 60.0).floor();
    vec![
        format!("Time: {}", format_sim_time(time_ms)),
        format!(
            "Observer: {:.3}°, {:.3}°",
            observer.latitude_deg, observer.longitude_deg
        ),
        format!("Sidereal time (GST): {:02}h {:02}m", gst_h as u32, gst_m as u32),
        format!(
            "Sun: alt {:.1}°, az {:.1}° ({})",
            orientation.sun_horizon.altitude_deg,
            orientation.sun_horizon.azimuth_deg,
            orientation.sun_horizon.compass_point()
        ),
        format!(
            "Local sky: {}",
            if orientation.daylight { "day" } else { "night" }
        ),
        format!(
            "Subsolar point: {:.2}°, {:.2}°",
            orientation.subsolar_latitude_deg, orientation.subsolar_longitude_deg
        ),
    ]
}
