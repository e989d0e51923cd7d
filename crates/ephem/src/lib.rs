//! Ephemeris provider interface and an analytic implementation for the viewer.
//!
//! Every vector crossing this interface is expressed in J2000 equatorial axes
//! (+Z toward the celestial north pole) in astronomical units. Times are Unix
//! milliseconds, the same representation the simulation clock carries.

use sky_core::vector::Vector3;
use thiserror::Error;

pub mod analytic;
pub mod bodies;
pub mod horizon;
pub mod sidereal;

pub use analytic::AnalyticEphemeris;
pub use bodies::{BODY_CATALOG, Body, BodyDescriptor};
pub use horizon::Horizon;

/// Errors surfaced while querying an ephemeris provider.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("epoch JD {jd:.3} is outside the provider's validity window [{min_jd:.1}, {max_jd:.1}]")]
    OutOfRange { jd: f64, min_jd: f64, max_jd: f64 },
    #[error("body `{body}` is not supported for {operation}")]
    UnsupportedBody {
        body: &'static str,
        operation: &'static str,
    },
    #[error("unknown body name `{0}`")]
    UnknownBody(String),
}

/// Geographic location of the observer on Earth's surface.
///
/// Values are validated at the configuration boundary; the provider trusts them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl Observer {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    /// Elevation above the reference ellipsoid; always sea level for this viewer.
    pub fn elevation_m(&self) -> f64 {
        0.0
    }
}

/// Source of body positions, sidereal time, and local horizon coordinates.
///
/// Implementations must be deterministic: identical inputs give identical outputs.
pub trait EphemerisProvider {
    /// Sun-centred position of `body` (AU, J2000 equatorial).
    fn helio_vector(&self, body: Body, time_ms: f64) -> Result<Vector3, EphemerisError>;

    /// Earth-centred position of `body` (AU, J2000 equatorial).
    fn geo_vector(&self, body: Body, time_ms: f64) -> Result<Vector3, EphemerisError>;

    /// Greenwich sidereal time in hours, `[0, 24)`.
    fn sidereal_time(&self, time_ms: f64) -> Result<f64, EphemerisError>;

    /// Altitude and azimuth of `body` as seen by `observer`.
    fn horizon(
        &self,
        observer: &Observer,
        body: Body,
        time_ms: f64,
    ) -> Result<Horizon, EphemerisError> {
        if body == Body::Earth {
            return Err(EphemerisError::UnsupportedBody {
                body: body.name(),
                operation: "horizon coordinates",
            });
        }
        let geo = self.geo_vector(body, time_ms)?;
        let gst_hours = self.sidereal_time(time_ms)?;
        Ok(horizon::from_equatorial(&geo, gst_hours, observer))
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for Box<P> {
    fn helio_vector(&self, body: Body, time_ms: f64) -> Result<Vector3, EphemerisError> {
        (**self).helio_vector(body, time_ms)
    }

    fn geo_vector(&self, body: Body, time_ms: f64) -> Result<Vector3, EphemerisError> {
        (**self).geo_vector(body, time_ms)
    }

    fn sidereal_time(&self, time_ms: f64) -> Result<f64, EphemerisError> {
        (**self).sidereal_time(time_ms)
    }

    fn horizon(
        &self,
        observer: &Observer,
        body: Body,
        time_ms: f64,
    ) -> Result<Horizon, EphemerisError> {
        (**self).horizon(observer, body, time_ms)
    }
}
