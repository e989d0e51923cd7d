//! Core units, constants, and shared primitives for the Sky Viewer workspace.

/// Astronomical and calendar constants.
pub mod constants {
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 149_597_870.7;
    /// Milliseconds per Julian day.
    pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
    /// Days per Julian century.
    pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
    /// Days per Julian year.
    pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;
    /// Julian date of the J2000.0 epoch (2000-01-01T12:00:00 TT, treated as UTC here).
    pub const J2000_JD: f64 = 2_451_545.0;
    /// Julian date of the Unix epoch (1970-01-01T00:00:00 UTC).
    pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
    /// Mean obliquity of the ecliptic at J2000 (degrees).
    pub const OBLIQUITY_J2000_DEG: f64 = 23.439_28;
}

/// Angle conversion helpers.
pub mod units {
    /// Degrees of rotation per hour of sidereal or hour-angle time.
    pub const DEGREES_PER_HOUR: f64 = 15.0;

    /// Convert hours of angle into radians (`hours × 15° × π/180`).
    #[inline]
    pub fn hours_to_rad(hours: f64) -> f64 {
        (hours * DEGREES_PER_HOUR).to_radians()
    }

    /// Convert hours of angle into degrees.
    #[inline]
    pub fn hours_to_deg(hours: f64) -> f64 {
        hours * DEGREES_PER_HOUR
    }

    /// Convert kilometres to astronomical units.
    #[inline]
    pub fn km_to_au(v: f64) -> f64 {
        v / super::constants::AU_KM
    }

    /// Wrap an angle in degrees into `[0, 360)`.
    #[inline]
    pub fn wrap_deg_360(deg: f64) -> f64 {
        deg.rem_euclid(360.0)
    }

    /// Wrap an angle in degrees into `[-180, 180)`.
    #[inline]
    pub fn wrap_deg_180(deg: f64) -> f64 {
        (deg + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Time conversions between Unix milliseconds and Julian dates.
///
/// Simulated time is carried through the workspace as `f64` milliseconds since
/// the Unix epoch so clock arithmetic stays exact for whole-millisecond steps.
pub mod time {
    use super::constants::{
        DAYS_PER_JULIAN_CENTURY, DAYS_PER_JULIAN_YEAR, J2000_JD, MILLIS_PER_DAY, UNIX_EPOCH_JD,
    };

    /// Unix milliseconds of the J2000.0 epoch.
    pub const J2000_UNIX_MS: f64 = (J2000_JD - UNIX_EPOCH_JD) * MILLIS_PER_DAY;

    /// Convert Unix milliseconds to a Julian date.
    #[inline]
    pub fn unix_ms_to_jd(ms: f64) -> f64 {
        ms / MILLIS_PER_DAY + UNIX_EPOCH_JD
    }

    /// Days elapsed since J2000.0.
    #[inline]
    pub fn days_since_j2000(ms: f64) -> f64 {
        unix_ms_to_jd(ms) - J2000_JD
    }

    /// Julian centuries elapsed since J2000.0.
    #[inline]
    pub fn centuries_since_j2000(ms: f64) -> f64 {
        days_since_j2000(ms) / DAYS_PER_JULIAN_CENTURY
    }

    /// Julian years elapsed since J2000.0.
    #[inline]
    pub fn years_since_j2000(ms: f64) -> f64 {
        days_since_j2000(ms) / DAYS_PER_JULIAN_YEAR
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in AU or unitless depending on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product of two vectors.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Unit vector in the direction of `v`; the zero vector is returned unchanged.
    #[inline]
    pub fn normalize(v: &Vector3) -> Vector3 {
        let n = norm(v);
        if n == 0.0 { *v } else { scale(v, 1.0 / n) }
    }

    /// Angle between two vectors in radians, in `[0, π]`.
    pub fn angle_between(a: &Vector3, b: &Vector3) -> f64 {
        // atan2 of |a×b| and a·b stays accurate for nearly parallel vectors.
        norm(&cross(a, b)).atan2(dot(a, b))
    }

    /// Coordinate frame a [`CelestialVector`] is expressed in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Frame {
        /// Earth-centred, J2000 equatorial axes (+Z toward the celestial north pole).
        EquatorialGeocentric,
        /// Sun-centred, J2000 equatorial axes.
        EquatorialHeliocentric,
        /// Renderer scene axes (+Y up).
        Scene,
    }

    /// A position or direction tagged with the frame it lives in.
    ///
    /// Values are never mutated after construction; frame conversions build a new vector.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct CelestialVector {
        frame: Frame,
        xyz: Vector3,
    }

    impl CelestialVector {
        pub const fn new(frame: Frame, xyz: Vector3) -> Self {
            Self { frame, xyz }
        }

        pub fn frame(&self) -> Frame {
            self.frame
        }

        pub fn xyz(&self) -> Vector3 {
            self.xyz
        }

        pub fn length(&self) -> f64 {
            norm(&self.xyz)
        }
    }
}
