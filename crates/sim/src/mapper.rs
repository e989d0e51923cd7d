//! Fixed mapping from ephemeris axes into renderer scene axes.
//!
//! | scene axis          | source axis                              |
//! |---------------------|------------------------------------------|
//! | +X                  | +X (toward the March equinox)            |
//! | +Y (up)             | +Z (celestial north pole)                |
//! | +Z (toward viewer)  | −Y                                       |
//!
//! The matrix is a proper rotation (determinant +1), so the right-handed
//! equatorial frame lands in a right-handed Y-up scene frame and every angle
//! and distance ratio survives the trip. Uniform scaling is applied after the
//! permutation.

use sky_core::vector::{CelestialVector, Frame, Vector3, scale};

/// Scene units per astronomical unit for heliocentric positions.
pub const AU_SCENE_SCALE: f64 = 1.0;

/// Boundary translator between ephemeris frames and the scene frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateMapper;

impl CoordinateMapper {
    /// Permute raw ephemeris axes into scene axes without scaling.
    #[inline]
    pub fn permute(v: &Vector3) -> Vector3 {
        [v[0], v[2], -v[1]]
    }

    /// Inverse of [`CoordinateMapper::permute`].
    #[inline]
    pub fn unpermute(v: &Vector3) -> Vector3 {
        [v[0], -v[2], v[1]]
    }

    /// Map `v` into the scene frame and scale it uniformly.
    ///
    /// A vector already in the scene frame is only scaled.
    pub fn to_scene(v: &CelestialVector, scale_factor: f64) -> CelestialVector {
        let xyz = match v.frame() {
            Frame::Scene => v.xyz(),
            _ => Self::permute(&v.xyz()),
        };
        CelestialVector::new(Frame::Scene, scale(&xyz, scale_factor))
    }

    /// Map a scene-frame vector back into `frame`, undoing `scale_factor`.
    pub fn from_scene(v: &CelestialVector, scale_factor: f64, frame: Frame) -> CelestialVector {
        let unscaled = scale(&v.xyz(), 1.0 / scale_factor);
        let xyz = match frame {
            Frame::Scene => unscaled,
            _ => Self::unpermute(&unscaled),
        };
        CelestialVector::new(frame, xyz)
    }

    /// Convenience for raw equatorial vectors at AU scene scale.
    pub fn equatorial_to_scene(xyz: &Vector3, frame: Frame) -> Vector3 {
        Self::to_scene(&CelestialVector::new(frame, *xyz), AU_SCENE_SCALE).xyz()
    }
}
