//! Heliocentric planet positions, the exaggerated Moon, and per-planet trails.

use sky_core::units::wrap_deg_360;
use sky_core::vector::{Frame, Vector3, add, norm, scale};
use sky_ephem::{Body, BodyDescriptor, EphemerisProvider};

use crate::mapper::CoordinateMapper;
use crate::panels::PanelError;
use crate::trail::Trail;

/// Multiplier on the geocentric Moon offset so the Moon is visible at AU scale.
pub const MOON_EXAGGERATION: f64 = sky_config::DEFAULT_MOON_EXAGGERATION;

/// One tracked planet and its trail.
#[derive(Debug, Clone)]
pub struct TrackedBody {
    pub descriptor: &'static BodyDescriptor,
    pub trail: Trail,
}

/// Scene position of a body for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPosition {
    pub body: Body,
    pub scene_position: Vector3,
}

/// Orbit panel output for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalSnapshot {
    pub positions: Vec<BodyPosition>,
    pub earth_position: Vector3,
    /// Scene-mapped geocentric Moon vector before exaggeration (AU).
    pub moon_offset: Vector3,
    pub moon_position: Vector3,
    /// Earth's heliocentric longitude in the orbit plane, display only.
    pub earth_orbit_angle_deg: f64,
    /// Display only.
    pub earth_sun_distance_au: f64,
}

impl OrbitalSnapshot {
    pub fn position_of(&self, body: Body) -> Option<Vector3> {
        self.positions
            .iter()
            .find(|p| p.body == body)
            .map(|p| p.scene_position)
    }
}

/// Moon scene position: Earth plus the exaggerated geocentric offset.
pub fn moon_scene_position(earth: &Vector3, moon_offset: &Vector3, exaggeration: f64) -> Vector3 {
    add(earth, &scale(moon_offset, exaggeration))
}

/// Angle of a scene position around scene +Y, measured from +X toward −Z, `[0, 360)`.
///
/// Scene −Z is ephemeris +Y, so this matches the usual counter-clockwise
/// longitude seen from celestial north.
pub fn orbit_angle_deg(position: &Vector3) -> f64 {
    wrap_deg_360((-position[2]).atan2(position[0]).to_degrees())
}

/// Planet positions plus bounded trail history.
#[derive(Debug, Clone)]
pub struct OrbitalPositionFeed {
    tracked: Vec<TrackedBody>,
    moon_exaggeration: f64,
}

impl OrbitalPositionFeed {
    /// Track every planet with `trail_capacity` samples each.
    pub fn new(trail_capacity: usize, moon_exaggeration: f64) -> Self {
        Self::with_bodies(&Body::PLANETS, trail_capacity, moon_exaggeration)
    }

    pub fn with_bodies(bodies: &[Body], trail_capacity: usize, moon_exaggeration: f64) -> Self {
        let tracked = bodies
            .iter()
            .map(|body| TrackedBody {
                descriptor: body.descriptor(),
                trail: Trail::new(trail_capacity),
            })
            .collect();
        Self {
            tracked,
            moon_exaggeration,
        }
    }

    pub fn moon_exaggeration(&self) -> f64 {
        self.moon_exaggeration
    }

    pub fn tracked(&self) -> &[TrackedBody] {
        &self.tracked
    }

    pub fn trail(&self, body: Body) -> Option<&Trail> {
        self.tracked
            .iter()
            .find(|t| t.descriptor.body == body)
            .map(|t| &t.trail)
    }

    /// Reference ring radii (AU) for drawing approximate orbits.
    pub fn reference_rings(&self) -> Vec<(Body, f64)> {
        self.tracked
            .iter()
            .map(|t| (t.descriptor.body, t.descriptor.semi_major_axis_au))
            .collect()
    }

    /// Query the provider for this frame and append to every trail.
    ///
    /// All positions are fetched before any trail is written, so a failed query
    /// leaves the history untouched.
    pub fn update<P: EphemerisProvider + ?Sized>(
        &mut self,
        provider: &P,
        time_ms: f64,
    ) -> Result<OrbitalSnapshot, PanelError> {
        let wrap = |err| PanelError::computation("orbits", err);

        let mut positions = Vec::with_capacity(self.tracked.len());
        for tracked in &self.tracked {
            let body = tracked.descriptor.body;
            let helio = provider.helio_vector(body, time_ms).map_err(wrap)?;
            positions.push(BodyPosition {
                body,
                scene_position: CoordinateMapper::equatorial_to_scene(
                    &helio,
                    Frame::EquatorialHeliocentric,
                ),
            });
        }

        let earth_position = match positions.iter().find(|p| p.body == Body::Earth) {
            Some(p) => p.scene_position,
            None => {
                let helio = provider.helio_vector(Body::Earth, time_ms).map_err(wrap)?;
                CoordinateMapper::equatorial_to_scene(&helio, Frame::EquatorialHeliocentric)
            }
        };
        let moon_geo = provider.geo_vector(Body::Moon, time_ms).map_err(wrap)?;
        let moon_offset = CoordinateMapper::equatorial_to_scene(&moon_geo, Frame::EquatorialGeocentric);

        for (tracked, position) in self.tracked.iter_mut().zip(&positions) {
            tracked.trail.push(position.scene_position);
        }

        Ok(OrbitalSnapshot {
            moon_position: moon_scene_position(&earth_position, &moon_offset, self.moon_exaggeration),
            earth_orbit_angle_deg: orbit_angle_deg(&earth_position),
            earth_sun_distance_au: norm(&earth_position),
            positions,
            earth_position,
            moon_offset,
        })
    }
}

/// Overlay text for the orbit panel.
pub fn overlay_lines(snapshot: &OrbitalSnapshot, moon_exaggeration: f64) -> Vec<String> {
    vec![
        format!("Earth orbit angle: {:.2}°", snapshot.earth_orbit_angle_deg),
        format!("Earth–Sun distance: {:.5} AU", snapshot.earth_sun_distance_au),
        format!(
            "Moon distance drawn {:.0}x true scale ({:.5} AU actual)",
            moon_exaggeration,
            norm(&snapshot.moon_offset)
        ),
    ]
}
