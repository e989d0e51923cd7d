//! Illustrative cosmology panels.
//!
//! Nothing here is a physical model. The scale-factor curve is a hand-tuned
//! blend of a matter-dominated `t^(2/3)` rise and an exponential late-time
//! term, picked to look plausible on screen. Overlay text says so.

use std::f64::consts::TAU;

use sky_config::CosmologyConfig;
use sky_core::time::years_since_j2000;
use sky_core::vector::Vector3;

/// Age that maps to the end of the normalized curve (Gyr).
pub const AGE_NORMALIZATION_GYR: f64 = 30.0;
pub const MATTER_WEIGHT: f64 = 0.6;
pub const LAMBDA_WEIGHT: f64 = 0.4;
pub const LAMBDA_RATE: f64 = 0.7;
/// Lower bound on the scale factor; keeps redshift finite.
pub const SCALE_FACTOR_FLOOR: f64 = 0.01;
pub const PRESENT_AGE_GYR: f64 = 13.8;
/// Illustrative period of the Sun's orbit around the galactic centre (years).
pub const GALACTIC_PERIOD_YEARS: f64 = 2.3e8;
/// Illustrative Sun–galactic-centre distance (thousand light years).
pub const GALACTIC_RADIUS_KLY: f64 = 26.0;

/// Named cosmic era, chosen by ascending age thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Epoch {
    DarkAges,
    FirstGalaxies,
    PeakStarFormation,
    MaturingCosmicWeb,
    DarkEnergyEra,
    FarFuture,
}

const EPOCH_BANDS: [(f64, Epoch); 5] = [
    (0.5, Epoch::DarkAges),
    (1.5, Epoch::FirstGalaxies),
    (5.0, Epoch::PeakStarFormation),
    (10.0, Epoch::MaturingCosmicWeb),
    (20.0, Epoch::DarkEnergyEra),
];

impl Epoch {
    pub fn from_age(age_gyr: f64) -> Self {
        EPOCH_BANDS
            .iter()
            .find(|(upper, _)| age_gyr < *upper)
            .map(|(_, epoch)| *epoch)
            .unwrap_or(Epoch::FarFuture)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DarkAges => "recombination/dark ages",
            Self::FirstGalaxies => "first galaxies",
            Self::PeakStarFormation => "peak star formation",
            Self::MaturingCosmicWeb => "maturing cosmic web",
            Self::DarkEnergyEra => "dark energy era",
            Self::FarFuture => "far future",
        }
    }
}

/// Position of the Sun on its galactic orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalacticOrbit {
    pub angle_rad: f64,
    pub revolutions: f64,
    pub radius_kly: f64,
    /// Scene position in thousand light years, galactic plane = scene XZ.
    pub scene_position: Vector3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosmologyState {
    pub age_gyr: f64,
    pub scale_factor: f64,
    pub redshift: f64,
    pub epoch: Epoch,
    pub galactic: Option<GalacticOrbit>,
}

impl CosmologyState {
    fn from_age(age_gyr: f64, galactic: Option<GalacticOrbit>) -> Self {
        let a = scale_factor(age_gyr);
        Self {
            age_gyr,
            scale_factor: a,
            redshift: redshift(a),
            epoch: Epoch::from_age(age_gyr),
            galactic,
        }
    }
}

/// Illustrative scale factor for a cosmic age, in `[0.01, 1]`.
pub fn scale_factor(age_gyr: f64) -> f64 {
    let t = (age_gyr / AGE_NORMALIZATION_GYR).clamp(0.0, 1.0);
    let matter = t.powf(2.0 / 3.0);
    let lambda = ((t - 1.0) * LAMBDA_RATE).exp();
    (MATTER_WEIGHT * matter + LAMBDA_WEIGHT * lambda).clamp(SCALE_FACTOR_FLOOR, 1.0)
}

pub fn redshift(scale_factor: f64) -> f64 {
    1.0 / scale_factor - 1.0
}

/// Common interface of the cosmology panel variants.
pub trait CosmologyModel: std::fmt::Debug {
    fn variant(&self) -> &'static str;
    fn evaluate(&self, sim_time_ms: f64) -> CosmologyState;
}

/// Scale factor from a user-chosen cosmic age; simulated time is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniverseModel {
    pub cosmic_age_gyr: f64,
}

impl CosmologyModel for UniverseModel {
    fn variant(&self) -> &'static str {
        "universe"
    }

    fn evaluate(&self, _sim_time_ms: f64) -> CosmologyState {
        CosmologyState::from_age(self.cosmic_age_gyr, None)
    }
}

/// Galactic orbit and cosmic age driven by exaggerated time since J2000.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxyModel {
    pub galaxy_exaggeration: f64,
}

impl GalaxyModel {
    pub fn orbit(&self, sim_time_ms: f64) -> GalacticOrbit {
        let years = years_since_j2000(sim_time_ms) * self.galaxy_exaggeration;
        let revolutions = years / GALACTIC_PERIOD_YEARS;
        let angle_rad = (revolutions * TAU).rem_euclid(TAU);
        GalacticOrbit {
            angle_rad,
            revolutions,
            radius_kly: GALACTIC_RADIUS_KLY,
            scene_position: [
                GALACTIC_RADIUS_KLY * angle_rad.cos(),
                0.0,
                -GALACTIC_RADIUS_KLY * angle_rad.sin(),
            ],
        }
    }
}

impl CosmologyModel for GalaxyModel {
    fn variant(&self) -> &'static str {
        "galaxy"
    }

    fn evaluate(&self, sim_time_ms: f64) -> CosmologyState {
        let years = years_since_j2000(sim_time_ms) * self.galaxy_exaggeration;
        let age_gyr = (PRESENT_AGE_GYR + years / 1.0e9).max(0.0);
        CosmologyState::from_age(age_gyr, Some(self.orbit(sim_time_ms)))
    }
}

/// Build the panel variant selected by configuration.
pub fn build_model(config: &CosmologyConfig) -> Box<dyn CosmologyModel> {
    match *config {
        CosmologyConfig::Universe { cosmic_age_gyr } => Box::new(UniverseModel { cosmic_age_gyr }),
        CosmologyConfig::Galaxy {
            galaxy_exaggeration,
        } => Box::new(GalaxyModel {
            galaxy_exaggeration,
        }),
    }
}

/// Overlay text for the cosmology panel.
pub fn overlay_lines(variant: &str, state: &CosmologyState) -> Vec<String> {
    let mut lines = vec![
        format!("Cosmology ({variant}) - illustrative toy model, not physically precise"),
        format!("Cosmic age: {:.2} Gyr", state.age_gyr),
        format!(
            "Scale factor a: {:.3}  redshift z: {:.2}",
            state.scale_factor, state.redshift
        ),
        format!("Epoch: {}", state.epoch.label()),
    ];
    if let Some(orbit) = &state.galactic {
        lines.push(format!(
            "Galactic orbit: {:.1}° ({:.3} revolutions at {:.0} kly)",
            orbit.angle_rad.to_degrees(),
            orbit.revolutions,
            orbit.radius_kly
        ));
    }
    lines
}
