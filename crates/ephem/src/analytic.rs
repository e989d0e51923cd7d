//! Closed-form ephemeris built from mean orbital elements.
//!
//! Planets use Keplerian elements with linear centennial rates referred to the
//! J2000 ecliptic (the JPL "approximate positions" table valid 1800–2050). The
//! Moon uses the leading terms of the lunar longitude, latitude, and distance
//! series. Both are accurate to a fraction of a degree over the validity window,
//! which is what a viewer needs.

use sky_core::constants::OBLIQUITY_J2000_DEG;
use sky_core::time::{centuries_since_j2000, days_since_j2000, unix_ms_to_jd};
use sky_core::units::km_to_au;
use sky_core::vector::{Vector3, add, sub};

use crate::bodies::Body;
use crate::sidereal::gmst_hours;
use crate::{EphemerisError, EphemerisProvider};

/// JD of 1800-01-01T00:00 UTC.
pub const VALID_FROM_JD: f64 = 2_378_496.5;
/// JD of 2050-12-31T00:00 UTC.
pub const VALID_TO_JD: f64 = 2_470_171.5;

/// Mean elements at J2000 and their rates per Julian century.
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    a_au: [f64; 2],
    e: [f64; 2],
    inclination_deg: [f64; 2],
    mean_longitude_deg: [f64; 2],
    perihelion_longitude_deg: [f64; 2],
    node_longitude_deg: [f64; 2],
}

const MERCURY: OrbitalElements = OrbitalElements {
    a_au: [0.387_099_27, 0.000_000_37],
    e: [0.205_635_93, 0.000_019_06],
    inclination_deg: [7.004_979_02, -0.005_947_49],
    mean_longitude_deg: [252.250_323_50, 149_472.674_111_75],
    perihelion_longitude_deg: [77.457_796_28, 0.160_476_89],
    node_longitude_deg: [48.330_765_93, -0.125_340_81],
};

const VENUS: OrbitalElements = OrbitalElements {
    a_au: [0.723_335_66, 0.000_003_90],
    e: [0.006_776_72, -0.000_041_07],
    inclination_deg: [3.394_676_05, -0.000_788_90],
    mean_longitude_deg: [181.979_099_50, 58_517.815_387_29],
    perihelion_longitude_deg: [131.602_467_18, 0.002_683_29],
    node_longitude_deg: [76.679_842_55, -0.277_694_18],
};

const EARTH_MOON_BARYCENTER: OrbitalElements = OrbitalElements {
    a_au: [1.000_002_61, 0.000_005_62],
    e: [0.016_711_23, -0.000_043_92],
    inclination_deg: [-0.000_015_31, -0.012_946_68],
    mean_longitude_deg: [100.464_571_66, 35_999.372_449_81],
    perihelion_longitude_deg: [102.937_681_93, 0.323_273_64],
    node_longitude_deg: [0.0, 0.0],
};

const MARS: OrbitalElements = OrbitalElements {
    a_au: [1.523_710_34, 0.000_018_47],
    e: [0.093_394_10, 0.000_078_82],
    inclination_deg: [1.849_691_42, -0.008_131_31],
    mean_longitude_deg: [-4.553_432_05, 19_140.302_684_99],
    perihelion_longitude_deg: [-23.943_629_59, 0.444_410_88],
    node_longitude_deg: [49.559_538_91, -0.292_573_43],
};

const JUPITER: OrbitalElements = OrbitalElements {
    a_au: [5.202_887_00, -0.000_116_07],
    e: [0.048_386_24, -0.000_132_53],
    inclination_deg: [1.304_396_95, -0.001_837_14],
    mean_longitude_deg: [34.396_440_51, 3_034.746_127_75],
    perihelion_longitude_deg: [14.728_479_83, 0.212_526_68],
    node_longitude_deg: [100.473_909_09, 0.204_691_06],
};

const SATURN: OrbitalElements = OrbitalElements {
    a_au: [9.536_675_94, -0.001_250_60],
    e: [0.053_861_79, -0.000_509_91],
    inclination_deg: [2.485_991_87, 0.001_936_09],
    mean_longitude_deg: [49.954_244_23, 1_222.493_622_01],
    perihelion_longitude_deg: [92.598_878_31, -0.418_972_16],
    node_longitude_deg: [113.662_424_48, -0.288_677_94],
};

const URANUS: OrbitalElements = OrbitalElements {
    a_au: [19.189_164_64, -0.001_961_76],
    e: [0.047_257_44, -0.000_043_97],
    inclination_deg: [0.772_637_83, -0.002_429_39],
    mean_longitude_deg: [313.238_104_51, 428.482_027_85],
    perihelion_longitude_deg: [170.954_276_30, 0.408_052_81],
    node_longitude_deg: [74.016_925_03, 0.042_405_89],
};

const NEPTUNE: OrbitalElements = OrbitalElements {
    a_au: [30.069_922_76, 0.000_262_91],
    e: [0.008_590_48, 0.000_051_05],
    inclination_deg: [1.770_043_47, 0.000_353_72],
    mean_longitude_deg: [-55.120_029_69, 218.459_453_25],
    perihelion_longitude_deg: [44.964_762_27, -0.322_414_64],
    node_longitude_deg: [131.784_225_74, -0.005_086_64],
};

/// General precession in ecliptic longitude (degrees per Julian century).
const PRECESSION_DEG_PER_CENTURY: f64 = 1.396_971;

/// Deterministic analytic ephemeris over a fixed validity window.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticEphemeris {
    pub valid_from_jd: f64,
    pub valid_to_jd: f64,
}

impl Default for AnalyticEphemeris {
    fn default() -> Self {
        Self {
            valid_from_jd: VALID_FROM_JD,
            valid_to_jd: VALID_TO_JD,
        }
    }
}

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_range(&self, time_ms: f64) -> Result<(), EphemerisError> {
        let jd = unix_ms_to_jd(time_ms);
        if !jd.is_finite() || jd < self.valid_from_jd || jd > self.valid_to_jd {
            return Err(EphemerisError::OutOfRange {
                jd,
                min_jd: self.valid_from_jd,
                max_jd: self.valid_to_jd,
            });
        }
        Ok(())
    }

    fn planet_helio(body: Body, time_ms: f64) -> Option<Vector3> {
        let elements = match body {
            Body::Mercury => MERCURY,
            Body::Venus => VENUS,
            Body::Earth => EARTH_MOON_BARYCENTER,
            Body::Mars => MARS,
            Body::Jupiter => JUPITER,
            Body::Saturn => SATURN,
            Body::Uranus => URANUS,
            Body::Neptune => NEPTUNE,
            Body::Sun | Body::Moon => return None,
        };
        let ecliptic = keplerian_position(&elements, centuries_since_j2000(time_ms));
        Some(ecliptic_to_equatorial(&ecliptic))
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn helio_vector(&self, body: Body, time_ms: f64) -> Result<Vector3, EphemerisError> {
        self.check_range(time_ms)?;
        match body {
            Body::Sun => Ok([0.0; 3]),
            Body::Moon => {
                let earth = Self::planet_helio(Body::Earth, time_ms).unwrap_or([0.0; 3]);
                Ok(add(&earth, &moon_geocentric(time_ms)))
            }
            other => Self::planet_helio(other, time_ms).ok_or(EphemerisError::UnsupportedBody {
                body: other.name(),
                operation: "heliocentric vectors",
            }),
        }
    }

    fn geo_vector(&self, body: Body, time_ms: f64) -> Result<Vector3, EphemerisError> {
        self.check_range(time_ms)?;
        match body {
            Body::Earth => Ok([0.0; 3]),
            Body::Moon => Ok(moon_geocentric(time_ms)),
            other => {
                let earth = self.helio_vector(Body::Earth, time_ms)?;
                let target = self.helio_vector(other, time_ms)?;
                Ok(sub(&target, &earth))
            }
        }
    }

    fn sidereal_time(&self, time_ms: f64) -> Result<f64, EphemerisError> {
        self.check_range(time_ms)?;
        Ok(gmst_hours(time_ms))
    }
}

/// Solve Kepler's equation `M = E − e·sin E` for the eccentric anomaly (radians).
pub fn solve_kepler(mean_anomaly_rad: f64, e: f64) -> f64 {
    let mut ecc_anomaly = if e < 0.8 {
        mean_anomaly_rad
    } else {
        std::f64::consts::PI
    };
    for _ in 0..12 {
        let f = ecc_anomaly - e * ecc_anomaly.sin() - mean_anomaly_rad;
        let fp = 1.0 - e * ecc_anomaly.cos();
        let step = f / fp;
        ecc_anomaly -= step;
        if step.abs() < 1e-12 {
            break;
        }
    }
    ecc_anomaly
}

fn keplerian_position(el: &OrbitalElements, t: f64) -> Vector3 {
    let rate = |pair: [f64; 2]| pair[0] + pair[1] * t;
    let a = rate(el.a_au);
    let e = rate(el.e);
    let i = rate(el.inclination_deg).to_radians();
    let mean_longitude = rate(el.mean_longitude_deg);
    let perihelion = rate(el.perihelion_longitude_deg);
    let node = rate(el.node_longitude_deg);

    let arg_perihelion = (perihelion - node).to_radians();
    let mean_anomaly = ((mean_longitude - perihelion + 180.0).rem_euclid(360.0) - 180.0).to_radians();
    let ecc_anomaly = solve_kepler(mean_anomaly, e);

    let x_orb = a * (ecc_anomaly.cos() - e);
    let y_orb = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    let (sin_w, cos_w) = arg_perihelion.sin_cos();
    let (sin_o, cos_o) = node.to_radians().sin_cos();
    let (sin_i, cos_i) = i.sin_cos();

    [
        (cos_w * cos_o - sin_w * sin_o * cos_i) * x_orb
            + (-sin_w * cos_o - cos_w * sin_o * cos_i) * y_orb,
        (cos_w * sin_o + sin_w * cos_o * cos_i) * x_orb
            + (-sin_w * sin_o + cos_w * cos_o * cos_i) * y_orb,
        (sin_w * sin_i) * x_orb + (cos_w * sin_i) * y_orb,
    ]
}

/// Rotate a J2000 ecliptic vector about +X into J2000 equatorial axes.
pub fn ecliptic_to_equatorial(v: &Vector3) -> Vector3 {
    let (sin_e, cos_e) = OBLIQUITY_J2000_DEG.to_radians().sin_cos();
    [v[0], cos_e * v[1] - sin_e * v[2], sin_e * v[1] + cos_e * v[2]]
}

/// Geocentric Moon position (AU, J2000 equatorial) from the leading lunar terms.
fn moon_geocentric(time_ms: f64) -> Vector3 {
    let d = days_since_j2000(time_ms);
    let t = centuries_since_j2000(time_ms);

    let mean_longitude = 218.316 + 13.176_396 * d;
    let moon_anomaly = (134.963 + 13.064_993 * d).to_radians();
    let latitude_arg = (93.272 + 13.229_350 * d).to_radians();
    let elongation = (297.850 + 12.190_749 * d).to_radians();
    let sun_anomaly = (357.529 + 0.985_600_28 * d).to_radians();

    let longitude_deg = mean_longitude + 6.289 * moon_anomaly.sin()
        + 1.274 * (2.0 * elongation - moon_anomaly).sin()
        + 0.658 * (2.0 * elongation).sin()
        + 0.214 * (2.0 * moon_anomaly).sin()
        - 0.186 * sun_anomaly.sin()
        - 0.114 * (2.0 * latitude_arg).sin()
        - PRECESSION_DEG_PER_CENTURY * t;
    let latitude_deg = 5.128 * latitude_arg.sin()
        + 0.280 * (moon_anomaly + latitude_arg).sin()
        + 0.277 * (moon_anomaly - latitude_arg).sin()
        + 0.173 * (2.0 * elongation - latitude_arg).sin();
    let distance_km = 385_001.0
        - 20_905.0 * moon_anomaly.cos()
        - 3_699.0 * (2.0 * elongation - moon_anomaly).cos()
        - 2_956.0 * (2.0 * elongation).cos()
        - 570.0 * (2.0 * moon_anomaly).cos();

    let r = km_to_au(distance_km);
    let (sin_lon, cos_lon) = longitude_deg.to_radians().sin_cos();
    let (sin_lat, cos_lat) = latitude_deg.to_radians().sin_cos();
    ecliptic_to_equatorial(&[r * cos_lat * cos_lon, r * cos_lat * sin_lon, r * sin_lat])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kepler_solution_satisfies_equation() {
        for &(m, e) in &[(0.3, 0.0167), (2.5, 0.2056), (-1.0, 0.0934)] {
            let ecc = solve_kepler(m, e);
            assert!((ecc - e * ecc.sin() - m).abs() < 1e-10);
        }
    }

    #[test]
    fn obliquity_rotation_lifts_ecliptic_y_toward_north() {
        let eq = ecliptic_to_equatorial(&[0.0, 1.0, 0.0]);
        assert!((eq[2] - OBLIQUITY_J2000_DEG.to_radians().sin()).abs() < 1e-12);
    }
}
