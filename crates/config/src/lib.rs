//! Configuration models, loaders, and validation for the Sky Viewer.
//!
//! Values are clamped or rejected here, at the boundary, so the simulation core
//! can assume validated inputs.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

pub mod events;

pub use events::{ConfigContext, ConfigEvent};

/// Default Moon distance exaggeration applied by the orbit panel.
pub const DEFAULT_MOON_EXAGGERATION: f64 = 60.0;
/// Default present-day cosmic age used by the universe panel (Gyr).
pub const DEFAULT_COSMIC_AGE_GYR: f64 = 13.8;
/// Default galactic time exaggeration used by the galaxy panel.
pub const DEFAULT_GALAXY_EXAGGERATION: f64 = 1.0e8;
pub const DEFAULT_TRAIL_CAPACITY: usize = 512;
pub const MAX_TRAIL_CAPACITY: usize = 100_000;
pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";
pub const MIN_WEATHER_COOLDOWN_SECS: u64 = 30;

/// Playback rates offered by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u32")]
pub enum SpeedPreset {
    /// 1 simulated second per real second.
    RealTime,
    /// 1 simulated minute per real second.
    MinutePerSecond,
    /// 1 simulated hour per real second.
    HourPerSecond,
    /// 1 simulated day per real second.
    DayPerSecond,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 4] = [
        SpeedPreset::RealTime,
        SpeedPreset::MinutePerSecond,
        SpeedPreset::HourPerSecond,
        SpeedPreset::DayPerSecond,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            Self::RealTime => 1.0,
            Self::MinutePerSecond => 60.0,
            Self::HourPerSecond => 3_600.0,
            Self::DayPerSecond => 86_400.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::RealTime => "1x (real time)",
            Self::MinutePerSecond => "60x (1 min/s)",
            Self::HourPerSecond => "3600x (1 h/s)",
            Self::DayPerSecond => "86400x (1 day/s)",
        }
    }
}

impl TryFrom<u32> for SpeedPreset {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::RealTime),
            60 => Ok(Self::MinutePerSecond),
            3_600 => Ok(Self::HourPerSecond),
            86_400 => Ok(Self::DayPerSecond),
            other => Err(ConfigError::UnknownSpeed(other)),
        }
    }
}

/// Simulation clock settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    pub paused: bool,
    pub speed: SpeedPreset,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            paused: false,
            speed: SpeedPreset::RealTime,
        }
    }
}

/// Observer location on Earth.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ObserverConfig {
    /// Geodetic latitude, clamped to `[-90, 90]`.
    pub latitude_deg: f64,
    /// East-positive longitude, clamped to `[-180, 180]`.
    pub longitude_deg: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        // Greenwich
        Self {
            latitude_deg: 51.4779,
            longitude_deg: -0.0015,
        }
    }
}

/// Earth panel settings.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EarthPanelConfig {
    /// Rotation between the texture's prime meridian and the mesh's local +X, `[-180, 180]`.
    pub texture_offset_deg: f64,
}

/// Orbit panel settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OrbitPanelConfig {
    /// Samples kept per planet trail.
    pub trail_capacity: usize,
    /// Multiplier on the geocentric Moon offset so the Moon separates from Earth at AU scale.
    pub moon_exaggeration: f64,
}

impl Default for OrbitPanelConfig {
    fn default() -> Self {
        Self {
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            moon_exaggeration: DEFAULT_MOON_EXAGGERATION,
        }
    }
}

/// Which illustrative cosmology panel is shown.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum CosmologyConfig {
    /// Scale factor driven by a user-chosen cosmic age.
    Universe {
        #[serde(default = "default_cosmic_age")]
        cosmic_age_gyr: f64,
    },
    /// Galactic orbit driven by exaggerated simulated time.
    Galaxy {
        #[serde(default = "default_galaxy_exaggeration")]
        galaxy_exaggeration: f64,
    },
}

impl Default for CosmologyConfig {
    fn default() -> Self {
        Self::Universe {
            cosmic_age_gyr: DEFAULT_COSMIC_AGE_GYR,
        }
    }
}

impl CosmologyConfig {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Universe { .. } => "universe",
            Self::Galaxy { .. } => "galaxy",
        }
    }
}

fn default_cosmic_age() -> f64 {
    DEFAULT_COSMIC_AGE_GYR
}

fn default_galaxy_exaggeration() -> f64 {
    DEFAULT_GALAXY_EXAGGERATION
}

/// Weather side-channel settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    pub enabled: bool,
    /// Minimum interval between lookups.
    pub cooldown_secs: u64,
    pub endpoint: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cooldown_secs: 600,
            endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
        }
    }
}

/// Log filter handed to the tracing subscriber when `RUST_LOG` is unset.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Complete viewer configuration, one typed section per panel.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ViewerConfig {
    pub clock: ClockConfig,
    pub observer: ObserverConfig,
    pub earth: EarthPanelConfig,
    pub orbits: OrbitPanelConfig,
    pub cosmology: CosmologyConfig,
    pub weather: WeatherConfig,
    pub logging: LoggingConfig,
}

impl ViewerConfig {
    /// Clamp every bounded field into range; reject values that cannot be repaired.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.observer.latitude_deg = clamp_latitude(self.observer.latitude_deg)?;
        self.observer.longitude_deg = clamp_longitude(self.observer.longitude_deg)?;
        self.earth.texture_offset_deg = clamp_texture_offset(self.earth.texture_offset_deg)?;
        self.orbits.trail_capacity = clamp_trail_capacity(self.orbits.trail_capacity);
        self.orbits.moon_exaggeration = clamp_positive(
            "orbits.moon_exaggeration",
            self.orbits.moon_exaggeration,
            DEFAULT_MOON_EXAGGERATION,
        )?;
        self.cosmology = match self.cosmology {
            CosmologyConfig::Universe { cosmic_age_gyr } => CosmologyConfig::Universe {
                cosmic_age_gyr: clamp_cosmic_age(cosmic_age_gyr)?,
            },
            CosmologyConfig::Galaxy {
                galaxy_exaggeration,
            } => CosmologyConfig::Galaxy {
                galaxy_exaggeration: clamp_positive(
                    "cosmology.galaxy_exaggeration",
                    galaxy_exaggeration,
                    DEFAULT_GALAXY_EXAGGERATION,
                )?,
            },
        };
        if self.weather.cooldown_secs < MIN_WEATHER_COOLDOWN_SECS {
            warn!(
                requested = self.weather.cooldown_secs,
                min = MIN_WEATHER_COOLDOWN_SECS,
                "weather cooldown raised to minimum"
            );
            self.weather.cooldown_secs = MIN_WEATHER_COOLDOWN_SECS;
        }
        Ok(self)
    }
}

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("speed {0} is not one of 1, 60, 3600, 86400")]
    UnknownSpeed(u32),
    #[error("`{field}` must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },
    #[error("`{field}` applies to the {expected} cosmology panel, but the {active} panel is active")]
    VariantMismatch {
        field: &'static str,
        expected: &'static str,
        active: &'static str,
    },
}

/// Parse a viewer configuration from a TOML or YAML file without validating it.
///
/// Callers that install logging from the file's `[logging]` section read first,
/// then call [`ViewerConfig::validated`] so clamp warnings are recorded.
pub fn read_viewer_config<P: AsRef<Path>>(path: P) -> Result<ViewerConfig, ConfigError> {
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Load and validate a viewer configuration from a TOML or YAML file.
pub fn load_viewer_config<P: AsRef<Path>>(path: P) -> Result<ViewerConfig, ConfigError> {
    read_viewer_config(path)?.validated()
}

fn finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn clamp_logged(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, ConfigError> {
    let value = finite(field, value)?;
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!(field, requested = value, clamped, "config value clamped");
    }
    Ok(clamped)
}

pub fn clamp_latitude(value: f64) -> Result<f64, ConfigError> {
    clamp_logged("observer.latitude_deg", value, -90.0, 90.0)
}

pub fn clamp_longitude(value: f64) -> Result<f64, ConfigError> {
    clamp_logged("observer.longitude_deg", value, -180.0, 180.0)
}

pub fn clamp_texture_offset(value: f64) -> Result<f64, ConfigError> {
    clamp_logged("earth.texture_offset_deg", value, -180.0, 180.0)
}

pub fn clamp_cosmic_age(value: f64) -> Result<f64, ConfigError> {
    clamp_logged("cosmology.cosmic_age_gyr", value, 0.0, f64::MAX)
}

/// Non-positive values fall back to `default`.
pub fn clamp_positive(field: &'static str, value: f64, default: f64) -> Result<f64, ConfigError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        warn!(field, requested = value, default, "non-positive value replaced by default");
        Ok(default)
    }
}

pub fn clamp_trail_capacity(value: usize) -> usize {
    let clamped = value.clamp(2, MAX_TRAIL_CAPACITY);
    if clamped != value {
        warn!(requested = value, clamped, "trail capacity clamped");
    }
    clamped
}
