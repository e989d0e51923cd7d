//! Discrete configuration changes and the context that owns mutation.
//!
//! Front-ends (GUI panels, CLI flags, tests) never touch a shared config
//! object directly. They submit a [`ConfigEvent`] to the [`ConfigContext`],
//! which validates it, updates its copy, and queues the validated event for the
//! owning component to drain once per frame.

use tracing::debug;

use crate::{
    ConfigError, CosmologyConfig, DEFAULT_GALAXY_EXAGGERATION, SpeedPreset, ViewerConfig,
    clamp_cosmic_age, clamp_latitude, clamp_longitude, clamp_positive, clamp_texture_offset,
};

/// One user-visible option change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigEvent {
    SetPaused(bool),
    SetSpeed(SpeedPreset),
    SetLatitude(f64),
    SetLongitude(f64),
    SetTextureOffset(f64),
    SetCosmicAge(f64),
    SetGalaxyExaggeration(f64),
    /// Jump simulated time to the current wall-clock time.
    ResetNow,
}

impl ConfigEvent {
    /// True when the event moves the observer.
    pub fn is_location_change(&self) -> bool {
        matches!(self, Self::SetLatitude(_) | Self::SetLongitude(_))
    }

    /// True when the event changes cosmology panel parameters.
    pub fn is_cosmology_change(&self) -> bool {
        matches!(self, Self::SetCosmicAge(_) | Self::SetGalaxyExaggeration(_))
    }
}

/// Owner of the live configuration and the queue of validated changes.
#[derive(Debug, Clone)]
pub struct ConfigContext {
    config: ViewerConfig,
    pending: Vec<ConfigEvent>,
}

impl ConfigContext {
    /// Wrap an already validated configuration.
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            pending: Vec::new(),
        }
    }

    /// Immutable copy handed to per-frame updates.
    pub fn snapshot(&self) -> ViewerConfig {
        self.config.clone()
    }

    pub fn current(&self) -> &ViewerConfig {
        &self.config
    }

    /// Validate `event`, apply it, and queue the validated form.
    ///
    /// Returns the event as applied, which may carry a clamped value.
    pub fn apply(&mut self, event: ConfigEvent) -> Result<ConfigEvent, ConfigError> {
        let applied = match event {
            ConfigEvent::SetPaused(paused) => {
                self.config.clock.paused = paused;
                event
            }
            ConfigEvent::SetSpeed(speed) => {
                self.config.clock.speed = speed;
                event
            }
            ConfigEvent::SetLatitude(value) => {
                let value = clamp_latitude(value)?;
                self.config.observer.latitude_deg = value;
                ConfigEvent::SetLatitude(value)
            }
            ConfigEvent::SetLongitude(value) => {
                let value = clamp_longitude(value)?;
                self.config.observer.longitude_deg = value;
                ConfigEvent::SetLongitude(value)
            }
            ConfigEvent::SetTextureOffset(value) => {
                let value = clamp_texture_offset(value)?;
                self.config.earth.texture_offset_deg = value;
                ConfigEvent::SetTextureOffset(value)
            }
            ConfigEvent::SetCosmicAge(value) => match &mut self.config.cosmology {
                CosmologyConfig::Universe { cosmic_age_gyr } => {
                    let value = clamp_cosmic_age(value)?;
                    *cosmic_age_gyr = value;
                    ConfigEvent::SetCosmicAge(value)
                }
                other => {
                    return Err(ConfigError::VariantMismatch {
                        field: "cosmic_age_gyr",
                        expected: "universe",
                        active: other.variant_name(),
                    });
                }
            },
            ConfigEvent::SetGalaxyExaggeration(value) => match &mut self.config.cosmology {
                CosmologyConfig::Galaxy {
                    galaxy_exaggeration,
                } => {
                    let value = clamp_positive(
                        "cosmology.galaxy_exaggeration",
                        value,
                        DEFAULT_GALAXY_EXAGGERATION,
                    )?;
                    *galaxy_exaggeration = value;
                    ConfigEvent::SetGalaxyExaggeration(value)
                }
                other => {
                    return Err(ConfigError::VariantMismatch {
                        field: "galaxy_exaggeration",
                        expected: "galaxy",
                        active: other.variant_name(),
                    });
                }
            },
            ConfigEvent::ResetNow => event,
        };
        debug!(?applied, "config event applied");
        self.pending.push(applied);
        Ok(applied)
    }

    /// Take every queued event in submission order.
    pub fn drain_events(&mut self) -> Vec<ConfigEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
