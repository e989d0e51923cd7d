//! Per-frame derivations, one module per viewer panel.

pub mod cosmology;
pub mod earth;
pub mod orbits;

use sky_ephem::EphemerisError;
use thiserror::Error;

/// Failure that disables a single panel for the current frame.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PanelError {
    #[error("{panel} panel computation failed: {source}")]
    Computation {
        panel: &'static str,
        #[source]
        source: EphemerisError,
    },
}

impl PanelError {
    pub fn computation(panel: &'static str, source: EphemerisError) -> Self {
        Self::Computation { panel, source }
    }
}
