//! Sky Viewer: a frame-driven model of Earth's orientation, the planets' orbits,
//! and two illustrative cosmology panels.
//!
//! The member crates do the work; this crate wires them into an [`app::App`]
//! and ships the binaries. Hosts that only need one piece can depend on the
//! member crate directly.

pub mod app;
pub mod logging;

pub use sky_config as config;
pub use sky_core as core;
pub use sky_ephem as ephemeris;
pub use sky_export as export;
pub use sky_sim as sim;
pub use sky_weather as weather;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
