//! Simulation core of the Sky Viewer: clock, scene mapping, trails, and panels.

pub mod clock;
pub mod mapper;
pub mod panels;
pub mod render;
pub mod trail;
pub mod viewer;

pub use facade::*;
pub use sky_config as config;
pub use sky_ephem as ephemeris;

mod facade;
