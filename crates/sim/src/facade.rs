//! Re-exported APIs for hosts driving the viewer.

pub use crate::clock::{
    FrameTime, ManualWallClock, SimulationClock, SystemWallClock, WallClock, format_sim_time,
};
pub use crate::mapper::{AU_SCENE_SCALE, CoordinateMapper};
pub use crate::panels::PanelError;
pub use crate::panels::cosmology::{
    CosmologyModel, CosmologyState, Epoch, GalacticOrbit, GalaxyModel, UniverseModel, build_model,
};
pub use crate::panels::earth::{EarthOrientation, derive_orientation};
pub use crate::panels::orbits::{
    BodyPosition, MOON_EXAGGERATION, OrbitalPositionFeed, OrbitalSnapshot, TrackedBody,
};
pub use crate::render::{PanelKind, PanelText, RenderFrame, RenderSink, TrailSnapshot, Transform};
pub use crate::trail::Trail;
pub use crate::viewer::{SUN_LIGHT_DISTANCE, Viewer, scene_name};
