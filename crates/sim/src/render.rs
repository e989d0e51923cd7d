//! Renderer-facing frame description.
//!
//! The simulation core never talks to a graphics API. Each frame it produces a
//! [`RenderFrame`]: named transforms, trail polylines, and overlay text. A
//! [`RenderSink`] consumes frames; the export crate writes them to disk and
//! tests collect them in a `Vec`.

use std::convert::Infallible;

use serde::Serialize;
use sky_core::vector::Vector3;

use crate::clock::FrameTime;

/// Placement of one named scene object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transform {
    pub name: String,
    pub position: Vector3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vector3,
    pub scale: f64,
}

impl Transform {
    pub fn at(name: impl Into<String>, position: Vector3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: [0.0; 3],
            scale: 1.0,
        }
    }

    pub fn with_rotation(mut self, rotation: Vector3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Clock,
    Earth,
    Orbits,
    Cosmology,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::Clock,
        PanelKind::Earth,
        PanelKind::Orbits,
        PanelKind::Cosmology,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Clock => "clock",
            Self::Earth => "earth",
            Self::Orbits => "orbits",
            Self::Cosmology => "cosmology",
        }
    }
}

/// Overlay text of one panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelText {
    pub panel: PanelKind,
    pub lines: Vec<String>,
    /// Set when this frame's computation failed and the transforms are from an earlier frame.
    pub stale: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailSnapshot {
    pub name: String,
    /// Oldest to newest, scene frame.
    pub points: Vec<Vector3>,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub frame_index: u64,
    pub time: FrameTime,
    pub transforms: Vec<Transform>,
    pub trails: Vec<TrailSnapshot>,
    pub panels: Vec<PanelText>,
}

impl RenderFrame {
    pub fn transform(&self, name: &str) -> Option<&Transform> {
        self.transforms.iter().find(|t| t.name == name)
    }

    pub fn trail(&self, name: &str) -> Option<&TrailSnapshot> {
        self.trails.iter().find(|t| t.name == name)
    }

    pub fn panel(&self, kind: PanelKind) -> Option<&PanelText> {
        self.panels.iter().find(|p| p.panel == kind)
    }

    pub fn panel_mut(&mut self, kind: PanelKind) -> Option<&mut PanelText> {
        self.panels.iter_mut().find(|p| p.panel == kind)
    }
}

/// Consumer of rendered frames.
pub trait RenderSink {
    type Error;

    fn submit(&mut self, frame: &RenderFrame) -> Result<(), Self::Error>;
}

impl RenderSink for Vec<RenderFrame> {
    type Error = Infallible;

    fn submit(&mut self, frame: &RenderFrame) -> Result<(), Self::Error> {
        self.push(frame.clone());
        Ok(())
    }
}
