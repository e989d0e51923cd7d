//! Frame driver tying the clock, the panels, and the configuration together.

use sky_config::{ConfigContext, ConfigEvent, ViewerConfig};
use sky_core::vector::{Vector3, scale};
use sky_ephem::{Body, EphemerisProvider, Observer};
use tracing::{debug, info, warn};

use crate::clock::{FrameTime, SimulationClock, SystemWallClock, WallClock, format_sim_time};
use crate::panels::PanelError;
use crate::panels::cosmology::{self, CosmologyModel, build_model};
use crate::panels::earth::{self, EarthOrientation, derive_orientation};
use crate::panels::orbits::{self, OrbitalPositionFeed, OrbitalSnapshot};
use crate::render::{PanelKind, PanelText, RenderFrame, Transform, TrailSnapshot};

/// Distance of the directional light from the globe in the Earth panel (scene units).
pub const SUN_LIGHT_DISTANCE: f64 = 10.0;

/// Owns every per-frame component and produces one [`RenderFrame`] per tick.
///
/// Panels fail independently: a failing panel shows a placeholder line and
/// keeps the geometry from its last good frame.
#[derive(Debug)]
pub struct Viewer<P: EphemerisProvider, C: WallClock = SystemWallClock> {
    provider: P,
    clock: SimulationClock<C>,
    config: ViewerConfig,
    feed: OrbitalPositionFeed,
    cosmology: Box<dyn CosmologyModel>,
    last_earth: Option<EarthOrientation>,
    last_orbits: Option<OrbitalSnapshot>,
    frame_index: u64,
}

impl<P: EphemerisProvider, C: WallClock> Viewer<P, C> {
    pub fn new(provider: P, mut clock: SimulationClock<C>, config: ViewerConfig) -> Self {
        clock.set_speed(config.clock.speed.multiplier());
        clock.set_paused(config.clock.paused);
        let feed = OrbitalPositionFeed::new(
            config.orbits.trail_capacity,
            config.orbits.moon_exaggeration,
        );
        let cosmology = build_model(&config.cosmology);
        info!(
            speed = config.clock.speed.label(),
            paused = config.clock.paused,
            cosmology = cosmology.variant(),
            "viewer initialized"
        );
        Self {
            provider,
            clock,
            config,
            feed,
            cosmology,
            last_earth: None,
            last_orbits: None,
            frame_index: 0,
        }
    }

    pub fn clock(&self) -> &SimulationClock<C> {
        &self.clock
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn feed(&self) -> &OrbitalPositionFeed {
        &self.feed
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cosmology(&self) -> &dyn CosmologyModel {
        self.cosmology.as_ref()
    }

    pub fn observer(&self) -> Observer {
        Observer::new(
            self.config.observer.latitude_deg,
            self.config.observer.longitude_deg,
        )
    }

    /// React to one validated event. `config` is the snapshot taken after it was applied.
    pub fn handle_event(&mut self, event: &ConfigEvent, config: &ViewerConfig) {
        self.config = config.clone();
        match *event {
            ConfigEvent::SetPaused(paused) => self.clock.set_paused(paused),
            ConfigEvent::SetSpeed(speed) => self.clock.set_speed(speed.multiplier()),
            ConfigEvent::ResetNow => self.clock.reset_now(),
            ConfigEvent::SetCosmicAge(_) | ConfigEvent::SetGalaxyExaggeration(_) => {
                self.cosmology = build_model(&self.config.cosmology);
            }
            ConfigEvent::SetLatitude(_)
            | ConfigEvent::SetLongitude(_)
            | ConfigEvent::SetTextureOffset(_) => {}
        }
        debug!(?event, "viewer handled config event");
    }

    /// Drain queued events from `context` and handle them in order.
    pub fn apply_events(&mut self, context: &mut ConfigContext) -> Vec<ConfigEvent> {
        let events = context.drain_events();
        if events.is_empty() {
            return events;
        }
        let snapshot = context.snapshot();
        for event in &events {
            self.handle_event(event, &snapshot);
        }
        events
    }

    /// Tick the clock once and derive every panel from the same [`FrameTime`].
    pub fn frame(&mut self, wall_now_ms: f64) -> RenderFrame {
        let time = self.clock.tick(wall_now_ms);
        let mut transforms = Vec::new();
        let mut trails = Vec::new();
        let mut panels = vec![self.clock_panel(&time)];

        panels.push(self.earth_panel(&time, &mut transforms));
        panels.push(self.orbit_panel(&time, &mut transforms, &mut trails));
        panels.push(self.cosmology_panel(&time, &mut transforms));

        let frame = RenderFrame {
            frame_index: self.frame_index,
            time,
            transforms,
            trails,
            panels,
        };
        self.frame_index += 1;
        frame
    }

    /// Frame using the clock's own wall source.
    pub fn frame_now(&mut self) -> RenderFrame {
        let now = self.clock.wall_clock().now_ms();
        self.frame(now)
    }

    fn clock_panel(&self, time: &FrameTime) -> PanelText {
        PanelText {
            panel: PanelKind::Clock,
            lines: vec![format!(
                "{}  speed {}{}",
                format_sim_time(time.sim_time_ms),
                self.config.clock.speed.label(),
                if self.clock.is_paused() { "  [paused]" } else { "" }
            )],
            stale: false,
        }
    }

    fn earth_panel(&mut self, time: &FrameTime, transforms: &mut Vec<Transform>) -> PanelText {
        let observer = self.observer();
        let result = derive_orientation(
            &self.provider,
            time.sim_time_ms,
            &observer,
            self.config.earth.texture_offset_deg,
        );
        let (lines, stale) = match result {
            Ok(orientation) => {
                self.last_earth = Some(orientation);
                (
                    earth::overlay_lines(&orientation, &observer, time.sim_time_ms),
                    false,
                )
            }
            Err(err) => (vec![unavailable("Earth", &err)], true),
        };
        if let Some(orientation) = &self.last_earth {
            transforms.push(
                Transform::at("globe", [0.0; 3]).with_rotation([
                    0.0,
                    orientation.spin_angle_rad,
                    0.0,
                ]),
            );
            transforms.push(Transform::at(
                "sun_light",
                scale(&orientation.sun_direction, SUN_LIGHT_DISTANCE),
            ));
        }
        PanelText {
            panel: PanelKind::Earth,
            lines,
            stale,
        }
    }

    fn orbit_panel(
        &mut self,
        time: &FrameTime,
        transforms: &mut Vec<Transform>,
        trails: &mut Vec<TrailSnapshot>,
    ) -> PanelText {
        let (lines, stale) = match self.feed.update(&self.provider, time.sim_time_ms) {
            Ok(snapshot) => {
                let lines = orbits::overlay_lines(&snapshot, self.feed.moon_exaggeration());
                self.last_orbits = Some(snapshot);
                (lines, false)
            }
            Err(err) => (vec![unavailable("Orbit", &err)], true),
        };

        if let Some(snapshot) = &self.last_orbits {
            transforms.push(body_transform(Body::Sun, [0.0; 3]));
            for position in &snapshot.positions {
                transforms.push(body_transform(position.body, position.scene_position));
            }
            transforms.push(body_transform(Body::Moon, snapshot.moon_position));
        }
        for tracked in self.feed.tracked() {
            trails.push(TrailSnapshot {
                name: scene_name(tracked.descriptor.body),
                points: tracked.trail.to_vec(),
            });
        }
        PanelText {
            panel: PanelKind::Orbits,
            lines,
            stale,
        }
    }

    fn cosmology_panel(&self, time: &FrameTime, transforms: &mut Vec<Transform>) -> PanelText {
        let state = self.cosmology.evaluate(time.sim_time_ms);
        match &state.galactic {
            Some(orbit) => transforms.push(Transform::at("galactic_sun", orbit.scene_position)),
            None => transforms
                .push(Transform::at("universe_shell", [0.0; 3]).with_scale(state.scale_factor)),
        }
        PanelText {
            panel: PanelKind::Cosmology,
            lines: cosmology::overlay_lines(self.cosmology.variant(), &state),
            stale: false,
        }
    }
}

/// Lowercase scene object name of a body.
pub fn scene_name(body: Body) -> String {
    body.name().to_lowercase()
}

fn body_transform(body: Body, position: Vector3) -> Transform {
    Transform::at(scene_name(body), position).with_scale(body.descriptor().display_radius)
}

fn unavailable(panel: &str, err: &PanelError) -> String {
    warn!(%err, panel, "panel computation failed, keeping last geometry");
    format!("{panel} panel unavailable: {err}")
}
