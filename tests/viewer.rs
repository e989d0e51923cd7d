use std::cell::Cell;
use std::time::Duration;

use sky_viewer::app::App;
use sky_viewer::config::{ConfigContext, ConfigEvent, SpeedPreset, ViewerConfig};
use sky_viewer::core::vector::Vector3;
use sky_viewer::ephemeris::{AnalyticEphemeris, Body, EphemerisError, EphemerisProvider, Observer};
use sky_viewer::sim::clock::{ManualWallClock, SimulationClock};
use sky_viewer::sim::panels::earth::derive_orientation;
use sky_viewer::sim::render::{PanelKind, RenderFrame, RenderSink};
use sky_viewer::sim::viewer::Viewer;
use sky_viewer::weather::{Location, WeatherChannel, WeatherError, WeatherReport, WeatherSource};

const JUNE_SOLSTICE_NOON_MS: f64 = 1_718_971_200_000.0;

/// Analytic ephemeris that can be told to lose Neptune.
#[derive(Debug, Default)]
struct Flaky {
    inner: AnalyticEphemeris,
    lose_neptune: Cell<bool>,
}

impl EphemerisProvider for Flaky {
    fn helio_vector(&self, body: Body, time_ms: f64) -> Result<Vector3, EphemerisError> {
        if body == Body::Neptune && self.lose_neptune.get() {
            return Err(EphemerisError::UnsupportedBody {
                body: body.name(),
                operation: "heliocentric vectors",
            });
        }
        self.inner.helio_vector(body, time_ms)
    }

    fn geo_vector(&self, body: Body, time_ms: f64) -> Result<Vector3, EphemerisError> {
        self.inner.geo_vector(body, time_ms)
    }

    fn sidereal_time(&self, time_ms: f64) -> Result<f64, EphemerisError> {
        self.inner.sidereal_time(time_ms)
    }
}

fn clock_at(sim_ms: f64) -> SimulationClock<ManualWallClock> {
    SimulationClock::starting_at(ManualWallClock::new(0.0), sim_ms, 0.0)
}

fn viewer_at(sim_ms: f64) -> Viewer<Flaky, ManualWallClock> {
    Viewer::new(Flaky::default(), clock_at(sim_ms), ViewerConfig::default())
}

#[test]
fn every_panel_reads_the_same_frame_time() {
    let mut viewer = viewer_at(JUNE_SOLSTICE_NOON_MS);
    let frame = viewer.frame(1_000.0);
    assert_eq!(frame.frame_index, 0);
    assert_eq!(frame.time.sim_time_ms, JUNE_SOLSTICE_NOON_MS + 1_000.0);

    let kinds: Vec<PanelKind> = frame.panels.iter().map(|p| p.panel).collect();
    assert_eq!(kinds, PanelKind::ALL.to_vec());
    assert!(frame.panels.iter().all(|p| !p.stale));

    let earth = frame.panel(PanelKind::Earth).unwrap();
    assert_eq!(earth.lines[0], "Time: 2024-06-21 12:00:01 UTC");
    let clock = frame.panel(PanelKind::Clock).unwrap();
    assert!(clock.lines[0].starts_with("2024-06-21 12:00:01 UTC"));

    let orientation = derive_orientation(
        viewer.provider(),
        frame.time.sim_time_ms,
        &Observer::new(51.4779, -0.0015),
        0.0,
    )
    .unwrap();
    let globe = frame.transform("globe").unwrap();
    assert_eq!(globe.rotation, [0.0, orientation.spin_angle_rad, 0.0]);

    for name in [
        "sun_light", "sun", "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus",
        "neptune", "moon", "universe_shell",
    ] {
        assert!(frame.transform(name).is_some(), "missing transform {name}");
    }
    let earth_trail = frame.trail("earth").unwrap();
    assert_eq!(earth_trail.points.len(), 1);
    assert_eq!(
        earth_trail.points[0],
        frame.transform("earth").unwrap().position
    );
}

#[test]
fn a_failing_panel_keeps_its_last_geometry_and_the_others_continue() {
    let mut viewer = viewer_at(JUNE_SOLSTICE_NOON_MS);
    let first = viewer.frame(0.0);
    let neptune_before = first.transform("neptune").unwrap().position;

    viewer.provider().lose_neptune.set(true);
    let second = viewer.frame(1_000.0);
    let orbits = second.panel(PanelKind::Orbits).unwrap();
    assert!(orbits.stale);
    assert!(orbits.lines[0].starts_with("Orbit panel unavailable:"));
    assert_eq!(second.transform("neptune").unwrap().position, neptune_before);
    assert_eq!(second.trail("neptune").unwrap().points.len(), 1);

    let earth = second.panel(PanelKind::Earth).unwrap();
    assert!(!earth.stale);
    assert_eq!(earth.lines[0], "Time: 2024-06-21 12:00:01 UTC");

    viewer.provider().lose_neptune.set(false);
    let third = viewer.frame(2_000.0);
    assert!(!third.panel(PanelKind::Orbits).unwrap().stale);
    assert_eq!(third.trail("neptune").unwrap().points.len(), 2);
}

#[test]
fn out_of_range_time_degrades_without_panicking() {
    let year_2100_ms = 4_102_444_800_000.0;
    let mut viewer = viewer_at(year_2100_ms);
    let frame = viewer.frame(0.0);
    assert!(frame.panel(PanelKind::Earth).unwrap().stale);
    assert!(frame.panel(PanelKind::Orbits).unwrap().stale);
    assert!(!frame.panel(PanelKind::Cosmology).unwrap().stale);
    assert!(frame.transform("globe").is_none());
    assert!(frame.transform("universe_shell").is_some());
}

#[test]
fn drained_events_reach_the_clock_and_panels() {
    let mut viewer = viewer_at(JUNE_SOLSTICE_NOON_MS);
    let mut context = ConfigContext::new(ViewerConfig::default());
    viewer.frame(0.0);

    context
        .apply(ConfigEvent::SetSpeed(SpeedPreset::HourPerSecond))
        .unwrap();
    context.apply(ConfigEvent::SetCosmicAge(1.0)).unwrap();
    context.apply(ConfigEvent::SetLatitude(-33.9)).unwrap();
    let handled = viewer.apply_events(&mut context);
    assert_eq!(handled.len(), 3);
    assert_eq!(viewer.clock().speed(), 3_600.0);
    assert_eq!(viewer.observer().latitude_deg, -33.9);

    let frame = viewer.frame(1_000.0);
    assert_eq!(frame.time.sim_time_ms, JUNE_SOLSTICE_NOON_MS + 3_600_000.0);
    let cosmology = frame.panel(PanelKind::Cosmology).unwrap();
    assert!(cosmology.lines.iter().any(|l| l == "Cosmic age: 1.00 Gyr"));

    context.apply(ConfigEvent::SetPaused(true)).unwrap();
    viewer.apply_events(&mut context);
    let paused = viewer.frame(2_000.0);
    assert_eq!(paused.time.sim_time_ms, frame.time.sim_time_ms);

    viewer.clock().wall_clock().set(JUNE_SOLSTICE_NOON_MS + 42.0);
    context.apply(ConfigEvent::ResetNow).unwrap();
    viewer.apply_events(&mut context);
    assert_eq!(viewer.clock().sim_time_ms(), JUNE_SOLSTICE_NOON_MS + 42.0);
    assert!(viewer.apply_events(&mut context).is_empty());
}

#[test]
fn frames_can_be_collected_by_a_vec_sink() {
    let mut viewer = viewer_at(JUNE_SOLSTICE_NOON_MS);
    let mut sink: Vec<RenderFrame> = Vec::new();
    for i in 0..3 {
        let frame = viewer.frame(i as f64 * 1_000.0);
        sink.submit(&frame).unwrap();
    }
    assert_eq!(sink.len(), 3);
    assert_eq!(sink[2].frame_index, 2);
}

struct Sunny;

impl WeatherSource for Sunny {
    fn fetch(&self, _location: Location) -> Result<WeatherReport, WeatherError> {
        Ok(WeatherReport {
            temperature_c: 12.0,
            wind_speed_kmh: 4.0,
            weather_code: 0,
            is_day: true,
        })
    }
}

#[test]
fn app_appends_weather_to_the_earth_panel() {
    let weather = WeatherChannel::new(Sunny, Duration::from_secs(600));
    let mut app = App::new(
        ViewerConfig::default(),
        AnalyticEphemeris::default(),
        clock_at(JUNE_SOLSTICE_NOON_MS),
        Some(weather),
    );

    let first = app.frame(0.0);
    let earth = first.panel(PanelKind::Earth).unwrap();
    assert_eq!(earth.lines.last().unwrap(), "Weather: loading...");

    assert!(app.weather_mut().unwrap().wait(Duration::from_secs(5)));
    let second = app.frame(1_000.0);
    let earth = second.panel(PanelKind::Earth).unwrap();
    assert!(earth.lines.last().unwrap().starts_with("Weather: 12.0 °C"));
    assert_eq!(app.weather().unwrap().fetches_started(), 1);
}

#[test]
fn app_applies_submitted_events_on_the_next_frame() {
    let mut app = App::from_config(
        ViewerConfig::default(),
        AnalyticEphemeris::default(),
        clock_at(JUNE_SOLSTICE_NOON_MS),
    )
    .unwrap();
    assert!(app.weather().is_none());

    app.submit(ConfigEvent::SetSpeed(SpeedPreset::DayPerSecond))
        .unwrap();
    assert!(app.submit(ConfigEvent::SetGalaxyExaggeration(2.0)).is_err());
    assert_eq!(app.context().current().clock.speed, SpeedPreset::DayPerSecond);

    app.frame(0.0);
    let frame = app.frame(1_000.0);
    assert_eq!(frame.time.sim_time_ms, JUNE_SOLSTICE_NOON_MS + 86_400_000.0);
}
