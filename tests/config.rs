use std::io::Write;

use sky_viewer::config::{
    ConfigContext, ConfigError, ConfigEvent, CosmologyConfig, MIN_WEATHER_COOLDOWN_SECS,
    SpeedPreset, ViewerConfig, load_viewer_config, read_viewer_config,
};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("tempfile");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn sample_config_loads() {
    let config = load_viewer_config("configs/viewer.toml").expect("sample config");
    assert_eq!(config.clock.speed, SpeedPreset::HourPerSecond);
    assert_eq!(config.orbits.moon_exaggeration, 60.0);
    assert_eq!(config.cosmology.variant_name(), "universe");
}

#[test]
fn reading_keeps_out_of_range_values_until_validated() {
    let file = write_temp(
        ".toml",
        r#"
[observer]
latitude_deg = 95.0

[logging]
filter = "warn"
"#,
    );
    let raw = read_viewer_config(file.path()).expect("raw config");
    assert_eq!(raw.observer.latitude_deg, 95.0);
    assert_eq!(raw.logging.filter, "warn");

    let config = raw.validated().expect("validated config");
    assert_eq!(config.observer.latitude_deg, 90.0);
}

#[test]
fn toml_sections_are_optional_and_clamped() {
    let file = write_temp(
        ".toml",
        r#"
[observer]
latitude_deg = 95.0
longitude_deg = 200.0

[cosmology]
variant = "galaxy"
galaxy_exaggeration = -3.0

[weather]
cooldown_secs = 1
"#,
    );
    let config = load_viewer_config(file.path()).expect("toml config");
    assert_eq!(config.observer.latitude_deg, 90.0);
    assert_eq!(config.observer.longitude_deg, 180.0);
    assert_eq!(
        config.cosmology,
        CosmologyConfig::Galaxy {
            galaxy_exaggeration: 1.0e8
        }
    );
    assert_eq!(config.weather.cooldown_secs, MIN_WEATHER_COOLDOWN_SECS);
    assert_eq!(config.clock.speed, SpeedPreset::RealTime);
}

#[test]
fn yaml_config_loads() {
    let file = write_temp(
        ".yaml",
        "clock:\n  paused: true\n  speed: 86400\nearth:\n  texture_offset_deg: -400\norbits:\n  trail_capacity: 0\n",
    );
    let config = load_viewer_config(file.path()).expect("yaml config");
    assert!(config.clock.paused);
    assert_eq!(config.clock.speed, SpeedPreset::DayPerSecond);
    assert_eq!(config.earth.texture_offset_deg, -180.0);
    assert_eq!(config.orbits.trail_capacity, 2);
}

#[test]
fn unknown_speed_is_rejected() {
    let file = write_temp(".toml", "[clock]\nspeed = 42\n");
    let err = load_viewer_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err}");
    assert!(err.to_string().contains("42"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_viewer_config("configs/does-not-exist.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn context_queues_validated_events_in_order() {
    let mut context = ConfigContext::new(ViewerConfig::default());
    let applied = context.apply(ConfigEvent::SetLatitude(120.0)).unwrap();
    assert_eq!(applied, ConfigEvent::SetLatitude(90.0));
    context
        .apply(ConfigEvent::SetSpeed(SpeedPreset::MinutePerSecond))
        .unwrap();
    context.apply(ConfigEvent::ResetNow).unwrap();

    assert!(context.has_pending());
    assert_eq!(context.current().observer.latitude_deg, 90.0);
    let events = context.drain_events();
    assert_eq!(
        events,
        vec![
            ConfigEvent::SetLatitude(90.0),
            ConfigEvent::SetSpeed(SpeedPreset::MinutePerSecond),
            ConfigEvent::ResetNow,
        ]
    );
    assert!(!context.has_pending());
    assert!(events[0].is_location_change());
}

#[test]
fn snapshots_do_not_see_later_changes() {
    let mut context = ConfigContext::new(ViewerConfig::default());
    let snapshot = context.snapshot();
    context.apply(ConfigEvent::SetLongitude(10.0)).unwrap();
    assert_eq!(snapshot.observer.longitude_deg, -0.0015);
    assert_eq!(context.current().observer.longitude_deg, 10.0);
}

#[test]
fn cosmology_events_must_match_the_active_variant() {
    let mut context = ConfigContext::new(ViewerConfig::default());
    let err = context
        .apply(ConfigEvent::SetGalaxyExaggeration(5.0))
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::VariantMismatch {
            expected: "galaxy",
            active: "universe",
            ..
        }
    ));
    assert!(!context.has_pending());

    let applied = context.apply(ConfigEvent::SetCosmicAge(-1.0)).unwrap();
    assert_eq!(applied, ConfigEvent::SetCosmicAge(0.0));
    assert!(applied.is_cosmology_change());
}

#[test]
fn non_finite_values_are_rejected() {
    let mut context = ConfigContext::new(ViewerConfig::default());
    assert!(matches!(
        context.apply(ConfigEvent::SetTextureOffset(f64::NAN)),
        Err(ConfigError::NotFinite { .. })
    ));
}
