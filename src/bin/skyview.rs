use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use sky_viewer::app::App;
use sky_viewer::config::{
    CosmologyConfig, DEFAULT_COSMIC_AGE_GYR, DEFAULT_GALAXY_EXAGGERATION, SpeedPreset,
    ViewerConfig, read_viewer_config,
};
use sky_viewer::ephemeris::AnalyticEphemeris;
use sky_viewer::export::frames::JsonLinesSink;
use sky_viewer::export::{trails, writer_for_path};
use sky_viewer::logging::init_logging;
use sky_viewer::sim::clock::{ManualWallClock, SimulationClock, SystemWallClock, WallClock};
use sky_viewer::sim::render::{RenderFrame, RenderSink};
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CosmologyChoice {
    Universe,
    Galaxy,
}

/// Step the sky model frame by frame and print each panel's overlay.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Headless sky viewer: Earth orientation, planet orbits, cosmology panels"
)]
struct Cli {
    /// Viewer config file (.toml or .yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to produce
    #[arg(long, default_value_t = 5)]
    frames: u64,

    /// Frames per real second; sets the wall-clock step between frames
    #[arg(long, default_value_t = 1.0)]
    fps: f64,

    /// Playback speed: 1, 60, 3600 or 86400
    #[arg(long)]
    speed: Option<u32>,

    /// Start paused
    #[arg(long, default_value_t = false)]
    paused: bool,

    /// Observer latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Observer longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Simulated start time (RFC 3339); defaults to now
    #[arg(long)]
    start: Option<String>,

    /// Cosmology panel variant
    #[arg(long, value_enum)]
    cosmology: Option<CosmologyChoice>,

    /// Cosmic age in Gyr for the universe panel
    #[arg(long)]
    age: Option<f64>,

    /// Time exaggeration for the galaxy panel
    #[arg(long)]
    galaxy_exaggeration: Option<f64>,

    /// Enable the weather lookup for the observer location
    #[arg(long, default_value_t = false)]
    weather: bool,

    /// Write one JSON object per frame (use '-' for stdout)
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Write the final planet trails as CSV (use '-' for stdout)
    #[arg(long)]
    trail_csv: Option<PathBuf>,

    /// Pace frames against the system clock instead of stepping instantly
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Do not print overlays
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let file_config = load_config(&cli)?;
    init_logging(&file_config.logging.filter);
    let config = apply_overrides(&cli, file_config)?;

    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        return Err(anyhow!("--fps must be a positive number"));
    }
    let step_ms = 1_000.0 / cli.fps;

    let wall_start = SystemWallClock.now_ms();
    let sim_start = match &cli.start {
        Some(text) => parse_start(text)?,
        None => wall_start,
    };
    let clock = SimulationClock::starting_at(ManualWallClock::new(wall_start), sim_start, wall_start);
    let mut app = App::from_config(config, AnalyticEphemeris::default(), clock)?;

    let mut sink = match &cli.json_out {
        Some(path) => Some(JsonLinesSink::new(
            writer_for_path(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => None,
    };
    let print_overlays = !cli.quiet && !is_stdout(cli.json_out.as_ref()) && !is_stdout(cli.trail_csv.as_ref());
    info!(frames = cli.frames, fps = cli.fps, realtime = cli.realtime, "starting frame loop");

    let mut last_frame: Option<RenderFrame> = None;
    for i in 0..cli.frames {
        let wall_now = if cli.realtime {
            if i > 0 {
                thread::sleep(Duration::from_secs_f64(step_ms / 1_000.0));
            }
            SystemWallClock.now_ms()
        } else {
            wall_start + i as f64 * step_ms
        };
        app.viewer().clock().wall_clock().set(wall_now);
        let frame = app.frame(wall_now);

        if let Some(sink) = sink.as_mut() {
            sink.submit(&frame)?;
        }
        if print_overlays {
            print_frame(&frame);
        }
        last_frame = Some(frame);
    }

    if let Some(mut sink) = sink {
        sink.flush()?;
    }

    if let Some(weather) = app.weather_mut() {
        if weather.wait(Duration::from_secs(5)) && print_overlays {
            println!("{}", weather.status().overlay_line());
        }
    }

    if let Some(path) = &cli.trail_csv {
        let snapshots = last_frame.as_ref().map(|frame| frame.trails.as_slice()).unwrap_or(&[]);
        let mut writer = writer_for_path(path).with_context(|| format!("opening {}", path.display()))?;
        let rows = trails::write_trails(writer.as_mut(), snapshots)?;
        writer.flush()?;
        info!(rows, path = %path.display(), "trail CSV written");
    }

    Ok(())
}

/// Config file as written, before CLI overrides and clamping.
fn load_config(cli: &Cli) -> anyhow::Result<ViewerConfig> {
    match &cli.config {
        Some(path) => {
            read_viewer_config(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(ViewerConfig::default()),
    }
}

/// Layer CLI flags over the file config, then validate so clamps are logged.
fn apply_overrides(cli: &Cli, mut config: ViewerConfig) -> anyhow::Result<ViewerConfig> {
    if let Some(speed) = cli.speed {
        config.clock.speed = SpeedPreset::try_from(speed)?;
    }
    if cli.paused {
        config.clock.paused = true;
    }
    if let Some(lat) = cli.lat {
        config.observer.latitude_deg = lat;
    }
    if let Some(lon) = cli.lon {
        config.observer.longitude_deg = lon;
    }
    if cli.weather {
        config.weather.enabled = true;
    }

    let variant = cli.cosmology.unwrap_or(match config.cosmology {
        CosmologyConfig::Universe { .. } => CosmologyChoice::Universe,
        CosmologyConfig::Galaxy { .. } => CosmologyChoice::Galaxy,
    });
    config.cosmology = match (variant, &config.cosmology) {
        (CosmologyChoice::Universe, CosmologyConfig::Universe { cosmic_age_gyr }) => {
            CosmologyConfig::Universe {
                cosmic_age_gyr: cli.age.unwrap_or(*cosmic_age_gyr),
            }
        }
        (CosmologyChoice::Universe, _) => CosmologyConfig::Universe {
            cosmic_age_gyr: cli.age.unwrap_or(DEFAULT_COSMIC_AGE_GYR),
        },
        (CosmologyChoice::Galaxy, CosmologyConfig::Galaxy { galaxy_exaggeration }) => {
            CosmologyConfig::Galaxy {
                galaxy_exaggeration: cli.galaxy_exaggeration.unwrap_or(*galaxy_exaggeration),
            }
        }
        (CosmologyChoice::Galaxy, _) => CosmologyConfig::Galaxy {
            galaxy_exaggeration: cli
                .galaxy_exaggeration
                .unwrap_or(DEFAULT_GALAXY_EXAGGERATION),
        },
    };

    Ok(config.validated()?)
}

fn parse_start(text: &str) -> anyhow::Result<f64> {
    let parsed = DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("--start '{text}' is not an RFC 3339 timestamp"))?;
    Ok(parsed.with_timezone(&Utc).timestamp_millis() as f64)
}

fn is_stdout(path: Option<&PathBuf>) -> bool {
    path.map(|p| p.as_os_str() == "-").unwrap_or(false)
}

fn print_frame(frame: &RenderFrame) {
    println!("--- frame {} ---", frame.frame_index);
    for panel in &frame.panels {
        let marker = if panel.stale { " (stale)" } else { "" };
        for line in &panel.lines {
            println!("[{}{}] {}", panel.panel.label(), marker, line);
        }
    }
}
