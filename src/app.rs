//! Frame driver for hosts: configuration events in, render frames out.

use sky_config::{ConfigContext, ConfigError, ConfigEvent, ViewerConfig};
use sky_ephem::EphemerisProvider;
use sky_sim::clock::{SimulationClock, SystemWallClock, WallClock};
use sky_sim::render::{PanelKind, RenderFrame};
use sky_sim::viewer::Viewer;
use sky_weather::{Location, OpenMeteoSource, WeatherChannel, WeatherError, WeatherSource};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Weather(#[from] WeatherError),
}

/// Owns the configuration context, the viewer, and the optional weather side-channel.
pub struct App<P: EphemerisProvider, C: WallClock = SystemWallClock, S: WeatherSource = OpenMeteoSource>
{
    context: ConfigContext,
    viewer: Viewer<P, C>,
    weather: Option<WeatherChannel<S>>,
}

impl<P: EphemerisProvider, C: WallClock> App<P, C, OpenMeteoSource> {
    /// Build an app whose weather channel (if enabled) talks to the configured endpoint.
    pub fn from_config(
        config: ViewerConfig,
        provider: P,
        clock: SimulationClock<C>,
    ) -> Result<Self, AppError> {
        let weather = if config.weather.enabled {
            Some(WeatherChannel::from_config(&config.weather)?)
        } else {
            None
        };
        Ok(Self::new(config, provider, clock, weather))
    }
}

impl<P: EphemerisProvider, C: WallClock, S: WeatherSource> App<P, C, S> {
    pub fn new(
        config: ViewerConfig,
        provider: P,
        clock: SimulationClock<C>,
        weather: Option<WeatherChannel<S>>,
    ) -> Self {
        let context = ConfigContext::new(config);
        let viewer = Viewer::new(provider, clock, context.snapshot());
        Self {
            context,
            viewer,
            weather,
        }
    }

    /// Validate and queue a change; it takes effect on the next frame.
    pub fn submit(&mut self, event: ConfigEvent) -> Result<ConfigEvent, ConfigError> {
        self.context.apply(event).inspect_err(|err| {
            warn!(?event, %err, "config event rejected");
        })
    }

    pub fn refresh_weather(&mut self) {
        if let Some(weather) = &mut self.weather {
            weather.refresh();
        }
    }

    /// Apply queued events, derive the frame, and append the weather line to the Earth panel.
    pub fn frame(&mut self, wall_now_ms: f64) -> RenderFrame {
        self.viewer.apply_events(&mut self.context);
        let mut frame = self.viewer.frame(wall_now_ms);

        if let Some(weather) = &mut self.weather {
            let observer = &self.viewer.config().observer;
            let location = Location::new(observer.latitude_deg, observer.longitude_deg);
            let line = weather.poll(wall_now_ms, location).overlay_line();
            if let Some(panel) = frame.panel_mut(PanelKind::Earth) {
                panel.lines.push(line);
            }
        }
        frame
    }

    pub fn frame_now(&mut self) -> RenderFrame {
        let now = self.viewer.clock().wall_clock().now_ms();
        self.frame(now)
    }

    pub fn viewer(&self) -> &Viewer<P, C> {
        &self.viewer
    }

    pub fn context(&self) -> &ConfigContext {
        &self.context
    }

    pub fn weather(&self) -> Option<&WeatherChannel<S>> {
        self.weather.as_ref()
    }

    pub fn weather_mut(&mut self) -> Option<&mut WeatherChannel<S>> {
        self.weather.as_mut()
    }
}
