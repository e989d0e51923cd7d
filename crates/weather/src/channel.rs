//! Fire-and-forget weather fetches with a cooldown and an in-flight guard.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use sky_config::WeatherConfig;
use tracing::{debug, info, warn};

use crate::{Location, OpenMeteoSource, WeatherError, WeatherReport, WeatherSource};

/// What the overlay should show for weather.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherStatus {
    Idle,
    Loading,
    Ready {
        report: WeatherReport,
        location: Location,
    },
    Failed(String),
}

impl WeatherStatus {
    pub fn overlay_line(&self) -> String {
        match self {
            Self::Idle => "Weather: not requested".to_string(),
            Self::Loading => "Weather: loading...".to_string(),
            Self::Ready { report, .. } => format!("Weather: {}", report.summary()),
            Self::Failed(err) => format!("Weather unavailable: {err}"),
        }
    }
}

struct Outcome {
    location: Location,
    result: Result<WeatherReport, String>,
}

/// Background weather lookups keyed by observer location.
///
/// A fetch fires from [`poll`](Self::poll) when none is in flight and the
/// cooldown since the previous fetch has elapsed. Moving the location resets
/// the cooldown. Results are accepted whenever they arrive, even for a location
/// the observer has since left; the next fetch overwrites them.
pub struct WeatherChannel<S: WeatherSource = OpenMeteoSource> {
    source: Arc<S>,
    cooldown_ms: f64,
    sender: Sender<Outcome>,
    receiver: Receiver<Outcome>,
    in_flight: bool,
    last_fetch_ms: Option<f64>,
    last_location: Option<Location>,
    fetches_started: u64,
    status: WeatherStatus,
}

impl WeatherChannel<OpenMeteoSource> {
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let source = OpenMeteoSource::new(config.endpoint.clone())?;
        Ok(Self::new(
            source,
            Duration::from_secs(config.cooldown_secs),
        ))
    }
}

impl<S: WeatherSource> WeatherChannel<S> {
    pub fn new(source: S, cooldown: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            source: Arc::new(source),
            cooldown_ms: cooldown.as_secs_f64() * 1_000.0,
            sender,
            receiver,
            in_flight: false,
            last_fetch_ms: None,
            last_location: None,
            fetches_started: 0,
            status: WeatherStatus::Idle,
        }
    }

    pub fn status(&self) -> &WeatherStatus {
        &self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Number of fetches started since construction.
    pub fn fetches_started(&self) -> u64 {
        self.fetches_started
    }

    /// Clear the cooldown so the next poll fetches (if nothing is in flight).
    pub fn refresh(&mut self) {
        self.last_fetch_ms = None;
    }

    /// Drain finished fetches, then start a new one if allowed.
    pub fn poll(&mut self, wall_now_ms: f64, location: Location) -> &WeatherStatus {
        self.drain();

        if self.last_location != Some(location) {
            if self.last_location.is_some() {
                debug!(?location, "observer moved, weather cooldown reset");
            }
            self.last_location = Some(location);
            self.last_fetch_ms = None;
        }

        let cooled_down = self
            .last_fetch_ms
            .map(|last| wall_now_ms - last >= self.cooldown_ms)
            .unwrap_or(true);
        if !self.in_flight && cooled_down {
            self.start_fetch(wall_now_ms, location);
        }
        &self.status
    }

    /// Block up to `timeout` for the in-flight fetch to finish. Returns whether one did.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        if !self.in_flight {
            return false;
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => {
                self.accept(outcome);
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    fn drain(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(outcome) => self.accept(outcome),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn accept(&mut self, outcome: Outcome) {
        self.in_flight = false;
        self.status = match outcome.result {
            Ok(report) => {
                info!(location = ?outcome.location, code = report.weather_code, "weather updated");
                WeatherStatus::Ready {
                    report,
                    location: outcome.location,
                }
            }
            Err(err) => {
                warn!(location = ?outcome.location, %err, "weather lookup failed");
                WeatherStatus::Failed(err)
            }
        };
    }

    fn start_fetch(&mut self, wall_now_ms: f64, location: Location) {
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name("weather-fetch".to_string())
            .spawn(move || {
                let result = source.fetch(location).map_err(|err| err.to_string());
                // The receiver is gone only if the channel was dropped mid-fetch.
                let _ = sender.send(Outcome { location, result });
            });

        self.last_fetch_ms = Some(wall_now_ms);
        match spawned {
            Ok(_) => {
                self.in_flight = true;
                self.fetches_started += 1;
                if !matches!(self.status, WeatherStatus::Ready { .. }) {
                    self.status = WeatherStatus::Loading;
                }
                debug!(?location, "weather fetch started");
            }
            Err(err) => {
                let err = WeatherError::from(err);
                warn!(%err, "weather worker not started");
                self.status = WeatherStatus::Failed(err.to_string());
            }
        }
    }
}
