//! Simulated clock advanced once per rendered frame.

use std::cell::Cell;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

/// Source of wall-clock time in Unix milliseconds.
pub trait WallClock {
    fn now_ms(&self) -> f64;
}

/// Reads the system clock through chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now_ms(&self) -> f64 {
        Utc::now().timestamp_millis() as f64
    }
}

/// Wall clock that only moves when told to. Used by deterministic hosts and tests.
#[derive(Debug, Default)]
pub struct ManualWallClock {
    now_ms: Cell<f64>,
}

impl ManualWallClock {
    pub fn new(now_ms: f64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }
}

impl WallClock for ManualWallClock {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}

/// Timing snapshot shared by every panel within one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameTime {
    pub wall_now_ms: f64,
    pub sim_time_ms: f64,
    pub dt_real_s: f64,
}

/// Owns simulated time, playback speed, and pause state.
#[derive(Debug)]
pub struct SimulationClock<C: WallClock = SystemWallClock> {
    wall: C,
    sim_time_ms: f64,
    last_wall_ms: f64,
    speed: f64,
    paused: bool,
}

impl SimulationClock<SystemWallClock> {
    /// Clock anchored to the system clock, starting at "now" in real time.
    pub fn system() -> Self {
        Self::new(SystemWallClock)
    }
}

impl<C: WallClock> SimulationClock<C> {
    /// Start with simulated time equal to the wall clock's current time.
    pub fn new(wall: C) -> Self {
        let now = wall.now_ms();
        Self::starting_at(wall, now, now)
    }

    /// Start at an explicit simulated time, anchored at `wall_now_ms`.
    pub fn starting_at(wall: C, sim_time_ms: f64, wall_now_ms: f64) -> Self {
        Self {
            wall,
            sim_time_ms,
            last_wall_ms: wall_now_ms,
            speed: 1.0,
            paused: false,
        }
    }

    /// Advance to `wall_now_ms` and return the updated snapshot.
    ///
    /// A wall time earlier than the previous tick yields `dt_real_s = 0`; the
    /// anchor is never moved backwards.
    pub fn tick(&mut self, wall_now_ms: f64) -> FrameTime {
        let dt_ms = (wall_now_ms - self.last_wall_ms).max(0.0);
        if wall_now_ms > self.last_wall_ms {
            self.last_wall_ms = wall_now_ms;
        }
        let dt_real_s = dt_ms / 1_000.0;
        if self.advances() {
            self.sim_time_ms += dt_real_s * 1_000.0 * self.speed;
        }
        FrameTime {
            wall_now_ms,
            sim_time_ms: self.sim_time_ms,
            dt_real_s,
        }
    }

    /// Tick using the clock's own wall source.
    pub fn tick_now(&mut self) -> FrameTime {
        let now = self.wall.now_ms();
        self.tick(now)
    }

    /// Jump simulated time to the current wall-clock time, whatever the pause or speed state.
    pub fn reset_now(&mut self) {
        self.sim_time_ms = self.wall.now_ms();
    }

    /// Negative or non-finite speeds are treated as 0.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed >= 0.0 {
            self.speed = speed;
        } else {
            warn!(requested = speed, "invalid clock speed, stopping time instead");
            self.speed = 0.0;
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Both the pause flag and a zero speed stop simulated time.
    pub fn advances(&self) -> bool {
        !self.paused && self.speed > 0.0
    }

    pub fn sim_time_ms(&self) -> f64 {
        self.sim_time_ms
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn last_wall_ms(&self) -> f64 {
        self.last_wall_ms
    }

    pub fn wall_clock(&self) -> &C {
        &self.wall
    }
}

/// Render a simulated time as a UTC timestamp for overlays.
pub fn format_sim_time(time_ms: f64) -> String {
    if !time_ms.is_finite() {
        return "invalid time".to_string();
    }
    match DateTime::<Utc>::from_timestamp_millis(time_ms.round() as i64) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "time out of range".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_unix_epoch() {
        assert_eq!(format_sim_time(0.0), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn non_finite_time_is_labelled() {
        assert_eq!(format_sim_time(f64::NAN), "invalid time");
    }
}
