//! Time system for Vaulter
//!
//! Handles frame delta time, the fixed-step accumulator that drives physics,
//! and one-shot timers for scheduled state expiry.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for physics (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Game time tracking
///
/// The surrounding loop owns the clock: it feeds `update` with the raw frame
/// delta, drains `fixed_steps` for the physics tick, and hands the clamped
/// `delta_time` to anything updating at the variable rate.
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Whether the simulation is paused
    pub paused: bool,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self {
            config: TimeConfig::default(),
            total_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            paused: false,
            fixed_accumulator: 0.0,
        }
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Update the game time with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.min(self.config.max_delta_time);
        self.frame_count += 1;

        if self.paused {
            self.delta_time = 0.0;
            return;
        }

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Get the number of fixed timesteps to process this frame
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        steps
    }

    /// Get the interpolation factor for rendering between physics steps
    pub fn fixed_interpolation(&self) -> f32 {
        self.fixed_accumulator / self.config.fixed_timestep
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}

/// A cancellable one-shot countdown owned by whoever schedules it.
///
/// Arming while a previous countdown is pending replaces it; there is never
/// more than one pending firing. `tick` reports the firing exactly once.
#[derive(Debug, Clone, Default)]
pub struct OneShotTimer {
    remaining: f32,
    armed: bool,
}

impl OneShotTimer {
    /// Create a disarmed timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire after `duration` seconds, replacing any
    /// pending countdown
    pub fn arm(&mut self, duration: f32) {
        self.remaining = duration;
        self.armed = true;
    }

    /// Disarm the timer without firing
    pub fn cancel(&mut self) {
        self.armed = false;
        self.remaining = 0.0;
    }

    /// Advance the countdown; returns true on the tick where it elapses
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.armed {
            return false;
        }

        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.armed = false;
            return true;
        }
        false
    }

    /// Whether a firing is pending
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Seconds left on the countdown (0.0 when disarmed)
    pub fn remaining(&self) -> f32 {
        if self.armed {
            self.remaining
        } else {
            0.0
        }
    }
}
