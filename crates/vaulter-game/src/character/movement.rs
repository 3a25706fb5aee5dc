//! Movement tuning and constants

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Movement configuration
///
/// Immutable for the lifetime of a controller; every behavior knob of the
/// run/jump/wall state machine lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Top horizontal run speed in meters per second
    pub run_max_speed: f32,
    /// Acceleration rate used while input drives toward a target speed
    pub run_acceleration: f32,
    /// Deceleration rate used when returning to rest
    pub run_deceleration: f32,
    /// Exponent of the run force response curve
    pub velocity_power: f32,
    /// Upward impulse magnitude for a jump
    pub jump_force: f32,
    /// Fraction of upward velocity kept by the ascent damping, in [0, 1)
    pub jump_cut_multiplier: f32,
    /// Gravity scale while grounded or rising
    pub gravity_scale: f32,
    /// Gravity scale factor applied while falling
    pub fall_gravity_multiplier: f32,
    /// Grace period after leaving the ground where a jump is still allowed
    pub coyote_time: f32,
    /// Maximum downward speed while wall sliding
    pub wall_slide_speed: f32,
    /// Launch velocity of a wall jump (x is away from the wall)
    pub wall_jump_power: Vec2,
    /// Grace period after leaving a wall where a wall jump is still allowed
    pub wall_jump_time: f32,
    /// How long a wall jump suppresses normal horizontal control
    pub wall_jump_duration: f32,
    /// Ground probe center, relative to the body
    pub ground_check_offset: Vec2,
    /// Ground probe box size (full extents)
    pub ground_check_size: Vec2,
    /// Wall probe center relative to the body; x mirrors with facing
    pub wall_check_offset: Vec2,
    /// Wall probe radius
    pub wall_check_radius: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            run_max_speed: 10.0,
            run_acceleration: 9.5,
            run_deceleration: 13.0,
            velocity_power: 0.96,
            jump_force: 10.0,
            jump_cut_multiplier: 0.95,
            gravity_scale: 1.0,
            fall_gravity_multiplier: 1.9,
            coyote_time: 0.1,
            wall_slide_speed: 2.0,
            wall_jump_power: Vec2::new(8.0, 22.0),
            wall_jump_time: 0.2,
            wall_jump_duration: 0.2,
            ground_check_offset: Vec2::new(0.0, -1.0),
            ground_check_size: Vec2::new(0.49, 0.1),
            wall_check_offset: Vec2::new(0.55, 0.0),
            wall_check_radius: 0.2,
        }
    }
}
