//! Character movement controller
//!
//! Converts per-step input snapshots and environment contact queries into
//! forces and velocity changes on a physics body: run, jump with coyote
//! time, jump cut, wall slide, and wall jump. Two entry points are driven
//! by the host loop at their own cadences: `update` once per rendered frame
//! and `fixed_update` once per physics tick.

use glam::Vec2;
use tracing::debug;

use vaulter_core::time::OneShotTimer;
use vaulter_core::types::Transform2;
use vaulter_physics::{world_query_filter, PhysicsWorld, RigidBodyHandle};

use crate::input::ControlSnapshot;

use super::movement::MovementConfig;

/// Errors raised when a controller cannot be activated
#[derive(Debug, Clone, thiserror::Error)]
pub enum ActivationError {
    #[error("rigid body handle is not present in the physics world")]
    BodyMissing,

    #[error("jump cut multiplier must be in [0, 1), got {0}")]
    JumpCutOutOfRange(f32),

    #[error("check geometry must have positive extent")]
    DegenerateCheckGeometry,
}

/// Movement controller for one character
///
/// Owns the motion state machine; the rigid body itself belongs to the
/// physics world and is addressed by handle.
pub struct MovementController {
    /// Movement configuration
    config: MovementConfig,
    /// The character's rigid body
    body: RigidBodyHandle,
    /// Presentation transform; the horizontal scale sign mirrors with facing
    transform: Transform2,
    /// Whether the character faces right
    facing_right: bool,
    /// Horizontal input axis for the current step, in [-1, 1]
    move_input: f32,
    /// Latched once vertical velocity turns positive; cleared on ground contact
    is_jumping: bool,
    /// Raw wall-slide flag (the public query masks it while wall jumping)
    is_wall_sliding: bool,
    /// Wall-jump override: suspends normal horizontal control while set
    is_wall_jumping: bool,
    /// Launch direction of the next wall jump, -1.0 or +1.0
    wall_jump_direction: f32,
    /// Wall-jump grace budget in seconds; only the sign is ever read
    wall_jump_counter: f32,
    /// Coyote-time budget in seconds; only the sign is ever read
    last_on_ground: f32,
    /// Clears the wall-jump override when it elapses
    wall_jump_expiry: OneShotTimer,
}

impl MovementController {
    /// Create a controller for a body already present in the world
    ///
    /// Fails fast on a stale handle or degenerate check geometry; the
    /// controller cannot operate without either.
    pub fn new(
        config: MovementConfig,
        body: RigidBodyHandle,
        physics: &mut PhysicsWorld,
    ) -> Result<Self, ActivationError> {
        if !physics.contains_body(body) {
            return Err(ActivationError::BodyMissing);
        }
        if !(0.0..1.0).contains(&config.jump_cut_multiplier) {
            return Err(ActivationError::JumpCutOutOfRange(config.jump_cut_multiplier));
        }
        if config.ground_check_size.x <= 0.0
            || config.ground_check_size.y <= 0.0
            || config.wall_check_radius <= 0.0
        {
            return Err(ActivationError::DegenerateCheckGeometry);
        }

        physics.set_gravity_scale(body, config.gravity_scale);
        let position = physics.position(body);

        Ok(Self {
            config,
            body,
            transform: Transform2::from_position(position),
            facing_right: true,
            move_input: 0.0,
            is_jumping: false,
            is_wall_sliding: false,
            is_wall_jumping: false,
            wall_jump_direction: 0.0,
            wall_jump_counter: 0.0,
            last_on_ground: 0.0,
            wall_jump_expiry: OneShotTimer::new(),
        })
    }

    /// Variable-step update, once per rendered frame
    pub fn update(&mut self, physics: &mut PhysicsWorld, input: &ControlSnapshot, dt: f32) {
        if self.wall_jump_expiry.tick(dt) {
            self.is_wall_jumping = false;
        }

        self.last_on_ground -= dt;
        self.move_input = input.horizontal_axis;
        self.transform.position = physics.position(self.body);

        if self.move_input != 0.0 && !self.is_wall_jumping {
            self.face_toward(self.move_input > 0.0);
        }

        if self.ground_check(physics) {
            if self.is_jumping {
                debug!("landed");
            }
            self.last_on_ground = self.config.coyote_time;
            self.is_jumping = false;
        }

        self.apply_jump_state(physics);
        self.apply_wall_slide(physics);
        self.apply_wall_jump(physics, input, dt);

        if input.jump_pressed && self.can_jump() {
            self.jump(physics);
        }
    }

    /// Fixed-step update, once per physics tick
    ///
    /// While the wall-jump override is active, horizontal control is
    /// suspended entirely.
    pub fn fixed_update(&mut self, physics: &mut PhysicsWorld) {
        if !self.is_wall_jumping {
            self.run(physics);
        }
    }

    /// Current horizontal velocity of the body
    pub fn horizontal_velocity(&self, physics: &PhysicsWorld) -> f32 {
        physics.velocity(self.body).x
    }

    /// Whether the character is wall sliding; a wall jump always overrides
    pub fn is_wall_sliding(&self) -> bool {
        self.is_wall_sliding && !self.is_wall_jumping
    }

    /// Whether the character is mid-jump
    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    /// Whether a jump is currently allowed (coyote budget open, not mid-jump)
    pub fn can_jump(&self) -> bool {
        self.last_on_ground > 0.0 && !self.is_jumping
    }

    /// Whether the character faces right
    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    /// Presentation transform, mirrored with facing
    pub fn transform(&self) -> &Transform2 {
        &self.transform
    }

    /// Handle of the character's rigid body
    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    /// Horizontal run force for the current step
    ///
    /// Asymmetric accel/decel with a power-law response: snappy direction
    /// changes without instant velocity snapping.
    fn run_force(axis: f32, current: f32, config: &MovementConfig) -> f32 {
        let target_speed = axis * config.run_max_speed;
        let speed_dif = target_speed - current;
        let accel_rate = if target_speed.abs() > 0.01 {
            config.run_acceleration
        } else {
            config.run_deceleration
        };

        (speed_dif.abs() * accel_rate).powf(config.velocity_power) * speed_dif.signum()
    }

    fn run(&mut self, physics: &mut PhysicsWorld) {
        let current = physics.velocity(self.body).x;
        let force = Self::run_force(self.move_input, current, &self.config);
        physics.apply_force(self.body, Vec2::new(force, 0.0));
    }

    fn jump(&mut self, physics: &mut PhysicsWorld) {
        physics.apply_impulse(self.body, Vec2::new(0.0, self.config.jump_force));
        // Consume the whole grace budget so one window yields one jump
        self.last_on_ground = 0.0;
        debug!("jump");
    }

    /// Jump-state bookkeeping: latch `is_jumping`, damp the ascent, and
    /// modulate gravity
    fn apply_jump_state(&mut self, physics: &mut PhysicsWorld) {
        let velocity = physics.velocity(self.body);

        if velocity.y > 0.0 {
            self.is_jumping = true;
        }

        // The ascent damping fires on every rising frame while the jump flag
        // is set; it is not gated on button release
        if self.is_jumping && velocity.y > 0.0 {
            let cancel = velocity.y * (1.0 - self.config.jump_cut_multiplier);
            physics.apply_impulse(self.body, Vec2::new(0.0, -cancel));
        }

        if velocity.y < 0.0 {
            physics.set_gravity_scale(
                self.body,
                self.config.gravity_scale * self.config.fall_gravity_multiplier,
            );
        } else {
            physics.set_gravity_scale(self.body, self.config.gravity_scale);
        }
    }

    fn apply_wall_slide(&mut self, physics: &mut PhysicsWorld) {
        if self.is_walled(physics) && self.is_jumping && self.move_input != 0.0 {
            self.is_wall_sliding = true;

            let velocity = physics.velocity(self.body);
            if velocity.y < -self.config.wall_slide_speed {
                physics.set_velocity(
                    self.body,
                    Vec2::new(velocity.x, -self.config.wall_slide_speed),
                );
            }
        } else {
            self.is_wall_sliding = false;
        }
    }

    fn apply_wall_jump(&mut self, physics: &mut PhysicsWorld, input: &ControlSnapshot, dt: f32) {
        if self.is_wall_sliding {
            self.is_wall_jumping = false;
            self.wall_jump_direction = -self.transform.facing_sign();
            self.wall_jump_counter = self.config.wall_jump_time;

            self.wall_jump_expiry.cancel();
        } else {
            self.wall_jump_counter -= dt;
        }

        if input.jump_pressed && self.wall_jump_counter > 0.0 {
            self.is_wall_jumping = true;
            self.is_wall_sliding = false;
            physics.set_velocity(
                self.body,
                Vec2::new(
                    self.wall_jump_direction * self.config.wall_jump_power.x,
                    self.config.wall_jump_power.y,
                ),
            );
            // One shot per wall contact
            self.wall_jump_counter = 0.0;

            if self.transform.facing_sign() != self.wall_jump_direction {
                self.turn();
            }

            self.wall_jump_expiry.arm(self.config.wall_jump_duration);
            debug!(direction = self.wall_jump_direction, "wall jump");
        }
    }

    fn ground_check(&self, physics: &PhysicsWorld) -> bool {
        let center = self.transform.position + self.config.ground_check_offset;
        physics.overlap_box(center, self.config.ground_check_size, world_query_filter())
    }

    /// Wall contact probe; the offset leads the facing side
    fn is_walled(&self, physics: &PhysicsWorld) -> bool {
        let offset = self.config.wall_check_offset;
        let center = self.transform.position
            + Vec2::new(offset.x * self.transform.facing_sign(), offset.y);
        physics.overlap_circle(center, self.config.wall_check_radius, world_query_filter())
    }

    fn face_toward(&mut self, moving_right: bool) {
        if moving_right != self.facing_right {
            self.turn();
        }
    }

    /// The only place orientation changes: mirrors the transform and flips
    /// the facing flag together
    fn turn(&mut self) {
        self.transform.mirror_x();
        self.facing_right = !self.facing_right;
    }
}
