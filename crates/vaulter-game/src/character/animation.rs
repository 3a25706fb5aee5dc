//! Animation state presentation
//!
//! Mirrors the controller's query surface into the parameters an animation
//! state machine consumes: a continuous run speed and two boolean flags.
//! Pure consumer; nothing here feeds back into the controller.

use serde::{Deserialize, Serialize};

use vaulter_physics::PhysicsWorld;

use super::controller::MovementController;

/// Parameters driving the character's animation state machine
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationParams {
    /// Magnitude of the horizontal velocity
    pub run_speed: f32,
    /// Wall-slide pose (a wall jump always wins over it)
    pub wall_sliding: bool,
    /// Airborne jump pose
    pub jumping: bool,
}

/// Reads the movement controller once per variable step and republishes its
/// state for the visual layer
#[derive(Debug, Default)]
pub struct StatePresenter {
    params: AnimationParams,
}

impl StatePresenter {
    /// Create a presenter with neutral parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the controller's queries for this frame
    pub fn update(&mut self, controller: &MovementController, physics: &PhysicsWorld) {
        self.params = AnimationParams {
            run_speed: controller.horizontal_velocity(physics).abs(),
            wall_sliding: controller.is_wall_sliding(),
            jumping: controller.is_jumping(),
        };
    }

    /// The most recently sampled parameters
    pub fn params(&self) -> &AnimationParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::MovementConfig;
    use glam::Vec2;

    fn test_world() -> (PhysicsWorld, MovementController) {
        let mut physics = PhysicsWorld::new();
        physics.create_static_box(Vec2::new(50.0, 0.5), Vec2::new(0.0, -0.5));
        let (body, _) = physics.add_character_body(Vec2::new(0.0, 5.0), 0.6, 0.4);
        let controller = MovementController::new(MovementConfig::default(), body, &mut physics)
            .expect("activation");
        (physics, controller)
    }

    #[test]
    fn test_presenter_mirrors_controller_state() {
        let (mut physics, mut controller) = test_world();
        let mut presenter = StatePresenter::new();

        presenter.update(&controller, &physics);
        assert_eq!(*presenter.params(), AnimationParams::default());

        // Moving left and rising: speed is reported as a magnitude and the
        // jump flag latches
        physics.set_velocity(controller.body(), Vec2::new(-3.0, 1.0));
        controller.update(&mut physics, &Default::default(), 1.0 / 60.0);
        presenter.update(&controller, &physics);

        let params = presenter.params();
        assert_eq!(params.run_speed, 3.0);
        assert!(params.jumping);
        assert!(!params.wall_sliding);
    }
}
