//! Vaulter - a 2D platformer character locomotion demo
//!
//! Runs a headless, scripted simulation of the movement controller: sprint
//! toward a wall, jump, wall-slide, and wall-jump away again. The animation
//! presenter's parameters are logged as the visual layer would consume them.

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use vaulter_core::GameTime;
use vaulter_game::{ControlSnapshot, MovementController, StatePresenter};
use vaulter_physics::PhysicsWorld;

mod tuning;

/// Simulation wiring for one character
struct DemoApp {
    physics: PhysicsWorld,
    controller: MovementController,
    presenter: StatePresenter,
    time: GameTime,
}

impl DemoApp {
    fn new() -> Result<Self> {
        let config = tuning::load(Path::new("tuning.toml"));

        let mut physics = PhysicsWorld::new();
        // Floor with its top surface at y = 0, walls closing the arena at
        // x = +-5
        physics.create_static_box(Vec2::new(20.0, 0.5), Vec2::new(0.0, -0.5));
        physics.create_static_box(Vec2::new(0.5, 10.0), Vec2::new(5.5, 9.5));
        physics.create_static_box(Vec2::new(0.5, 10.0), Vec2::new(-5.5, 9.5));

        let (body, _) = physics.add_character_body(Vec2::new(0.0, 1.0), 0.6, 0.4);
        let controller = MovementController::new(config, body, &mut physics)
            .context("Failed to activate movement controller")?;

        Ok(Self {
            physics,
            controller,
            presenter: StatePresenter::new(),
            time: GameTime::default(),
        })
    }

    /// One frame: drain pending fixed steps, then the variable-step update
    fn frame(&mut self, input: &ControlSnapshot, raw_delta: f32) {
        self.time.update(raw_delta);

        for _ in 0..self.time.fixed_steps() {
            self.controller.fixed_update(&mut self.physics);
            self.physics.step();
        }

        self.controller
            .update(&mut self.physics, input, self.time.delta_time);
        self.presenter.update(&self.controller, &self.physics);
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    info!("Starting Vaulter demo...");

    let mut app = DemoApp::new()?;

    let frame_dt = 1.0 / 60.0;
    let mut wall_contacts = 0;
    let mut was_wall_sliding = false;

    for frame in 0..600u32 {
        let sliding = app.controller.is_wall_sliding();

        // Scripted pilot: one jump off the ground, then a wall jump on each
        // fresh wall contact while the budget lasts
        let jump_pressed = frame == 30 || (sliding && !was_wall_sliding && wall_contacts < 3);
        if sliding && !was_wall_sliding {
            wall_contacts += 1;
        }
        was_wall_sliding = sliding;

        let input = ControlSnapshot {
            horizontal_axis: 1.0,
            jump_pressed,
        };
        app.frame(&input, frame_dt);

        if frame % 30 == 0 {
            let position = app.physics.position(app.controller.body());
            let params = app.presenter.params();
            info!(
                frame,
                x = position.x,
                y = position.y,
                speed = params.run_speed,
                wall_slide = params.wall_sliding,
                jumping = params.jumping,
                "state"
            );
        }
    }

    info!(wall_contacts, "Demo finished");
    Ok(())
}
