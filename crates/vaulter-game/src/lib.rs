//! Vaulter Game - character locomotion logic and input
//!
//! The movement controller turns per-step input snapshots and environment
//! contact queries into forces and velocity changes on a physics body; the
//! state presenter mirrors its flags for an animation state machine.

pub mod character;
pub mod input;

pub use character::{ActivationError, AnimationParams, MovementConfig, MovementController, StatePresenter};
pub use input::{ControlSnapshot, InputAction, InputBindings, InputHandler, InputState};
