//! Character module
//!
//! Movement controller, tuning, and animation-state presentation.

mod animation;
mod controller;
mod movement;

pub use animation::{AnimationParams, StatePresenter};
pub use controller::{ActivationError, MovementController};
pub use movement::MovementConfig;
