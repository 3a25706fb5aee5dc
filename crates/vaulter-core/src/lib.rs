//! Vaulter Core - Core types and timing for the Vaulter character systems
//!
//! This crate provides the foundational pieces used throughout the project:
//! - Mathematical primitives (re-exported from glam)
//! - 2D transform with a mirrorable horizontal orientation
//! - Frame timing with a fixed-step accumulator for physics
//! - Cancellable one-shot timers for scheduled state expiry

pub mod time;
pub mod types;

pub use glam::Vec2;
pub use time::{GameTime, OneShotTimer, TimeConfig};
pub use types::Transform2;
