//! Core types shared across the Vaulter crates

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D transform representing position, rotation, and scale
///
/// The horizontal scale sign carries the visible facing of a character:
/// mirroring flips `scale.x`, and everything rendered from this transform
/// mirrors with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2 {
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Transform2 {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Mirror the transform across its vertical axis
    pub fn mirror_x(&mut self) {
        self.scale.x = -self.scale.x;
    }

    /// Sign of the horizontal scale: +1.0 facing right, -1.0 facing left
    pub fn facing_sign(&self) -> f32 {
        self.scale.x.signum()
    }

    /// Translate by the given offset
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_flips_facing_sign() {
        let mut transform = Transform2::default();
        assert_eq!(transform.facing_sign(), 1.0);

        transform.mirror_x();
        assert_eq!(transform.facing_sign(), -1.0);
        assert_eq!(transform.scale.x, -1.0);

        transform.mirror_x();
        assert_eq!(transform.facing_sign(), 1.0);
    }

    #[test]
    fn test_translate() {
        let mut transform = Transform2::from_position(Vec2::new(1.0, 2.0));
        transform.translate(Vec2::new(0.5, -1.0));
        assert_eq!(transform.position, Vec2::new(1.5, 1.0));
    }
}
