//! Minimal 2D geometry for line-of-sight checks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Vec2) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub start: Vec2,
    pub end: Vec2,
}

impl Ray {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }
}

/// Answers whether a ray crosses any obstacle of the world.
pub trait RaycastCollisionDetector {
    fn collides(&self, ray: &Ray) -> bool;
}
