//! Collision detection between circular bodies and the arena walls.

use super::Position;

pub trait HasCollision {
    fn shape(&self) -> Circle;
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Circle {
    position: Position,
    radius: f64,
}

impl Circle {
    pub const fn new(position: Position, radius: f64) -> Self {
        Self { position, radius }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn x_min(&self) -> f64 {
        self.position.x() - self.radius
    }

    pub fn x_max(&self) -> f64 {
        self.position.x() + self.radius
    }

    pub fn y_min(&self) -> f64 {
        self.position.y() - self.radius
    }

    pub fn y_max(&self) -> f64 {
        self.position.y() + self.radius
    }
}

impl HasCollision for Circle {
    fn shape(&self) -> Circle {
        *self
    }
}

/// Axes on which a body overlaps a wall. Both axes are tested independently, so a corner hit
/// sets both flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Contact {
    pub x: bool,
    pub y: bool,
}

impl Contact {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}
