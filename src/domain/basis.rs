//! Basic building blocks.

use std::{f64::consts::PI, ops::Add};

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector of the given length pointing along `angle`, measured counterclockwise from the
    /// positive x-axis.
    pub fn from_polar(length: f64, angle: Angle) -> Self {
        Self::new(length * angle.0.cos(), length * angle.0.sin())
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl From<Position> for (f32, f32) {
    fn from(value: Position) -> Self {
        (value.x as f32, value.y as f32)
    }
}

impl From<Position> for (f64, f64) {
    fn from(value: Position) -> Self {
        (value.x, value.y)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// Unbounded angle in radians. Turning keeps accumulating, so no wrapping is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub fn new(radians: f64) -> Self {
        Self(radians)
    }

    pub fn to_deg(self) -> f64 {
        (self.0 * (180.0 / PI)).rem_euclid(360.0)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl From<Angle> for f64 {
    fn from(value: Angle) -> Self {
        value.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Velocity(f64);

impl Velocity {
    pub fn new(velocity: f64) -> Self {
        Self(velocity)
    }
}

impl From<Velocity> for f64 {
    fn from(value: Velocity) -> Self {
        value.0
    }
}
