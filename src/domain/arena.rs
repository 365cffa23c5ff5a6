//! Rectangular arena spanning `[0, width] × [0, height]`.

use super::{Circle, Contact, HasCollision, Position};

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Arena {
    width: f64,
    height: f64,
}

impl Arena {
    /// The extents are taken as given. A body whose diameter does not fit into the arena can
    /// never move without touching a wall.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contact(&self, circle: &Circle) -> Contact {
        Contact {
            x: circle.x_min() < 0.0 || circle.x_max() > self.width,
            y: circle.y_min() < 0.0 || circle.y_max() > self.height,
        }
    }

    pub fn contains(&self, object: &dyn HasCollision) -> bool {
        !self.contact(&object.shape()).any()
    }
}
