//! Circular agent performing a random walk. It drives straight ahead until a wall blocks its way
//! and then turns on the spot for a random duration before driving on.

use std::{f64::consts::PI, ops::RangeInclusive};

use rand::Rng;

use super::{Angle, Arena, Circle, HasCollision, Position, Velocity};

/// Bounds of the turning duration drawn after a collision, in seconds.
pub const TURN_DURATION: RangeInclusive<f64> = 0.5..=2.0;

/// Angular velocity while turning, in radians per second.
pub const TURN_RATE: f64 = PI;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Translating,
    Turning,
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
enum Motion {
    Translating,
    Turning { elapsed: f64, duration: f64 },
}

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Agent {
    position: Position,
    heading: Angle,
    motion: Motion,
    config: AgentConfig,
}

impl Agent {
    pub fn new(position: Position, config: AgentConfig) -> Self {
        Self {
            position,
            heading: Angle::default(),
            motion: Motion::Translating,
            config,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Angle {
        self.heading
    }

    pub fn radius(&self) -> f64 {
        self.config.radius
    }

    pub fn mode(&self) -> Mode {
        match self.motion {
            Motion::Translating => Mode::Translating,
            Motion::Turning { .. } => Mode::Turning,
        }
    }

    /// Time spent in the current turn, zero while translating.
    pub fn turn_elapsed(&self) -> f64 {
        match self.motion {
            Motion::Translating => 0.0,
            Motion::Turning { elapsed, .. } => elapsed,
        }
    }

    pub fn turn_duration(&self) -> Option<f64> {
        match self.motion {
            Motion::Translating => None,
            Motion::Turning { duration, .. } => Some(duration),
        }
    }

    pub fn set_heading(&mut self, heading: Angle) {
        self.heading = heading;
    }

    /// Position reached after driving straight ahead for `dt` seconds.
    pub fn updated_position(&self, dt: f64) -> Position {
        self.position + Position::from_polar(f64::from(self.config.speed) * dt, self.heading)
    }

    /// Advances the agent by `dt` seconds and returns whether a wall blocked the translation on
    /// this tick. Non-positive or non-finite time steps leave the agent untouched.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f64, arena: &Arena, rng: &mut R) -> bool {
        if !dt.is_finite() || dt <= 0.0 {
            return false;
        }

        match self.motion {
            Motion::Translating => {
                let position = self.updated_position(dt);
                if arena
                    .contact(&Circle::new(position, self.config.radius))
                    .any()
                {
                    self.motion = Motion::Turning {
                        elapsed: 0.0,
                        duration: rng.random_range(TURN_DURATION),
                    };
                    true
                } else {
                    self.position = position;
                    false
                }
            }
            Motion::Turning { elapsed, duration } => {
                let elapsed = elapsed + dt;
                self.heading = self.heading + Angle::new(dt * TURN_RATE);
                self.motion = if elapsed >= duration {
                    Motion::Translating
                } else {
                    Motion::Turning { elapsed, duration }
                };
                false
            }
        }
    }
}

impl HasCollision for Agent {
    fn shape(&self) -> Circle {
        Circle::new(self.position, self.config.radius)
    }
}

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct AgentConfig {
    pub radius: f64,
    pub speed: Velocity,
}

impl AgentConfig {
    pub const fn new(radius: f64, speed: Velocity) -> Self {
        Self { radius, speed }
    }
}
