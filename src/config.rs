//! Command line arguments and the validated simulation configuration derived from them.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::domain::{Agent, AgentConfig, Arena, Simulation, Velocity};

#[derive(Parser, Debug)]
#[command(
    name = "brownian-rover",
    version,
    about = "Brownian motion of a circular robot in a square arena"
)]
pub struct Cli {
    /// Simulation duration in seconds.
    #[arg(long, default_value_t = 30.0)]
    pub duration: f64,

    /// Side length of the square arena.
    #[arg(long, default_value_t = 100.0)]
    pub arena_size: f64,

    /// Save the animation to a GIF file (e.g. `animation.gif`).
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Number of positions kept in the trail behind the robot.
    #[arg(long, default_value_t = 100)]
    pub trail_length: usize,

    /// Time step in seconds. Every animation frame advances the simulation by one step.
    #[arg(long, default_value_t = 0.05)]
    pub dt: f64,

    /// Radius of the robot.
    #[arg(long, default_value_t = 2.0)]
    pub radius: f64,

    /// Speed of the robot while driving straight.
    #[arg(long, default_value_t = 10.0)]
    pub speed: f64,

    /// Seed of the random turning durations. A random seed is chosen if omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run without opening a window.
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    pub fn config(&self) -> Result<SimulationConfig, ConfigError> {
        let config = SimulationConfig {
            duration: self.duration,
            dt: self.dt,
            arena: Arena::new(self.arena_size, self.arena_size),
            agent: AgentConfig::new(self.radius, Velocity::new(self.speed)),
            trail_length: self.trail_length,
            seed: self.seed.unwrap_or_else(rand::random),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub duration: f64,
    pub dt: f64,
    pub arena: Arena,
    pub agent: AgentConfig,
    pub trail_length: usize,
    pub seed: u64,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ConfigError::InvalidDuration(self.duration));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidTimeStep(self.dt));
        }
        let radius = self.agent.radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(radius));
        }
        let speed = f64::from(self.agent.speed);
        if !speed.is_finite() || speed < 0.0 {
            return Err(ConfigError::InvalidSpeed(speed));
        }
        for extent in [self.arena.width(), self.arena.height()] {
            if !extent.is_finite() || extent <= 2.0 * radius {
                return Err(ConfigError::ArenaTooSmall { extent, radius });
            }
        }
        Ok(())
    }

    /// Simulation with the agent placed in the center of the arena.
    pub fn simulation(&self) -> Simulation {
        let mut simulation = Simulation::new(self.arena, self.seed);
        simulation.attach(Agent::new(self.arena.center(), self.agent.clone()));
        simulation
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("duration must be a non-negative number of seconds, got {0}")]
    InvalidDuration(f64),
    #[error("time step must be positive, got {0}")]
    InvalidTimeStep(f64),
    #[error("radius must be positive, got {0}")]
    InvalidRadius(f64),
    #[error("speed must not be negative, got {0}")]
    InvalidSpeed(f64),
    #[error("arena extent {extent} leaves no room for a robot of radius {radius}")]
    ArenaTooSmall { extent: f64, radius: f64 },
}
