//! Simulation driver advancing a single agent through discrete time steps.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, warn};

use super::{Agent, Arena};

/// Callback invoked after every step of [`Simulation::run`].
pub trait TickObserver {
    fn on_tick(&mut self, simulation: &Simulation);
}

impl<F: FnMut(&Simulation)> TickObserver for F {
    fn on_tick(&mut self, simulation: &Simulation) {
        self(simulation)
    }
}

#[derive(Clone, Debug)]
pub struct Simulation {
    arena: Arena,
    agent: Option<Agent>,
    time: f64,
    collision_count: u64,
    rng: ChaCha8Rng,
}

impl Simulation {
    pub fn new(arena: Arena, seed: u64) -> Self {
        Self::with_rng(arena, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(arena: Arena, rng: ChaCha8Rng) -> Self {
        Self {
            arena,
            agent: None,
            time: 0.0,
            collision_count: 0,
            rng,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn agent(&self) -> Option<&Agent> {
        self.agent.as_ref()
    }

    /// Elapsed simulation time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn collision_count(&self) -> u64 {
        self.collision_count
    }

    /// Replaces the simulated agent.
    pub fn attach(&mut self, agent: Agent) {
        if !self.arena.contains(&agent) {
            warn!(
                x = agent.position().x(),
                y = agent.position().y(),
                radius = agent.radius(),
                "agent overlaps the arena walls and cannot move until it has turned away"
            );
        }
        self.agent = Some(agent);
    }

    /// Zeroes time and collision count. The agent keeps its state.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.collision_count = 0;
    }

    /// Advances the simulation by `dt` seconds and returns whether the agent hit a wall.
    pub fn step(&mut self, dt: f64) -> Result<bool, SimulationError> {
        let agent = self.agent.as_mut().ok_or(SimulationError::NoAgent)?;

        if !dt.is_finite() || dt <= 0.0 {
            return Ok(false);
        }

        let collision = agent.advance(dt, &self.arena, &mut self.rng);
        if collision {
            self.collision_count += 1;
            debug!(
                time = self.time,
                x = agent.position().x(),
                y = agent.position().y(),
                turn_duration = ?agent.turn_duration(),
                "collision"
            );
        }
        self.time += dt;

        Ok(collision)
    }

    /// Performs `floor(duration / dt)` steps, calling `observer` after each of them.
    pub fn run(
        &mut self,
        duration: f64,
        dt: f64,
        mut observer: Option<&mut dyn TickObserver>,
    ) -> Result<(), SimulationError> {
        for _ in 0..step_count(duration, dt) {
            self.step(dt)?;
            if let Some(observer) = observer.as_mut() {
                observer.on_tick(self);
            }
        }
        Ok(())
    }
}

/// Number of whole steps of `dt` fitting into `duration`.
pub fn step_count(duration: f64, dt: f64) -> u64 {
    if !dt.is_finite() || dt <= 0.0 || !duration.is_finite() || duration <= 0.0 {
        return 0;
    }
    (duration / dt).floor() as u64
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SimulationError {
    #[error("no agent in simulation, attach one first")]
    NoAgent,
}
