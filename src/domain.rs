//! The domain module encapsulates the core logic. It defines the `Agent` and `Arena` entities and
//! the `Simulation` driving them, along with the rules governing their interactions.
//!
//! Nothing in here knows about rendering. Front ends read the state after each step.

mod agent;
mod arena;
mod basis;
mod collision;
mod simulation;
mod trail;

pub use agent::{Agent, AgentConfig, Mode};
pub use arena::Arena;
pub use basis::{Angle, Position, Velocity};
pub use collision::{Circle, Contact, HasCollision};
pub use simulation::{step_count, Simulation, SimulationError, TickObserver};
pub use trail::Trail;
