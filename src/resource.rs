//! The resource module encapsulates domain entities for use with Bevy.

use std::ops::{Deref, DerefMut};

use bevy::ecs::system::Resource;

use crate::domain;

#[derive(Resource)]
pub struct SimulationRes(domain::Simulation);

impl Deref for SimulationRes {
    type Target = domain::Simulation;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SimulationRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<domain::Simulation> for SimulationRes {
    fn from(value: domain::Simulation) -> Self {
        Self(value)
    }
}

#[derive(Resource)]
pub struct TrailRes(domain::Trail);

impl Deref for TrailRes {
    type Target = domain::Trail;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for TrailRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<domain::Trail> for TrailRes {
    fn from(value: domain::Trail) -> Self {
        Self(value)
    }
}

/// Fixed time step and the number of steps still to be simulated.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ScheduleRes {
    pub dt: f64,
    pub remaining_steps: u64,
}
