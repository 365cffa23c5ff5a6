//! Simulation of the robot in the arena.
//!
//! Every fixed time step advances the simulation by one tick and appends the robot's position to
//! the trail, until the configured duration is used up.

use bevy::prelude::*;

use crate::{
    config::SimulationConfig,
    domain::{step_count, Trail},
    resource::{ScheduleRes, SimulationRes, TrailRes},
};

pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Plugin for Simulator {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_seconds(self.config.dt))
            .insert_resource(SimulationRes::from(self.config.simulation()))
            .insert_resource(TrailRes::from(Trail::new(self.config.trail_length)))
            .insert_resource(ScheduleRes {
                dt: self.config.dt,
                remaining_steps: step_count(self.config.duration, self.config.dt),
            })
            .add_systems(FixedUpdate, simulate);
    }
}

fn simulate(
    mut simulation: ResMut<SimulationRes>,
    mut trail: ResMut<TrailRes>,
    mut schedule: ResMut<ScheduleRes>,
) {
    if schedule.remaining_steps == 0 {
        return;
    }

    if let Err(error) = simulation.step(schedule.dt) {
        error!("{error}");
        schedule.remaining_steps = 0;
        return;
    }

    if let Some(agent) = simulation.agent() {
        trail.push(agent.position());
    }

    schedule.remaining_steps -= 1;
    if schedule.remaining_steps == 0 {
        info!(
            "Simulation completed with {} collisions.",
            simulation.collision_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use bevy::ecs::system::RunSystemOnce;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::{AgentConfig, Arena, Simulation, Velocity};

    #[test]
    fn test_simulate_stops_after_scheduled_steps() {
        let mut world = world(config());

        for _ in 0..6 {
            world.run_system_once(simulate);
        }

        let simulation = world.resource::<SimulationRes>();
        assert_abs_diff_eq!(simulation.time(), 1.0);
        assert_eq!(world.resource::<TrailRes>().len(), 3);
        assert_eq!(world.resource::<ScheduleRes>().remaining_steps, 0);
    }

    #[test]
    fn test_simulate_without_agent() {
        let mut world = world(config());
        world.insert_resource(SimulationRes::from(Simulation::new(
            Arena::new(20.0, 20.0),
            0,
        )));

        world.run_system_once(simulate);

        assert_eq!(world.resource::<ScheduleRes>().remaining_steps, 0);
        assert!(world.resource::<TrailRes>().is_empty());
    }

    fn world(config: SimulationConfig) -> World {
        let mut world = World::new();
        world.insert_resource(SimulationRes::from(config.simulation()));
        world.insert_resource(TrailRes::from(Trail::new(config.trail_length)));
        world.insert_resource(ScheduleRes {
            dt: config.dt,
            remaining_steps: step_count(config.duration, config.dt),
        });
        world
    }

    fn config() -> SimulationConfig {
        SimulationConfig {
            duration: 1.0,
            dt: 0.25,
            arena: Arena::new(20.0, 20.0),
            agent: AgentConfig::new(1.0, Velocity::new(2.0)),
            trail_length: 3,
            seed: 1,
        }
    }
}
