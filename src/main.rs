use std::fs;

use anyhow::Context;
use bevy::{
    app::{App, PluginGroup},
    log::LogPlugin,
    utils::default,
    window::{Window, WindowPlugin},
    DefaultPlugins,
};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod recorder;
mod resource;
mod simulator;
mod visualizer;

use config::{Cli, SimulationConfig};
use domain::Simulation;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.config()?;

    info!(
        seed = config.seed,
        "Running Brownian motion simulation for {} seconds...", config.duration
    );

    if let Some(path) = &cli.save {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        recorder::record(&config, path)
            .with_context(|| format!("failed to save animation to {}", path.display()))?;
    }

    if cli.headless {
        let simulation = run_headless(&config)?;
        info!(
            "Simulation completed with {} collisions.",
            simulation.collision_count()
        );
    } else {
        run_window(&config);
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,wgpu=error,naga=warn")),
        )
        .try_init();
}

fn run_headless(config: &SimulationConfig) -> anyhow::Result<Simulation> {
    let mut simulation = config.simulation();
    let mut next_report = 1.0;

    simulation.run(
        config.duration,
        config.dt,
        Some(&mut |simulation: &Simulation| {
            if simulation.time() < next_report - config.dt / 2.0 {
                return;
            }
            next_report += 1.0;
            if let Some(agent) = simulation.agent() {
                debug!(
                    time = simulation.time(),
                    x = agent.position().x(),
                    y = agent.position().y(),
                    heading = agent.heading().to_deg(),
                    mode = ?agent.mode(),
                    turn_elapsed = agent.turn_elapsed(),
                    collisions = simulation.collision_count(),
                    "progress"
                );
            }
        }),
    )?;

    Ok(simulation)
}

fn run_window(config: &SimulationConfig) {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Brownian Motion Simulation".into(),
                        resolution: (800.0, 800.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .add_plugins(simulator::Simulator::new(config.clone()))
        .add_plugins(visualizer::Visualizer)
        .run();
}
