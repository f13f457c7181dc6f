use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use boid_core::{FlockToggles, InteractionMode, Simulation, WorldConfig};
use boid_shared::{
    AgentSnapshot, InteractionSetting, Position, SimulationStatus, Species, ToggleState,
    WorldSettings,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// What the runner prints when it finishes
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    pub seed: u64,
    pub status: SimulationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<AgentSnapshot>>,
}

pub fn load_settings(path: &Path) -> Result<WorldSettings> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    WorldSettings::from_json(&json)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))
}

/// Build a validated engine config from the settings file values.
///
/// Unset speeds and weights keep the values `WorldConfig` derives.
pub fn world_config(settings: &WorldSettings) -> Result<WorldConfig> {
    let mut config = WorldConfig::new(settings.width, settings.height)
        .with_population(settings.boid_count, settings.predator_count)
        .with_interaction_mode(match settings.interaction {
            InteractionSetting::PerPair => InteractionMode::PerPair,
            InteractionSetting::EarlyExit => InteractionMode::EarlyExit,
        });

    if let Some(speed) = settings.boid_speed {
        config = config.with_speed(speed);
    }
    let overrides = [
        (&mut config.predator_speed, settings.predator_speed),
        (&mut config.boid_alignment_weight, settings.boid_alignment_weight),
        (&mut config.boid_cohesion_weight, settings.boid_cohesion_weight),
        (&mut config.boid_separation_weight, settings.boid_separation_weight),
        (&mut config.predator_separation_weight, settings.predator_separation_weight),
        (&mut config.predator_pursue_weight, settings.predator_pursue_weight),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            *field = value;
        }
    }

    config.validate().context("Invalid world settings")?;
    Ok(config)
}

fn toggles_from(state: ToggleState) -> FlockToggles {
    FlockToggles {
        cohesion: state.cohesion,
        alignment: state.alignment,
        separation: state.separation,
    }
}

fn toggle_state(toggles: FlockToggles) -> ToggleState {
    ToggleState {
        cohesion: toggles.cohesion,
        alignment: toggles.alignment,
        separation: toggles.separation,
    }
}

/// Headless driver: owns a seeded simulation and steps it.
pub struct Runner {
    simulation: Simulation,
    seed: u64,
    captured: usize,
}

impl Runner {
    pub fn new(settings: &WorldSettings) -> Result<Self> {
        let config = world_config(settings)?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut simulation =
            Simulation::with_rng(config, &mut rng).context("Failed to create simulation")?;
        simulation.set_toggles(toggles_from(settings.toggles));

        log::info!(
            "World {}x{} with {} boids and {} predators (seed {})",
            config.width(),
            config.height(),
            simulation.boid_count(),
            simulation.predator_count(),
            seed
        );
        log::debug!(
            "Boid sight {:.1}, predator sight {:.1}, capture range {:.1}, mode {:?}",
            config.boid_sight(),
            config.predator_sight(),
            config.capture_range(),
            config.interaction_mode
        );

        Ok(Self {
            simulation,
            seed,
            captured: 0,
        })
    }

    /// Step `ticks` times, logging progress every `report_every` ticks.
    pub fn run(&mut self, ticks: u64, report_every: Option<u64>) -> SimulationStatus {
        let report_every = report_every.filter(|&n| n > 0);

        for _ in 0..ticks {
            let had_boids = self.simulation.boid_count() > 0;
            let report = self.simulation.tick();
            self.captured += report.captures;

            if report.captures > 0 {
                log::debug!(
                    "Tick {}: {} captured, {} boids left",
                    report.tick,
                    report.captures,
                    self.simulation.boid_count()
                );
            }

            if had_boids && self.simulation.boid_count() == 0 {
                log::info!("Every boid captured by tick {}", report.tick);
            }

            if let Some(every) = report_every {
                if report.tick % every == 0 {
                    log::info!(
                        "Tick {}: {} boids, {} captured so far",
                        report.tick,
                        self.simulation.boid_count(),
                        self.captured
                    );
                }
            }
        }

        self.status()
    }

    pub fn status(&self) -> SimulationStatus {
        SimulationStatus {
            tick: self.simulation.tick_count(),
            boid_count: self.simulation.boid_count(),
            predator_count: self.simulation.predator_count(),
            captured: self.captured,
            toggles: toggle_state(self.simulation.toggles()),
        }
    }

    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        self.simulation
            .agents()
            .map(|agent| AgentSnapshot {
                species: match agent.species {
                    boid_core::Species::Boid => Species::Boid,
                    boid_core::Species::Predator => Species::Predator,
                },
                position: Position::new(agent.position.x, agent.position.y),
                heading: agent.heading,
                size: agent.size,
            })
            .collect()
    }

    pub fn output(&self, with_agents: bool) -> RunOutput {
        RunOutput {
            seed: self.seed,
            status: self.status(),
            agents: with_agents.then(|| self.snapshot()),
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
