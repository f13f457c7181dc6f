use log::trace;

#[cfg(feature = "std")]
use rand::Rng;

use crate::agent::{Agent, Boid, Predator, Species};
use crate::config::{ConfigError, FlockToggles, WorldConfig};
use crate::forces;
use crate::interaction::{self, InteractionSummary};
use crate::vector::Vector2D;
use crate::{Boids, Predators};

/// What one call to [`Simulation::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Number of the tick just completed, starting at 1.
    pub tick: u64,
    pub pursuits: usize,
    pub flees: usize,
    pub captures: usize,
}

/// Drawing data for one agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub species: Species,
    pub position: Vector2D,
    pub heading: f32,
    pub size: f32,
}

/// The predator/prey engine: both populations, the world and the flocking
/// toggles, advanced one tick at a time.
#[derive(Debug, Clone)]
pub struct Simulation {
    boids: Boids,
    predators: Predators,
    config: WorldConfig,
    toggles: FlockToggles,
    tick: u64,
}

impl Simulation {
    /// An empty world. Populate it with [`Simulation::add_boid`] and
    /// [`Simulation::add_predator`].
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            boids: Boids::new(),
            predators: Predators::new(),
            config,
            toggles: FlockToggles::default(),
            tick: 0,
        })
    }

    /// A world holding `config.boid_count` boids and `config.predator_count`
    /// predators at random positions and headings drawn from `rng`.
    #[cfg(feature = "std")]
    pub fn with_rng<R: Rng + ?Sized>(config: WorldConfig, rng: &mut R) -> Result<Self, ConfigError> {
        let mut simulation = Self::new(config)?;
        let (width, height) = (config.width(), config.height());

        for _ in 0..config.boid_count {
            simulation.add_boid(Boid::random(rng, width, height, config.boid_speed));
        }
        for _ in 0..config.predator_count {
            simulation.add_predator(Predator::random(rng, width, height, config.predator_speed));
        }

        Ok(simulation)
    }

    #[cfg(feature = "std")]
    pub fn random(config: WorldConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    #[cfg(feature = "std")]
    pub fn add_boid(&mut self, boid: Boid) {
        self.boids.push(boid);
    }

    #[cfg(feature = "std")]
    pub fn add_predator(&mut self, predator: Predator) {
        self.predators.push(predator);
    }

    #[cfg(not(feature = "std"))]
    pub fn add_boid(&mut self, boid: Boid) -> Result<(), Boid> {
        self.boids.push(boid)
    }

    #[cfg(not(feature = "std"))]
    pub fn add_predator(&mut self, predator: Predator) -> Result<(), Predator> {
        self.predators.push(predator)
    }

    /// Advance every agent by one step.
    ///
    /// Interactions resolve first, then flocking and predator separation are
    /// computed against the positions as they stand, and only then does any
    /// agent move.
    pub fn tick(&mut self) -> TickReport {
        let summary = self.resolve_interactions();
        self.apply_forces();
        self.integrate();

        self.tick += 1;
        trace!(
            "tick {}: {} boids, {} captured, {} fleeing",
            self.tick,
            self.boids.len(),
            summary.captures,
            summary.flees
        );

        TickReport {
            tick: self.tick,
            pursuits: summary.pursuits,
            flees: summary.flees,
            captures: summary.captures,
        }
    }

    /// Pursuit, flee and capture for the current populations.
    pub fn resolve_interactions(&mut self) -> InteractionSummary {
        interaction::resolve(&mut self.boids, &mut self.predators, &self.config)
    }

    fn apply_forces(&mut self) {
        // accelerations are not read by the scans, so writing them as we go
        // leaves every scan seeing the same positions and velocities
        for i in 0..self.boids.len() {
            let force =
                forces::flocking(&self.boids[i], self.boids.iter(), &self.config, self.toggles);
            self.boids[i].apply_force(force);
        }

        for i in 0..self.predators.len() {
            let force =
                forces::predator_separation(&self.predators[i], self.predators.iter(), &self.config);
            self.predators[i].apply_force(force);
        }
    }

    fn integrate(&mut self) {
        let (width, height) = (self.config.width(), self.config.height());

        for boid in self.boids.iter_mut() {
            boid.update(self.config.boid_speed);
            boid.wrap_edges(width, height);
        }

        for predator in self.predators.iter_mut() {
            predator.update(self.config.predator_speed);
            predator.wrap_edges(width, height);
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn predators(&self) -> &[Predator] {
        &self.predators
    }

    /// Every live agent with what a renderer needs to draw it.
    pub fn agents(&self) -> impl Iterator<Item = AgentView> + '_ {
        let boid_size = self.config.boid_size();
        let predator_size = self.config.predator_size();

        let boids = self.boids.iter().map(move |boid| AgentView {
            species: Species::Boid,
            position: boid.position,
            heading: boid.heading(),
            size: boid_size,
        });
        let predators = self.predators.iter().map(move |predator| AgentView {
            species: Species::Predator,
            position: predator.position,
            heading: predator.heading(),
            size: predator_size,
        });

        boids.chain(predators)
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn toggles(&self) -> FlockToggles {
        self.toggles
    }

    pub fn set_toggles(&mut self, toggles: FlockToggles) {
        self.toggles = toggles;
    }

    pub fn set_cohesion(&mut self, enabled: bool) {
        self.toggles.cohesion = enabled;
    }

    pub fn set_alignment(&mut self, enabled: bool) {
        self.toggles.alignment = enabled;
    }

    pub fn set_separation(&mut self, enabled: bool) {
        self.toggles.separation = enabled;
    }

    pub fn boid_count(&self) -> usize {
        self.boids.len()
    }

    pub fn predator_count(&self) -> usize {
        self.predators.len()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_simulation_creation() {
        let config = WorldConfig::default().with_population(50, 3);
        let simulation = Simulation::random(config).unwrap();

        assert_eq!(simulation.boid_count(), 50);
        assert_eq!(simulation.predator_count(), 3);
        assert_eq!(simulation.tick_count(), 0);
        assert_eq!(simulation.toggles(), FlockToggles::default());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(Simulation::new(WorldConfig::new(-5.0, 600.0)).is_err());
    }

    #[test]
    fn test_simulation_tick_moves_agents() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut simulation = Simulation::with_rng(WorldConfig::default(), &mut rng).unwrap();
        let initial: Vec<_> = simulation.predators().iter().map(|p| p.position).collect();

        let report = simulation.tick();

        assert_eq!(report.tick, 1);
        assert_eq!(simulation.tick_count(), 1);
        let changed = simulation
            .predators()
            .iter()
            .zip(initial.iter())
            .any(|(p, &before)| p.position != before);
        assert!(changed);
    }

    #[test]
    fn test_toggle_setters() {
        let mut simulation = Simulation::new(WorldConfig::default()).unwrap();

        simulation.set_cohesion(false);
        simulation.set_separation(false);
        assert_eq!(
            simulation.toggles(),
            FlockToggles {
                cohesion: false,
                alignment: true,
                separation: false,
            }
        );

        simulation.set_alignment(false);
        assert_eq!(simulation.toggles(), FlockToggles::all_off());
    }

    #[test]
    fn test_agents_view() {
        let mut simulation = Simulation::new(WorldConfig::default()).unwrap();
        simulation.add_boid(Boid::new(Vector2D::new(10.0, 10.0), Vector2D::new(1.0, 0.0)));
        simulation.add_predator(Predator::new(Vector2D::new(500.0, 300.0), Vector2D::new(0.0, 1.0)));

        let views: Vec<_> = simulation.agents().collect();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].species, Species::Boid);
        assert_eq!(views[0].size, simulation.config().boid_size());
        assert_eq!(views[1].species, Species::Predator);
        assert_eq!(views[1].size, simulation.config().predator_size());
        assert!((views[1].heading - core::f32::consts::PI).abs() < 1e-5);
    }
}
