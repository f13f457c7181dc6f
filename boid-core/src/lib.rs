#![cfg_attr(not(any(feature = "std", test)), no_std)]

//! Predator/prey boid engine.
//!
//! Boids flock by alignment, cohesion and separation while a few predators
//! chase and capture them. [`Simulation`] owns both populations and advances
//! them one fixed step per [`Simulation::tick`].

pub mod agent;
pub mod config;
pub mod forces;
pub mod interaction;
pub mod simulation;
pub mod vector;

pub use agent::{Agent, Boid, Predator, Species};
pub use config::{ConfigError, FlockToggles, InteractionMode, WorldConfig};
pub use forces::FlockForces;
pub use interaction::InteractionSummary;
pub use simulation::{AgentView, Simulation, TickReport};
pub use vector::Vector2D;

/// Boid capacity of a `no_std` simulation.
pub const MAX_BOIDS: usize = 256;
/// Predator capacity of a `no_std` simulation.
pub const MAX_PREDATORS: usize = 16;

#[cfg(feature = "std")]
pub type Boids = Vec<Boid>;
#[cfg(feature = "std")]
pub type Predators = Vec<Predator>;

#[cfg(not(feature = "std"))]
pub type Boids = heapless::Vec<Boid, MAX_BOIDS>;
#[cfg(not(feature = "std"))]
pub type Predators = heapless::Vec<Predator, MAX_PREDATORS>;
