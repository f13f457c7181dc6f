#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};

/// Represents a 2D position in world coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Boid,
    Predator,
}

/// One agent as a renderer sees it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentSnapshot {
    pub species: Species,
    pub position: Position,
    /// Rotation for a triangle drawn pointing up the y axis.
    pub heading: f32,
    pub size: f32,
}

/// On/off state of the three flocking forces
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleState {
    pub cohesion: bool,
    pub alignment: bool,
    pub separation: bool,
}

impl Default for ToggleState {
    fn default() -> Self {
        Self {
            cohesion: true,
            alignment: true,
            separation: true,
        }
    }
}

/// Interaction resolver behavior when a pair misses a distance threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InteractionSetting {
    #[default]
    PerPair,
    EarlyExit,
}

/// Simulation settings file.
///
/// Every field is optional in the file; missing ones take the reference
/// world's values. Agent sizes and sight radii are not settable, they follow
/// from `width` and `height`. Speeds and weights left as `None` keep the
/// engine's derived values, so an unset `predator_speed` follows `boid_speed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldSettings {
    pub width: f32,
    pub height: f32,
    pub boid_count: usize,
    pub predator_count: usize,
    pub boid_speed: Option<f32>,
    pub predator_speed: Option<f32>,
    pub boid_alignment_weight: Option<f32>,
    pub boid_cohesion_weight: Option<f32>,
    pub boid_separation_weight: Option<f32>,
    pub predator_separation_weight: Option<f32>,
    pub predator_pursue_weight: Option<f32>,
    pub interaction: InteractionSetting,
    pub toggles: ToggleState,
    /// Seed for the initial placement; a fresh one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
            boid_count: 100,
            predator_count: 5,
            boid_speed: None,
            predator_speed: None,
            boid_alignment_weight: None,
            boid_cohesion_weight: None,
            boid_separation_weight: None,
            predator_separation_weight: None,
            predator_pursue_weight: None,
            interaction: InteractionSetting::default(),
            toggles: ToggleState::default(),
            seed: None,
        }
    }
}

#[cfg(feature = "std")]
impl WorldSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Summary a display shows alongside the agents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationStatus {
    pub tick: u64,
    pub boid_count: usize,
    pub predator_count: usize,
    pub captured: usize,
    pub toggles: ToggleState,
}
