//! Cross-population pass: pursuit, flee and capture.

use log::debug;

use crate::agent::{Boid, Predator};
use crate::config::{InteractionMode, WorldConfig};
use crate::forces::MIN_FALLOFF_DISTANCE;
use crate::vector::Vector2D;
use crate::Boids;

/// How far into the pursuit/flee/capture chain a pair gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reach {
    OutOfSight,
    Pursue,
    Flee,
    Capture,
}

impl Reach {
    /// Thresholds are checked in order; the first one missed ends the chain.
    /// A NaN distance misses the first one.
    pub fn of(distance: f32, config: &WorldConfig) -> Self {
        if !(distance <= config.predator_sight()) {
            Reach::OutOfSight
        } else if !(distance <= config.boid_sight()) {
            Reach::Pursue
        } else if !(distance <= config.capture_range()) {
            Reach::Flee
        } else {
            Reach::Capture
        }
    }
}

/// Counts of what happened during one resolver pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionSummary {
    pub pursuits: usize,
    pub flees: usize,
    pub captures: usize,
}

/// Steering for `predator` towards where `boid` is heading, scaled by `1 / d`.
///
/// `None` when the pair is coincident or the lead point sits on the predator.
pub fn pursuit(
    predator: &Predator,
    boid: &Boid,
    distance: f32,
    config: &WorldConfig,
) -> Option<Vector2D> {
    if !(distance > 0.0) {
        return None;
    }
    let falloff = distance.max(MIN_FALLOFF_DISTANCE);
    let lead = (boid.position - predator.position) + boid.velocity;
    lead.try_normalize()
        .map(|direction| direction * config.predator_pursue_weight / falloff)
}

/// Full-speed steering away from the mean position of every predator the
/// boid can see.
pub fn flee(boid: &Boid, predators: &[Predator], config: &WorldConfig) -> Option<Vector2D> {
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for predator in predators {
        if boid.position.distance(&predator.position) < config.boid_sight() {
            sum += predator.position;
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }

    let threat = sum / count as f32;
    (boid.position - threat)
        .try_normalize()
        .map(|away| away * config.boid_speed)
}

/// Run pursuit, flee and capture for every boid/predator pair.
///
/// Boids are visited from the back so that removing a captured boid never
/// shifts one that is still to be visited. Once a boid is captured its
/// remaining pairs are skipped.
pub fn resolve(
    boids: &mut Boids,
    predators: &mut [Predator],
    config: &WorldConfig,
) -> InteractionSummary {
    let mut summary = InteractionSummary::default();

    'boids: for b in (0..boids.len()).rev() {
        for p in 0..predators.len() {
            let boid = boids[b];
            let distance = boid.position.distance(&predators[p].position);
            let reach = Reach::of(distance, config);

            if reach >= Reach::Pursue {
                if let Some(force) = pursuit(&predators[p], &boid, distance, config) {
                    predators[p].apply_force(force);
                    summary.pursuits += 1;
                }
            }

            if reach >= Reach::Flee {
                if let Some(force) = flee(&boid, predators, config) {
                    boids[b].apply_force(force);
                    summary.flees += 1;
                }
            }

            if reach == Reach::Capture {
                boids.remove(b);
                summary.captures += 1;
                debug!(
                    "predator {} captured boid {} at ({:.1}, {:.1})",
                    p, b, boid.position.x, boid.position.y
                );
                continue 'boids;
            }

            if config.interaction_mode == InteractionMode::EarlyExit {
                break 'boids;
            }
        }
    }

    summary
}
