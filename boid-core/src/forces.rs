//! Same-species steering forces.
//!
//! Every scan is brute force over the whole population. The agent itself may
//! appear in `others`; it sits at distance zero and is skipped like any
//! coincident neighbor.

use core::f32::consts::PI;

use crate::agent::{Boid, Predator};
use crate::config::{FlockToggles, WorldConfig};
use crate::vector::Vector2D;

/// Closest distance used in `1 / d` and `1 / d²` falloffs. Nearer pairs push
/// as hard as a pair at this distance, so weighted forces stay finite.
pub const MIN_FALLOFF_DISTANCE: f32 = 1e-3;

/// The three flocking contributions for one boid, already weighted
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlockForces {
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
    pub separation: Vector2D,
}

impl FlockForces {
    /// Sum of the contributions whose toggle is on.
    pub fn combine(&self, toggles: FlockToggles) -> Vector2D {
        let mut total = Vector2D::zero();
        if toggles.alignment {
            total += self.alignment;
        }
        if toggles.cohesion {
            total += self.cohesion;
        }
        if toggles.separation {
            total += self.separation;
        }
        total
    }
}

fn separates_from(boid: &Boid, other: &Boid) -> bool {
    // an undefined angle (a stationary boid) does not exclude the neighbor
    boid.velocity
        .angle_between(&other.velocity)
        .map_or(true, |angle| angle < PI)
}

/// Alignment, cohesion and separation acting on `boid`.
///
/// Alignment falls off with `1 / d` and grows with the neighbor count.
/// Cohesion is direction only. Separation falls off with `1 / d²` and is
/// limited to close neighbors not heading exactly opposite.
pub fn flock_forces<'a, I>(boid: &Boid, others: I, config: &WorldConfig) -> FlockForces
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut alignment = Vector2D::zero();
    let mut cohesion = Vector2D::zero();
    let mut separation = Vector2D::zero();

    let sight = config.boid_sight();
    let separation_range = config.separation_range();

    for other in others {
        let distance = boid.position.distance(&other.position);
        // written so a NaN distance is skipped too
        if !(distance > 0.0 && distance <= sight) {
            continue;
        }
        let falloff = distance.max(MIN_FALLOFF_DISTANCE);

        if let Some(heading) = other.velocity.try_normalize() {
            alignment += heading / falloff;
        }
        cohesion += (other.position - boid.position).normalize();

        if !(distance <= separation_range) || !separates_from(boid, other) {
            continue;
        }
        separation += (boid.position - other.position).normalize() / (falloff * falloff);
    }

    FlockForces {
        alignment: alignment * config.boid_alignment_weight,
        cohesion: cohesion
            .try_normalize()
            .map_or(Vector2D::zero(), |direction| {
                direction * config.boid_cohesion_weight
            }),
        separation: separation * config.boid_separation_weight,
    }
}

/// Flocking acceleration for `boid` with disabled forces left out.
pub fn flocking<'a, I>(
    boid: &Boid,
    others: I,
    config: &WorldConfig,
    toggles: FlockToggles,
) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    flock_forces(boid, others, config).combine(toggles)
}

/// Inverse-square push away from every predator within predator sight.
pub fn predator_separation<'a, I>(predator: &Predator, others: I, config: &WorldConfig) -> Vector2D
where
    I: IntoIterator<Item = &'a Predator>,
{
    let mut steering = Vector2D::zero();
    let sight = config.predator_sight();

    for other in others {
        let distance = predator.position.distance(&other.position);
        if !(distance > 0.0 && distance < sight) {
            continue;
        }
        let falloff = distance.max(MIN_FALLOFF_DISTANCE);
        steering += (predator.position - other.position).normalize()
            * (config.predator_separation_weight / (falloff * falloff));
    }

    steering
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boid(x: f32, y: f32, vx: f32, vy: f32) -> Boid {
        Boid::new(Vector2D::new(x, y), Vector2D::new(vx, vy))
    }

    #[test]
    fn test_lone_boid_feels_nothing() {
        let config = WorldConfig::default();
        let b = boid(100.0, 100.0, 1.0, 0.0);

        let forces = flock_forces(&b, [b].iter(), &config);

        assert_eq!(forces, FlockForces::default());
    }

    #[test]
    fn test_coincident_boids_are_ignored() {
        let config = WorldConfig::default();
        let a = boid(100.0, 100.0, 1.0, 0.0);
        let b = boid(100.0, 100.0, 0.0, 1.0);

        let forces = flock_forces(&a, [a, b].iter(), &config);

        assert_eq!(forces, FlockForces::default());
    }

    #[test]
    fn test_out_of_sight_neighbor_is_ignored() {
        let config = WorldConfig::default();
        let a = boid(100.0, 100.0, 1.0, 0.0);
        let far = boid(100.0 + config.boid_sight() + 1.0, 100.0, 1.0, 0.0);

        assert_eq!(flock_forces(&a, [far].iter(), &config), FlockForces::default());
    }

    #[test]
    fn test_distant_neighbor_aligns_and_coheres_without_separation() {
        let config = WorldConfig::default();
        let a = boid(100.0, 100.0, 1.0, 0.0);
        // inside sight (120) but outside separation range (43.2)
        let b = boid(200.0, 100.0, 0.0, 8.0);

        let forces = flock_forces(&a, [b].iter(), &config);

        // normalize((0, 8)) / 100 * 20
        assert!((forces.alignment.x).abs() < 1e-6);
        assert!((forces.alignment.y - 0.2).abs() < 1e-5);
        assert!((forces.cohesion.x - 1.0).abs() < 1e-6);
        assert!(forces.cohesion.y.abs() < 1e-6);
        assert!(forces.separation.is_zero());
    }

    #[test]
    fn test_close_neighbor_separates_inverse_square() {
        let config = WorldConfig::default();
        let a = boid(100.0, 100.0, 1.0, 0.0);
        let b = boid(110.0, 100.0, 1.0, 0.0);

        let forces = flock_forces(&a, [b].iter(), &config);

        // (-1, 0) / 100 * 5000
        assert!((forces.separation.x + 50.0).abs() < 1e-3);
        assert!(forces.separation.y.abs() < 1e-6);
    }

    #[test]
    fn test_opposite_heading_skips_separation() {
        let config = WorldConfig::default();
        let a = boid(100.0, 100.0, 1.0, 0.0);
        let b = boid(110.0, 100.0, -1.0, 0.0);

        let forces = flock_forces(&a, [b].iter(), &config);

        assert!(forces.separation.is_zero());
        assert!(!forces.alignment.is_zero());
    }

    #[test]
    fn test_stationary_neighbor_still_separates() {
        let config = WorldConfig::default();
        let a = boid(100.0, 100.0, 1.0, 0.0);
        let b = boid(110.0, 100.0, 0.0, 0.0);

        let forces = flock_forces(&a, [b].iter(), &config);

        assert!(forces.alignment.is_zero());
        assert!(forces.separation.x < 0.0);
    }

    #[test]
    fn test_cohesion_is_unit_regardless_of_count() {
        let config = WorldConfig::default();
        let a = boid(100.0, 100.0, 1.0, 0.0);
        let crowd = [
            boid(160.0, 100.0, 1.0, 0.0),
            boid(170.0, 100.0, 1.0, 0.0),
            boid(180.0, 100.0, 1.0, 0.0),
        ];

        let forces = flock_forces(&a, crowd.iter(), &config);

        assert!((forces.cohesion.magnitude() - config.boid_cohesion_weight).abs() < 1e-5);
    }

    #[test]
    fn test_toggles_gate_contributions() {
        let config = WorldConfig::default();
        let a = boid(100.0, 100.0, 1.0, 0.0);
        let b = boid(110.0, 105.0, 0.5, 0.5);
        let forces = flock_forces(&a, [b].iter(), &config);

        assert!(flocking(&a, [b].iter(), &config, FlockToggles::all_off()).is_zero());

        let only_cohesion = FlockToggles {
            cohesion: true,
            ..FlockToggles::all_off()
        };
        assert_eq!(
            flocking(&a, [b].iter(), &config, only_cohesion),
            forces.cohesion
        );
    }

    #[test]
    fn test_predator_separation() {
        let config = WorldConfig::default();
        let p = Predator::new(Vector2D::new(100.0, 100.0), Vector2D::new(1.0, 0.0));
        let q = Predator::new(Vector2D::new(100.0, 150.0), Vector2D::new(1.0, 0.0));
        let far = Predator::new(Vector2D::new(100.0, 400.0), Vector2D::new(1.0, 0.0));

        let force = predator_separation(&p, [p, q, far].iter(), &config);

        // (0, -1) * 5000 / 2500
        assert!(force.x.abs() < 1e-6);
        assert!((force.y + 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_separation_acts_at_exact_range() {
        let config = WorldConfig::default();
        let range = config.separation_range();
        let a = boid(0.0, 0.0, 1.0, 0.0);
        let b = boid(range, 0.0, 1.0, 0.0);

        let forces = flock_forces(&a, [b].iter(), &config);

        let expected = -config.boid_separation_weight / (range * range);
        assert!((forces.separation.x - expected).abs() < 1e-3);
        assert!(forces.separation.y.abs() < 1e-6);
    }

    #[test]
    fn test_predator_separation_stops_at_exact_sight() {
        let config = WorldConfig::default();
        let p = Predator::new(Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 0.0));
        let q = Predator::new(Vector2D::new(config.predator_sight(), 0.0), Vector2D::new(1.0, 0.0));

        assert!(predator_separation(&p, [q].iter(), &config).is_zero());
    }

    #[test]
    fn test_falloff_saturates_for_nearly_coincident_pairs() {
        let config = WorldConfig::default();
        let a = boid(0.0, 0.0, 1.0, 0.0);
        let b = boid(1e-20, 0.0, 1.0, 0.0);

        let forces = flock_forces(&a, [b].iter(), &config);

        let floor = MIN_FALLOFF_DISTANCE * MIN_FALLOFF_DISTANCE;
        let expected = -config.boid_separation_weight / floor;
        assert!(forces.separation.x.is_finite());
        assert!(((forces.separation.x - expected) / expected).abs() < 1e-3);
        assert!((forces.alignment.x - config.boid_alignment_weight / MIN_FALLOFF_DISTANCE).abs() < 1.0);

        let p = Predator::new(Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 0.0));
        let q = Predator::new(Vector2D::new(0.0, 1e-20), Vector2D::new(1.0, 0.0));
        let push = predator_separation(&p, [q].iter(), &config);
        assert!(push.y.is_finite() && push.y < 0.0);
    }
}
