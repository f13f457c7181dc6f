use core::f32::consts::FRAC_PI_2;

#[cfg(feature = "std")]
use rand::Rng;

use crate::vector::Vector2D;

/// Which population an agent belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Boid,
    Predator,
}

/// Read access shared by boids and predators
pub trait Agent {
    fn position(&self) -> Vector2D;
    fn velocity(&self) -> Vector2D;

    /// Drawing orientation: the velocity angle turned a quarter so that a
    /// triangle pointing up the y axis faces the direction of travel.
    fn heading(&self) -> f32 {
        self.velocity().heading() + FRAC_PI_2
    }
}

/// Wrap one coordinate into `[0, extent)`.
///
/// Assumes the coordinate is at most one extent out of range, which holds
/// while the species' max speed is below the world extent.
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        let wrapped = value + extent;
        // a tiny negative can round up onto the far edge
        if wrapped >= extent {
            0.0
        } else {
            wrapped
        }
    } else if value >= extent {
        value - extent
    } else {
        value
    }
}

fn integrate(
    position: &mut Vector2D,
    velocity: &mut Vector2D,
    acceleration: &mut Vector2D,
    max_speed: f32,
) {
    *velocity += *acceleration;
    *velocity = velocity.limit(max_speed);
    *position += *velocity;
    *acceleration = Vector2D::zero();
}

#[cfg(feature = "std")]
fn random_motion<R: Rng + ?Sized>(
    rng: &mut R,
    width: f32,
    height: f32,
    speed: f32,
) -> (Vector2D, Vector2D) {
    let position = Vector2D::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
    let angle: f32 = rng.gen_range(0.0..core::f32::consts::TAU);
    let velocity = Vector2D::new(angle.cos(), angle.sin()) * speed;
    (position, velocity)
}

/// A single prey agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
        }
    }

    /// A boid moving along `direction` at exactly `speed`.
    pub fn with_heading(position: Vector2D, direction: Vector2D, speed: f32) -> Self {
        Self::new(position, direction.normalize() * speed)
    }

    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, speed: f32) -> Self {
        let (position, velocity) = random_motion(rng, width, height, speed);
        Self::new(position, velocity)
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    pub fn update(&mut self, max_speed: f32) {
        integrate(
            &mut self.position,
            &mut self.velocity,
            &mut self.acceleration,
            max_speed,
        );
    }

    pub fn wrap_edges(&mut self, width: f32, height: f32) {
        self.position.x = wrap_axis(self.position.x, width);
        self.position.y = wrap_axis(self.position.y, height);
    }
}

impl Agent for Boid {
    fn position(&self) -> Vector2D {
        self.position
    }

    fn velocity(&self) -> Vector2D {
        self.velocity
    }
}

/// A hunting agent; predators are never removed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predator {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
}

impl Predator {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
        }
    }

    pub fn with_heading(position: Vector2D, direction: Vector2D, speed: f32) -> Self {
        Self::new(position, direction.normalize() * speed)
    }

    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, speed: f32) -> Self {
        let (position, velocity) = random_motion(rng, width, height, speed);
        Self::new(position, velocity)
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    pub fn update(&mut self, max_speed: f32) {
        integrate(
            &mut self.position,
            &mut self.velocity,
            &mut self.acceleration,
            max_speed,
        );
    }

    pub fn wrap_edges(&mut self, width: f32, height: f32) {
        self.position.x = wrap_axis(self.position.x, width);
        self.position.y = wrap_axis(self.position.y, height);
    }
}

impl Agent for Predator {
    fn position(&self) -> Vector2D {
        self.position
    }

    fn velocity(&self) -> Vector2D {
        self.velocity
    }
}
