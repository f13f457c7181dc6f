use core::fmt;

/// Boid size is the world area divided by this.
const AREA_PER_BOID_SIZE: f32 = 100_000.0;
const BOID_SIGHT_AREA_DIVISOR: f32 = 6_000.0;
const PREDATOR_SIGHT_AREA_DIVISOR: f32 = 4_200.0;
const PREDATOR_SIZE_RATIO: f32 = 1.2;
const PREDATOR_SPEED_RATIO: f32 = 1.2;
/// Separation only acts on neighbors within this many boid sizes.
const SEPARATION_RANGE_SIZES: f32 = 6.0;
/// Capture happens within this multiple of the combined sizes.
const CAPTURE_RANGE_FACTOR: f32 = 2.4;

/// How the interaction resolver reacts when a boid/predator pair fails a
/// distance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Move on to the next pair.
    #[default]
    PerPair,
    /// Stop resolving interactions for the rest of the tick. Reproduces the
    /// legacy behavior where the first miss ends the whole pass.
    EarlyExit,
}

/// Switches for the three flocking forces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlockToggles {
    pub cohesion: bool,
    pub alignment: bool,
    pub separation: bool,
}

impl FlockToggles {
    pub fn all_off() -> Self {
        Self {
            cohesion: false,
            alignment: false,
            separation: false,
        }
    }
}

impl Default for FlockToggles {
    fn default() -> Self {
        Self {
            cohesion: true,
            alignment: true,
            separation: true,
        }
    }
}

/// Reasons a [`WorldConfig`] is rejected
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// An extent or speed that must be finite and strictly positive.
    NotPositive { name: &'static str, value: f32 },
    /// A force weight that must be finite and non-negative.
    InvalidWeight { name: &'static str, value: f32 },
    /// A max speed that could carry an agent across the whole world in one tick.
    SpeedExceedsWorld { name: &'static str, speed: f32, extent: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPositive { name, value } => {
                write!(f, "{} must be finite and positive, got {}", name, value)
            }
            ConfigError::InvalidWeight { name, value } => {
                write!(f, "{} must be finite and non-negative, got {}", name, value)
            }
            ConfigError::SpeedExceedsWorld {
                name,
                speed,
                extent,
            } => write!(
                f,
                "{} of {} must be below the smallest world extent {}",
                name, speed, extent
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// World parameters for the predator/prey simulation.
///
/// Extents, agent sizes and sight radii are derived together in
/// [`WorldConfig::new`] and are read-only. Counts, speeds, weights and the
/// interaction mode are plain fields and may be overridden before the config
/// is handed to a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    width: f32,
    height: f32,
    boid_size: f32,
    predator_size: f32,
    boid_sight: f32,
    predator_sight: f32,
    pub boid_count: usize,
    pub predator_count: usize,
    pub boid_speed: f32,
    pub predator_speed: f32,
    pub boid_alignment_weight: f32,
    pub boid_cohesion_weight: f32,
    pub boid_separation_weight: f32,
    pub predator_separation_weight: f32,
    pub predator_pursue_weight: f32,
    pub interaction_mode: InteractionMode,
}

impl WorldConfig {
    pub fn new(width: f32, height: f32) -> Self {
        let area = width * height;
        let boid_size = area / AREA_PER_BOID_SIZE;
        let predator_size = boid_size * PREDATOR_SIZE_RATIO;
        let boid_speed = 8.0;

        Self {
            width,
            height,
            boid_size,
            predator_size,
            boid_sight: (area / BOID_SIGHT_AREA_DIVISOR).max(boid_size * 2.0),
            predator_sight: (area / PREDATOR_SIGHT_AREA_DIVISOR).max(predator_size * 2.0),
            boid_count: 100,
            predator_count: 5,
            boid_speed,
            predator_speed: boid_speed * PREDATOR_SPEED_RATIO,
            boid_alignment_weight: 2e1,
            boid_cohesion_weight: 1e0,
            boid_separation_weight: 5e3,
            predator_separation_weight: 5e3,
            predator_pursue_weight: 2e1,
            interaction_mode: InteractionMode::default(),
        }
    }

    pub fn with_population(mut self, boid_count: usize, predator_count: usize) -> Self {
        self.boid_count = boid_count;
        self.predator_count = predator_count;
        self
    }

    /// Set the boid speed; the predator speed follows at the fixed ratio.
    pub fn with_speed(mut self, boid_speed: f32) -> Self {
        self.boid_speed = boid_speed;
        self.predator_speed = boid_speed * PREDATOR_SPEED_RATIO;
        self
    }

    pub fn with_interaction_mode(mut self, mode: InteractionMode) -> Self {
        self.interaction_mode = mode;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn boid_size(&self) -> f32 {
        self.boid_size
    }

    pub fn predator_size(&self) -> f32 {
        self.predator_size
    }

    pub fn boid_sight(&self) -> f32 {
        self.boid_sight
    }

    pub fn predator_sight(&self) -> f32 {
        self.predator_sight
    }

    /// Boids only push apart when closer than this.
    pub fn separation_range(&self) -> f32 {
        self.boid_size * SEPARATION_RANGE_SIZES
    }

    /// A predator captures a boid within this distance.
    pub fn capture_range(&self) -> f32 {
        (self.predator_size + self.boid_size) * CAPTURE_RANGE_FACTOR
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("boid_speed", self.boid_speed),
            ("predator_speed", self.predator_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        let weights = [
            ("boid_alignment_weight", self.boid_alignment_weight),
            ("boid_cohesion_weight", self.boid_cohesion_weight),
            ("boid_separation_weight", self.boid_separation_weight),
            ("predator_separation_weight", self.predator_separation_weight),
            ("predator_pursue_weight", self.predator_pursue_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }

        let extent = self.width.min(self.height);
        for (name, speed) in [
            ("boid_speed", self.boid_speed),
            ("predator_speed", self.predator_speed),
        ] {
            if speed >= extent {
                return Err(ConfigError::SpeedExceedsWorld {
                    name,
                    speed,
                    extent,
                });
            }
        }

        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(1200.0, 600.0)
    }
}
