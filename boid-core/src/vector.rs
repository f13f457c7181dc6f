use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

fn sqrt(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(value)
    }
}

fn acos(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.acos()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::acosf(value)
    }
}

fn atan2(y: f32, x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        y.atan2(x)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atan2f(y, x)
    }
}

/// A 2D vector used for position, velocity and acceleration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn magnitude(&self) -> f32 {
        sqrt(self.x * self.x + self.y * self.y)
    }

    /// Unit vector in the same direction.
    ///
    /// # Panics
    ///
    /// Panics on a zero-length vector. Callers that can legitimately hold a
    /// zero vector use [`Vector2D::try_normalize`].
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        assert!(mag > 0.0, "cannot normalize a zero-length vector");
        Self {
            x: self.x / mag,
            y: self.y / mag,
        }
    }

    /// Unit vector in the same direction, or `None` when there is no direction.
    pub fn try_normalize(&self) -> Option<Self> {
        let mag = self.magnitude();
        if mag > 0.0 {
            Some(Self {
                x: self.x / mag,
                y: self.y / mag,
            })
        } else {
            None
        }
    }

    /// Clamp the magnitude to `max`, keeping the direction.
    pub fn limit(&self, max: f32) -> Self {
        let mag = self.magnitude();
        if mag > max {
            Self {
                x: self.x / mag * max,
                y: self.y / mag * max,
            }
        } else {
            *self
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        sqrt(dx * dx + dy * dy)
    }

    pub fn dot(&self, other: &Vector2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Unsigned angle to `other` in `[0, π]`.
    ///
    /// Returns `None` if either vector has zero length.
    pub fn angle_between(&self, other: &Vector2D) -> Option<f32> {
        let denom = self.magnitude() * other.magnitude();
        if denom == 0.0 {
            return None;
        }
        let cos = (self.dot(other) / denom).clamp(-1.0, 1.0);
        Some(acos(cos))
    }

    /// Angle of the vector measured from the positive x axis.
    pub fn heading(&self) -> f32 {
        atan2(self.y, self.x)
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}
