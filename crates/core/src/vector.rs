//! Minimal 3D vector and rotation-quaternion value types.
//!
//! Distances are kilometres throughout the workspace. Both types are `Copy`
//! and every operation returns a new value.

use std::ops::{Add, Neg, Sub};

/// A position or displacement in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Vector) -> Vector {
        Vector::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Angle to `other` in radians, in `[0, π]`.
    ///
    /// Returns `0.0` when either operand has zero length. The cosine is
    /// clamped so nearly parallel vectors never produce NaN.
    pub fn angle_between(&self, other: &Vector) -> f64 {
        let denominator = self.magnitude() * other.magnitude();
        if denominator == 0.0 {
            return 0.0;
        }
        (self.dot(other) / denominator).clamp(-1.0, 1.0).acos()
    }

    /// Rotate about the Z axis by `angle` radians (counter-clockwise seen
    /// from +Z).
    pub fn rotate_z(&self, angle: f64) -> Vector {
        let (sin, cos) = angle.sin_cos();
        Vector::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
            self.z,
        )
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

/// Unit rotation quaternion `(w, x, y, z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Rotate `v` by this quaternion using the expanded rotation matrix.
    pub fn rotate(&self, v: &Vector) -> Vector {
        let Quaternion { w, x, y, z } = *self;
        Vector::new(
            ((1.0 - (2.0 * y * y) - (2.0 * z * z)) * v.x)
                + (((2.0 * x * y) - (2.0 * z * w)) * v.y)
                + (((2.0 * x * z) + (2.0 * y * w)) * v.z),
            (((2.0 * x * y) + (2.0 * z * w)) * v.x)
                + ((1.0 - (2.0 * x * x) - (2.0 * z * z)) * v.y)
                + (((2.0 * y * z) - (2.0 * x * w)) * v.z),
            (((2.0 * x * z) - (2.0 * y * w)) * v.x)
                + (((2.0 * y * z) + (2.0 * x * w)) * v.y)
                + ((1.0 - (2.0 * x * x) - (2.0 * y * y)) * v.z),
        )
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(any(test, feature = "approx"))]
mod approx_impls {
    use super::Vector;
    use approx::{AbsDiffEq, RelativeEq};

    impl AbsDiffEq for Vector {
        type Epsilon = f64;

        fn default_epsilon() -> f64 {
            f64::default_epsilon()
        }

        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            self.x.abs_diff_eq(&other.x, epsilon)
                && self.y.abs_diff_eq(&other.y, epsilon)
                && self.z.abs_diff_eq(&other.z, epsilon)
        }
    }

    impl RelativeEq for Vector {
        fn default_max_relative() -> f64 {
            f64::default_max_relative()
        }

        fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
            self.x.relative_eq(&other.x, epsilon, max_relative)
                && self.y.relative_eq(&other.y, epsilon, max_relative)
                && self.z.relative_eq(&other.z, epsilon, max_relative)
        }
    }
}
