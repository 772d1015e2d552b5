//! Plane model

use crate::error::{Error, Result};
use crate::point::{Point3f, Vector3f};
use nalgebra::Vector4;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 3D plane defined by the equation ax + by + cz + d = 0.
///
/// The coefficients are always normalized so that `a² + b² + c² = 1`; the
/// point-to-plane distance is then simply `|ax + by + cz + d|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    coefficients: Vector4<f32>,
}

impl Plane {
    /// Create a plane from raw coefficients, normalizing by the normal's magnitude.
    ///
    /// Fails with [`Error::DegenerateGeometry`] if the normal is zero or not finite.
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Result<Self> {
        let magnitude = Vector3f::new(a, b, c).magnitude();
        if !magnitude.is_finite() || !d.is_finite() || magnitude < 1e-12 {
            return Err(Error::DegenerateGeometry(format!(
                "plane normal ({a}, {b}, {c}) cannot be normalized"
            )));
        }

        Ok(Self {
            coefficients: Vector4::new(a, b, c, d) / magnitude,
        })
    }

    /// Create a plane through `point` with the given normal direction
    pub fn from_point_normal(point: &Point3f, normal: &Vector3f) -> Result<Self> {
        let d = -normal.dot(&point.coords);
        Self::new(normal.x, normal.y, normal.z, d)
    }

    /// Coefficients [a, b, c, d]
    pub fn coefficients(&self) -> Vector4<f32> {
        self.coefficients
    }

    /// Unit normal (a, b, c)
    pub fn normal(&self) -> Vector3f {
        self.coefficients.xyz()
    }

    /// The d coefficient
    pub fn offset(&self) -> f32 {
        self.coefficients.w
    }

    /// Distance from a point to the plane
    pub fn distance_to_point(&self, point: &Point3f) -> f32 {
        (self.coefficients.x * point.x
            + self.coefficients.y * point.y
            + self.coefficients.z * point.z
            + self.coefficients.w)
            .abs()
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.coefficients;
        write!(f, "{}, {}, {}, {}", c.x, c.y, c.z, c.w)
    }
}
