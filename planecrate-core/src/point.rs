//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A point together with its input label (classification or echo id).
///
/// The label is opaque payload: no algorithm in planecrate reads it, it is
/// only carried from the input to the output sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub position: Point3f,
    pub label: i32,
}

impl PointRecord {
    /// Create a record from its coordinates and label
    pub fn new(x: f32, y: f32, z: f32, label: i32) -> Self {
        Self {
            position: Point3f::new(x, y, z),
            label,
        }
    }
}

impl Default for PointRecord {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            label: 0,
        }
    }
}

impl From<Point3f> for PointRecord {
    fn from(position: Point3f) -> Self {
        Self { position, label: 0 }
    }
}

impl From<PointRecord> for Point3f {
    fn from(record: PointRecord) -> Self {
        record.position
    }
}
