//! Core data structures for planecrate
//!
//! This crate provides the value types shared by the segmentation engine and
//! its I/O adapters: labeled points, point sets, normalized planes and
//! inlier masks, plus the common error type.

pub mod point;
pub mod point_cloud;
pub mod plane;
pub mod mask;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use plane::*;
pub use mask::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Vector4};
