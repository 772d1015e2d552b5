//! # planecrate algorithms
//!
//! RANSAC building blocks and the multi-plane segmenter.
//!
//! - [`estimation`]: least-squares plane fit via eigen-decomposition
//! - [`sampling`]: bounded random sampling of distinct indices
//! - [`classification`]: point-to-plane distance thresholding
//! - [`partition`]: mask-driven splitting of point sets
//! - [`segmentation`]: iterative multi-plane extraction

pub mod estimation;
pub mod sampling;
pub mod classification;
pub mod partition;
pub mod segmentation;

// Re-export commonly used items
pub use estimation::*;
pub use sampling::*;
pub use classification::*;
pub use partition::*;
pub use segmentation::*;
