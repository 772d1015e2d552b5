//! I/O adapters for planecrate
//!
//! Reads labeled point records from delimited text exports and writes
//! segmentation output as XYZ text files.

pub mod records;
pub mod xyz;
pub mod error;

pub use error::*;
pub use records::{read_point_set, Delimiter, MalformedRowPolicy, RecordLayout, RecordReader};
pub use xyz::{write_xyz, OutputPass, XyzFileWriter, DEFAULT_REFERENCE_OFFSET};

use planecrate_core::PointSet;
use std::path::PathBuf;

/// Trait for persisting the point sets of a segmentation
pub trait PointSetWriter {
    /// Write `points` for plane `index` and `pass`, returning the written location
    fn write_point_set(
        &self,
        index: usize,
        pass: OutputPass,
        points: &PointSet,
        annotation: &str,
    ) -> IoResult<PathBuf>;
}
