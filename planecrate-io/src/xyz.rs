//! XYZ text output for segmentation results
//!
//! Each point set is written to `out<id>.xyz`: an annotation line, one
//! `x y z ` line per point and a trailing blank line.

use crate::error::{IoError, IoResult};
use crate::PointSetWriter;
use planecrate_algorithms::SegmentationResult;
use planecrate_core::PointSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Reference inlier sets are written under `plane index + DEFAULT_REFERENCE_OFFSET`
pub const DEFAULT_REFERENCE_OFFSET: usize = 5;

/// Default annotation for the reference inlier set of a plane
pub const REFERENCE_ANNOTATION: &str = "Reference points for specific iteration";

/// Which point set of a plane is being written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPass {
    /// Points not claimed by this or any earlier plane
    Outliers,
    /// This plane's own inliers over the full input
    Reference,
}

/// Write `points` in XYZ layout to any writer
pub fn write_xyz<W: Write>(writer: &mut W, points: &PointSet, annotation: &str) -> IoResult<()> {
    writeln!(writer, "{}", annotation)?;
    for record in points {
        let p = &record.position;
        writeln!(writer, "{} {} {} ", p.x, p.y, p.z)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Writes point sets as `out<id>.xyz` files in one directory
#[derive(Debug, Clone)]
pub struct XyzFileWriter {
    dir: PathBuf,
    reference_offset: usize,
}

impl XyzFileWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            reference_offset: DEFAULT_REFERENCE_OFFSET,
        }
    }

    /// Set the id offset of reference inlier files.
    ///
    /// Must be at least the number of planes written, or reference files
    /// overwrite outlier files of later planes.
    pub fn with_reference_offset(mut self, offset: usize) -> Self {
        self.reference_offset = offset;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File id for plane `index` and `pass`
    pub fn file_id(&self, index: usize, pass: OutputPass) -> usize {
        match pass {
            OutputPass::Outliers => index,
            OutputPass::Reference => index + self.reference_offset,
        }
    }

    /// Path of the file for plane `index` and `pass`
    pub fn path_for(&self, index: usize, pass: OutputPass) -> PathBuf {
        self.dir.join(format!("out{}.xyz", self.file_id(index, pass)))
    }

    /// Write both point sets of one plane with the default annotations
    pub fn write_result(&self, result: &SegmentationResult) -> IoResult<(PathBuf, PathBuf)> {
        let outliers = self.write_point_set(
            result.index,
            OutputPass::Outliers,
            &result.outliers,
            &format!("Remaining points after plane {}", result.index),
        )?;
        let reference = self.write_point_set(
            result.index,
            OutputPass::Reference,
            &result.inliers,
            REFERENCE_ANNOTATION,
        )?;
        Ok((outliers, reference))
    }
}

impl PointSetWriter for XyzFileWriter {
    fn write_point_set(
        &self,
        index: usize,
        pass: OutputPass,
        points: &PointSet,
        annotation: &str,
    ) -> IoResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| IoError::WriteError {
            message: format!("cannot create {}: {}", self.dir.display(), e),
        })?;

        let path = self.path_for(index, pass);
        let file = File::create(&path).map_err(|e| IoError::WriteError {
            message: format!("cannot create {}: {}", path.display(), e),
        })?;

        let mut writer = BufWriter::new(file);
        write_xyz(&mut writer, points, annotation)?;
        writer.flush()?;

        tracing::debug!(path = %path.display(), points = points.len(), "wrote point set");
        Ok(path)
    }
}
