//! Console reporting of segmentation progress

use planecrate_algorithms::{Segmentation, SegmentationResult, Termination};
use planecrate_core::Plane;

/// Per-plane summary shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneReport {
    pub index: usize,
    pub plane: Plane,
    pub plane_inliers: usize,
    pub total_inliers: usize,
}

impl From<&SegmentationResult> for PlaneReport {
    fn from(result: &SegmentationResult) -> Self {
        Self {
            index: result.index,
            plane: result.plane,
            plane_inliers: result.plane_inlier_count,
            total_inliers: result.total_inlier_count,
        }
    }
}

impl PlaneReport {
    pub fn log(&self) {
        tracing::info!("Plane params: {}", self.plane);
        tracing::info!(
            "Number of total inliers: {} ({} for this plane)",
            self.total_inliers,
            self.plane_inliers
        );
        tracing::info!("Finished processing plane {}", self.index);
    }
}

/// Log the end-of-run summary
pub fn log_summary(segmentation: &Segmentation) {
    tracing::info!(
        "Found {} planes, {} points unassigned",
        segmentation.planes.len(),
        segmentation.residual.len()
    );

    if let Termination::StoppedEarly { plane_index, reason } = &segmentation.termination {
        tracing::warn!("Stopped before plane {}: {}", plane_index, reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planecrate_core::{PointRecord, PointSet};

    #[test]
    fn test_report_from_result() {
        let result = SegmentationResult {
            index: 1,
            plane: Plane::new(0.0, 0.0, 1.0, -2.0).unwrap(),
            inliers: PointSet::from_points(vec![PointRecord::default(); 3]),
            outliers: PointSet::new(),
            consensus_size: 3,
            plane_inlier_count: 3,
            total_inlier_count: 10,
        };

        let report = PlaneReport::from(&result);
        assert_eq!(report.index, 1);
        assert_eq!(report.plane, result.plane);
        assert_eq!(report.plane_inliers, 3);
        assert_eq!(report.total_inliers, 10);
    }
}
