//! Distance-based inlier classification

use planecrate_core::{InlierMask, Plane, Point3f, PointSet};

/// Whether `point` lies strictly closer than `threshold` to `plane`
#[inline]
pub fn is_inlier(plane: &Plane, point: &Point3f, threshold: f32) -> bool {
    plane.distance_to_point(point) < threshold
}

/// Classify every point of `points` against `plane`.
///
/// An entry is an inlier iff its distance is strictly below `threshold`;
/// a point exactly at the threshold is an outlier.
///
/// # Returns
/// * `(InlierMask, usize)` - The mask aligned to `points` and its inlier count
pub fn classify(points: &PointSet, plane: &Plane, threshold: f32) -> (InlierMask, usize) {
    let mut mask = InlierMask::new(points.len());
    let mut count = 0;

    for (i, record) in points.iter().enumerate() {
        if is_inlier(plane, &record.position, threshold) {
            mask.flag(i);
            count += 1;
        }
    }

    (mask, count)
}

/// Count inliers without building a mask
pub fn count_inliers(points: &PointSet, plane: &Plane, threshold: f32) -> usize {
    points
        .iter()
        .filter(|record| is_inlier(plane, &record.position, threshold))
        .count()
}
