//! Mask-driven point set partitioning

use planecrate_core::{Error, InlierMask, Membership, PointSet, Result};

/// Keep the points of `points` on the requested side of `mask`.
///
/// The mask must have been computed against `points`: a length mismatch
/// fails with [`Error::MaskSizeMismatch`]. Relative order is preserved.
pub fn partition(points: &PointSet, mask: &InlierMask, membership: Membership) -> Result<PointSet> {
    check_alignment(points, mask)?;

    Ok(points
        .iter()
        .enumerate()
        .filter(|(i, _)| mask.selects(*i, membership))
        .map(|(_, record)| *record)
        .collect())
}

/// Split `points` into `(inliers, outliers)` according to `mask`
pub fn split(points: &PointSet, mask: &InlierMask) -> Result<(PointSet, PointSet)> {
    check_alignment(points, mask)?;

    let inlier_count = mask.count();
    let mut inliers = PointSet::with_capacity(inlier_count);
    let mut outliers = PointSet::with_capacity(points.len() - inlier_count);
    for (record, is_inlier) in points.iter().zip(mask.iter()) {
        if is_inlier {
            inliers.push(*record);
        } else {
            outliers.push(*record);
        }
    }

    Ok((inliers, outliers))
}

fn check_alignment(points: &PointSet, mask: &InlierMask) -> Result<()> {
    if mask.len() != points.len() {
        return Err(Error::MaskSizeMismatch {
            mask_len: mask.len(),
            set_len: points.len(),
        });
    }
    Ok(())
}
