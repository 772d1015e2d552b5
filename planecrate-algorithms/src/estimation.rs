//! Least-squares plane estimation

use nalgebra::{Matrix4, SymmetricEigen, Vector3, Vector4};
use planecrate_core::{Error, Plane, Point3f, PointSet, Result, Vector3f};

/// Minimum number of points that determine a plane
pub const MIN_PLANE_POINTS: usize = 3;

/// Eigenvectors whose normal part is shorter than this carry no plane direction
const NORMAL_EPSILON: f64 = 1e-6;

/// Fit the least-squares plane to a set of points.
///
/// The points are centered on their centroid and stacked into rows
/// `(x - cx, y - cy, z - cz, 1)`; the plane normal is taken from the
/// eigenvector of the smallest eigenvalue of the 4×4 Gram matrix of those
/// rows. The eigenvalues are sorted explicitly, so the result does not depend
/// on the order the eigen solver returns them in. The homogeneous column
/// contributes a pure `(0, 0, 0, 1)` eigenvector with eigenvalue `n`; it has no
/// normal part and is skipped.
///
/// The returned plane passes through the centroid and is normalized.
///
/// # Arguments
/// * `points` - At least [`MIN_PLANE_POINTS`] points
///
/// # Returns
/// * `Result<Plane>` - The fitted plane, [`Error::InsufficientPoints`], or
///   [`Error::DegenerateGeometry`] for non-finite coordinates
pub fn estimate_plane(points: &[Point3f]) -> Result<Plane> {
    if points.len() < MIN_PLANE_POINTS {
        return Err(Error::InsufficientPoints {
            required: MIN_PLANE_POINTS,
            available: points.len(),
        });
    }

    if points.iter().any(|p| p.coords.iter().any(|c| !c.is_finite())) {
        return Err(Error::DegenerateGeometry(
            "points contain non-finite coordinates".to_string(),
        ));
    }

    let centroid = centroid(points);

    let mut gram = Matrix4::<f64>::zeros();
    for point in points {
        let row = Vector4::new(
            point.x as f64 - centroid.x,
            point.y as f64 - centroid.y,
            point.z as f64 - centroid.z,
            1.0,
        );
        gram += row * row.transpose();
    }

    let eigen = SymmetricEigen::new(gram);

    let mut order: Vec<usize> = (0..4).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

    let normal = order
        .iter()
        .map(|&i| {
            let v = eigen.eigenvectors.column(i);
            Vector3::new(v[0], v[1], v[2])
        })
        .find(|normal| normal.norm() > NORMAL_EPSILON)
        .ok_or_else(|| {
            Error::DegenerateGeometry("no eigenvector with a usable plane normal".to_string())
        })?
        .normalize();

    Plane::from_point_normal(&Point3f::from(centroid.cast::<f32>()), &normal.cast::<f32>())
}

/// Fit the least-squares plane to the coordinates of a point set
pub fn estimate_plane_from_records(points: &PointSet) -> Result<Plane> {
    estimate_plane(&points.positions())
}

fn centroid(points: &[Point3f]) -> Vector3<f64> {
    let sum = points.iter().fold(Vector3::<f64>::zeros(), |acc, p| {
        acc + Vector3::new(p.x as f64, p.y as f64, p.z as f64)
    });
    sum / points.len() as f64
}
