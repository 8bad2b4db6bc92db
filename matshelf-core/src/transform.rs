/// Applying a 3×3 transform to shelf positions
use nalgebra::Vector3;

use crate::matrix::{Matrix3x3, PointList};

/// Transform helpers over [`Matrix3x3`]
pub struct Transform;

impl Transform {
    /// `result[i] = Σ_j M[i][j] · v[j]`
    pub fn apply(m: &Matrix3x3, v: &Vector3<f64>) -> Vector3<f64> {
        m.0 * v
    }

    /// Apply `m` to every point, keeping order
    pub fn apply_all(m: &Matrix3x3, points: &PointList) -> PointList {
        PointList::new(points.iter().map(|p| Self::apply(m, p)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_keeps_point() {
        let p = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Transform::apply(&Matrix3x3::identity(), &p), p);
    }

    #[test]
    fn test_row_major_product() {
        let m = Matrix3x3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 2.0]]);
        let out = Transform::apply(&m, &Vector3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(out, Vector3::new(6.0, 1.0, 1.0));
    }

    #[test]
    fn test_apply_all() {
        let swap_xy = Matrix3x3::from_rows([[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        let points = PointList::from(vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let out = Transform::apply_all(&swap_xy, &points);
        assert_eq!(out.to_rows(), vec![[2.0, 1.0, 3.0], [5.0, 4.0, 6.0]]);
    }
}
