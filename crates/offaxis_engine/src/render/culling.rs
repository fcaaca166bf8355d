//! View-frustum culling planes
//!
//! Planes are read off the columns of a row-vector view-projection matrix:
//! clip-space `x = p · col0`, `w = p · col3`, so `-w <= x <= w` becomes the
//! pair `col3 + col0 >= 0` and `col3 - col0 >= 0`. Depth follows the
//! reversed-Z layout after the clip-space adjustment: near at `z = w`, far
//! side bounded by `z = min_clip_z * w`.

use crate::core::config::ClipSpaceConvention;
use crate::foundation::math::{constants::PLANE_NORMAL_EPSILON_SQ, matrix_column, Mat4, Vec3, Vec4};

/// Culling volume of one view
///
/// Each plane `(a, b, c, d)` is normalized and faces inward: a point is
/// inside when `a*x + b*y + c*z + d >= 0` for every plane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewFrustum {
    planes: Vec<Vec4>,
}

impl ViewFrustum {
    /// Extract culling planes from a view-projection matrix
    ///
    /// Order: near (when `use_near_plane`), left, right, top, bottom, far.
    /// A plane whose normal vanishes is skipped; with an infinite far plane
    /// that is always the far plane. `clip_space` must be the convention the
    /// projection inside `view_projection` was adjusted for.
    pub fn from_view_projection(view_projection: &Mat4, clip_space: &ClipSpaceConvention, use_near_plane: bool) -> Self {
        let x = matrix_column(view_projection, 0);
        let y = matrix_column(view_projection, 1);
        let z = matrix_column(view_projection, 2);
        let w = matrix_column(view_projection, 3);

        let near = use_near_plane.then(|| w - z);
        let planes = near
            .into_iter()
            .chain([w + x, w - x, w - y, w + y, z - w * clip_space.min_clip_z])
            .filter_map(normalize_plane)
            .collect();

        Self { planes }
    }

    /// Inward-facing planes
    pub fn planes(&self) -> &[Vec4] {
        &self.planes
    }

    /// Whether a point lies inside every plane
    pub fn contains_point(&self, point: &Vec3) -> bool {
        self.intersects_sphere(point, 0.0)
    }

    /// Whether a sphere touches the volume
    pub fn intersects_sphere(&self, center: &Vec3, radius: f32) -> bool {
        let p = center.push(1.0);
        self.planes.iter().all(|plane| plane.dot(&p) >= -radius)
    }
}

fn normalize_plane(plane: Vec4) -> Option<Vec4> {
    let length_sq = plane.xyz().norm_squared();
    (length_sq > PLANE_NORMAL_EPSILON_SQ).then(|| plane / length_sq.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4Ext;
    use crate::render::view::adjust_for_clip_space;

    fn camera_frustum(use_near_plane: bool) -> ViewFrustum {
        // 90 degree horizontal field of view looking down +Z from the origin
        let projection = Mat4::reversed_z_perspective(std::f32::consts::FRAC_PI_4, 1.0, 10.0);
        ViewFrustum::from_view_projection(&projection, &ClipSpaceConvention::ZERO_TO_ONE, use_near_plane)
    }

    #[test]
    fn test_infinite_far_plane_is_skipped() {
        assert_eq!(camera_frustum(false).planes().len(), 4);
        assert_eq!(camera_frustum(true).planes().len(), 5);
    }

    #[test]
    fn test_planes_are_normalized() {
        for plane in camera_frustum(true).planes() {
            assert!((plane.xyz().norm() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_point_containment() {
        let frustum = camera_frustum(false);
        assert!(frustum.contains_point(&Vec3::new(0.0, 0.0, 100.0)));
        assert!(frustum.contains_point(&Vec3::new(90.0, -90.0, 100.0)));
        assert!(!frustum.contains_point(&Vec3::new(0.0, 0.0, -100.0)));
        assert!(!frustum.contains_point(&Vec3::new(150.0, 0.0, 100.0)));
        assert!(!frustum.contains_point(&Vec3::new(0.0, 150.0, 100.0)));
    }

    #[test]
    fn test_near_plane_rejects_points_before_it() {
        let point = Vec3::new(0.0, 0.0, 5.0);
        assert!(camera_frustum(false).contains_point(&point));
        assert!(!camera_frustum(true).contains_point(&point));
    }

    #[test]
    fn test_distant_on_axis_point_is_inside_for_both_depth_ranges() {
        let projection = Mat4::reversed_z_perspective(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 10.0);
        for clip_space in [ClipSpaceConvention::ZERO_TO_ONE, ClipSpaceConvention::NEGATIVE_ONE_TO_ONE] {
            let adjusted = adjust_for_clip_space(&projection, &clip_space);
            let frustum = ViewFrustum::from_view_projection(&adjusted, &clip_space, true);

            assert_eq!(frustum.planes().len(), 5, "{clip_space:?}");
            assert!(frustum.contains_point(&Vec3::new(0.0, 0.0, 1000.0)), "{clip_space:?}");
            assert!(frustum.contains_point(&Vec3::new(0.0, 0.0, 1.0e6)), "{clip_space:?}");
            assert!(!frustum.contains_point(&Vec3::new(0.0, 0.0, 5.0)), "{clip_space:?}");
        }
    }

    #[test]
    fn test_sphere_straddling_a_plane_intersects() {
        let frustum = camera_frustum(false);
        let center = Vec3::new(110.0, 0.0, 100.0);
        assert!(!frustum.contains_point(&center));
        assert!(frustum.intersects_sphere(&center, 10.0));
        assert!(!frustum.intersects_sphere(&center, 5.0));
    }
}
