//! Off-center perspective frustum matrices

use serde::{Serialize, Deserialize};

use super::AlgorithmVariant;
use crate::foundation::math::Mat4;

/// The six planes of a perspective viewing volume, in scene units
///
/// Well-formed bounds satisfy `right > left`, `top > bottom` and
/// `far > near > 0`. The Optimized derivation reads its bounds off a mirrored
/// screen and produces `left > right` and `bottom > top`; that orientation is
/// undone when the generator normalizes the matrix, so [`build_perspective`]
/// only requires the spans to be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrustumBounds {
    /// Left edge on the near plane
    pub left: f32,
    /// Right edge on the near plane
    pub right: f32,
    /// Bottom edge on the near plane
    pub bottom: f32,
    /// Top edge on the near plane
    pub top: f32,
    /// Near-plane distance
    pub near: f32,
    /// Far-plane distance
    pub far: f32,
}

impl FrustumBounds {
    /// Create a new set of bounds
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self { left, right, bottom, top, near, far }
    }

    /// Symmetric bounds with the given half extents on the near plane
    pub const fn symmetric(half_width: f32, half_height: f32, near: f32, far: f32) -> Self {
        Self::new(-half_width, half_width, -half_height, half_height, near, far)
    }

    /// Whether `right > left`, `top > bottom` and `far > near > 0`
    pub fn is_well_formed(&self) -> bool {
        self.right > self.left && self.top > self.bottom && self.far > self.near && self.near > 0.0
    }

    /// Whether the left/right and bottom/top pairs mirror each other within `epsilon`
    pub fn is_symmetric(&self, epsilon: f32) -> bool {
        (self.left + self.right).abs() <= epsilon && (self.bottom + self.top).abs() <= epsilon
    }

    fn has_extent(&self) -> bool {
        self.right != self.left && self.top != self.bottom && self.far != self.near
    }
}

/// Build an off-center perspective matrix from frustum bounds
///
/// - [`AlgorithmVariant::Optimized`]: looks down +Z, `M[2][3] = 1`, depth maps
///   `near` to 0 and `far` to 1 after the perspective divide.
/// - [`AlgorithmVariant::Basic`]: looks down -Z, `M[2][3] = -1`, depth maps
///   `near` to -1 and `far` to 1 after the perspective divide.
///
/// Bounds come from a [`FrustumDerivation`](super::FrustumDerivation), which
/// rejects degenerate input before it gets here.
pub fn build_perspective(bounds: &FrustumBounds, variant: AlgorithmVariant) -> Mat4 {
    debug_assert!(bounds.has_extent(), "frustum bounds have zero extent: {bounds:?}");

    let FrustumBounds { left: l, right: r, bottom: b, top: t, near: n, far: f } = *bounds;
    let mut result = Mat4::identity();

    result[(0, 0)] = (2.0 * n) / (r - l);
    result[(1, 1)] = (2.0 * n) / (t - b);
    result[(3, 3)] = 0.0;

    match variant {
        AlgorithmVariant::Optimized => {
            result[(2, 0)] = -(r + l) / (r - l);
            result[(2, 1)] = -(t + b) / (t - b);
            result[(2, 2)] = f / (f - n);
            result[(2, 3)] = 1.0;
            result[(3, 2)] = -(f * n) / (f - n);
        }
        AlgorithmVariant::Basic => {
            result[(2, 0)] = (r + l) / (r - l);
            result[(2, 1)] = (t + b) / (t - b);
            result[(2, 2)] = -(f + n) / (f - n);
            result[(2, 3)] = -1.0;
            result[(3, 2)] = -(2.0 * f * n) / (f - n);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4Ext, Vec3};
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1e-5;

    fn off_center() -> FrustumBounds {
        FrustumBounds::new(-2.0, 6.0, -1.5, 3.0, 5.0, 1000.0)
    }

    #[test]
    fn test_optimized_maps_near_corners_to_clip_extrema() {
        let b = off_center();
        let m = build_perspective(&b, AlgorithmVariant::Optimized);

        let low = m.project_point(&Vec3::new(b.left, b.bottom, b.near));
        let high = m.project_point(&Vec3::new(b.right, b.top, b.near));

        assert_abs_diff_eq!(low.x, -1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(low.y, -1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(high.x, 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(high.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_optimized_depth_range_is_zero_to_one() {
        let b = off_center();
        let m = build_perspective(&b, AlgorithmVariant::Optimized);

        assert_eq!(m[(2, 3)], 1.0);
        assert_eq!(m[(3, 3)], 0.0);
        assert_abs_diff_eq!(m.project_point(&Vec3::new(0.0, 0.0, b.near)).z, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(m.project_point(&Vec3::new(0.0, 0.0, b.far)).z, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_basic_maps_near_corners_to_clip_extrema() {
        let b = off_center();
        let m = build_perspective(&b, AlgorithmVariant::Basic);

        // GL-style frusta look down -Z
        let low = m.project_point(&Vec3::new(b.left, b.bottom, -b.near));
        let high = m.project_point(&Vec3::new(b.right, b.top, -b.near));

        assert_abs_diff_eq!(low.x, -1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(low.y, -1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(high.x, 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(high.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_basic_depth_range_is_minus_one_to_one() {
        let b = off_center();
        let m = build_perspective(&b, AlgorithmVariant::Basic);

        assert_eq!(m[(2, 3)], -1.0);
        assert_abs_diff_eq!(m.project_point(&Vec3::new(0.0, 0.0, -b.near)).z, -1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(m.project_point(&Vec3::new(0.0, 0.0, -b.far)).z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_symmetric_bounds_have_no_skew() {
        let b = FrustumBounds::symmetric(4.0, 2.25, 5.0, 1000.0);
        assert!(b.is_well_formed());
        assert!(b.is_symmetric(0.0));

        for variant in [AlgorithmVariant::Optimized, AlgorithmVariant::Basic] {
            let m = build_perspective(&b, variant);
            assert_eq!(m[(2, 0)], 0.0);
            assert_eq!(m[(2, 1)], 0.0);
            assert_abs_diff_eq!(m[(0, 0)], 1.25, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_variants_differ_only_in_convention() {
        let b = off_center();
        let optimized = build_perspective(&b, AlgorithmVariant::Optimized);
        let basic = build_perspective(&b, AlgorithmVariant::Basic);

        assert_eq!(optimized[(0, 0)], basic[(0, 0)]);
        assert_eq!(optimized[(1, 1)], basic[(1, 1)]);
        assert_eq!(optimized[(2, 0)], -basic[(2, 0)]);
        assert_eq!(optimized[(2, 1)], -basic[(2, 1)]);
    }
}
