//! Math utilities and types
//!
//! Provides the vector and matrix types used by the projection code.
//!
//! ## Matrix Convention
//!
//! Projection and view matrices in this crate follow the row-vector convention:
//! a point is a row vector multiplied on the left (`p' = p * M`), so translation
//! lives in row 3 and `A * B` applies `A` first. Element `M[r][c]` is `m[(r, c)]`.
//! nalgebra itself is convention-agnostic for multiplication, so only the
//! constructors below and [`Mat4Ext::transform_row`] need to know about it.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix4,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Squared-length threshold below which a plane normal is treated as zero
    pub const PLANE_NORMAL_EPSILON_SQ: f32 = 1.0e-10;

    /// Threshold below which a direction is treated as zero when normalizing
    pub const NORMALIZE_EPSILON: f32 = 1.0e-8;
}

/// Copy a matrix into row-major nested arrays (`rows[r][c] == m[(r, c)]`)
pub fn matrix_rows(m: &Mat4) -> [[f32; 4]; 4] {
    std::array::from_fn(|r| std::array::from_fn(|c| m[(r, c)]))
}

/// Read one column of a matrix as a vector
pub fn matrix_column(m: &Mat4, c: usize) -> Vec4 {
    Vec4::new(m[(0, c)], m[(1, c)], m[(2, c)], m[(3, c)])
}

/// Extension trait for Mat4 with row-vector convention constructors
pub trait Mat4Ext {
    /// Translation by `offset` (stored in row 3)
    fn row_translation(offset: &Vec3) -> Mat4;

    /// Non-uniform scale along the three axes
    fn nonuniform_scale(factors: &Vec3) -> Mat4;

    /// Scale of `(1, -1, 1)`, mirroring the Y axis
    fn flip_y() -> Mat4;

    /// Axis permutation sending X to Z, Y to X and Z to Y
    fn axis_permutation() -> Mat4;

    /// Symmetric reversed-Z perspective with an infinite far plane
    ///
    /// This is the projection a host camera produces for an ordinary,
    /// centered view. `half_fov_x` is the horizontal half angle in radians and
    /// `aspect` is width / height. Depth maps `near` to 1 and infinity to 0.
    fn reversed_z_perspective(half_fov_x: f32, aspect: f32, near: f32) -> Mat4;

    /// Transform a homogeneous row vector: `v * self`
    fn transform_row(&self, v: &Vec4) -> Vec4;

    /// Transform a point and apply the perspective divide
    fn project_point(&self, point: &Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn row_translation(offset: &Vec3) -> Mat4 {
        let mut result = Mat4::identity();
        result[(3, 0)] = offset.x;
        result[(3, 1)] = offset.y;
        result[(3, 2)] = offset.z;
        result
    }

    fn nonuniform_scale(factors: &Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(factors)
    }

    fn flip_y() -> Mat4 {
        Mat4::nonuniform_scale(&Vec3::new(1.0, -1.0, 1.0))
    }

    fn axis_permutation() -> Mat4 {
        Mat4::new(
            0.0, 0.0, 1.0, 0.0,
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn reversed_z_perspective(half_fov_x: f32, aspect: f32, near: f32) -> Mat4 {
        let inv_tan = 1.0 / half_fov_x.tan();
        Mat4::new(
            inv_tan, 0.0,              0.0,  0.0,
            0.0,     aspect * inv_tan, 0.0,  0.0,
            0.0,     0.0,              0.0,  1.0,
            0.0,     0.0,              near, 0.0,
        )
    }

    fn transform_row(&self, v: &Vec4) -> Vec4 {
        self.transpose() * v
    }

    fn project_point(&self, point: &Vec3) -> Vec3 {
        let clip = self.transform_row(&point.push(1.0));
        clip.xyz() / clip.w
    }
}
