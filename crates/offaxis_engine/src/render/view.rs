//! # Per-Eye View State
//!
//! The record a frame renderer builds for one eye: a base view matrix plus
//! every matrix derived from it and the projection. All derived fields are
//! produced together by [`ViewMatrices::derive`], so a view is never left
//! with a mix of old and new matrices.

use bytemuck::{Pod, Zeroable};

use super::culling::ViewFrustum;
use crate::core::config::ClipSpaceConvention;
use crate::foundation::math::{matrix_rows, Mat4, Mat4Ext, Vec3};
use crate::projection::{ProjectionError, ProjectionResult};

/// Adjust a projection for the backend's clip space
///
/// `P * scale(1, sign_y, 1 - min_z) * translate(0, 0, min_z)`
pub fn adjust_for_clip_space(projection: &Mat4, clip_space: &ClipSpaceConvention) -> Mat4 {
    let scale = Mat4::nonuniform_scale(&Vec3::new(1.0, clip_space.projection_sign_y, 1.0 - clip_space.min_clip_z));
    let translate = Mat4::row_translation(&Vec3::new(0.0, 0.0, clip_space.min_clip_z));
    projection * scale * translate
}

fn inverse_of(m: &Mat4, name: &'static str) -> ProjectionResult<Mat4> {
    m.try_inverse().ok_or(ProjectionError::SingularMatrix(name))
}

/// The complete set of matrices describing one view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewMatrices {
    /// World-space position of the view
    pub view_origin: Vec3,
    /// Offset added to world positions before the translated view matrix
    pub pre_view_translation: Vec3,
    /// World to view
    pub view: Mat4,
    /// View to world
    pub inv_view: Mat4,
    /// View to clip, adjusted for the backend's clip space
    pub projection: Mat4,
    /// Clip to view
    pub inv_projection: Mat4,
    /// World to clip
    pub view_projection: Mat4,
    /// Clip to world
    pub inv_view_projection: Mat4,
    /// Translated world to view
    pub translated_view: Mat4,
    /// View to translated world
    pub inv_translated_view: Mat4,
    /// Translated world to clip
    pub translated_view_projection: Mat4,
    /// Clip to translated world
    pub inv_translated_view_projection: Mat4,
}

impl ViewMatrices {
    /// Derive every matrix from a view matrix and an adjusted projection
    ///
    /// # Errors
    /// Returns [`ProjectionError::SingularMatrix`] naming the first matrix
    /// that has no inverse.
    pub fn derive(
        view_origin: Vec3,
        pre_view_translation: Vec3,
        view: Mat4,
        projection: Mat4,
    ) -> ProjectionResult<Self> {
        let view_projection = view * projection;
        let translated_view = Mat4::row_translation(&-pre_view_translation) * view;
        let translated_view_projection = translated_view * projection;

        Ok(Self {
            view_origin,
            pre_view_translation,
            inv_view: inverse_of(&view, "view")?,
            inv_projection: inverse_of(&projection, "projection")?,
            inv_view_projection: inverse_of(&view_projection, "view-projection")?,
            inv_translated_view: inverse_of(&translated_view, "translated view")?,
            inv_translated_view_projection: inverse_of(&translated_view_projection, "translated view-projection")?,
            view,
            projection,
            view_projection,
            translated_view,
            translated_view_projection,
        })
    }
}

/// Everything the rasterizer and the culling pass read for one eye
///
/// Owned by the frame renderer for the duration of one eye's draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Matrices used for the main pass
    pub matrices: ViewMatrices,
    /// Matrices used by the shadow pass
    pub shadow_matrices: ViewMatrices,
    /// Projection before the clip-space adjustment
    pub projection_unadjusted: Mat4,
    /// Culling planes extracted from the view-projection matrix
    pub frustum: ViewFrustum,
}

impl ViewState {
    /// Build an ordinary camera view
    ///
    /// # Arguments
    /// * `view_origin` - Camera position in world space
    /// * `view_rotation` - Rotation from world axes into view axes
    /// * `projection` - Projection before the clip-space adjustment
    /// * `clip_space` - Backend clip-space convention
    pub fn new(
        view_origin: Vec3,
        view_rotation: Mat4,
        projection: Mat4,
        clip_space: &ClipSpaceConvention,
    ) -> ProjectionResult<Self> {
        let view = Mat4::row_translation(&-view_origin) * view_rotation;
        let matrices = ViewMatrices::derive(
            view_origin,
            -view_origin,
            view,
            adjust_for_clip_space(&projection, clip_space),
        )?;
        Ok(Self::from_matrices(projection, matrices, clip_space))
    }

    /// Assemble a view from an already derived matrix set
    ///
    /// The shadow matrices mirror the main ones and the frustum is
    /// rebuilt from the new view-projection matrix, whose projection was
    /// adjusted for `clip_space`.
    pub fn from_matrices(projection_unadjusted: Mat4, matrices: ViewMatrices, clip_space: &ClipSpaceConvention) -> Self {
        let frustum = ViewFrustum::from_view_projection(&matrices.view_projection, clip_space, false);
        Self {
            shadow_matrices: matrices.clone(),
            matrices,
            projection_unadjusted,
            frustum,
        }
    }

    /// Pack the main-pass matrices for upload
    pub fn uniforms(&self) -> ViewUniforms {
        ViewUniforms::from(&self.matrices)
    }
}

/// GPU layout of the per-view constants, rows stored contiguously
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ViewUniforms {
    /// Translated world to clip
    pub translated_view_projection: [[f32; 4]; 4],
    /// Clip to translated world
    pub inv_translated_view_projection: [[f32; 4]; 4],
    /// View to clip
    pub projection: [[f32; 4]; 4],
    /// Translated world to view
    pub translated_view: [[f32; 4]; 4],
    /// View origin (xyz, w = 1)
    pub view_origin: [f32; 4],
    /// Pre-view translation (xyz, w = 0)
    pub pre_view_translation: [f32; 4],
}

impl ViewUniforms {
    /// Raw bytes ready for a uniform buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl From<&ViewMatrices> for ViewUniforms {
    fn from(m: &ViewMatrices) -> Self {
        let o = m.view_origin;
        let t = m.pre_view_translation;
        Self {
            translated_view_projection: matrix_rows(&m.translated_view_projection),
            inv_translated_view_projection: matrix_rows(&m.inv_translated_view_projection),
            projection: matrix_rows(&m.projection),
            translated_view: matrix_rows(&m.translated_view),
            view_origin: [o.x, o.y, o.z, 1.0],
            pre_view_translation: [t.x, t.y, t.z, 0.0],
        }
    }
}
