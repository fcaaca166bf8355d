//! # View Projection Patching
//!
//! Replaces the projection of an already computed eye view with an off-axis
//! matrix and re-derives everything that depends on it: inverse view,
//! adjusted projection, translated view-projection and their inverses, the
//! shadow-pass copy and the culling planes.
//!
//! ## Variants
//!
//! - **Optimized**: the off-axis matrix is a view-relative projection and is
//!   used as-is. The pre-view translation is reset to `-view_origin`.
//! - **Basic**: the off-axis matrix is world-relative, so it is first brought
//!   into view space through the inverse view matrix and the
//!   X→Z, Y→X, Z→Y axis permutation. The pre-view translation is kept.

use super::view::{adjust_for_clip_space, ViewMatrices, ViewState};
use crate::core::config::{ApplicationConfig, ClipSpaceConvention};
use crate::foundation::math::{Mat4, Mat4Ext};
use crate::projection::{AlgorithmVariant, ProjectionError, ProjectionResult};

/// Splices off-axis projections into eye views
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewProjectionPatcher {
    clip_space: ClipSpaceConvention,
}

impl ViewProjectionPatcher {
    /// Create a patcher for the given clip-space convention
    pub fn new(clip_space: ClipSpaceConvention) -> Self {
        Self { clip_space }
    }

    /// Create a patcher from the application configuration
    pub fn from_config(config: &ApplicationConfig) -> Self {
        Self::new(config.projection.clip_space)
    }

    /// Clip-space convention applied to patched projections
    pub fn clip_space(&self) -> &ClipSpaceConvention {
        &self.clip_space
    }

    /// Compute the patched view without touching the original
    ///
    /// # Errors
    /// Returns [`ProjectionError::SingularMatrix`] if a derived matrix
    /// cannot be inverted.
    pub fn patched(&self, view: &ViewState, off_axis: &Mat4, variant: AlgorithmVariant) -> ProjectionResult<ViewState> {
        let current = &view.matrices;

        let (projection_unadjusted, pre_view_translation) = match variant {
            AlgorithmVariant::Optimized => (*off_axis, -current.view_origin),
            AlgorithmVariant::Basic => {
                let inv_view = current
                    .view
                    .try_inverse()
                    .ok_or(ProjectionError::SingularMatrix("view"))?;
                (inv_view * Mat4::axis_permutation() * off_axis, current.pre_view_translation)
            }
        };

        let matrices = ViewMatrices::derive(
            current.view_origin,
            pre_view_translation,
            current.view,
            adjust_for_clip_space(&projection_unadjusted, &self.clip_space),
        )?;

        Ok(ViewState::from_matrices(projection_unadjusted, matrices, &self.clip_space))
    }

    /// Patch `view` in place
    ///
    /// On error the view keeps its previous, fully consistent state.
    pub fn apply(&self, view: &mut ViewState, off_axis: &Mat4, variant: AlgorithmVariant) -> ProjectionResult<()> {
        *view = self.patched(view, off_axis, variant)?;
        Ok(())
    }
}
