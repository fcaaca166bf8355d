//! Active off-axis configuration of a viewport

use crate::foundation::math::Mat4;
use crate::projection::AlgorithmVariant;

/// The variant in use and the most recently installed off-axis matrix
///
/// Starts with no matrix. Once [`set_matrix`](Self::set_matrix) has been
/// called, every eye patched afterwards uses that same matrix until it is
/// replaced or cleared. Not synchronized: keep it on the thread that sets up
/// views, or wrap it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffAxisState {
    variant: AlgorithmVariant,
    matrix: Option<Mat4>,
}

impl OffAxisState {
    /// Create a state with the given variant and no matrix
    pub fn new(variant: AlgorithmVariant) -> Self {
        Self { variant, matrix: None }
    }

    /// Active variant
    pub fn variant(&self) -> AlgorithmVariant {
        self.variant
    }

    /// Select a variant
    pub fn set_variant(&mut self, variant: AlgorithmVariant) {
        self.variant = variant;
    }

    /// Flip to the other variant and report it
    pub fn toggle_variant(&mut self) -> AlgorithmVariant {
        self.variant = self.variant.toggled();
        log::info!("Off-axis method: {}", self.variant);
        self.variant
    }

    /// Install a new off-axis matrix
    pub fn set_matrix(&mut self, matrix: Mat4) -> &Mat4 {
        log::debug!("Off-axis matrix installed for {} variant", self.variant);
        self.matrix.insert(matrix)
    }

    /// Drop the installed matrix; views go back to their own projection
    pub fn clear_matrix(&mut self) {
        self.matrix = None;
    }

    /// Whether a matrix has been installed
    pub fn is_set(&self) -> bool {
        self.matrix.is_some()
    }

    /// Installed matrix, if any
    pub fn matrix(&self) -> Option<&Mat4> {
        self.matrix.as_ref()
    }
}
