//! Projection error types

use thiserror::Error;

/// Errors raised while generating or applying an off-axis projection
///
/// Every variant names a degenerate input. No matrix is produced when one is
/// returned, and a view being patched is left as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// The eye lies on (or too close to) the screen plane
    #[error("Eye depth {depth} is within {min} of the screen plane")]
    DegenerateEyeDepth {
        /// Signed depth term the derivation would divide by
        depth: f32,
        /// Configured threshold
        min: f32,
    },

    /// Near plane is not a positive finite distance
    #[error("Near plane must be positive and finite, got {0}")]
    InvalidNearPlane(f32),

    /// The far plane ends up at or in front of the near plane
    #[error("Far plane {far} does not lie beyond near plane {near}")]
    InvalidFarPlane {
        /// Near-plane distance
        near: f32,
        /// Far-plane distance after subtracting eye depth
        far: f32,
    },

    /// Screen dimensions are not positive finite values
    #[error("Invalid screen dimensions {width} x {height}")]
    InvalidScreen {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },

    /// Screen corners do not span a plane
    #[error("Screen corners are collinear; no screen basis exists")]
    DegenerateScreenBasis,

    /// The horizontal scale term vanished, so the matrix cannot be normalized
    #[error("Projection cannot be normalized: M[0][0] is {0}")]
    DegenerateProjection(f32),

    /// A derived view matrix has no inverse
    #[error("Singular {0} matrix")]
    SingularMatrix(&'static str),
}

/// Result type for projection operations
pub type ProjectionResult<T> = Result<T, ProjectionError>;
