//! # Off-Axis Projection
//!
//! Derives asymmetric perspective frusta from a physical screen rectangle and
//! an eye position, and turns them into projection matrices.
//!
//! ## Pipeline
//!
//! 1. A [`FrustumDerivation`] reads left/right/bottom/top bounds off the
//!    screen corners as seen from the eye
//! 2. [`build_perspective`] turns the bounds into an off-center perspective matrix
//! 3. The derivation orients that matrix relative to the eye
//! 4. [`OffAxisGenerator`] normalizes the result so `M[0][0] == 1` and `M[3][2] == near`
//!
//! Two derivations exist, [`AlgorithmVariant::Optimized`] and
//! [`AlgorithmVariant::Basic`]. They are not numerically equivalent and are
//! kept side by side so they can be compared on the same display.

use std::fmt;

use serde::{Serialize, Deserialize};

pub mod error;
pub mod frustum;
pub mod screen;
pub mod derivation;
pub mod generator;

pub use error::{ProjectionError, ProjectionResult};
pub use frustum::{build_perspective, FrustumBounds};
pub use screen::{ScreenBasis, ScreenSpec};
pub use derivation::{derivation_for, BasicDerivation, FrustumDerivation, OptimizedDerivation};
pub use generator::OffAxisGenerator;

/// Which off-axis formulation is active
///
/// The variant selects both the clip-space convention of the frustum matrix
/// and the geometric derivation of its bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmVariant {
    /// Reversed-Z frustum, bounds from two projected screen corners
    #[default]
    Optimized,
    /// GL-style frustum, bounds from an orthonormal screen basis
    Basic,
}

impl AlgorithmVariant {
    /// The other variant
    pub const fn toggled(self) -> Self {
        match self {
            Self::Optimized => Self::Basic,
            Self::Basic => Self::Optimized,
        }
    }

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Optimized => "Optimized",
            Self::Basic => "Basic",
        }
    }
}

impl fmt::Display for AlgorithmVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let variant = AlgorithmVariant::default();
        assert_eq!(variant, AlgorithmVariant::Optimized);
        assert_eq!(variant.toggled(), AlgorithmVariant::Basic);
        assert_eq!(variant.toggled().toggled(), variant);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(AlgorithmVariant::Optimized.to_string(), "Optimized");
        assert_eq!(AlgorithmVariant::Basic.to_string(), "Basic");
    }
}
