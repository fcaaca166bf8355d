//! # Off-Axis Engine
//!
//! Asymmetric perspective projection for CAVE walls, powerwalls and other
//! multi-display setups where the viewer is not centered in front of the screen.
//!
//! ## Features
//!
//! - **Frustum Building**: Off-center perspective matrices in reversed-Z and GL-style clip space
//! - **Off-Axis Generation**: Two interchangeable derivations (Optimized and Basic) selectable at runtime
//! - **View Patching**: Splices the off-axis projection into a per-eye view and re-derives every dependent matrix
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use offaxis_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let mut viewport = OffAxisViewport::new(&config);
//!
//!     // Eye 40cm right of screen center, 50cm in front of it
//!     viewport.update_eye(1920.0, 1080.0, Vec3::new(40.0, 0.0, 50.0))?;
//!
//!     let mut view = ViewState::new(
//!         Vec3::zeros(),
//!         Mat4::identity(),
//!         Mat4::reversed_z_perspective(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 10.0),
//!         &config.projection.clip_space,
//!     )?;
//!     viewport.prepare_eye_view(&mut view)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::many_single_char_names)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod projection;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::math::{Vec3, Vec4, Mat4, Mat4Ext},
        projection::{
            AlgorithmVariant, FrustumBounds, ScreenSpec,
            OffAxisGenerator, ProjectionError, ProjectionResult,
        },
        render::{
            OffAxisState, OffAxisViewport, StereoscopicPass,
            ViewFrustum, ViewMatrices, ViewProjectionPatcher, ViewState, ViewUniforms,
        },
        config::{Config, ConfigError},
        core::config::{ApplicationConfig, ClipSpaceConvention, DisplayConfig, EngineConfig, ProjectionConfig},
    };
}
