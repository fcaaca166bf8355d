//! # Off-Axis Viewport
//!
//! The entry points a frame renderer calls. Once per frame (or whenever the
//! tracked eye moves) the renderer generates and installs a matrix; then, for
//! every eye it renders, it builds an ordinary camera view and hands it to
//! [`OffAxisViewport::prepare_eye_view`] before rasterization.
//!
//! ```text
//! update_eye ──► OffAxisGenerator ──► OffAxisState
//!                                          │
//! camera view ──► prepare_eye_view ──► ViewProjectionPatcher ──► rasterizer
//! ```

use std::fmt;

use super::{OffAxisState, ViewProjectionPatcher, ViewState};
use crate::core::config::ApplicationConfig;
use crate::foundation::math::{Mat4, Vec3};
use crate::projection::{AlgorithmVariant, OffAxisGenerator, ProjectionResult};

/// Which eye a view is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StereoscopicPass {
    /// Mono rendering, one view per frame
    Full,
    /// Left eye of a stereo pair
    LeftEye,
    /// Right eye of a stereo pair
    RightEye,
}

impl StereoscopicPass {
    /// Passes making up one frame
    pub const fn passes(stereo: bool) -> &'static [Self] {
        if stereo {
            &[Self::LeftEye, Self::RightEye]
        } else {
            &[Self::Full]
        }
    }

    /// Whether this is the first pass of its frame
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Full | Self::LeftEye)
    }
}

impl fmt::Display for StereoscopicPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Full => "full",
            Self::LeftEye => "left eye",
            Self::RightEye => "right eye",
        })
    }
}

/// Off-axis projection state and services for one game viewport
#[derive(Debug, Clone)]
pub struct OffAxisViewport {
    generator: OffAxisGenerator,
    patcher: ViewProjectionPatcher,
    state: OffAxisState,
    near_plane: f32,
    stereo: bool,
}

impl OffAxisViewport {
    /// Create a viewport from the application configuration
    pub fn new(config: &ApplicationConfig) -> Self {
        log::info!(
            "Off-axis viewport: {}cm wide display, near plane {}, {} method",
            config.display.physical_width,
            config.projection.near_plane,
            config.projection.variant
        );
        Self {
            generator: OffAxisGenerator::from_config(config),
            patcher: ViewProjectionPatcher::from_config(config),
            state: OffAxisState::new(config.projection.variant),
            near_plane: config.projection.near_plane,
            stereo: config.engine.stereo,
        }
    }

    /// Current off-axis state
    pub fn state(&self) -> &OffAxisState {
        &self.state
    }

    /// Generator used by [`update_eye`](Self::update_eye)
    pub fn generator(&self) -> &OffAxisGenerator {
        &self.generator
    }

    /// Active variant
    pub fn variant(&self) -> AlgorithmVariant {
        self.state.variant()
    }

    /// Eye passes rendered each frame
    pub fn passes(&self) -> &'static [StereoscopicPass] {
        StereoscopicPass::passes(self.stereo)
    }

    /// Install a matrix; every eye patched from now on uses it
    pub fn set_off_axis_matrix(&mut self, matrix: Mat4) {
        self.state.set_matrix(matrix);
    }

    /// Switch between the Optimized and Basic methods
    ///
    /// Takes effect for the next generated matrix. An installed matrix is
    /// kept, so regenerate it (e.g. via [`update_eye`](Self::update_eye))
    /// to compare the two methods on the same eye position.
    pub fn toggle_off_axis_method(&mut self) -> AlgorithmVariant {
        self.state.toggle_variant()
    }

    /// Compute an off-axis matrix with the active method
    ///
    /// Pure: does not install the result.
    pub fn generate_off_axis_matrix(
        &self,
        screen_width: f32,
        screen_height: f32,
        eye: &Vec3,
        near: f32,
    ) -> ProjectionResult<Mat4> {
        self.generator
            .generate(screen_width, screen_height, eye, near, self.state.variant())
    }

    /// Generate a matrix for a new eye position at the configured near plane and install it
    pub fn update_eye(&mut self, screen_width: f32, screen_height: f32, eye: Vec3) -> ProjectionResult<&Mat4> {
        let matrix = self.generate_off_axis_matrix(screen_width, screen_height, &eye, self.near_plane)?;
        Ok(self.state.set_matrix(matrix))
    }

    /// Per-eye hook: patch `view` if a matrix is installed
    ///
    /// Returns whether the view was patched. Without an installed matrix the
    /// view keeps its ordinary projection.
    pub fn prepare_eye_view(&self, view: &mut ViewState) -> ProjectionResult<bool> {
        let Some(matrix) = self.state.matrix() else {
            return Ok(false);
        };
        self.patcher.apply(view, matrix, self.state.variant())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ClipSpaceConvention;
    use crate::foundation::math::Mat4Ext;

    fn camera() -> ViewState {
        ViewState::new(
            Vec3::new(0.0, 0.0, -50.0),
            Mat4::identity(),
            Mat4::reversed_z_perspective(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 10.0),
            &ClipSpaceConvention::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_passes() {
        assert_eq!(StereoscopicPass::passes(false), &[StereoscopicPass::Full]);
        assert_eq!(
            StereoscopicPass::passes(true),
            &[StereoscopicPass::LeftEye, StereoscopicPass::RightEye]
        );
        assert!(StereoscopicPass::LeftEye.is_primary());
        assert!(!StereoscopicPass::RightEye.is_primary());
    }

    #[test]
    fn test_unset_matrix_leaves_view_alone() {
        let viewport = OffAxisViewport::new(&ApplicationConfig::default());
        let original = camera();
        let mut view = original.clone();

        assert!(!viewport.prepare_eye_view(&mut view).unwrap());
        assert_eq!(view, original);
    }

    #[test]
    fn test_installed_matrix_is_applied() {
        let mut viewport = OffAxisViewport::new(&ApplicationConfig::default());
        let matrix = *viewport.update_eye(1920.0, 1080.0, Vec3::new(20.0, 0.0, 80.0)).unwrap();

        let mut view = camera();
        assert!(viewport.prepare_eye_view(&mut view).unwrap());
        assert_eq!(view.projection_unadjusted, matrix);
    }

    #[test]
    fn test_generate_does_not_install() {
        let viewport = OffAxisViewport::new(&ApplicationConfig::default());
        viewport
            .generate_off_axis_matrix(1920.0, 1080.0, &Vec3::new(0.0, 0.0, 60.0), 10.0)
            .unwrap();
        assert!(!viewport.state().is_set());
    }

    #[test]
    fn test_toggle_twice_restores_output() {
        let mut viewport = OffAxisViewport::new(&ApplicationConfig::default());
        let eye = Vec3::new(-30.0, 12.0, 70.0);
        let before = viewport.generate_off_axis_matrix(1920.0, 1080.0, &eye, 10.0).unwrap();

        assert_eq!(viewport.toggle_off_axis_method(), AlgorithmVariant::Basic);
        let basic = viewport.generate_off_axis_matrix(1920.0, 1080.0, &eye, 10.0).unwrap();
        assert_ne!(before, basic);

        assert_eq!(viewport.toggle_off_axis_method(), AlgorithmVariant::Optimized);
        let after = viewport.generate_off_axis_matrix(1920.0, 1080.0, &eye, 10.0).unwrap();
        assert_eq!(before, after);
    }
}
