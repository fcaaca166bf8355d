//! Off-axis projection matrix generation

use super::derivation::OffAxisRequest;
use super::{derivation_for, AlgorithmVariant, FrustumBounds, ProjectionError, ProjectionResult, ScreenSpec};
use crate::core::config::{ApplicationConfig, DisplayConfig};
use crate::foundation::math::{Mat4, Vec3};

/// Computes off-axis projection matrices for one physical display
///
/// The generator is a pure function of its inputs: identical screen, eye,
/// near plane and variant always give a bit-identical matrix. It holds no
/// state beyond the display description, so it can be called at any time.
///
/// # Output
///
/// Every generated matrix is normalized so that `M[0][0] == 1.0` and
/// `M[3][2] == near`, with `M[2][2]`, `M[3][0]` and `M[3][1]` cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct OffAxisGenerator {
    display: DisplayConfig,
    far_distance: f32,
}

impl OffAxisGenerator {
    /// Create a generator for a display
    pub fn new(display: DisplayConfig, far_distance: f32) -> Self {
        Self { display, far_distance }
    }

    /// Create a generator from the application configuration
    pub fn from_config(config: &ApplicationConfig) -> Self {
        Self::new(config.display.clone(), config.projection.far_distance)
    }

    /// Display this generator projects onto
    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Physical screen for a signal of `screen_width` x `screen_height` pixels
    ///
    /// The configured physical width is used as-is; only the aspect ratio
    /// of the pixel dimensions is taken from the caller.
    pub fn screen_for(&self, screen_width: f32, screen_height: f32) -> ProjectionResult<ScreenSpec> {
        ScreenSpec::with_aspect_of(screen_width, screen_height, self.display.physical_width)
    }

    /// Generate the off-axis matrix for a signal resolution
    ///
    /// # Arguments
    /// * `screen_width`, `screen_height` - Signal dimensions; only their ratio matters
    /// * `eye` - Eye position relative to the screen center, in scene units
    /// * `near` - Near-plane distance
    /// * `variant` - Derivation to use
    ///
    /// # Errors
    /// Fails when the eye is too close to the screen plane, the near plane is
    /// not positive, or the screen dimensions are degenerate.
    pub fn generate(
        &self,
        screen_width: f32,
        screen_height: f32,
        eye: &Vec3,
        near: f32,
        variant: AlgorithmVariant,
    ) -> ProjectionResult<Mat4> {
        let screen = self.screen_for(screen_width, screen_height)?;
        self.generate_for_screen(&screen, eye, near, variant)
    }

    /// Generate the off-axis matrix for an explicit physical screen
    pub fn generate_for_screen(
        &self,
        screen: &ScreenSpec,
        eye: &Vec3,
        near: f32,
        variant: AlgorithmVariant,
    ) -> ProjectionResult<Mat4> {
        let request = self.request(screen, eye, near)?;
        let oriented = derivation_for(variant).derive(&request)?;
        normalize(oriented, near)
    }

    /// Frustum bounds the given variant derives, without building a matrix
    pub fn frustum_bounds(
        &self,
        screen: &ScreenSpec,
        eye: &Vec3,
        near: f32,
        variant: AlgorithmVariant,
    ) -> ProjectionResult<FrustumBounds> {
        let request = self.request(screen, eye, near)?;
        derivation_for(variant).bounds(&request)
    }

    fn request(&self, screen: &ScreenSpec, eye: &Vec3, near: f32) -> ProjectionResult<OffAxisRequest> {
        if !(near.is_finite() && near > 0.0) {
            return Err(ProjectionError::InvalidNearPlane(near));
        }
        Ok(OffAxisRequest {
            screen: *screen,
            eye: *eye,
            near,
            far_distance: self.far_distance,
            min_eye_depth: self.display.min_eye_depth,
        })
    }
}

/// Strip translation and depth terms, scale so `M[0][0] == 1`, re-inject `near`
///
/// Dividing by the pivot (instead of multiplying by its reciprocal) keeps
/// `M[0][0]` exactly 1.
fn normalize(mut m: Mat4, near: f32) -> ProjectionResult<Mat4> {
    m[(2, 2)] = 0.0;
    m[(3, 0)] = 0.0;
    m[(3, 1)] = 0.0;

    let pivot = m[(0, 0)];
    if !pivot.is_normal() {
        return Err(ProjectionError::DegenerateProjection(pivot));
    }
    m /= pivot;

    m[(3, 2)] = near;
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const BOTH: [AlgorithmVariant; 2] = [AlgorithmVariant::Optimized, AlgorithmVariant::Basic];

    fn generator() -> OffAxisGenerator {
        OffAxisGenerator::new(DisplayConfig::default(), 30000.0)
    }

    #[test]
    fn test_normalization_invariant() {
        let eyes = [
            Vec3::new(0.0, 0.0, 50.0),
            Vec3::new(40.0, 0.0, 50.0),
            Vec3::new(-60.0, 35.0, 120.0),
            Vec3::new(3.0, -7.0, 300.0),
        ];
        for variant in BOTH {
            for eye in &eyes {
                let m = generator().generate(1920.0, 1080.0, eye, 5.0, variant).unwrap();
                assert_eq!(m[(0, 0)], 1.0, "{variant} {eye:?}");
                assert_eq!(m[(3, 2)], 5.0, "{variant} {eye:?}");
                assert_eq!(m[(2, 2)], 0.0);
                assert_eq!(m[(3, 0)], 0.0);
                assert_eq!(m[(3, 1)], 0.0);
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let eye = Vec3::new(12.5, -3.25, 87.0);
        for variant in BOTH {
            let a = generator().generate(1920.0, 1080.0, &eye, 10.0, variant).unwrap();
            let b = generator().generate(1920.0, 1080.0, &eye, 10.0, variant).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_variants_are_not_equivalent() {
        let eye = Vec3::new(40.0, 0.0, 50.0);
        let optimized = generator().generate(1920.0, 1080.0, &eye, 5.0, AlgorithmVariant::Optimized).unwrap();
        let basic = generator().generate(1920.0, 1080.0, &eye, 5.0, AlgorithmVariant::Basic).unwrap();
        assert_ne!(optimized, basic);
    }

    #[test]
    fn test_symmetric_eye_has_no_skew() {
        let eye = Vec3::new(0.0, 0.0, 50.0);
        let screen = ScreenSpec::new(270.0, 152.0).unwrap();

        for variant in BOTH {
            let m = generator().generate_for_screen(&screen, &eye, 5.0, variant).unwrap();
            assert_abs_diff_eq!(m[(2, 0)], 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(m[(2, 1)], 0.0, epsilon = 1e-5);
            // Vertical scale relative to horizontal is the screen's aspect ratio
            assert_relative_eq!(m[(1, 1)], 270.0 / 152.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_powerwall_scenario() {
        let screen = ScreenSpec::new(270.0, 152.0).unwrap();
        let eye = Vec3::new(0.0, 0.0, 50.0);

        let bounds = generator()
            .frustum_bounds(&screen, &eye, 5.0, AlgorithmVariant::Optimized)
            .unwrap();
        assert_abs_diff_eq!(bounds.left + bounds.right, 0.0, epsilon = 1e-4);

        let m = generator().generate_for_screen(&screen, &eye, 5.0, AlgorithmVariant::Optimized).unwrap();
        assert_relative_eq!(m[(0, 0)], 1.0);
        assert_relative_eq!(m[(3, 2)], 5.0);
    }

    #[test]
    fn test_off_center_eye_skews_projection() {
        let screen = ScreenSpec::new(270.0, 152.0).unwrap();
        let eye = Vec3::new(40.0, 0.0, 50.0);

        let bounds = generator()
            .frustum_bounds(&screen, &eye, 5.0, AlgorithmVariant::Optimized)
            .unwrap();
        assert!((bounds.left.abs() - bounds.right.abs()).abs() > 1e-3);

        let m = generator().generate_for_screen(&screen, &eye, 5.0, AlgorithmVariant::Optimized).unwrap();
        assert!(m[(2, 0)].abs() > 1e-3);
        assert_abs_diff_eq!(m[(2, 1)], 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_optimized_maps_eye_rays_through_screen_corners() {
        use crate::foundation::math::Mat4Ext;

        let screen = ScreenSpec::new(270.0, 152.0).unwrap();
        let eye = Vec3::new(40.0, 10.0, 50.0);
        let m = generator().generate_for_screen(&screen, &eye, 5.0, AlgorithmVariant::Optimized).unwrap();

        // Screen Y runs opposite to the eye's Y in the projected frame
        let apex = Vec3::new(eye.x, -eye.y, eye.z);
        for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
            let corner = Vec3::new(sx * 135.0, sy * 76.0, 0.0);
            let on_corner = m.project_point(&corner);
            let halfway = m.project_point(&(apex + (corner - apex) * 0.5));

            assert_abs_diff_eq!(on_corner.x, sx, epsilon = 1e-4);
            assert_abs_diff_eq!(on_corner.y, sy, epsilon = 1e-4);
            assert_abs_diff_eq!(halfway.x, sx, epsilon = 1e-4);
            assert_abs_diff_eq!(halfway.y, sy, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_physical_width_overrides_pixel_width() {
        let g = generator();
        let eye = Vec3::new(10.0, 5.0, 80.0);
        let full_hd = g.generate(1920.0, 1080.0, &eye, 5.0, AlgorithmVariant::Optimized).unwrap();
        let uhd = g.generate(3840.0, 2160.0, &eye, 5.0, AlgorithmVariant::Optimized).unwrap();
        assert_eq!(full_hd, uhd);

        let wider = OffAxisGenerator::new(DisplayConfig::new(520.0), 30000.0)
            .generate(1920.0, 1080.0, &eye, 5.0, AlgorithmVariant::Optimized)
            .unwrap();
        assert_ne!(full_hd, wider);
    }

    #[test]
    fn test_degenerate_inputs_are_rejected() {
        let g = generator();
        assert_eq!(
            g.generate(1920.0, 1080.0, &Vec3::new(0.0, 0.0, 50.0), 0.0, AlgorithmVariant::Optimized),
            Err(ProjectionError::InvalidNearPlane(0.0))
        );
        assert!(matches!(
            g.generate(1920.0, 1080.0, &Vec3::new(5.0, 5.0, 0.0), 5.0, AlgorithmVariant::Optimized),
            Err(ProjectionError::DegenerateEyeDepth { .. })
        ));
        assert!(matches!(
            g.generate(0.0, 1080.0, &Vec3::new(0.0, 0.0, 50.0), 5.0, AlgorithmVariant::Basic),
            Err(ProjectionError::InvalidScreen { .. })
        ));
    }

    #[test]
    fn test_normalize_rejects_zero_pivot() {
        assert_eq!(normalize(Mat4::zeros(), 5.0), Err(ProjectionError::DegenerateProjection(0.0)));
    }
}
