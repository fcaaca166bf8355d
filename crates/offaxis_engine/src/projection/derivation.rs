//! Asymmetric frustum derivations
//!
//! Both derivations look at the same screen from the same eye but reach the
//! frustum by different routes, so their results differ in rounding and in how
//! they treat eyes close to the screen. They share the [`FrustumDerivation`]
//! interface and the normalization step in
//! [`OffAxisGenerator`](super::OffAxisGenerator).

use super::{
    build_perspective, AlgorithmVariant, FrustumBounds, ProjectionError, ProjectionResult,
    ScreenBasis, ScreenSpec,
};
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Everything a derivation needs to know about one eye looking at one screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffAxisRequest {
    /// Physical screen
    pub screen: ScreenSpec,
    /// Eye position relative to the screen center
    pub eye: Vec3,
    /// Near-plane distance
    pub near: f32,
    /// World-scale far distance
    pub far_distance: f32,
    /// Smallest accepted eye-to-screen depth
    pub min_eye_depth: f32,
}

impl OffAxisRequest {
    fn check_depth(&self, depth: f32) -> ProjectionResult<()> {
        if depth.is_finite() && depth.abs() > self.min_eye_depth {
            Ok(())
        } else {
            Err(ProjectionError::DegenerateEyeDepth { depth, min: self.min_eye_depth })
        }
    }
}

/// One way of turning screen geometry into an off-axis projection
pub trait FrustumDerivation {
    /// Variant this derivation implements
    fn variant(&self) -> AlgorithmVariant;

    /// Frustum bounds on the near plane as seen from the eye
    fn bounds(&self, request: &OffAxisRequest) -> ProjectionResult<FrustumBounds>;

    /// Place the frustum matrix relative to the eye, before normalization
    fn orient(&self, frustum: &Mat4, request: &OffAxisRequest) -> ProjectionResult<Mat4>;

    /// Bounds, frustum matrix and orientation in one go
    fn derive(&self, request: &OffAxisRequest) -> ProjectionResult<Mat4> {
        let bounds = self.bounds(request)?;
        let frustum = frustum_matrix(&bounds, self.variant())?;
        self.orient(&frustum, request)
    }
}

/// Perspective matrix for derived bounds, rejecting a far plane at or before near
fn frustum_matrix(bounds: &FrustumBounds, variant: AlgorithmVariant) -> ProjectionResult<Mat4> {
    if !(bounds.far > bounds.near) {
        return Err(ProjectionError::InvalidFarPlane { near: bounds.near, far: bounds.far });
    }
    log::trace!("{variant} off-axis bounds: {bounds:?}");
    Ok(build_perspective(bounds, variant))
}

/// Projects two opposite screen corners onto the near plane
///
/// The screen lies in `z = 0` with its top-left corner at `(-w/2, -h/2)`,
/// i.e. Y grows downward on the screen. The frustum is built in that mirrored
/// frame and flipped back around the eye translation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizedDerivation;

impl OptimizedDerivation {
    /// Identity with Z negated and shifted: `z' = 1 - z` for points with `w = 1`
    fn flip_z() -> Mat4 {
        let mut m = Mat4::identity();
        m[(2, 2)] = -1.0;
        m[(3, 2)] = 1.0;
        m
    }
}

impl FrustumDerivation for OptimizedDerivation {
    fn variant(&self) -> AlgorithmVariant {
        AlgorithmVariant::Optimized
    }

    fn bounds(&self, request: &OffAxisRequest) -> ProjectionResult<FrustumBounds> {
        let (half_w, half_h) = request.screen.half_extents();
        let top_left = Vec3::new(-half_w, -half_h, 0.0);
        let bottom_right = Vec3::new(half_w, half_h, 0.0);
        let near = request.near;

        let eye_to_top_left = top_left - request.eye;
        let eye_to_bottom_right = bottom_right - request.eye;
        request.check_depth(eye_to_top_left.z)?;

        let top_left_near = near / eye_to_top_left.z * eye_to_top_left;
        let bottom_right_near = eye_to_bottom_right / eye_to_bottom_right.z * near;

        Ok(FrustumBounds {
            left: top_left_near.x,
            right: bottom_right_near.x,
            bottom: -bottom_right_near.y,
            top: -top_left_near.y,
            near,
            far: request.far_distance - request.eye.z,
        })
    }

    fn orient(&self, frustum: &Mat4, request: &OffAxisRequest) -> ProjectionResult<Mat4> {
        Ok(Mat4::flip_y()
            * Mat4::row_translation(&-request.eye)
            * Mat4::flip_y()
            * frustum
            * Self::flip_z())
    }
}

/// Projects the screen corners through an orthonormal screen basis
///
/// The screen is described by its lower-left, lower-right and upper-left
/// corners at `z = near`; the eye may sit anywhere off that plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicDerivation;

impl BasicDerivation {
    /// Identity with Z copied into W
    fn z_remap() -> Mat4 {
        let mut m = Mat4::identity();
        m[(2, 3)] = 1.0;
        m
    }

    fn basis(request: &OffAxisRequest) -> ProjectionResult<([Vec3; 3], ScreenBasis)> {
        let corners = request.screen.corners(request.near);
        let [pa, pb, pc] = &corners;
        let basis = ScreenBasis::from_corners(pa, pb, pc)?;
        Ok((corners, basis))
    }

    fn bounds_in(request: &OffAxisRequest, [pa, pb, pc]: &[Vec3; 3], basis: &ScreenBasis) -> ProjectionResult<FrustumBounds> {
        let n = request.near;

        let va = pa - request.eye;
        let vb = pb - request.eye;
        let vc = pc - request.eye;

        // Distance from the eye to the screen plane
        let d = -va.dot(&basis.normal);
        request.check_depth(d)?;

        Ok(FrustumBounds {
            left: basis.right.dot(&va) * n / d,
            right: basis.right.dot(&vb) * n / d,
            bottom: basis.up.dot(&va) * n / d,
            top: basis.up.dot(&vc) * n / d,
            near: n,
            far: request.far_distance,
        })
    }

    fn orient_in(frustum: &Mat4, request: &OffAxisRequest, basis: &ScreenBasis) -> Mat4 {
        let rotation = Mat4::new(
            basis.right.x,  basis.right.y,  basis.right.z,  0.0,
            basis.up.x,     basis.up.y,     basis.up.z,     0.0,
            basis.normal.x, basis.normal.y, basis.normal.z, 0.0,
            0.0,            0.0,            0.0,            1.0,
        );
        let apex_to_eye = Mat4::row_translation(&-request.eye);

        apex_to_eye * (frustum * rotation) * Self::z_remap()
    }
}

impl FrustumDerivation for BasicDerivation {
    fn variant(&self) -> AlgorithmVariant {
        AlgorithmVariant::Basic
    }

    fn bounds(&self, request: &OffAxisRequest) -> ProjectionResult<FrustumBounds> {
        let (corners, basis) = Self::basis(request)?;
        Self::bounds_in(request, &corners, &basis)
    }

    fn orient(&self, frustum: &Mat4, request: &OffAxisRequest) -> ProjectionResult<Mat4> {
        let (_, basis) = Self::basis(request)?;
        Ok(Self::orient_in(frustum, request, &basis))
    }

    /// Builds the screen basis once and shares it between bounds and orientation
    fn derive(&self, request: &OffAxisRequest) -> ProjectionResult<Mat4> {
        let (corners, basis) = Self::basis(request)?;
        let bounds = Self::bounds_in(request, &corners, &basis)?;
        let frustum = frustum_matrix(&bounds, AlgorithmVariant::Basic)?;
        Ok(Self::orient_in(&frustum, request, &basis))
    }
}

static OPTIMIZED: OptimizedDerivation = OptimizedDerivation;
static BASIC: BasicDerivation = BasicDerivation;

/// The derivation implementing `variant`
pub fn derivation_for(variant: AlgorithmVariant) -> &'static dyn FrustumDerivation {
    match variant {
        AlgorithmVariant::Optimized => &OPTIMIZED,
        AlgorithmVariant::Basic => &BASIC,
    }
}
