//! Physical screen geometry

use serde::{Serialize, Deserialize};

use super::{ProjectionError, ProjectionResult};
use crate::foundation::math::{constants::NORMALIZE_EPSILON, Vec3};

/// A flat, axis-aligned screen centered at the origin of its own plane
///
/// Width and height are in scene units (centimeters), the same units as the
/// eye position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSpec {
    /// Physical width
    pub width: f32,
    /// Physical height
    pub height: f32,
}

impl ScreenSpec {
    /// Create a screen of explicit physical size
    pub fn new(width: f32, height: f32) -> ProjectionResult<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !(valid(width) && valid(height)) {
            return Err(ProjectionError::InvalidScreen { width, height });
        }
        Ok(Self { width, height })
    }

    /// A screen `physical_width` wide with the aspect ratio of a pixel resolution
    ///
    /// Only the ratio `pixel_height / pixel_width` is kept; the pixel counts
    /// themselves never reach the geometry.
    pub fn with_aspect_of(pixel_width: f32, pixel_height: f32, physical_width: f32) -> ProjectionResult<Self> {
        if !(pixel_width.is_finite() && pixel_width > 0.0) {
            return Err(ProjectionError::InvalidScreen { width: pixel_width, height: pixel_height });
        }
        Self::new(physical_width, pixel_height / pixel_width * physical_width)
    }

    /// Half of the width and height
    pub fn half_extents(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Lower-left, lower-right and upper-left corners on the plane `z`
    pub fn corners(&self, z: f32) -> [Vec3; 3] {
        let (half_w, half_h) = self.half_extents();
        [
            Vec3::new(-half_w, -half_h, z),
            Vec3::new(half_w, -half_h, z),
            Vec3::new(-half_w, half_h, z),
        ]
    }
}

/// Orthonormal frame spanned by a screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBasis {
    /// Unit vector along the screen's horizontal edge
    pub right: Vec3,
    /// Unit vector along the screen's vertical edge
    pub up: Vec3,
    /// Unit normal pointing out of the screen toward the viewer
    pub normal: Vec3,
}

impl ScreenBasis {
    /// Build the frame from lower-left, lower-right and upper-left corners
    pub fn from_corners(lower_left: &Vec3, lower_right: &Vec3, upper_left: &Vec3) -> ProjectionResult<Self> {
        let right = (lower_right - lower_left)
            .try_normalize(NORMALIZE_EPSILON)
            .ok_or(ProjectionError::DegenerateScreenBasis)?;
        let up = (upper_left - lower_left)
            .try_normalize(NORMALIZE_EPSILON)
            .ok_or(ProjectionError::DegenerateScreenBasis)?;
        let normal = right
            .cross(&up)
            .try_normalize(NORMALIZE_EPSILON)
            .ok_or(ProjectionError::DegenerateScreenBasis)?;

        Ok(Self { right, up, normal })
    }
}
