//! # Unified Configuration System
//!
//! All configuration records for the off-axis pipeline live here: the physical
//! display, the projection parameters, the renderer's clip-space convention and
//! engine-level settings such as logging.
//!
//! ## Configuration Categories
//!
//! - **Display Config**: Physical screen size and the degenerate-eye threshold
//! - **Projection Config**: Variant selection, near/far planes, clip-space convention
//! - **Engine Config**: Logging and stereo rendering
//! - **Application Config**: The top-level record loaded from TOML or RON

use serde::{Serialize, Deserialize};

use crate::projection::AlgorithmVariant;

// Re-export from the config module for convenience
pub use crate::config::{Config, ConfigError};

/// # Display Configuration
///
/// Describes the physical display the viewer looks at. Only the width is
/// configured; the height always follows the aspect ratio of the pixel
/// dimensions handed to the generator, so a 16:9 signal on a 270cm wall
/// yields a 270 x 151.875 screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Physical screen width in scene units (centimeters)
    pub physical_width: f32,
    /// Smallest eye-to-screen depth accepted before a projection is rejected
    pub min_eye_depth: f32,
}

impl DisplayConfig {
    /// Create a display configuration for a screen of the given physical width
    pub fn new(physical_width: f32) -> Self {
        Self {
            physical_width,
            ..Self::default()
        }
    }

    /// Set the degenerate-eye threshold
    pub fn with_min_eye_depth(mut self, min_eye_depth: f32) -> Self {
        self.min_eye_depth = min_eye_depth;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.physical_width.is_finite() && self.physical_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "Physical screen width must be positive, got {}",
                self.physical_width
            )));
        }
        if !(self.min_eye_depth.is_finite() && self.min_eye_depth >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "Minimum eye depth must be non-negative, got {}",
                self.min_eye_depth
            )));
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            physical_width: 270.0,
            min_eye_depth: 1.0e-3,
        }
    }
}

/// # Clip-Space Convention
///
/// The two constants a graphics backend supplies to adjust a projection for
/// its clip space: the sign of clip-space Y and the minimum clip-space Z.
/// The adjustment is `P * scale(1, sign_y, 1 - min_z) * translate(0, 0, min_z)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipSpaceConvention {
    /// Sign applied to clip-space Y (1.0 or -1.0)
    pub projection_sign_y: f32,
    /// Minimum clip-space Z (0.0 for D3D/Vulkan, -1.0 for OpenGL)
    pub min_clip_z: f32,
}

impl ClipSpaceConvention {
    /// Zero-to-one depth, Y up
    pub const ZERO_TO_ONE: Self = Self {
        projection_sign_y: 1.0,
        min_clip_z: 0.0,
    };

    /// Negative-one-to-one depth, Y up
    pub const NEGATIVE_ONE_TO_ONE: Self = Self {
        projection_sign_y: 1.0,
        min_clip_z: -1.0,
    };
}

impl Default for ClipSpaceConvention {
    fn default() -> Self {
        Self::ZERO_TO_ONE
    }
}

/// # Projection Configuration
///
/// Parameters of the off-axis projection itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Derivation selected at startup
    pub variant: AlgorithmVariant,
    /// Near-plane distance in scene units
    pub near_plane: f32,
    /// World-scale far distance; the Optimized derivation subtracts eye depth from it
    pub far_distance: f32,
    /// Clip-space convention of the graphics backend
    pub clip_space: ClipSpaceConvention,
}

impl ProjectionConfig {
    /// Create a new projection configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the starting variant
    pub fn with_variant(mut self, variant: AlgorithmVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the near-plane distance
    pub fn with_near_plane(mut self, near_plane: f32) -> Self {
        self.near_plane = near_plane;
        self
    }

    /// Set the clip-space convention
    pub fn with_clip_space(mut self, clip_space: ClipSpaceConvention) -> Self {
        self.clip_space = clip_space;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.near_plane.is_finite() && self.near_plane > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "Near plane must be positive, got {}",
                self.near_plane
            )));
        }
        if !(self.far_distance.is_finite() && self.far_distance > self.near_plane) {
            return Err(ConfigError::Invalid(format!(
                "Far distance {} must exceed near plane {}",
                self.far_distance, self.near_plane
            )));
        }
        if self.clip_space.projection_sign_y.abs() != 1.0 {
            return Err(ConfigError::Invalid(format!(
                "Projection sign Y must be 1 or -1, got {}",
                self.clip_space.projection_sign_y
            )));
        }
        if (self.clip_space.min_clip_z - 1.0).abs() < f32::EPSILON {
            return Err(ConfigError::Invalid("Minimum clip Z cannot be 1".to_string()));
        }
        Ok(())
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            variant: AlgorithmVariant::Optimized,
            near_plane: 10.0,
            far_distance: 30000.0,
            clip_space: ClipSpaceConvention::default(),
        }
    }
}

/// # Engine Configuration
///
/// Core engine behavior shared by every viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Whether each frame renders a left and a right eye
    pub stereo: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable stereo rendering
    pub fn with_stereo(mut self, enabled: bool) -> Self {
        self.stereo = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            stereo: false,
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
/// This is the main configuration structure applications should use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Physical display configuration
    pub display: DisplayConfig,
    /// Off-axis projection configuration
    pub projection: ProjectionConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.display.validate()?;
        self.projection.validate()?;
        Ok(())
    }

    /// Load a configuration file and validate it
    pub fn load_validated(path: &str) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        log::info!("Loaded configuration from {path}");
        Ok(config)
    }
}

impl Config for ApplicationConfig {}
