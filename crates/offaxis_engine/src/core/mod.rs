//! # Core Engine Module
//!
//! Shared abstractions used throughout the engine.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for the display, the projection and the engine itself
//! - **Foundation**: Low-level utilities (math, logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    ClipSpaceConvention,
    DisplayConfig,
    EngineConfig,
    ProjectionConfig,
    Config,
    ConfigError,
};
