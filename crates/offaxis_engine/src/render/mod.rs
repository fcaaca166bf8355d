//! # Render Integration
//!
//! Connects the off-axis projection to a frame renderer's per-eye views.
//!
//! - [`ViewState`] / [`ViewMatrices`]: one eye's view and its derived matrices
//! - [`ViewFrustum`]: culling planes of a view
//! - [`ViewProjectionPatcher`]: splices an off-axis matrix into a view
//! - [`OffAxisState`]: the installed matrix and the active variant
//! - [`OffAxisViewport`]: the API the frame renderer calls

pub mod culling;
pub mod off_axis;
pub mod patcher;
pub mod view;
pub mod viewport;

pub use culling::ViewFrustum;
pub use off_axis::OffAxisState;
pub use patcher::ViewProjectionPatcher;
pub use view::{adjust_for_clip_space, ViewMatrices, ViewState, ViewUniforms};
pub use viewport::{OffAxisViewport, StereoscopicPass};
