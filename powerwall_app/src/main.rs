//! Powerwall demo application
//!
//! Simulates a tracked viewer walking in front of a powerwall. Every frame
//! the eye position is fed to the off-axis viewport and each eye view is
//! patched the way a frame renderer would before rasterizing it. Halfway
//! through the run the projection method is toggled so both derivations can
//! be compared in the log.
//!
//! Usage: `powerwall_demo [config.toml|config.ron]`

use offaxis_engine::foundation::logging;
use offaxis_engine::prelude::*;

const SIGNAL_WIDTH: f32 = 1920.0;
const SIGNAL_HEIGHT: f32 = 1080.0;
const FRAME_COUNT: u32 = 120;
const INTERPUPILLARY_DISTANCE: f32 = 6.4;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Projection error in frame {frame}: {source}")]
    Projection {
        frame: u32,
        #[source]
        source: ProjectionError,
    },
}

/// Tracked eye position for a frame, relative to the screen center
fn tracked_eye(frame: u32) -> Vec3 {
    let t = frame as f32 / FRAME_COUNT as f32 * std::f32::consts::TAU;
    Vec3::new(120.0 * t.sin(), 15.0 * (2.0 * t).sin(), 180.0 + 60.0 * t.cos())
}

/// Camera view the renderer would build for one eye pass
fn eye_view(config: &ApplicationConfig, pass: StereoscopicPass) -> Result<ViewState, ProjectionError> {
    let offset = match pass {
        StereoscopicPass::Full => 0.0,
        StereoscopicPass::LeftEye => -0.5 * INTERPUPILLARY_DISTANCE,
        StereoscopicPass::RightEye => 0.5 * INTERPUPILLARY_DISTANCE,
    };
    ViewState::new(
        Vec3::new(offset, 0.0, 0.0),
        Mat4::identity(),
        Mat4::reversed_z_perspective(
            std::f32::consts::FRAC_PI_4,
            SIGNAL_WIDTH / SIGNAL_HEIGHT,
            config.projection.near_plane,
        ),
        &config.projection.clip_space,
    )
}

fn run(config: &ApplicationConfig) -> Result<(), DemoError> {
    let mut viewport = OffAxisViewport::new(config);

    for frame in 0..FRAME_COUNT {
        if frame == FRAME_COUNT / 2 {
            viewport.toggle_off_axis_method();
        }

        let eye = tracked_eye(frame);
        let matrix = *viewport
            .update_eye(SIGNAL_WIDTH, SIGNAL_HEIGHT, eye)
            .map_err(|source| DemoError::Projection { frame, source })?;
        log::debug!(
            "Frame {frame}: eye ({:.1}, {:.1}, {:.1}), skew ({:.4}, {:.4})",
            eye.x,
            eye.y,
            eye.z,
            matrix[(2, 0)],
            matrix[(2, 1)]
        );

        for &pass in viewport.passes() {
            let mut view = eye_view(config, pass).map_err(|source| DemoError::Projection { frame, source })?;
            viewport
                .prepare_eye_view(&mut view)
                .map_err(|source| DemoError::Projection { frame, source })?;

            let uniforms = view.uniforms();
            log::trace!(
                "Frame {frame} {pass}: {} culling planes, {} uniform bytes",
                view.frustum.planes().len(),
                uniforms.as_bytes().len()
            );
        }

        if frame % 30 == 0 {
            log::info!("Frame {frame} ({} method) prepared", viewport.variant());
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => ApplicationConfig::load_validated(&path).map_err(DemoError::from)?,
        None => ApplicationConfig::default(),
    };

    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting powerwall off-axis demo");

    if let Err(e) = run(&config) {
        log::error!("Demo failed: {e}");
        return Err(e.into());
    }

    log::info!("Demo finished after {FRAME_COUNT} frames");
    Ok(())
}
