use std::time::Duration;

use tree_core::TreeConfig;

pub mod constants;
pub mod detection;
pub mod events;
pub mod frame;
pub mod input;
pub mod photos;
pub mod render;

use constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, DETECTION_POLL_MS};
use detection::{DetectionLoop, HandSource};
use frame::{FrameContext, Scene};
use input::Viewport;
use render::RenderBackend;

/// Build the scene and, if a hand source is given, start hand detection.
///
/// Detection failing to start is not fatal: the app keeps running with
/// pointer input only.
pub fn init<B, S>(cfg: TreeConfig, seed: u64, backend: B, source: Option<S>) -> anyhow::Result<FrameContext<B>>
where
    B: RenderBackend,
    S: HandSource + 'static,
{
    cfg.validate()?;
    let viewport = Viewport::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT);
    let gesture_cfg = cfg.gesture.clone();
    let scene = Scene::new(cfg, viewport, seed);
    let mut ctx = FrameContext::new(scene, backend);
    if let Some(source) = source {
        match DetectionLoop::spawn(source, gesture_cfg, Duration::from_millis(DETECTION_POLL_MS)) {
            Ok(d) => ctx = ctx.with_detection(d),
            Err(e) => log::warn!("[detect] could not start hand detection: {e:#}"),
        }
    }
    log::info!(
        "[frame] ready: {} particles, {} ornaments",
        ctx.scene.field.total_count(),
        ctx.scene.ornaments.len()
    );
    Ok(ctx)
}
