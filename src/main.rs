use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use glam::Vec2;
use tree_app::constants::{DETECTION_PALM_SIZE, HEADLESS_FRAMES, HEADLESS_FRAME_MS};
use tree_app::detection::ScriptedSource;
use tree_app::render::LogBackend;
use tree_core::{HandPose, TreeConfig};

/// A short hand performance: form the tree, spin it, open a photo, dismiss
/// it with a double pinch, then scatter again.
fn demo_script() -> ScriptedSource {
    let palm = DETECTION_PALM_SIZE;
    let centre = Vec2::new(0.5, 0.7);
    ScriptedSource::default()
        .empty(15)
        .hold(HandPose::Fist, centre, palm, 10)
        .empty(30)
        .sweep(0.35, 0.65, 0.7, palm, 20)
        .hold(HandPose::Pinch, centre, palm, 3)
        .hold(HandPose::Open, centre, palm, 30)
        .hold(HandPose::Pinch, centre, palm, 3)
        .hold(HandPose::Open, centre, palm, 3)
        .hold(HandPose::Pinch, centre, palm, 3)
        .empty(40)
        .both_open(palm, 10)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => TreeConfig::load(&path).with_context(|| format!("loading {}", path.display()))?,
        None => TreeConfig::default(),
    };

    let mut app = tree_app::init(cfg, rand::random(), LogBackend::default(), Some(demo_script()))?;
    for (i, name) in ["photos/sledding.jpg", "photos/kitchen.jpg", "photos/porch.jpg"]
        .into_iter()
        .enumerate()
    {
        app.photos.push(name);
        app.photos.report_dimensions(name, 1600 - 200 * i as u32, 1200);
    }

    for _ in 0..HEADLESS_FRAMES {
        _ = app.frame();
        thread::sleep(Duration::from_millis(HEADLESS_FRAME_MS));
    }

    log::info!(
        "[frame] done after {} frames, {} bytes uploaded",
        app.backend.frames,
        app.backend.uploaded_bytes
    );
    Ok(())
}
