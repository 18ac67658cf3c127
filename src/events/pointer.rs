//! Pointer and wheel input.
//!
//! Drags spin the orbit, the wheel zooms, and a click without travel casts a
//! ray through the pixel: a photo opens focus, a decoration jiggles. While a
//! photo is focused, camera input is ignored and any click dismisses it.

use glam::Vec2;
use tree_core::OrnamentId;

use crate::constants::{POINTER_ORBIT_PER_PX, WHEEL_ZOOM_PER_UNIT};
use crate::frame::Scene;
use crate::input::{PointerAction, PointerTracker};

/// What a pointer event ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    Nothing,
    Orbited,
    Focused(OrnamentId),
    Jiggled(OrnamentId),
    Dismissed,
}

pub fn down(tracker: &mut PointerTracker, px: Vec2) {
    tracker.down(px);
}

pub fn moved(scene: &mut Scene, tracker: &mut PointerTracker, px: Vec2) -> PointerOutcome {
    handle(scene, tracker.move_to(px))
}

pub fn up(scene: &mut Scene, tracker: &mut PointerTracker, px: Vec2) -> PointerOutcome {
    handle(scene, tracker.up(px))
}

/// Positive `delta` zooms out.
pub fn wheel(scene: &mut Scene, delta: f32) -> bool {
    let focus_active = scene.focus.is_active();
    scene.orbit.zoom(delta * WHEEL_ZOOM_PER_UNIT, focus_active)
}

fn handle(scene: &mut Scene, action: PointerAction) -> PointerOutcome {
    match action {
        PointerAction::None => PointerOutcome::Nothing,
        PointerAction::Orbit(dx) => {
            let focus_active = scene.focus.is_active();
            if scene.orbit.drag(-dx * POINTER_ORBIT_PER_PX, focus_active) {
                PointerOutcome::Orbited
            } else {
                PointerOutcome::Nothing
            }
        }
        PointerAction::Click(px) => click(scene, px),
    }
}

pub fn click(scene: &mut Scene, px: Vec2) -> PointerOutcome {
    if scene.focus.is_active() {
        return if scene.focus.close() {
            PointerOutcome::Dismissed
        } else {
            PointerOutcome::Nothing
        };
    }
    let ndc = scene.viewport.px_to_ndc(px);
    let (origin, dir) = scene.camera().ray_from_ndc(ndc);
    let Some(id) = scene.ornaments.pick_ray(origin, dir) else {
        return PointerOutcome::Nothing;
    };
    let is_photo = scene.ornaments.get(id).is_some_and(|o| o.is_photo());
    if is_photo {
        if scene.open_focus(id) {
            PointerOutcome::Focused(id)
        } else {
            PointerOutcome::Nothing
        }
    } else {
        log::debug!("[frame] jiggle {id:?}");
        scene.ornaments.jiggle(id);
        PointerOutcome::Jiggled(id)
    }
}
