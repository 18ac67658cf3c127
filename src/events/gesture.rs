//! Apply classified gesture commands to the scene.

use tree_core::state::TreeState;
use tree_core::GestureCommand;

use crate::frame::Scene;

/// Returns true if the command changed anything.
pub fn apply(scene: &mut Scene, cmd: GestureCommand) -> bool {
    let focus_active = scene.focus.is_active();
    match cmd {
        GestureCommand::FormTree => {
            let changed = scene.tree_state != TreeState::Formed;
            scene.set_tree_state(TreeState::Formed);
            changed
        }
        GestureCommand::ReleaseChaos => {
            let changed = scene.tree_state != TreeState::Chaos;
            scene.set_tree_state(TreeState::Chaos);
            changed
        }
        GestureCommand::Drag(dx) => scene.orbit.drag(dx, focus_active),
        GestureCommand::Zoom(dy) => scene.orbit.zoom(dy, focus_active),
        GestureCommand::Select => {
            if focus_active {
                return false;
            }
            match scene.ornaments.select_for_camera(&scene.camera()) {
                Some(id) => scene.open_focus(id),
                None => {
                    log::debug!("[frame] select: no photo in range");
                    false
                }
            }
        }
        GestureCommand::Dismiss => scene.focus.close(),
    }
}
