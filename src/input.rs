use glam::Vec2;

use crate::constants::CLICK_MAX_TRAVEL_PX;

/// Pixel size of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Pixel coordinates (origin top-left) to normalized device coordinates
    /// (origin centre, +y up).
    #[inline]
    pub fn px_to_ndc(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * px.x / self.width as f32 - 1.0,
            1.0 - 2.0 * px.y / self.height as f32,
        )
    }
}

#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub start: Vec2,
    pub last: Vec2,
    pub travelled: f32,
}

/// What a pointer event means for the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerAction {
    None,
    /// Horizontal drag in pixels since the previous move.
    Orbit(f32),
    /// Press and release without meaningful travel, at this pixel.
    Click(Vec2),
}

/// Splits raw pointer events into orbit drags and clicks.
#[derive(Default, Clone, Debug)]
pub struct PointerTracker {
    pub pointer: PointerState,
    pub drag: DragState,
}

impl PointerTracker {
    pub fn down(&mut self, px: Vec2) {
        self.pointer = PointerState {
            x: px.x,
            y: px.y,
            down: true,
        };
        self.drag = DragState {
            active: true,
            start: px,
            last: px,
            travelled: 0.0,
        };
    }

    pub fn move_to(&mut self, px: Vec2) -> PointerAction {
        self.pointer.x = px.x;
        self.pointer.y = px.y;
        if !self.drag.active {
            return PointerAction::None;
        }
        let delta = px - self.drag.last;
        self.drag.last = px;
        self.drag.travelled += delta.length();
        if self.drag.travelled > CLICK_MAX_TRAVEL_PX && delta.x != 0.0 {
            PointerAction::Orbit(delta.x)
        } else {
            PointerAction::None
        }
    }

    pub fn up(&mut self, px: Vec2) -> PointerAction {
        self.pointer.down = false;
        let was_active = self.drag.active;
        self.drag.active = false;
        if was_active && self.drag.travelled + px.distance(self.drag.last) <= CLICK_MAX_TRAVEL_PX {
            PointerAction::Click(px)
        } else {
            PointerAction::None
        }
    }
}
