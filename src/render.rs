//! Render contract between the scene and whatever draws it.
//!
//! The scene never talks to a GPU. Each frame it hands a [`RenderFrame`] to a
//! [`RenderBackend`]: the camera matrix, the four particle groups as raw
//! position bytes (with a dirty flag so unchanged buffers can be skipped), and
//! one instance per ornament. A GPU back end uploads these; [`LogBackend`]
//! just reports them.

use glam::{Mat4, Vec3};
use tree_core::state::Pose;
use tree_core::{FocusFrame, GroupKind, OrnamentId, ParticleGroup};

use crate::constants::LOG_BACKEND_EVERY_N_FRAMES;

/// Per-ornament instance data, laid out for a vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OrnamentInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl OrnamentInstance {
    pub fn new(pose: &Pose, color: [f32; 3]) -> Self {
        Self {
            model: pose.matrix().to_cols_array_2d(),
            color: [color[0], color[1], color[2], 1.0],
        }
    }

    pub fn translation(&self) -> Vec3 {
        Mat4::from_cols_array_2d(&self.model).w_axis.truncate()
    }
}

/// One particle group as the back end sees it.
#[derive(Clone, Copy, Debug)]
pub struct GroupView<'a> {
    pub kind: GroupKind,
    pub count: usize,
    /// Tightly packed `[f32; 3]` live positions.
    pub positions: &'a [u8],
    /// Tightly packed `[f32; 3]` per-particle colors, for groups that have them.
    pub colors: Option<&'a [u8]>,
    /// Positions changed since the last submitted frame.
    pub dirty: bool,
}

impl<'a> GroupView<'a> {
    pub fn of(group: &'a ParticleGroup) -> Self {
        Self {
            kind: group.kind(),
            count: group.count(),
            positions: group.live_bytes(),
            colors: group.color_bytes(),
            dirty: group.is_dirty(),
        }
    }
}

pub struct RenderFrame<'a> {
    pub frame_index: u64,
    pub view_proj: Mat4,
    pub eye: Vec3,
    pub transition: f32,
    pub groups: [GroupView<'a>; 4],
    /// Ambient ornaments in registry order. The focused one, if any, is left
    /// out here and drawn from `focused` instead.
    pub instances: &'a [OrnamentInstance],
    pub focused: Option<(OrnamentId, OrnamentInstance)>,
}

impl<'a> RenderFrame<'a> {
    pub fn dirty_groups(&self) -> impl Iterator<Item = &GroupView<'a>> + '_ {
        self.groups.iter().filter(|g| g.dirty)
    }

    pub fn instance_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.instances)
    }
}

/// Build the focused ornament's instance from the focus pose.
pub fn focused_instance(frame: &FocusFrame, color: [f32; 3]) -> (OrnamentId, OrnamentInstance) {
    (frame.target, OrnamentInstance::new(&frame.pose, color))
}

pub trait RenderBackend {
    fn submit(&mut self, frame: &RenderFrame<'_>);
}

/// Headless back end: counts uploads and logs a summary now and then.
#[derive(Default, Debug)]
pub struct LogBackend {
    pub frames: u64,
    pub uploaded_bytes: u64,
    pub last_instance_count: usize,
    pub last_focused: Option<OrnamentId>,
}

impl RenderBackend for LogBackend {
    fn submit(&mut self, frame: &RenderFrame<'_>) {
        self.frames += 1;
        for g in frame.dirty_groups() {
            self.uploaded_bytes += g.positions.len() as u64;
        }
        self.uploaded_bytes += frame.instance_bytes().len() as u64;
        self.last_instance_count = frame.instances.len();
        self.last_focused = frame.focused.map(|(id, _)| id);

        if frame.frame_index % LOG_BACKEND_EVERY_N_FRAMES == 0 {
            let dirty: Vec<&str> = frame.dirty_groups().map(|g| g.kind.as_str()).collect();
            log::info!(
                "[render] frame={} t={:.3} eye=({:.1},{:.1},{:.1}) ornaments={} focused={:?} dirty={:?}",
                frame.frame_index,
                frame.transition,
                frame.eye.x,
                frame.eye.y,
                frame.eye.z,
                frame.instances.len(),
                self.last_focused,
                dirty
            );
        }
    }
}
