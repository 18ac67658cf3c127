//! Per-frame driver.
//!
//! [`Scene`] owns every piece of simulation state. [`FrameContext`] wraps it
//! with the host side: the detection loop, pointer tracking, the photo list
//! and a render back end. One call to [`FrameContext::step`] runs a whole
//! frame in a fixed order so that the camera each subsystem sees is the one
//! the frame is drawn with.

use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::state::{Camera, TreeState};
use tree_core::{
    FocusController, FocusEvent, FocusFrame, GestureCommand, OrbitController, OrnamentId,
    OrnamentRegistry, ParticleField, TransitionEngine, TransitionReport, TreeConfig,
};

use crate::constants::MAX_FRAME_DT_SEC;
use crate::detection::DetectionLoop;
use crate::events;
use crate::input::{PointerTracker, Viewport};
use crate::photos::PhotoList;
use crate::render::{focused_instance, GroupView, OrnamentInstance, RenderBackend, RenderFrame};

pub struct Scene {
    pub cfg: TreeConfig,
    pub tree_state: TreeState,
    pub field: ParticleField,
    pub transition: TransitionEngine,
    pub ornaments: OrnamentRegistry,
    pub focus: FocusController,
    pub orbit: OrbitController,
    pub viewport: Viewport,
    rng: StdRng,
    /// Focus event raised outside `update`, reported by the next update.
    pending_event: Option<FocusEvent>,
}

/// What one [`Scene::update`] produced.
#[derive(Clone, Copy, Debug, Default)]
pub struct SceneUpdate {
    pub transition: TransitionReport,
    pub focus: Option<FocusFrame>,
    pub focus_event: Option<FocusEvent>,
}

impl Scene {
    pub fn new(cfg: TreeConfig, viewport: Viewport, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = ParticleField::generate(&cfg, &mut rng);
        Self {
            tree_state: TreeState::default(),
            field,
            transition: TransitionEngine::new(cfg.transition.clone()),
            ornaments: OrnamentRegistry::new(&cfg),
            focus: FocusController::new(cfg.focus.clone()),
            orbit: OrbitController::new(cfg.orbit.clone()),
            viewport,
            rng,
            pending_event: None,
            cfg,
        }
    }

    pub fn camera(&self) -> Camera {
        self.orbit.camera(self.viewport.aspect())
    }

    pub fn set_tree_state(&mut self, state: TreeState) {
        if self.tree_state != state {
            log::info!("[frame] tree state {:?} -> {:?}", self.tree_state, state);
            self.tree_state = state;
        }
    }

    /// Start focusing an ornament from where it is shown right now. Ignored
    /// while another session runs or when the id is unknown.
    pub fn open_focus(&mut self, id: OrnamentId) -> bool {
        if self.focus.is_active() {
            return false;
        }
        let Some(o) = self.ornaments.get(id) else {
            log::debug!("[frame] focus on unknown ornament {id:?}");
            return false;
        };
        let aspect = o.photo.as_ref().map_or(1.0, |p| p.aspect);
        let anchor = self.ornaments.pose(o);
        self.focus.open(id, anchor, aspect, &mut self.rng)
    }

    /// Drop the focus session when its ornament has left the registry.
    pub fn drop_missing_focus(&mut self) {
        let Some(id) = self.focus.target() else {
            return;
        };
        if self.ornaments.get(id).is_none() {
            log::info!("[frame] focused {id:?} was removed");
            self.pending_event = self.focus.cancel();
        }
    }

    /// Advance everything by `dt_sec` against the current camera.
    pub fn update(&mut self, dt_sec: f32) -> SceneUpdate {
        self.orbit.update(dt_sec);
        let camera = self.camera();
        let transition = self
            .transition
            .update(dt_sec, self.tree_state, &mut self.field, &mut self.rng);
        self.ornaments.update(dt_sec, transition.value);
        let (focus, event) = self.focus.update(dt_sec, &camera);
        let focus_event = self.pending_event.take().or(event);
        if let Some(FocusEvent::Dismissed(id)) = focus_event {
            log::info!("[frame] selection cleared after {id:?} returned");
        }
        SceneUpdate {
            transition,
            focus,
            focus_event,
        }
    }

    /// Ambient ornament instances into `out`, skipping the focused one.
    pub fn ornament_instances(&self, out: &mut Vec<OrnamentInstance>) {
        out.clear();
        let focused = self.focus.target();
        for o in self.ornaments.iter() {
            if Some(o.id) == focused {
                continue;
            }
            out.push(OrnamentInstance::new(&self.ornaments.pose(o), o.color));
        }
    }
}

pub struct FrameContext<B: RenderBackend> {
    pub scene: Scene,
    pub backend: B,
    pub detection: Option<DetectionLoop>,
    pub pointer: PointerTracker,
    pub photos: PhotoList,
    photos_version: Option<u64>,
    queued: Vec<GestureCommand>,
    last_instant: Instant,
    frame_index: u64,
    instances: Vec<OrnamentInstance>,
}

impl<B: RenderBackend> FrameContext<B> {
    pub fn new(scene: Scene, backend: B) -> Self {
        Self {
            scene,
            backend,
            detection: None,
            pointer: PointerTracker::default(),
            photos: PhotoList::new(),
            photos_version: None,
            queued: Vec::new(),
            last_instant: Instant::now(),
            frame_index: 0,
            instances: Vec::new(),
        }
    }

    pub fn with_detection(mut self, detection: DetectionLoop) -> Self {
        self.detection = Some(detection);
        self
    }

    /// Queue a command for the next frame, ahead of anything detection sends.
    pub fn push_command(&mut self, cmd: GestureCommand) {
        self.queued.push(cmd);
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Wall-clock entry point: measures dt since the previous call.
    pub fn frame(&mut self) -> SceneUpdate {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        self.step(dt.as_secs_f32())
    }

    /// Run one frame with an explicit delta time.
    pub fn step(&mut self, dt_sec: f32) -> SceneUpdate {
        let dt = dt_sec.clamp(0.0, MAX_FRAME_DT_SEC);
        self.sync_photos();

        let mut commands = std::mem::take(&mut self.queued);
        if let Some(d) = &self.detection {
            commands.extend(d.drain());
        }
        for cmd in commands {
            _ = events::gesture::apply(&mut self.scene, cmd);
        }

        let update = self.scene.update(dt);
        if let Some(d) = &self.detection {
            d.set_focus_active(self.scene.focus.is_active());
        }

        self.submit(&update);
        for g in self.scene.field.groups_mut() {
            g.mark_clean();
        }
        self.frame_index += 1;
        update
    }

    fn sync_photos(&mut self) {
        if self.photos_version != Some(self.photos.version()) {
            _ = self.scene.ornaments.sync_photos(self.photos.urls());
            self.photos_version = Some(self.photos.version());
            self.scene.drop_missing_focus();
        }
        for (url, w, h) in self.photos.take_dimensions() {
            self.scene.ornaments.set_photo_dimensions(&url, w, h);
        }
    }

    fn submit(&mut self, update: &SceneUpdate) {
        let scene = &self.scene;
        let camera = scene.camera();
        scene.ornament_instances(&mut self.instances);
        let focused = update.focus.as_ref().map(|f| {
            let color = scene.ornaments.get(f.target).map_or([1.0; 3], |o| o.color);
            focused_instance(f, color)
        });
        let [foliage, trunk, ribbon, snow] = scene.field.groups();
        let frame = RenderFrame {
            frame_index: self.frame_index,
            view_proj: camera.view_proj(),
            eye: camera.eye,
            transition: update.transition.value,
            groups: [
                GroupView::of(foliage),
                GroupView::of(trunk),
                GroupView::of(ribbon),
                GroupView::of(snow),
            ],
            instances: &self.instances,
            focused,
        };
        self.backend.submit(&frame);
    }
}
