//! Photo focus: one ornament flies from its tree anchor to a camera-locked
//! pose and back.
//!
//! The session runs on its own timer, independent of the chaos/formed
//! transition. Progress 0 -> 1 while opening, held at 1 while open, 1 -> 0
//! while closing. Reaching 0 while closing ends the session and yields exactly
//! one [`FocusEvent::Dismissed`]; the owner clears its selection on that
//! message instead of listening for a global signal.

use std::f32::consts::PI;

use glam::{EulerRot, Quat, Vec2, Vec3};
use rand::Rng;

use crate::config::FocusConfig;
use crate::easing::{ease_in_pow, ease_out_pow};
use crate::ornament::OrnamentId;
use crate::state::{Camera, Pose};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusPhase {
    Opening,
    Open,
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusEvent {
    Opened(OrnamentId),
    Dismissed(OrnamentId),
}

#[derive(Clone, Debug)]
pub struct FocusSession {
    pub target: OrnamentId,
    pub progress: f32,
    pub phase: FocusPhase,
    /// World transform captured once when the session opened.
    pub anchor: Pose,
    /// Starting orientation for the opening flight.
    pub entry_rotation: Quat,
    pub aspect: f32,
    /// Closing progress at the moment an opening flight was reversed. The
    /// return path fades out of the opening swoop and rotation from here.
    pub reversed_at: Option<f32>,
}

/// Pose of the focused ornament for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusFrame {
    pub target: OrnamentId,
    pub pose: Pose,
    pub progress: f32,
    pub phase: FocusPhase,
}

/// Width/height of the focused photo: a bounded share of the view height,
/// shrunk to a bounded share of the view width when the image is too wide.
pub fn target_size(camera: &Camera, aspect: f32, cfg: &FocusConfig) -> Vec2 {
    let view = camera.visible_extent_at(cfg.distance);
    let aspect = aspect.max(1e-3);
    let mut h = view.y * cfg.height_fraction;
    let mut w = h * aspect;
    let max_w = view.x * cfg.width_fraction;
    if w > max_w {
        w = max_w;
        h = w / aspect;
    }
    Vec2::new(w, h)
}

/// Camera-locked end pose: `distance` in front of the eye, facing it.
pub fn camera_anchor(camera: &Camera, aspect: f32, cfg: &FocusConfig) -> Pose {
    let size = target_size(camera, aspect, cfg);
    Pose {
        translation: camera.eye + camera.forward() * cfg.distance,
        rotation: camera.orientation(),
        scale: Vec3::new(size.x, size.y, 1.0),
    }
}

#[derive(Clone, Debug)]
pub struct FocusController {
    cfg: FocusConfig,
    session: Option<FocusSession>,
}

impl FocusController {
    pub fn new(cfg: FocusConfig) -> Self {
        Self { cfg, session: None }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&FocusSession> {
        self.session.as_ref()
    }

    pub fn target(&self) -> Option<OrnamentId> {
        self.session.as_ref().map(|s| s.target)
    }

    /// Start focusing `target`. No-op (returns false) while a session exists.
    pub fn open<R: Rng + ?Sized>(&mut self, target: OrnamentId, anchor: Pose, aspect: f32, rng: &mut R) -> bool {
        if let Some(s) = &self.session {
            log::debug!("[focus] open {:?} ignored, {:?} already focused", target, s.target);
            return false;
        }
        let entry_rotation = if self.cfg.wild_entry {
            let (a, b, c) = (rng.gen_range(-PI..PI), rng.gen_range(-PI..PI), rng.gen_range(-PI..PI));
            Quat::from_euler(EulerRot::YXZ, a, b, c) * anchor.rotation
        } else {
            anchor.rotation
        };
        self.session = Some(FocusSession {
            target,
            progress: 0.0,
            phase: FocusPhase::Opening,
            anchor,
            entry_rotation,
            aspect,
            reversed_at: None,
        });
        log::info!("[focus] opening {:?}", target);
        true
    }

    /// Start closing. No-op (returns false) with no session or when already
    /// closing.
    pub fn close(&mut self) -> bool {
        match self.session.as_mut() {
            Some(s) if s.phase != FocusPhase::Closing => {
                if s.phase == FocusPhase::Opening {
                    // keep the eased position continuous when reversing mid-flight
                    let eased = ease_out_pow(s.progress, self.cfg.open_power);
                    s.progress = eased.powf(1.0 / self.cfg.close_power);
                    s.reversed_at = Some(s.progress);
                }
                s.phase = FocusPhase::Closing;
                log::info!("[focus] closing {:?}", s.target);
                true
            }
            _ => false,
        }
    }

    /// End the session at once, without a return flight. Used when the
    /// focused ornament no longer exists. Yields the same single
    /// [`FocusEvent::Dismissed`] a finished close would.
    pub fn cancel(&mut self) -> Option<FocusEvent> {
        let s = self.session.take()?;
        log::info!("[focus] cancelled {:?}", s.target);
        Some(FocusEvent::Dismissed(s.target))
    }

    /// Advance the session and compute this frame's pose against the current
    /// camera. Returns the frame (if still active) and any lifecycle event.
    pub fn update(&mut self, dt_sec: f32, camera: &Camera) -> (Option<FocusFrame>, Option<FocusEvent>) {
        let Some(s) = self.session.as_mut() else {
            return (None, None);
        };
        let mut event = None;
        match s.phase {
            FocusPhase::Opening => {
                s.progress = (s.progress + dt_sec / self.cfg.open_seconds).min(1.0);
                if s.progress >= 1.0 {
                    s.phase = FocusPhase::Open;
                    event = Some(FocusEvent::Opened(s.target));
                }
            }
            FocusPhase::Open => {}
            FocusPhase::Closing => {
                s.progress = (s.progress - dt_sec / self.cfg.close_seconds).max(0.0);
                if s.progress <= 0.0 {
                    let target = s.target;
                    self.session = None;
                    log::info!("[focus] dismissed {:?}", target);
                    return (None, Some(FocusEvent::Dismissed(target)));
                }
            }
        }
        (self.current_frame(camera), event)
    }

    /// Pose for the current progress without advancing time.
    pub fn current_frame(&self, camera: &Camera) -> Option<FocusFrame> {
        let s = self.session.as_ref()?;
        let end = camera_anchor(camera, s.aspect, &self.cfg);
        let (eased, swoop, start_rot) = match s.phase {
            FocusPhase::Opening => (
                ease_out_pow(s.progress, self.cfg.open_power),
                self.cfg.open_swoop,
                s.entry_rotation,
            ),
            FocusPhase::Open => (1.0, 0.0, s.anchor.rotation),
            // negative swoop sends the return flight out the other side;
            // a reversed opening starts on the opening path and fades off it
            FocusPhase::Closing => {
                let w = match s.reversed_at {
                    Some(r) if r > 0.0 => (s.progress / r).clamp(0.0, 1.0),
                    Some(_) => 1.0,
                    None => 0.0,
                };
                (
                    ease_in_pow(s.progress, self.cfg.close_power),
                    w * self.cfg.open_swoop - (1.0 - w) * self.cfg.close_swoop,
                    s.anchor.rotation.slerp(s.entry_rotation, w),
                )
            }
        };
        let lateral = camera.right() * (eased * PI).sin() * swoop;
        let pose = Pose {
            translation: s.anchor.translation.lerp(end.translation, eased) + lateral,
            rotation: start_rot.slerp(end.rotation, eased),
            scale: s.anchor.scale.lerp(end.scale, eased),
        };
        Some(FocusFrame {
            target: s.target,
            pose,
            progress: s.progress,
            phase: s.phase,
        })
    }
}
