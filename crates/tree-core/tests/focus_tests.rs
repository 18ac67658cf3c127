// Integration tests for the photo focus state machine.

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::config::FocusConfig;
use tree_core::focus::{camera_anchor, target_size};
use tree_core::{Camera, FocusController, FocusEvent, FocusPhase, OrnamentId, Pose};

const DT: f32 = 1.0 / 60.0;

fn camera() -> Camera {
    Camera::looking_at(Vec3::new(0.0, 5.0, 20.0), Vec3::Y, 16.0 / 9.0, 45f32.to_radians())
}

fn anchor() -> Pose {
    Pose {
        translation: Vec3::new(3.0, 1.0, 2.0),
        rotation: Quat::from_rotation_y(0.7),
        scale: Vec3::new(1.1, 1.1, 1.0),
    }
}

fn opened(cfg: FocusConfig) -> (FocusController, StdRng) {
    let mut rng = StdRng::seed_from_u64(3);
    let mut focus = FocusController::new(cfg);
    assert!(focus.open(OrnamentId(5), anchor(), 1.0, &mut rng));
    (focus, rng)
}

#[test]
fn second_open_is_a_no_op() {
    let (mut focus, mut rng) = opened(FocusConfig::default());
    assert!(!focus.open(OrnamentId(9), anchor(), 1.0, &mut rng));
    assert_eq!(focus.target(), Some(OrnamentId(5)));
}

#[test]
fn close_without_session_is_a_no_op() {
    let mut focus = FocusController::new(FocusConfig::default());
    assert!(!focus.close());
    assert_eq!(focus.update(DT, &camera()), (None, None));
}

#[test]
fn opening_starts_at_the_tree_anchor() {
    let (focus, _) = opened(FocusConfig::default());
    let frame = focus.current_frame(&camera()).expect("active");
    assert_eq!(frame.phase, FocusPhase::Opening);
    assert!(frame.pose.translation.distance(anchor().translation) < 1e-5);
    assert!(frame.pose.scale.distance(anchor().scale) < 1e-5);
}

#[test]
fn opening_finishes_camera_locked() {
    let cfg = FocusConfig::default();
    let (mut focus, _) = opened(cfg.clone());
    let cam = camera();
    let mut opened_events = 0;
    for _ in 0..120 {
        let (_, ev) = focus.update(DT, &cam);
        if ev == Some(FocusEvent::Opened(OrnamentId(5))) {
            opened_events += 1;
        }
    }
    assert_eq!(opened_events, 1);
    let frame = focus.current_frame(&cam).expect("active");
    assert_eq!(frame.phase, FocusPhase::Open);
    assert_eq!(frame.progress, 1.0);
    let end = camera_anchor(&cam, 1.0, &cfg);
    assert!(frame.pose.translation.distance(end.translation) < 1e-4);
    assert!((frame.pose.translation.distance(cam.eye) - cfg.distance).abs() < 1e-3);
}

#[test]
fn open_pose_follows_a_moving_camera() {
    let cfg = FocusConfig::default();
    let (mut focus, _) = opened(cfg.clone());
    for _ in 0..120 {
        focus.update(DT, &camera());
    }
    let moved = Camera::looking_at(Vec3::new(15.0, 5.0, 10.0), Vec3::Y, 16.0 / 9.0, 45f32.to_radians());
    let (frame, _) = focus.update(DT, &moved);
    let frame = frame.expect("active");
    let end = camera_anchor(&moved, 1.0, &cfg);
    assert!(frame.pose.translation.distance(end.translation) < 1e-4);
}

#[test]
fn dismiss_fires_exactly_once() {
    let (mut focus, _) = opened(FocusConfig::default());
    let cam = camera();
    for _ in 0..120 {
        focus.update(DT, &cam);
    }
    assert!(focus.close());
    assert!(!focus.close(), "closing twice is a no-op");

    let mut dismissed = 0;
    let mut last_progress = 1.0;
    for _ in 0..300 {
        let (frame, ev) = focus.update(DT, &cam);
        if let Some(f) = frame {
            assert!(f.progress <= last_progress);
            assert!(f.progress > 0.0);
            last_progress = f.progress;
        }
        if ev == Some(FocusEvent::Dismissed(OrnamentId(5))) {
            dismissed += 1;
        }
    }
    assert_eq!(dismissed, 1);
    assert!(!focus.is_active());
    assert!(!focus.close());
}

#[test]
fn closing_ends_back_at_the_anchor() {
    let (mut focus, _) = opened(FocusConfig::default());
    let cam = camera();
    for _ in 0..120 {
        focus.update(DT, &cam);
    }
    focus.close();
    let mut last = None;
    while let (Some(frame), _) = focus.update(DT, &cam) {
        last = Some(frame);
    }
    let last = last.expect("some closing frames");
    assert!(last.pose.translation.distance(anchor().translation) < 0.3);
}

/// Largest translation and rotation change between consecutive frames.
fn max_step(focus: &mut FocusController, cam: &Camera, frames: usize) -> (f32, f32) {
    let mut prev = focus.current_frame(cam).expect("active").pose;
    let (mut moved, mut turned) = (0.0f32, 0.0f32);
    for _ in 0..frames {
        let Some(frame) = focus.update(DT, cam).0 else { break };
        moved = moved.max(frame.pose.translation.distance(prev.translation));
        turned = turned.max(frame.pose.rotation.angle_between(prev.rotation));
        prev = frame.pose;
    }
    (moved, turned)
}

fn reverse_mid_open(cfg: FocusConfig) {
    let (mut focus, _) = opened(cfg);
    let cam = camera();
    let (open_step, _) = max_step(&mut focus, &cam, 20);
    assert_eq!(focus.session().map(|s| s.phase), Some(FocusPhase::Opening));

    let before = focus.current_frame(&cam).expect("active").pose;
    assert!(focus.close());
    let after = focus.current_frame(&cam).expect("active").pose;
    assert!(before.translation.distance(after.translation) < 1e-3);
    assert!(before.rotation.angle_between(after.rotation) < 1e-2);
    assert!(before.scale.distance(after.scale) < 1e-3);

    // no frame of the return flight jumps further than a few opening frames
    let (close_step, _) = max_step(&mut focus, &cam, 1000);
    assert!(close_step < open_step * 3.0, "{close_step} vs {open_step}");
    assert!(!focus.is_active());
}

#[test]
fn closing_mid_open_has_no_jump() {
    reverse_mid_open(FocusConfig::default());
}

#[test]
fn closing_mid_open_keeps_the_wild_orientation() {
    reverse_mid_open(FocusConfig {
        wild_entry: true,
        ..FocusConfig::default()
    });
}

#[test]
fn closing_from_open_takes_the_return_path() {
    let (mut focus, _) = opened(FocusConfig::default());
    let cam = camera();
    while focus.session().map(|s| s.phase) != Some(FocusPhase::Open) {
        focus.update(DT, &cam);
    }
    focus.close();
    assert_eq!(focus.session().and_then(|s| s.reversed_at), None);
    let frame = focus.current_frame(&cam).expect("active");
    assert!(frame.pose.translation.distance(camera_anchor(&cam, 1.0, &FocusConfig::default()).translation) < 1e-3);
}

#[test]
fn cancel_dismisses_once_without_a_return_flight() {
    let (mut focus, _) = opened(FocusConfig::default());
    focus.update(DT, &camera());
    assert_eq!(focus.cancel(), Some(FocusEvent::Dismissed(OrnamentId(5))));
    assert!(!focus.is_active());
    assert_eq!(focus.cancel(), None);
    assert_eq!(focus.update(DT, &camera()), (None, None));
}

#[test]
fn reopen_after_dismiss_works() {
    let (mut focus, mut rng) = opened(FocusConfig::default());
    let cam = camera();
    focus.close();
    while focus.update(DT, &cam).1.is_none() {}
    assert!(!focus.is_active());
    assert!(focus.open(OrnamentId(6), anchor(), 1.0, &mut rng));
}

#[test]
fn wild_entry_starts_from_random_orientation() {
    let cfg = FocusConfig {
        wild_entry: true,
        ..FocusConfig::default()
    };
    let (focus, _) = opened(cfg);
    let session = focus.session().expect("active");
    assert!(session.entry_rotation.angle_between(anchor().rotation) > 1e-3);
    let frame = focus.current_frame(&camera()).expect("active");
    assert!(frame.pose.rotation.angle_between(session.entry_rotation) < 1e-3);
}

#[test]
fn target_size_respects_height_and_width_caps() {
    let cfg = FocusConfig::default();
    let cam = camera();
    let view = cam.visible_extent_at(cfg.distance);

    let square = target_size(&cam, 1.0, &cfg);
    assert!((square.y - view.y * cfg.height_fraction).abs() < 1e-4);
    assert!(square.x <= view.x * cfg.width_fraction + 1e-4);

    let panorama = target_size(&cam, 4.0, &cfg);
    assert!((panorama.x - view.x * cfg.width_fraction).abs() < 1e-4);
    assert!((panorama.x / panorama.y - 4.0).abs() < 1e-3);
    assert!(panorama.y <= view.y * cfg.height_fraction);
}

#[test]
fn portrait_screen_keeps_photo_on_screen() {
    let cfg = FocusConfig::default();
    let cam = Camera::looking_at(Vec3::new(0.0, 5.0, 20.0), Vec3::Y, 9.0 / 19.5, 45f32.to_radians());
    let view = cam.visible_extent_at(cfg.distance);
    for aspect in [0.5, 1.0, 1.5, 3.0] {
        let s = target_size(&cam, aspect, &cfg);
        assert!(s.x <= view.x * cfg.width_fraction + 1e-4);
        assert!(s.y <= view.y * cfg.height_fraction + 1e-4);
    }
}
