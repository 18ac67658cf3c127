use glam::Vec2;
use tree_app::events::pointer::{self, PointerOutcome};
use tree_app::frame::{FrameContext, Scene};
use tree_app::input::Viewport;
use tree_app::render::LogBackend;
use tree_core::state::TreeState;
use tree_core::{FocusEvent, GroupKind, TransitionEngine, TreeConfig};

const DT: f32 = 1.0 / 60.0;

fn formed(cfg: TreeConfig, photos: &[&str]) -> FrameContext<LogBackend> {
    let mut ctx = FrameContext::new(
        Scene::new(cfg.clone(), Viewport::new(1280, 720), 11),
        LogBackend::default(),
    );
    ctx.scene.transition = TransitionEngine::with_value(cfg.transition, 1.0);
    ctx.scene.set_tree_state(TreeState::Formed);
    for p in photos {
        ctx.photos.push(*p);
    }
    ctx.step(DT);
    ctx
}

fn still_cfg() -> TreeConfig {
    let mut cfg = TreeConfig::default();
    cfg.orbit.auto_rotate = 0.0;
    cfg
}

/// Pixel where a world point lands on screen.
fn screen_px(ctx: &FrameContext<LogBackend>, world: glam::Vec3) -> Vec2 {
    let vp = ctx.scene.viewport;
    let ndc = ctx.scene.camera().project_ndc(world).unwrap();
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * vp.width as f32,
        (1.0 - ndc.y) * 0.5 * vp.height as f32,
    )
}

#[test]
fn first_frame_uploads_every_group_then_only_what_moves() {
    let mut ctx = FrameContext::new(
        Scene::new(TreeConfig::default(), Viewport::new(800, 600), 3),
        LogBackend::default(),
    );
    ctx.step(DT);
    let first = ctx.backend.uploaded_bytes;
    let particles: u64 = ctx.scene.field.total_count() as u64;
    assert!(first >= particles * 12);
    for kind in GroupKind::ALL {
        let g = match kind {
            GroupKind::Foliage => &ctx.scene.field.foliage,
            GroupKind::Trunk => &ctx.scene.field.trunk,
            GroupKind::Ribbon => &ctx.scene.field.ribbon,
            GroupKind::Snow => &ctx.scene.field.snow,
        };
        assert!(!g.is_dirty(), "{} left dirty after submit", kind.as_str());
    }

    // settled in chaos: nothing but ornament instances goes up
    let before = ctx.backend.uploaded_bytes;
    ctx.step(DT);
    let instance_bytes = (ctx.backend.last_instance_count * std::mem::size_of::<tree_app::render::OrnamentInstance>()) as u64;
    assert_eq!(ctx.backend.uploaded_bytes - before, instance_bytes);
    assert_eq!(ctx.backend.frames, 2);
    assert_eq!(ctx.frame_index(), 2);
}

#[test]
fn long_stalls_are_clamped() {
    let mut a = FrameContext::new(
        Scene::new(TreeConfig::default(), Viewport::new(800, 600), 5),
        LogBackend::default(),
    );
    let mut b = FrameContext::new(
        Scene::new(TreeConfig::default(), Viewport::new(800, 600), 5),
        LogBackend::default(),
    );
    a.scene.set_tree_state(TreeState::Formed);
    b.scene.set_tree_state(TreeState::Formed);
    let va = a.step(5.0).transition.value;
    let vb = b.step(tree_app::constants::MAX_FRAME_DT_SEC).transition.value;
    assert_eq!(va, vb);
    assert!(va > 0.0 && va < 1.0);
}

#[test]
fn photo_list_changes_reach_the_registry() {
    let mut ctx = formed(still_cfg(), &["a.jpg", "b.jpg"]);
    assert_eq!(ctx.scene.ornaments.photos().len(), 2);
    let decorations = ctx.scene.ornaments.decorations().len();
    assert_eq!(ctx.backend.last_instance_count, decorations + 2);

    ctx.photos.report_dimensions("b.jpg", 1600, 800);
    ctx.photos.push("c.jpg");
    ctx.step(DT);
    assert_eq!(ctx.scene.ornaments.photos().len(), 3);
    let b = &ctx.scene.ornaments.photos()[1];
    assert_eq!(b.photo.as_ref().map(|p| p.aspect), Some(2.0));

    assert!(ctx.photos.remove("a.jpg"));
    ctx.step(DT);
    let urls: Vec<&str> = ctx
        .scene
        .ornaments
        .photos()
        .iter()
        .filter_map(|o| o.photo.as_ref().map(|p| p.url.as_str()))
        .collect();
    assert_eq!(urls, ["b.jpg", "c.jpg"]);
}

#[test]
fn focused_photo_moves_out_of_the_ambient_instances() {
    let mut ctx = formed(still_cfg(), &["a.jpg"]);
    let id = ctx.scene.ornaments.photos()[0].id;
    assert!(ctx.scene.open_focus(id));
    ctx.step(DT);
    let decorations = ctx.scene.ornaments.decorations().len();
    assert_eq!(ctx.backend.last_instance_count, decorations);
    assert_eq!(ctx.backend.last_focused, Some(id));
}

#[test]
fn removing_the_focused_photo_ends_the_session() {
    let mut ctx = formed(still_cfg(), &["a.jpg", "b.jpg"]);
    let a = ctx.scene.ornaments.photos()[0].id;
    assert!(ctx.scene.open_focus(a));
    for _ in 0..10 {
        ctx.step(DT);
    }
    assert_eq!(ctx.backend.last_focused, Some(a));

    assert!(ctx.photos.remove("a.jpg"));
    let update = ctx.step(DT);
    assert_eq!(update.focus_event, Some(FocusEvent::Dismissed(a)));
    assert!(update.focus.is_none());
    assert!(!ctx.scene.focus.is_active());
    assert_eq!(ctx.backend.last_focused, None);
    assert_eq!(ctx.backend.last_instance_count, ctx.scene.ornaments.decorations().len() + 1);

    for _ in 0..60 {
        assert!(ctx.step(DT).focus_event.is_none());
    }

    // nothing blocks the next focus
    let b = ctx.scene.ornaments.photos()[0].id;
    assert!(ctx.scene.open_focus(b));
    ctx.step(DT);
    assert_eq!(ctx.backend.last_focused, Some(b));
}

#[test]
fn clicking_a_photo_opens_it_and_clicking_again_dismisses() {
    let mut cfg = still_cfg();
    cfg.ornaments.decoration_count = 0;
    let mut ctx = formed(cfg, &["a.jpg", "b.jpg", "c.jpg"]);
    let eye = ctx.scene.camera().eye;
    let reg = &ctx.scene.ornaments;
    let nearest = reg
        .photos()
        .iter()
        .min_by(|a, b| {
            reg.displayed_position(a)
                .distance(eye)
                .total_cmp(&reg.displayed_position(b).distance(eye))
        })
        .unwrap();
    let (id, px) = (nearest.id, screen_px(&ctx, reg.displayed_position(nearest)));

    pointer::down(&mut ctx.pointer, px);
    assert_eq!(pointer::up(&mut ctx.scene, &mut ctx.pointer, px), PointerOutcome::Focused(id));
    assert_eq!(ctx.scene.focus.target(), Some(id));

    // camera input is ignored during focus
    assert!(!pointer::wheel(&mut ctx.scene, 10.0));

    pointer::down(&mut ctx.pointer, Vec2::new(5.0, 5.0));
    assert_eq!(
        pointer::up(&mut ctx.scene, &mut ctx.pointer, Vec2::new(5.0, 5.0)),
        PointerOutcome::Dismissed
    );
}

#[test]
fn clicking_a_decoration_jiggles_it() {
    let mut ctx = formed(still_cfg(), &[]);
    let eye = ctx.scene.camera().eye;
    let reg = &ctx.scene.ornaments;
    let nearest = reg
        .decorations()
        .iter()
        .min_by(|a, b| {
            reg.displayed_position(a)
                .distance(eye)
                .total_cmp(&reg.displayed_position(b).distance(eye))
        })
        .unwrap();
    let px = screen_px(&ctx, reg.displayed_position(nearest));
    assert!(matches!(pointer::click(&mut ctx.scene, px), PointerOutcome::Jiggled(_)));
    assert!(!ctx.scene.focus.is_active());
}

#[test]
fn pointer_drag_spins_the_orbit() {
    let mut ctx = formed(still_cfg(), &[]);
    pointer::down(&mut ctx.pointer, Vec2::new(600.0, 300.0));
    let mut orbited = false;
    for i in 1..=10 {
        let px = Vec2::new(600.0 + 10.0 * i as f32, 300.0);
        orbited |= pointer::moved(&mut ctx.scene, &mut ctx.pointer, px) == PointerOutcome::Orbited;
    }
    assert!(orbited);
    assert!(ctx.scene.orbit.yaw_velocity() != 0.0);
    // a drag never turns into a click
    assert_eq!(
        pointer::up(&mut ctx.scene, &mut ctx.pointer, Vec2::new(700.0, 300.0)),
        PointerOutcome::Nothing
    );
}

#[test]
fn wheel_moves_the_zoom_target_within_limits() {
    let mut ctx = formed(still_cfg(), &[]);
    let start = ctx.scene.orbit.target_distance();
    assert!(pointer::wheel(&mut ctx.scene, 100.0));
    assert!(ctx.scene.orbit.target_distance() > start);
    for _ in 0..100 {
        pointer::wheel(&mut ctx.scene, 1000.0);
    }
    assert_eq!(ctx.scene.orbit.target_distance(), ctx.scene.cfg.orbit.max_distance);
}
