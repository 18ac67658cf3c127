use glam::Vec2;
use tree_app::constants::CLICK_MAX_TRAVEL_PX;
use tree_app::input::{PointerAction, PointerTracker, Viewport};
use tree_app::photos::PhotoList;

#[test]
fn viewport_maps_pixels_to_ndc() {
    let vp = Viewport::new(800, 600);
    assert_eq!(vp.px_to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
    assert_eq!(vp.px_to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
    assert_eq!(vp.px_to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    assert!((vp.aspect() - 4.0 / 3.0).abs() < 1e-6);
}

#[test]
fn zero_sized_viewport_is_clamped() {
    let vp = Viewport::new(0, 0);
    assert_eq!((vp.width, vp.height), (1, 1));
    assert!(vp.aspect().is_finite());
}

#[test]
fn press_and_release_in_place_is_a_click() {
    let mut t = PointerTracker::default();
    t.down(Vec2::new(10.0, 10.0));
    assert_eq!(t.move_to(Vec2::new(12.0, 11.0)), PointerAction::None);
    assert_eq!(t.up(Vec2::new(12.0, 11.0)), PointerAction::Click(Vec2::new(12.0, 11.0)));
    assert!(!t.pointer.down);
    assert!(!t.drag.active);
}

#[test]
fn travel_past_the_threshold_becomes_an_orbit() {
    let mut t = PointerTracker::default();
    t.down(Vec2::ZERO);
    let step = CLICK_MAX_TRAVEL_PX + 1.0;
    assert_eq!(t.move_to(Vec2::new(step, 0.0)), PointerAction::Orbit(step));
    assert_eq!(t.move_to(Vec2::new(step - 3.0, 0.0)), PointerAction::Orbit(-3.0));
    // coming back to the start does not make it a click again
    assert_eq!(t.up(Vec2::ZERO), PointerAction::None);
}

#[test]
fn moves_without_a_press_do_nothing() {
    let mut t = PointerTracker::default();
    assert_eq!(t.move_to(Vec2::new(100.0, 0.0)), PointerAction::None);
    assert_eq!(t.up(Vec2::new(100.0, 0.0)), PointerAction::None);
    assert_eq!((t.pointer.x, t.pointer.y), (100.0, 0.0));
}

#[test]
fn photo_list_versions_only_on_change() {
    let mut list = PhotoList::new();
    let v0 = list.version();
    list.push("a.jpg");
    list.push("b.jpg");
    assert_eq!(list.version(), v0 + 2);
    assert!(!list.remove("missing.jpg"));
    assert_eq!(list.version(), v0 + 2);
    list.replace(vec!["a.jpg".into(), "b.jpg".into()]);
    assert_eq!(list.version(), v0 + 2);
    assert!(list.remove("a.jpg"));
    assert_eq!(list.urls(), ["b.jpg".to_string()]);
    assert_eq!(list.len(), 1);
}

#[test]
fn dimension_reports_are_taken_once() {
    let mut list = PhotoList::new();
    list.report_dimensions("a.jpg", 640, 480);
    assert_eq!(list.take_dimensions(), vec![("a.jpg".to_string(), 640, 480)]);
    assert!(list.take_dimensions().is_empty());
}
