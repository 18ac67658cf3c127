// Integration tests for the chaos/formed transition engine.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::config::{TransitionConfig, TreeConfig};
use tree_core::{ParticleField, TransitionEngine, TreeState};

const DT: f32 = 1.0 / 60.0;

fn setup() -> (TreeConfig, ParticleField, StdRng) {
    let mut cfg = TreeConfig::default();
    cfg.foliage.count = 300;
    cfg.trunk.count = 100;
    cfg.ribbon.count = 120;
    cfg.snow.count = 200;
    let mut rng = StdRng::seed_from_u64(7);
    let field = ParticleField::generate(&cfg, &mut rng);
    (cfg, field, rng)
}

#[test]
fn value_rises_monotonically_and_stays_in_range() {
    let mut engine = TransitionEngine::new(TransitionConfig::default());
    let mut prev = engine.value();
    for _ in 0..600 {
        engine.advance(DT, TreeState::Formed);
        let v = engine.value();
        assert!(v >= prev, "{v} < {prev}");
        assert!((0.0..=1.0).contains(&v));
        prev = v;
    }
}

#[test]
fn value_falls_monotonically_towards_chaos() {
    let mut engine = TransitionEngine::with_value(TransitionConfig::default(), 1.0);
    let mut prev = engine.value();
    for _ in 0..600 {
        engine.advance(DT, TreeState::Chaos);
        let v = engine.value();
        assert!(v <= prev);
        assert!((0.0..=1.0).contains(&v));
        prev = v;
    }
    assert_eq!(engine.value(), 0.0);
}

#[test]
fn huge_time_step_never_overshoots() {
    let mut engine = TransitionEngine::new(TransitionConfig::default());
    engine.advance(1000.0, TreeState::Formed);
    assert_eq!(engine.value(), 1.0);
}

#[test]
fn snaps_exactly_onto_target() {
    let cfg = TransitionConfig::default();
    let mut engine = TransitionEngine::new(cfg.clone());
    let mut elapsed = 0.0;
    while !engine.is_settled(TreeState::Formed) {
        engine.advance(DT, TreeState::Formed);
        elapsed += DT;
        assert!(elapsed < 30.0, "never settled");
    }
    assert_eq!(engine.value(), 1.0);
    // one frame before settling it was still short of the target
    assert!(elapsed > DT);
    assert!(!engine.advance(DT, TreeState::Formed));
}

#[test]
fn frame_rate_does_not_change_the_curve() {
    let cfg = TransitionConfig {
        snap_epsilon: 1e-9,
        ..TransitionConfig::default()
    };
    let mut fast = TransitionEngine::new(cfg.clone());
    let mut slow = TransitionEngine::new(cfg);
    for _ in 0..120 {
        fast.advance(1.0 / 120.0, TreeState::Formed);
    }
    for _ in 0..30 {
        slow.advance(1.0 / 30.0, TreeState::Formed);
    }
    assert!((fast.value() - slow.value()).abs() < 1e-4);
}

#[test]
fn live_positions_are_exact_at_both_bounds() {
    let (cfg, mut field, mut rng) = setup();
    let mut engine = TransitionEngine::new(cfg.transition.clone());
    let report = engine.update(DT, TreeState::Chaos, &mut field, &mut rng);
    assert_eq!(report.value, 0.0);
    assert!(report.wrote_live);
    for g in field.groups() {
        assert_eq!(g.live(), g.chaos());
    }

    let mut engine = TransitionEngine::with_value(cfg.transition.clone(), 1.0);
    engine.update(0.0, TreeState::Formed, &mut field, &mut rng);
    for g in [&field.foliage, &field.trunk, &field.ribbon] {
        assert_eq!(g.live(), g.formed());
    }
    // no growth yet at dt = 0, so snow is on its terrain
    assert_eq!(field.snow.live(), field.snow.formed());
}

#[test]
fn live_is_between_chaos_and_formed_mid_flight() {
    let (cfg, mut field, mut rng) = setup();
    let mut engine = TransitionEngine::new(cfg.transition.clone());
    for _ in 0..10 {
        engine.update(DT, TreeState::Formed, &mut field, &mut rng);
    }
    let t = engine.value();
    assert!(t > 0.0 && t < 1.0);
    let g = &field.foliage;
    for i in 0..g.count() {
        let expected = g.chaos()[i].lerp(g.formed()[i], t);
        assert!(g.live()[i].distance(expected) < 1e-3);
    }
}

#[test]
fn settled_tree_stops_rewriting_buffers() {
    let (cfg, mut field, mut rng) = setup();
    let mut engine = TransitionEngine::new(cfg.transition.clone());
    engine.update(DT, TreeState::Chaos, &mut field, &mut rng);
    for g in field.groups_mut() {
        g.mark_clean();
    }
    let report = engine.update(DT, TreeState::Chaos, &mut field, &mut rng);
    assert!(!report.wrote_live);
    assert!(field.groups().iter().all(|g| !g.is_dirty()));
}

#[test]
fn moving_tree_marks_every_group_dirty() {
    let (cfg, mut field, mut rng) = setup();
    let mut engine = TransitionEngine::new(cfg.transition.clone());
    engine.update(DT, TreeState::Chaos, &mut field, &mut rng);
    for g in field.groups_mut() {
        g.mark_clean();
    }
    engine.update(DT, TreeState::Formed, &mut field, &mut rng);
    assert!(field.groups().iter().all(|g| g.is_dirty()));
}

#[test]
fn snow_accumulates_only_when_formed_and_respects_caps() {
    let (cfg, mut field, mut rng) = setup();
    let mut engine = TransitionEngine::new(cfg.transition.clone());
    // mid-way up the transition nothing grows yet
    let mut grew_early = 0;
    while engine.value() < 0.5 {
        grew_early += engine.update(DT, TreeState::Formed, &mut field, &mut rng).snow_grown;
    }
    assert_eq!(grew_early, 0);

    for _ in 0..3000 {
        engine.update(DT, TreeState::Formed, &mut field, &mut rng);
    }
    let snow = field.snow.snow().expect("snow growth");
    assert!(snow.growth.iter().any(|&g| g > 0.0));
    for (&g, &cap) in snow.growth.iter().zip(&snow.max_growth) {
        assert!(g <= cap + 1e-6);
    }
    for (i, p) in field.snow.live().iter().enumerate() {
        let expected = field.snow.formed()[i].y + snow.growth[i];
        assert!((p.y - expected).abs() < 1e-4);
    }
}

#[test]
fn growth_is_staggered_not_uniform() {
    let (cfg, mut field, mut rng) = setup();
    let mut engine = TransitionEngine::with_value(cfg.transition.clone(), 1.0);
    for _ in 0..30 {
        engine.update(DT, TreeState::Formed, &mut field, &mut rng);
    }
    let snow = field.snow.snow().expect("snow growth");
    let grown = snow.growth.iter().filter(|&&g| g > 0.0).count();
    assert!(grown > 0 && grown < snow.growth.len());
}

#[test]
fn snow_melts_when_tree_scatters() {
    let (cfg, mut field, mut rng) = setup();
    let mut engine = TransitionEngine::with_value(cfg.transition.clone(), 1.0);
    for _ in 0..300 {
        engine.update(DT, TreeState::Formed, &mut field, &mut rng);
    }
    assert!(field.snow.snow().is_some_and(|s| s.growth.iter().any(|&g| g > 0.0)));

    let mut melted = false;
    for _ in 0..600 {
        melted |= engine.update(DT, TreeState::Chaos, &mut field, &mut rng).snow_melted;
    }
    assert!(melted);
    assert!(field.snow.snow().is_some_and(|s| s.growth.iter().all(|&g| g == 0.0)));
    assert_eq!(field.snow.live(), field.snow.chaos());
}
