use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use super::{polar, GroupKind, ParticleGroup, SnowGrowth};
use crate::config::SnowConfig;

/// Snow blanket on a disk around the trunk.
///
/// Formed height is the layered-sine terrain; the per-particle growth on top
/// of it starts at zero and is driven by the transition engine.
pub fn generate<R: Rng + ?Sized>(ground_y: f32, cfg: &SnowConfig, rng: &mut R) -> ParticleGroup {
    let n = cfg.count;
    let mut formed = Vec::with_capacity(n);
    let mut chaos = Vec::with_capacity(n);
    let mut max_growth = Vec::with_capacity(n);
    let (inner, outer) = (cfg.inner_radius, cfg.outer_radius.max(cfg.inner_radius));

    for _ in 0..n {
        // sqrt keeps the density uniform over the annulus area
        let u: f32 = rng.gen();
        let d = (inner * inner + u * (outer * outer - inner * inner)).sqrt();
        let p = polar(rng.gen_range(0.0..TAU), d, 0.0);
        let y = ground_y + terrain_height(p.x, p.z, cfg.terrain_amplitude);
        formed.push(Vec3::new(p.x, y, p.z));
        max_growth.push(growth_cap(cfg, d));

        let hw = cfg.chaos_half_width.abs();
        chaos.push(Vec3::new(
            rng.gen_range(-hw..=hw),
            rng.gen_range(cfg.chaos_depth[0]..=cfg.chaos_depth[1]),
            rng.gen_range(-hw..=hw),
        ));
    }

    let colors = vec![cfg.color; n];
    let snow = SnowGrowth {
        growth: vec![0.0; n],
        max_growth,
    };
    ParticleGroup::new(GroupKind::Snow, formed, chaos, Some(colors), Some(snow))
}

/// Layered-sine terrain, in \[0, 2 * amplitude\].
pub fn terrain_height(x: f32, z: f32, amplitude: f32) -> f32 {
    let broad = (x * 0.45).sin() * (z * 0.38).cos();
    let mid = (x * 1.1 + 1.3).sin() * (z * 0.9 - 0.6).cos();
    let fine = ((x + z) * 2.3).sin();
    amplitude * (1.0 + 0.5 * broad + 0.3 * mid + 0.2 * fine)
}

/// Proximity-weighted cap: full height against the trunk, tapering to
/// `min_growth_share` of it at the rim.
fn growth_cap(cfg: &SnowConfig, d: f32) -> f32 {
    let span = (cfg.outer_radius - cfg.inner_radius).max(1e-3);
    let near = 1.0 - ((d - cfg.inner_radius) / span).clamp(0.0, 1.0);
    let share = cfg.min_growth_share + (1.0 - cfg.min_growth_share) * near;
    cfg.max_growth.max(0.0) * share
}
