use std::f32::consts::TAU;

use rand::Rng;

use super::{polar, GroupKind, ParticleGroup};
use crate::config::{Silhouette, TrunkConfig};

// Share of the trunk that pokes up into the foliage.
const OVERLAP: f32 = 0.4;

/// Trunk with flared roots.
///
/// Below `root_fraction` of the trunk height particles follow a tapering
/// spiral whose radius shrinks linearly from `root_spread` at the ground to the
/// trunk radius; above it they scatter in a narrow cylinder.
pub fn generate<R: Rng + ?Sized>(
    shape: &Silhouette,
    cfg: &TrunkConfig,
    rng: &mut R,
) -> ParticleGroup {
    let n = cfg.count;
    let mut formed = Vec::with_capacity(n);
    let mut chaos = Vec::with_capacity(n);
    let ground_y = shape.base_y - cfg.height;
    let span = cfg.height * (1.0 + OVERLAP);

    for i in 0..n {
        let rel: f32 = rng.gen();
        let y = ground_y + rel * span;
        let p = if rel < cfg.root_fraction && cfg.root_fraction > 0.0 {
            // depth 1 at the ground, 0 where roots meet the trunk
            let depth = 1.0 - rel / cfg.root_fraction;
            let radius = cfg.radius + (cfg.root_spread - cfg.radius) * depth;
            let root = (i % 5) as f32 * TAU / 5.0;
            let spiral = depth * cfg.root_turns * TAU * 0.25 + rng.gen_range(-0.15f32..0.15);
            let r = radius * rng.gen_range(0.85f32..1.0);
            polar(root + spiral, r, y)
        } else {
            let r = cfg.radius * rng.gen::<f32>().sqrt();
            polar(rng.gen_range(0.0..TAU), r, y)
        };
        formed.push(p);

        let angle = rng.gen_range(0.0..TAU);
        let r = cfg.chaos_radius + rng.gen_range(-0.5f32..0.5) * cfg.chaos_thickness;
        let cy = rng.gen_range(-cfg.chaos_half_height..=cfg.chaos_half_height);
        chaos.push(polar(angle, r, cy));
    }

    let colors = vec![cfg.color; n];
    ParticleGroup::new(GroupKind::Trunk, formed, chaos, Some(colors), None)
}
