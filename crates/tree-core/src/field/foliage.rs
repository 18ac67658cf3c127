use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use super::{polar, random_in_shell, GroupKind, ParticleGroup};
use crate::config::{FoliageConfig, Silhouette};

/// Tiered cone of needles.
///
/// Radius follows the silhouette, pulled in by a sawtooth at each tier's lower
/// edge so the tree reads as stacked layers, then scattered inward so the
/// needles fill a volume instead of a shell.
pub fn generate<R: Rng + ?Sized>(
    shape: &Silhouette,
    cfg: &FoliageConfig,
    rng: &mut R,
) -> ParticleGroup {
    let n = cfg.count;
    let mut formed = Vec::with_capacity(n);
    let mut chaos = Vec::with_capacity(n);
    let mut colors = Vec::with_capacity(n);

    for _ in 0..n {
        let h: f32 = rng.gen();
        let radius = tiered_radius(shape, cfg, h) * (1.0 - cfg.volume_fill * rng.gen::<f32>());
        let angle = rng.gen_range(0.0..TAU);
        formed.push(polar(angle, radius, shape.y_at(h)));

        let c = random_in_shell(rng, cfg.chaos_inner, cfg.chaos_outer);
        chaos.push(c + Vec3::Y * cfg.chaos_lift);

        colors.push(pick_color(cfg, rng));
    }

    ParticleGroup::new(GroupKind::Foliage, formed, chaos, Some(colors), None)
}

/// Silhouette radius with the tier sawtooth applied. Position within a tier
/// runs 0 at its lower edge to 1 at its upper edge; the indent is strongest
/// at 0.
pub fn tiered_radius(shape: &Silhouette, cfg: &FoliageConfig, h: f32) -> f32 {
    let tiers = cfg.tiers.max(1) as f32;
    let in_tier = (h * tiers).fract();
    shape.radius_at(h) * (1.0 - cfg.tier_indent * (1.0 - in_tier))
}

fn pick_color<R: Rng + ?Sized>(cfg: &FoliageConfig, rng: &mut R) -> [f32; 3] {
    if rng.gen::<f32>() < cfg.accent_chance {
        return cfg.accent_color;
    }
    match cfg.palette.len() {
        0 => cfg.accent_color,
        len => cfg.palette[rng.gen_range(0..len)],
    }
}
