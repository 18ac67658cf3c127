//! Procedural particle fields.
//!
//! Each group is generated once, up front, into two fixed coordinate sets:
//! the formed tree shape and the scattered chaos cloud. The transition engine
//! only ever blends between them and writes the `live` buffer; no buffer is
//! resized after generation.

mod foliage;
mod ribbon;
mod snow;
mod trunk;

use glam::Vec3;
use rand::Rng;

use crate::config::TreeConfig;

pub use foliage::{generate as generate_foliage, tiered_radius};
pub use ribbon::{generate as generate_ribbon, spiral_angle};
pub use snow::{generate as generate_snow, terrain_height};
pub use trunk::generate as generate_trunk;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Foliage,
    Trunk,
    Ribbon,
    Snow,
}

impl GroupKind {
    pub const ALL: [GroupKind; 4] = [Self::Foliage, Self::Trunk, Self::Ribbon, Self::Snow];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Foliage => "foliage",
            Self::Trunk => "trunk",
            Self::Ribbon => "ribbon",
            Self::Snow => "snow",
        }
    }
}

/// Per-particle snow accumulation.
#[derive(Clone, Debug, Default)]
pub struct SnowGrowth {
    /// Current extra height, starts at zero.
    pub growth: Vec<f32>,
    /// Individual cap, larger next to the trunk.
    pub max_growth: Vec<f32>,
}

#[derive(Clone, Debug)]
pub struct ParticleGroup {
    kind: GroupKind,
    formed: Vec<Vec3>,
    chaos: Vec<Vec3>,
    colors: Option<Vec<[f32; 3]>>,
    snow: Option<SnowGrowth>,
    live: Vec<Vec3>,
    dirty: bool,
}

impl ParticleGroup {
    /// Assemble a group. The live buffer starts at the chaos positions.
    ///
    /// Lengths are trimmed to the shortest input so the count invariant holds
    /// even if a generator misbehaves.
    pub fn new(
        kind: GroupKind,
        mut formed: Vec<Vec3>,
        mut chaos: Vec<Vec3>,
        colors: Option<Vec<[f32; 3]>>,
        snow: Option<SnowGrowth>,
    ) -> Self {
        let count = formed.len().min(chaos.len());
        if formed.len() != chaos.len() {
            log::warn!(
                "[field] {} formed/chaos length mismatch ({} vs {}), trimming",
                kind.as_str(),
                formed.len(),
                chaos.len()
            );
        }
        formed.truncate(count);
        chaos.truncate(count);
        let live = chaos.clone();
        Self {
            kind,
            formed,
            chaos,
            colors,
            snow,
            live,
            dirty: true,
        }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn count(&self) -> usize {
        self.formed.len()
    }

    pub fn formed(&self) -> &[Vec3] {
        &self.formed
    }

    pub fn chaos(&self) -> &[Vec3] {
        &self.chaos
    }

    pub fn colors(&self) -> Option<&[[f32; 3]]> {
        self.colors.as_deref()
    }

    pub fn snow(&self) -> Option<&SnowGrowth> {
        self.snow.as_ref()
    }

    pub(crate) fn snow_mut(&mut self) -> Option<&mut SnowGrowth> {
        self.snow.as_mut()
    }

    pub fn live(&self) -> &[Vec3] {
        &self.live
    }

    /// Whether `live` changed since the back end last called [`Self::mark_clean`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Live positions as raw bytes for a vertex buffer upload.
    pub fn live_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.live.as_slice())
    }

    pub fn color_bytes(&self) -> Option<&[u8]> {
        self.colors.as_deref().map(bytemuck::cast_slice)
    }

    /// Split borrow used by the transition engine: read-only sources plus
    /// the mutable live buffer and snow accumulators.
    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&[Vec3], &[Vec3], &mut [Vec3], Option<&mut SnowGrowth>) {
        self.dirty = true;
        (&self.chaos, &self.formed, &mut self.live, self.snow.as_mut())
    }
}

/// All particle groups of one tree instance.
#[derive(Clone, Debug)]
pub struct ParticleField {
    pub foliage: ParticleGroup,
    pub trunk: ParticleGroup,
    pub ribbon: ParticleGroup,
    pub snow: ParticleGroup,
}

impl ParticleField {
    /// Build every group once. Pure apart from consuming `rng`.
    pub fn generate<R: Rng + ?Sized>(cfg: &TreeConfig, rng: &mut R) -> Self {
        let ground_y = cfg.silhouette.base_y - cfg.trunk.height;
        let field = Self {
            foliage: foliage::generate(&cfg.silhouette, &cfg.foliage, rng),
            trunk: trunk::generate(&cfg.silhouette, &cfg.trunk, rng),
            ribbon: ribbon::generate(&cfg.silhouette, &cfg.ribbon, rng),
            snow: snow::generate(ground_y, &cfg.snow, rng),
        };
        log::info!(
            "[field] generated foliage={} trunk={} ribbon={} snow={}",
            field.foliage.count(),
            field.trunk.count(),
            field.ribbon.count(),
            field.snow.count()
        );
        field
    }

    pub fn groups(&self) -> [&ParticleGroup; 4] {
        [&self.foliage, &self.trunk, &self.ribbon, &self.snow]
    }

    pub fn groups_mut(&mut self) -> [&mut ParticleGroup; 4] {
        [
            &mut self.foliage,
            &mut self.trunk,
            &mut self.ribbon,
            &mut self.snow,
        ]
    }

    pub fn total_count(&self) -> usize {
        self.groups().iter().map(|g| g.count()).sum()
    }
}

/// Uniform random point inside a spherical shell.
pub(crate) fn random_in_shell<R: Rng + ?Sized>(rng: &mut R, inner: f32, outer: f32) -> Vec3 {
    let dir = random_unit_vector(rng);
    // cube-root sampling keeps the density uniform across the shell volume
    let (i3, o3) = (inner.powi(3), outer.powi(3));
    let r = (i3 + rng.gen::<f32>() * (o3 - i3)).cbrt();
    dir * r
}

pub(crate) fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z = rng.gen_range(-1.0f32..=1.0);
    let theta = rng.gen_range(0.0..std::f32::consts::TAU);
    let s = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(s * theta.cos(), z, s * theta.sin())
}

#[inline]
pub(crate) fn polar(angle: f32, radius: f32, y: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}
