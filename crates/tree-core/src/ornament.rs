//! Ornament placement, idle sway and selection.
//!
//! Placement is a pure function of index and kind. Photos use a fixed
//! golden-angle spiral over a bounded height band; decorations draw from a
//! per-index seeded generator, so they look random but land in the same spot
//! every time. Displayed positions follow the tree transition: scattered at 0,
//! on the surface (plus sway) at 1.

use std::f32::consts::{FRAC_PI_2, TAU};

use fnv::FnvHashMap;
use glam::{Quat, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{OrnamentConfig, SelectionConfig, Silhouette, TreeConfig};
use crate::easing::{approach_alpha, blend};
use crate::field::{polar, random_in_shell};
use crate::state::{Camera, Pose};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrnamentId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrnamentKind {
    Sphere,
    Box,
    Star,
    Photo,
}

impl OrnamentKind {
    fn salt(self) -> u64 {
        match self {
            Self::Sphere => 0x51,
            Self::Box => 0xB0,
            Self::Star => 0x57,
            Self::Photo => 0xF0,
        }
    }

    /// Decoration kind for a given decoration index.
    pub fn for_decoration(index: usize) -> Self {
        if index % 7 == 6 {
            Self::Star
        } else if index % 4 == 3 {
            Self::Box
        } else {
            Self::Sphere
        }
    }

    fn size(self) -> f32 {
        match self {
            Self::Sphere => 0.28,
            Self::Box => 0.34,
            Self::Star => 0.3,
            Self::Photo => 1.0,
        }
    }

    fn weight_range(self) -> (f32, f32) {
        match self {
            Self::Sphere => (0.35, 0.7),
            Self::Box => (0.8, 1.0),
            Self::Star => (0.15, 0.3),
            Self::Photo => (0.5, 0.5),
        }
    }

    fn palette(self) -> &'static [[f32; 3]] {
        match self {
            Self::Sphere => &[[0.8, 0.05, 0.1], [0.95, 0.75, 0.3], [0.85, 0.85, 0.9]],
            Self::Box => &[[0.7, 0.1, 0.15], [0.1, 0.35, 0.2], [0.9, 0.9, 0.85]],
            Self::Star => &[[1.0, 0.85, 0.4]],
            Self::Photo => &[[1.0, 1.0, 1.0]],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhotoRef {
    pub url: String,
    /// Width over height, clamped to a sane range.
    pub aspect: f32,
}

#[derive(Clone, Debug)]
pub struct Ornament {
    pub id: OrnamentId,
    pub kind: OrnamentKind,
    /// Index within its own list (decorations or photos).
    pub index: usize,
    pub base_position: Vec3,
    pub chaos_position: Vec3,
    pub base_rotation: Quat,
    pub color: [f32; 3],
    /// In (0, 1]. Heavier ornaments sway slower and less.
    pub weight: f32,
    pub size: f32,
    pub photo: Option<PhotoRef>,
    jiggle: f32,
}

impl Ornament {
    pub fn is_photo(&self) -> bool {
        self.kind == OrnamentKind::Photo
    }

    /// Ambient scale: photos are a frame of height `size` and matching width.
    pub fn scale(&self) -> Vec3 {
        match &self.photo {
            Some(p) => Vec3::new(self.size * p.aspect, self.size, 1.0),
            None => Vec3::splat(self.size),
        }
    }

    fn pick_radius(&self) -> f32 {
        let s = self.scale();
        0.5 * s.x.max(s.y)
    }
}

/// Seed mix shared by every deterministic per-index draw.
#[inline]
fn mix_seed(seed: u64, index: usize, kind: OrnamentKind) -> u64 {
    seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ kind.salt().wrapping_mul(0xD6E8_FEB8_6659_FD93)
}

/// Height fraction of photo `index`: cycles through the band so neighbours
/// never stack on the same level.
pub fn photo_height_fraction(index: usize, cfg: &OrnamentConfig) -> f32 {
    cfg.photo_height_base + (index as f32 * cfg.photo_height_step) % cfg.photo_height_span
}

pub fn photo_angle(index: usize, cfg: &OrnamentConfig) -> f32 {
    index as f32 * cfg.photo_angle_step + cfg.photo_phase_offset
}

/// Formed-state position of photo `index`, just outside the foliage surface.
pub fn photo_position(index: usize, shape: &Silhouette, cfg: &OrnamentConfig) -> Vec3 {
    let h = photo_height_fraction(index, cfg);
    let radius = shape.radius_at(h) * cfg.surface_scale;
    polar(photo_angle(index, cfg), radius, shape.y_at(h))
}

/// Formed-state position of decoration `index` of `kind`.
pub fn decoration_position(
    index: usize,
    kind: OrnamentKind,
    shape: &Silhouette,
    cfg: &OrnamentConfig,
) -> Vec3 {
    let mut rng = StdRng::seed_from_u64(mix_seed(cfg.decoration_seed, index, kind));
    let h = rng.gen_range(0.06f32..0.9);
    let angle = rng.gen_range(0.0..TAU);
    let radius = shape.radius_at(h) * cfg.surface_scale * rng.gen_range(0.9f32..1.0);
    polar(angle, radius, shape.y_at(h))
}

/// Deterministic scatter point an ornament drifts to in the chaos state.
pub fn chaos_anchor(index: usize, kind: OrnamentKind, cfg: &OrnamentConfig) -> Vec3 {
    let mut rng = StdRng::seed_from_u64(mix_seed(!cfg.decoration_seed, index, kind));
    random_in_shell(&mut rng, cfg.chaos_radius * 0.4, cfg.chaos_radius)
}

pub fn sway_amplitude(weight: f32, cfg: &OrnamentConfig) -> f32 {
    cfg.sway_amplitude * (1.0 - 0.75 * weight.clamp(0.0, 1.0))
}

pub fn sway_speed(weight: f32, cfg: &OrnamentConfig) -> f32 {
    cfg.sway_speed * (1.0 - 0.5 * weight.clamp(0.0, 1.0))
}

/// Horizontal sway at `time`, phase-shifted by index.
pub fn sway_offset(weight: f32, index: usize, time: f32, cfg: &OrnamentConfig) -> Vec3 {
    let amp = sway_amplitude(weight, cfg);
    let phase = time * sway_speed(weight, cfg) + index as f32 * 1.618;
    Vec3::new(phase.sin() * amp, 0.0, (phase * 0.8).cos() * amp * 0.6)
}

/// Ray/sphere intersection distance along a normalized ray, `None` on a miss
/// or when the sphere lies behind the origin.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Owns every ornament and the per-frame time/transition they are shown at.
#[derive(Clone, Debug)]
pub struct OrnamentRegistry {
    shape: Silhouette,
    cfg: OrnamentConfig,
    selection: SelectionConfig,
    decorations: Vec<Ornament>,
    photos: Vec<Ornament>,
    photo_ids: FnvHashMap<String, OrnamentId>,
    aspects: FnvHashMap<String, f32>,
    next_id: u32,
    time: f32,
    transition: f32,
}

impl OrnamentRegistry {
    pub fn new(cfg: &TreeConfig) -> Self {
        let mut reg = Self {
            shape: cfg.silhouette,
            cfg: cfg.ornaments.clone(),
            selection: cfg.selection.clone(),
            decorations: Vec::with_capacity(cfg.ornaments.decoration_count),
            photos: Vec::new(),
            photo_ids: FnvHashMap::default(),
            aspects: FnvHashMap::default(),
            next_id: 0,
            time: 0.0,
            transition: 0.0,
        };
        for index in 0..cfg.ornaments.decoration_count {
            let kind = OrnamentKind::for_decoration(index);
            let id = reg.alloc_id();
            let o = reg.build(id, index, kind, None);
            reg.decorations.push(o);
        }
        log::info!("[ornament] placed {} decorations", reg.decorations.len());
        reg
    }

    fn alloc_id(&mut self) -> OrnamentId {
        let id = OrnamentId(self.next_id);
        self.next_id += 1;
        id
    }

    fn build(&self, id: OrnamentId, index: usize, kind: OrnamentKind, photo: Option<PhotoRef>) -> Ornament {
        let mut rng = StdRng::seed_from_u64(mix_seed(self.cfg.decoration_seed ^ 0xC0105, index, kind));
        let (base_position, base_rotation) = match kind {
            OrnamentKind::Photo => {
                // +Z faces outward from the trunk
                let angle = photo_angle(index, &self.cfg);
                (
                    photo_position(index, &self.shape, &self.cfg),
                    Quat::from_rotation_y(FRAC_PI_2 - angle),
                )
            }
            _ => (
                decoration_position(index, kind, &self.shape, &self.cfg),
                Quat::from_rotation_y(rng.gen_range(0.0..TAU)),
            ),
        };
        let (lo, hi) = kind.weight_range();
        let weight = if hi > lo { rng.gen_range(lo..=hi) } else { lo };
        let palette = kind.palette();
        let color = palette[rng.gen_range(0..palette.len())];
        let size = match kind {
            OrnamentKind::Photo => self.cfg.photo_frame_size,
            _ => kind.size(),
        };
        Ornament {
            id,
            kind,
            index,
            base_position,
            chaos_position: chaos_anchor(index, kind, &self.cfg),
            base_rotation,
            color,
            weight,
            size,
            photo,
            jiggle: 0.0,
        }
    }

    pub fn decorations(&self) -> &[Ornament] {
        &self.decorations
    }

    pub fn photos(&self) -> &[Ornament] {
        &self.photos
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ornament> {
        self.decorations.iter().chain(self.photos.iter())
    }

    pub fn len(&self) -> usize {
        self.decorations.len() + self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: OrnamentId) -> Option<&Ornament> {
        self.iter().find(|o| o.id == id)
    }

    fn get_mut(&mut self, id: OrnamentId) -> Option<&mut Ornament> {
        self.decorations
            .iter_mut()
            .chain(self.photos.iter_mut())
            .find(|o| o.id == id)
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn transition(&self) -> f32 {
        self.transition
    }

    /// Mirror the host's ordered photo list. Index `i` always gets placement
    /// `i`; ids stay stable for URLs that survive. Returns true on change.
    pub fn sync_photos(&mut self, urls: &[String]) -> bool {
        let unchanged = urls.len() == self.photos.len()
            && self
                .photos
                .iter()
                .zip(urls)
                .all(|(o, u)| o.photo.as_ref().is_some_and(|p| &p.url == u));
        if unchanged {
            return false;
        }
        let mut photos = Vec::with_capacity(urls.len());
        let mut ids = FnvHashMap::default();
        for (index, url) in urls.iter().enumerate() {
            // duplicate URLs get their own id
            let reused = self
                .photo_ids
                .get(url)
                .copied()
                .filter(|id| !ids.values().any(|v| v == id));
            let id = match reused {
                Some(id) => id,
                None => self.alloc_id(),
            };
            let aspect = self.aspects.get(url).copied().unwrap_or(1.0);
            let photo = PhotoRef {
                url: url.clone(),
                aspect,
            };
            photos.push(self.build(id, index, OrnamentKind::Photo, Some(photo)));
            _ = ids.insert(url.clone(), id);
        }
        log::info!("[ornament] photos {} -> {}", self.photos.len(), photos.len());
        self.photos = photos;
        self.photo_ids = ids;
        true
    }

    /// Record an image's pixel size once the host knows it.
    pub fn set_photo_dimensions(&mut self, url: &str, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("[ornament] ignoring empty image size for {url}");
            return;
        }
        let aspect = (width as f32 / height as f32).clamp(0.2, 5.0);
        _ = self.aspects.insert(url.to_owned(), aspect);
        for o in &mut self.photos {
            if let Some(p) = o.photo.as_mut().filter(|p| p.url == url) {
                p.aspect = aspect;
            }
        }
    }

    /// Advance sway time, decay jiggles and record the transition value the
    /// ornaments are displayed at this frame.
    pub fn update(&mut self, dt_sec: f32, transition: f32) {
        self.time += dt_sec.max(0.0);
        self.transition = transition.clamp(0.0, 1.0);
        let decay = 1.0 - approach_alpha(self.cfg.jiggle_decay_per_sec, dt_sec);
        for o in self.decorations.iter_mut().chain(self.photos.iter_mut()) {
            o.jiggle *= decay;
            if o.jiggle < 1e-3 {
                o.jiggle = 0.0;
            }
        }
    }

    /// Kick an ornament's sway; decays back over time.
    pub fn jiggle(&mut self, id: OrnamentId) {
        if let Some(o) = self.get_mut(id) {
            o.jiggle = 1.0;
        }
    }

    pub fn displayed_position(&self, o: &Ornament) -> Vec3 {
        let sway = sway_offset(o.weight, o.index + o.kind.salt() as usize, self.time, &self.cfg)
            * (1.0 + 3.0 * o.jiggle);
        blend(o.chaos_position, o.base_position + sway, self.transition)
    }

    /// World transform as shown this frame.
    pub fn pose(&self, o: &Ornament) -> Pose {
        Pose {
            translation: self.displayed_position(o),
            rotation: o.base_rotation,
            scale: o.scale(),
        }
    }

    pub fn pose_of(&self, id: OrnamentId) -> Option<Pose> {
        self.get(id).map(|o| self.pose(o))
    }

    /// Closest ornament of any kind hit by a world ray.
    pub fn pick_ray(&self, origin: Vec3, dir: Vec3) -> Option<OrnamentId> {
        let mut best = None::<(OrnamentId, f32)>;
        for o in self.iter() {
            let center = self.displayed_position(o);
            let radius = o.pick_radius() * self.selection.pick_radius_scale;
            if let Some(t) = ray_sphere(origin, dir, center, radius) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((o.id, t)),
                }
            }
        }
        best.map(|(id, _)| id)
    }

    /// Photo ornament a gesture "select" should open.
    ///
    /// Prefers the in-view photo closest to screen centre within
    /// `center_ndc_radius`; otherwise the photo nearest the eye. Either way
    /// the pick is rejected beyond `max_distance` from the eye.
    pub fn select_for_camera(&self, camera: &Camera) -> Option<OrnamentId> {
        let mut centered = None::<(OrnamentId, f32, f32)>;
        let mut nearest = None::<(OrnamentId, f32)>;
        for o in &self.photos {
            let p = self.displayed_position(o);
            let dist = p.distance(camera.eye);
            if nearest.map_or(true, |(_, d)| dist < d) {
                nearest = Some((o.id, dist));
            }
            if self.selection.center_ndc_radius <= 0.0 {
                continue;
            }
            let Some(ndc) = camera.project_ndc(p) else {
                continue;
            };
            let in_view = ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && (0.0..=1.0).contains(&ndc.z);
            let off_center = Vec2::new(ndc.x, ndc.y).length();
            if in_view
                && off_center <= self.selection.center_ndc_radius
                && centered.map_or(true, |(_, c, _)| off_center < c)
            {
                centered = Some((o.id, off_center, dist));
            }
        }
        let (id, dist) = match centered {
            Some((id, _, dist)) => (id, dist),
            None => nearest?,
        };
        if dist > self.selection.max_distance {
            log::debug!("[ornament] nearest photo {dist:.1} away, beyond selection range");
            return None;
        }
        Some(id)
    }
}
