use glam::{Vec2, Vec3};

use crate::config::GestureConfig;
use crate::error::{Result, TreeError};

pub const LANDMARK_COUNT: usize = 21;

/// Named hand landmarks in the 21-point layout hand trackers emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Landmark {
    Wrist = 0,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl Landmark {
    /// Tips of the four fingers (thumb excluded).
    pub const FINGERTIPS: [Landmark; 4] = [
        Self::IndexTip,
        Self::MiddleTip,
        Self::RingTip,
        Self::PinkyTip,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One detected hand: 21 points in normalized image coordinates (x, y in
/// \[0, 1\], z relative depth).
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Vec3; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Vec3; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Validate a raw landmark list.
    pub fn from_slice(raw: &[Vec3]) -> Result<Self> {
        if raw.len() != LANDMARK_COUNT {
            return Err(TreeError::MalformedLandmarks {
                expected: LANDMARK_COUNT,
                found: raw.len(),
            });
        }
        if let Some(i) = raw.iter().position(|p| !p.is_finite()) {
            return Err(TreeError::NonFiniteLandmark(i));
        }
        let mut points = [Vec3::ZERO; LANDMARK_COUNT];
        points.copy_from_slice(raw);
        Ok(Self { points })
    }

    #[inline]
    pub fn point(&self, lm: Landmark) -> Vec3 {
        self.points[lm.index()]
    }

    pub fn points(&self) -> &[Vec3; LANDMARK_COUNT] {
        &self.points
    }

    /// Wrist to middle-finger knuckle; the yardstick that makes every ratio
    /// independent of how far the hand is from the camera.
    pub fn palm_size(&self) -> f32 {
        self.point(Landmark::Wrist)
            .distance(self.point(Landmark::MiddleMcp))
            .max(1e-4)
    }

    /// 2D reference point used for drag/zoom tracking: the palm centre.
    pub fn reference(&self) -> Vec2 {
        let c = (self.point(Landmark::Wrist)
            + self.point(Landmark::IndexMcp)
            + self.point(Landmark::MiddleMcp)
            + self.point(Landmark::PinkyMcp))
            * 0.25;
        Vec2::new(c.x, c.y)
    }

    fn tip_ratios(&self) -> [f32; 4] {
        let wrist = self.point(Landmark::Wrist);
        let palm = self.palm_size();
        Landmark::FINGERTIPS.map(|tip| self.point(tip).distance(wrist) / palm)
    }

    /// Every fingertip curled in close to the wrist.
    pub fn is_fist(&self, cfg: &GestureConfig) -> bool {
        self.tip_ratios().iter().all(|&r| r < cfg.fist_ratio)
    }

    /// Every fingertip stretched well away from the wrist.
    pub fn is_open(&self, cfg: &GestureConfig) -> bool {
        self.tip_ratios().iter().all(|&r| r > cfg.open_ratio)
    }

    /// Thumb and index tips touching while the hand is not a fist.
    pub fn is_pinch(&self, cfg: &GestureConfig) -> bool {
        let gap = self
            .point(Landmark::ThumbTip)
            .distance(self.point(Landmark::IndexTip))
            / self.palm_size();
        gap < cfg.pinch_ratio && !self.is_fist(cfg)
    }
}
