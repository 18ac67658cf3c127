//! Synthetic hand skeletons for scripted input and tests.

use glam::{Vec2, Vec3};

use super::hand::{Landmark, LANDMARK_COUNT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandPose {
    Fist,
    Open,
    Pinch,
}

// Offsets in palm units from the wrist, fingers pointing up the image (-y).
const INDEX_MCP: Vec2 = Vec2::new(-0.3, -1.0);
const MIDDLE_MCP: Vec2 = Vec2::new(0.0, -1.0);
const RING_MCP: Vec2 = Vec2::new(0.25, -0.95);
const PINKY_MCP: Vec2 = Vec2::new(0.5, -0.85);
const THUMB_CMC: Vec2 = Vec2::new(-0.3, -0.2);
const THUMB_MCP: Vec2 = Vec2::new(-0.55, -0.4);

struct Tips {
    thumb: Vec2,
    index: Vec2,
    middle: Vec2,
    ring: Vec2,
    pinky: Vec2,
}

impl HandPose {
    fn tips(self) -> Tips {
        match self {
            Self::Fist => Tips {
                thumb: Vec2::new(-0.45, -0.5),
                index: Vec2::new(-0.25, -0.6),
                middle: Vec2::new(0.0, -0.65),
                ring: Vec2::new(0.2, -0.6),
                pinky: Vec2::new(0.4, -0.55),
            },
            Self::Open => Tips {
                thumb: Vec2::new(-0.9, -0.6),
                index: Vec2::new(-0.35, -1.9),
                middle: Vec2::new(0.0, -2.0),
                ring: Vec2::new(0.3, -1.85),
                pinky: Vec2::new(0.6, -1.6),
            },
            Self::Pinch => Tips {
                thumb: Vec2::new(-0.5, -1.25),
                index: Vec2::new(-0.45, -1.3),
                middle: Vec2::new(0.0, -2.0),
                ring: Vec2::new(0.3, -1.85),
                pinky: Vec2::new(0.6, -1.6),
            },
        }
    }

    /// 21 landmarks with the wrist at `wrist` and a palm (wrist to middle
    /// knuckle) of length `palm`, in normalized image coordinates.
    pub fn landmarks(self, wrist: Vec2, palm: f32) -> Vec<Vec3> {
        let tips = self.tips();
        let mut pts = [Vec2::ZERO; LANDMARK_COUNT];
        let mut finger = |mcp: Landmark, base: Vec2, tip: Vec2| {
            let i = mcp.index();
            pts[i] = base;
            pts[i + 1] = base.lerp(tip, 0.4);
            pts[i + 2] = base.lerp(tip, 0.7);
            pts[i + 3] = tip;
        };
        finger(Landmark::IndexMcp, INDEX_MCP, tips.index);
        finger(Landmark::MiddleMcp, MIDDLE_MCP, tips.middle);
        finger(Landmark::RingMcp, RING_MCP, tips.ring);
        finger(Landmark::PinkyMcp, PINKY_MCP, tips.pinky);
        pts[Landmark::ThumbCmc.index()] = THUMB_CMC;
        pts[Landmark::ThumbMcp.index()] = THUMB_MCP;
        pts[Landmark::ThumbIp.index()] = THUMB_MCP.lerp(tips.thumb, 0.5);
        pts[Landmark::ThumbTip.index()] = tips.thumb;

        pts.iter()
            .map(|p| {
                let q = wrist + *p * palm;
                Vec3::new(q.x, q.y, 0.0)
            })
            .collect()
    }
}
