//! Debounced gesture state machine.
//!
//! Fed one detection frame at a time (0-2 hands) with a monotonic timestamp;
//! emits discrete [`GestureCommand`]s. Pose conditions must hold for
//! `stability_frames` consecutive frames before they count, and form/chaos
//! commands open an optional cooldown during which nothing is recognised.
//!
//! Single pinches are held back until the double-pinch window has passed, so a
//! quick second pinch turns the pair into one `Dismiss` with no `Select`.

use std::time::Duration;

use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use super::hand::HandLandmarks;
use crate::config::GestureConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureCommand {
    FormTree,
    ReleaseChaos,
    /// Horizontal hand motion, already scaled by the drag gain.
    Drag(f32),
    /// Vertical hand motion, already scaled by the zoom gain.
    Zoom(f32),
    Select,
    Dismiss,
}

pub type Commands = SmallVec<[GestureCommand; 4]>;

/// Consecutive-frame counters for the debounced poses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StabilityCounters {
    pub fist: u32,
    pub both_open: u32,
    pub pinch: u32,
}

impl StabilityCounters {
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug)]
pub struct GestureClassifier {
    cfg: GestureConfig,
    counters: StabilityCounters,
    last_reference: Option<Vec2>,
    pending_pinch: Option<Duration>,
    cooldown_until: Option<Duration>,
}

impl GestureClassifier {
    pub fn new(cfg: GestureConfig) -> Self {
        Self {
            cfg,
            counters: StabilityCounters::default(),
            last_reference: None,
            pending_pinch: None,
            cooldown_until: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.cfg
    }

    pub fn counters(&self) -> StabilityCounters {
        self.counters
    }

    pub fn last_reference(&self) -> Option<Vec2> {
        self.last_reference
    }

    pub fn has_pending_pinch(&self) -> bool {
        self.pending_pinch.is_some()
    }

    pub fn is_cooling_down(&self, now: Duration) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }

    /// Back to neutral: counters and position tracker. A pending single
    /// pinch survives so it still resolves once its window expires.
    pub fn reset(&mut self) {
        self.counters = StabilityCounters::default();
        self.last_reference = None;
    }

    /// Resolve a pending single pinch immediately and return to neutral, for
    /// when the landmark source stops.
    pub fn finish(&mut self) -> Commands {
        let mut out = Commands::new();
        if self.pending_pinch.take().is_some() {
            log::info!("[gesture] select");
            out.push(GestureCommand::Select);
        }
        self.reset();
        out
    }

    /// Classify one frame of raw landmark lists.
    ///
    /// Hands that fail validation are dropped. A frame whose hands were all
    /// malformed is skipped outright; an empty frame resets to neutral.
    pub fn process<H: AsRef<[Vec3]>>(&mut self, raw: &[H], now: Duration) -> Commands {
        let mut hands: SmallVec<[HandLandmarks; 2]> = SmallVec::new();
        for (i, points) in raw.iter().enumerate() {
            match HandLandmarks::from_slice(points.as_ref()) {
                Ok(hand) => hands.push(hand),
                Err(e) => log::debug!("[gesture] dropping hand {i}: {e}"),
            }
        }
        if !raw.is_empty() && hands.is_empty() {
            let mut out = Commands::new();
            self.flush_pending(now, &mut out);
            log::trace!("[gesture] skipping malformed frame");
            return out;
        }
        self.process_hands(&hands, now)
    }

    /// Classify one frame of validated hands.
    pub fn process_hands(&mut self, hands: &[HandLandmarks], now: Duration) -> Commands {
        let mut out = Commands::new();
        self.flush_pending(now, &mut out);

        if hands.is_empty() {
            self.reset();
            return out;
        }
        if self.is_cooling_down(now) {
            self.reset();
            return out;
        }
        self.cooldown_until = None;

        if hands.len() >= 2 {
            self.two_hands(&hands[0], &hands[1], now, &mut out);
        } else {
            self.one_hand(&hands[0], now, &mut out);
        }
        out
    }

    fn flush_pending(&mut self, now: Duration, out: &mut Commands) {
        let window = Duration::from_millis(self.cfg.double_pinch_ms);
        if let Some(at) = self.pending_pinch {
            if now.saturating_sub(at) > window {
                self.pending_pinch = None;
                log::info!("[gesture] select");
                out.push(GestureCommand::Select);
            }
        }
    }

    fn two_hands(&mut self, a: &HandLandmarks, b: &HandLandmarks, now: Duration, out: &mut Commands) {
        // single-hand trackers do not carry across a two-hand frame
        self.counters.fist = 0;
        self.counters.pinch = 0;
        self.last_reference = None;

        if a.is_open(&self.cfg) && b.is_open(&self.cfg) {
            self.counters.both_open += 1;
            if self.counters.both_open >= self.cfg.stability_frames {
                log::info!("[gesture] release chaos");
                out.push(GestureCommand::ReleaseChaos);
                self.recognised(now);
            }
        } else {
            self.counters.both_open = 0;
        }
    }

    fn one_hand(&mut self, hand: &HandLandmarks, now: Duration, out: &mut Commands) {
        self.counters.both_open = 0;
        let reference = hand.reference();

        if hand.is_fist(&self.cfg) {
            self.counters.fist += 1;
            self.counters.pinch = 0;
            self.last_reference = Some(reference);
            if self.counters.fist >= self.cfg.stability_frames {
                log::info!("[gesture] form tree");
                out.push(GestureCommand::FormTree);
                self.recognised(now);
            }
            return;
        }
        self.counters.fist = 0;

        if hand.is_pinch(&self.cfg) {
            self.counters.pinch = self.counters.pinch.saturating_add(1);
            // a held pinch is one press, counted once it has been stable
            if self.counters.pinch == self.cfg.pinch_frames {
                self.pinch_edge(now, out);
            }
        } else {
            self.counters.pinch = 0;
            if hand.is_open(&self.cfg) {
                if let Some(prev) = self.last_reference {
                    if let Some(cmd) = self.motion(reference - prev) {
                        out.push(cmd);
                    }
                }
            }
        }
        self.last_reference = Some(reference);
    }

    fn pinch_edge(&mut self, now: Duration, out: &mut Commands) {
        // anything still pending is inside the window, expired ones were flushed
        if self.pending_pinch.take().is_some() {
            log::info!("[gesture] double pinch, dismiss");
            out.push(GestureCommand::Dismiss);
        } else {
            self.pending_pinch = Some(now);
        }
    }

    fn motion(&self, delta: Vec2) -> Option<GestureCommand> {
        let (ax, ay) = (delta.x.abs(), delta.y.abs());
        if ax.max(ay) < self.cfg.move_deadzone {
            return None;
        }
        let cmd = if ax >= ay {
            GestureCommand::Drag(delta.x * self.cfg.drag_gain)
        } else {
            GestureCommand::Zoom(delta.y * self.cfg.zoom_gain)
        };
        log::trace!("[gesture] {cmd:?}");
        Some(cmd)
    }

    fn recognised(&mut self, now: Duration) {
        self.reset();
        self.cooldown_until = self
            .cfg
            .cooldown
            .then(|| now + Duration::from_millis(self.cfg.cooldown_ms));
    }
}
