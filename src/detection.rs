//! Hand-detection polling loop.
//!
//! Runs on its own thread at camera cadence, independent of the render loop.
//! Each detector frame goes through the gesture classifier and the resulting
//! commands cross to the frame loop over a channel. The only shared state is
//! the "focus active" flag, read here to drop drag/zoom while a photo is open.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use glam::{Vec2, Vec3};
use instant::Instant;
use tree_core::config::GestureConfig;
use tree_core::{GestureClassifier, GestureCommand, HandPose};

/// One poll of a landmark detector.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceFrame {
    /// Raw landmark lists, one per detected hand (possibly none).
    Hands(Vec<Vec<Vec3>>),
    /// Camera or model not ready yet; try again next poll.
    NotReady,
    /// The detector will never produce frames (no camera, denied, failed to load).
    Unavailable,
    /// A finite source ran out of frames.
    Ended,
}

/// A landmark detector polled from the detection thread.
///
/// `next_frame` must return promptly and never block waiting for input: when
/// nothing new is available it returns [`SourceFrame::NotReady`]. The loop
/// only sees its stop flag between polls, so a blocking source would hang
/// [`DetectionLoop::stop`].
pub trait HandSource: Send {
    fn next_frame(&mut self) -> SourceFrame;
}

/// Replays a fixed list of frames, then ends.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Vec<Vec<Vec3>>>,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = Vec<Vec<Vec3>>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// `count` frames of a single hand held still in `pose`.
    pub fn hold(mut self, pose: HandPose, wrist: Vec2, palm: f32, count: usize) -> Self {
        for _ in 0..count {
            self.frames.push_back(vec![pose.landmarks(wrist, palm)]);
        }
        self
    }

    /// `count` frames of both hands held open.
    pub fn both_open(mut self, palm: f32, count: usize) -> Self {
        for _ in 0..count {
            self.frames.push_back(vec![
                HandPose::Open.landmarks(Vec2::new(0.3, 0.75), palm),
                HandPose::Open.landmarks(Vec2::new(0.7, 0.75), palm),
            ]);
        }
        self
    }

    /// An open hand sliding horizontally from `from_x` to `to_x`.
    pub fn sweep(mut self, from_x: f32, to_x: f32, y: f32, palm: f32, count: usize) -> Self {
        let steps = count.max(2) - 1;
        for i in 0..count {
            let x = from_x + (to_x - from_x) * i as f32 / steps as f32;
            self.frames
                .push_back(vec![HandPose::Open.landmarks(Vec2::new(x, y), palm)]);
        }
        self
    }

    pub fn empty(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.frames.push_back(Vec::new());
        }
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl HandSource for ScriptedSource {
    fn next_frame(&mut self) -> SourceFrame {
        match self.frames.pop_front() {
            Some(hands) => SourceFrame::Hands(hands),
            None => SourceFrame::Ended,
        }
    }
}

/// A detector that never came up.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableSource;

impl HandSource for UnavailableSource {
    fn next_frame(&mut self) -> SourceFrame {
        SourceFrame::Unavailable
    }
}

/// Drop camera-moving commands while a photo is focused.
pub fn filter_for_focus(cmd: GestureCommand, focus_active: bool) -> Option<GestureCommand> {
    match cmd {
        GestureCommand::Drag(_) | GestureCommand::Zoom(_) if focus_active => None,
        other => Some(other),
    }
}

/// Handle to the background detection thread. Dropping it stops the thread.
pub struct DetectionLoop {
    stop: Arc<AtomicBool>,
    focus_active: Arc<AtomicBool>,
    rx: Receiver<GestureCommand>,
    handle: Option<JoinHandle<()>>,
}

impl DetectionLoop {
    pub fn spawn<S>(source: S, cfg: GestureConfig, poll: Duration) -> anyhow::Result<Self>
    where
        S: HandSource + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let focus_active = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();
        let worker = Worker {
            source,
            classifier: GestureClassifier::new(cfg),
            stop: Arc::clone(&stop),
            focus_active: Arc::clone(&focus_active),
            tx,
            poll,
        };
        let handle = thread::Builder::new()
            .name("hand-detection".into())
            .spawn(move || worker.run())?;
        log::info!("[detect] started, polling every {} ms", poll.as_millis());
        Ok(Self {
            stop,
            focus_active,
            rx,
            handle: Some(handle),
        })
    }

    pub fn set_focus_active(&self, active: bool) {
        self.focus_active.store(active, Ordering::Relaxed);
    }

    /// Every command produced since the last call, in order. Never blocks.
    pub fn drain(&self) -> Vec<GestureCommand> {
        self.rx.try_iter().collect()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("[detect] detection thread panicked");
            } else {
                log::info!("[detect] stopped");
            }
        }
    }
}

impl Drop for DetectionLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Worker<S> {
    source: S,
    classifier: GestureClassifier,
    stop: Arc<AtomicBool>,
    focus_active: Arc<AtomicBool>,
    tx: Sender<GestureCommand>,
    poll: Duration,
}

impl<S: HandSource> Worker<S> {
    fn run(mut self) {
        let start = Instant::now();
        while !self.stop.load(Ordering::Relaxed) {
            match self.source.next_frame() {
                SourceFrame::Hands(hands) => {
                    let commands = self.classifier.process(&hands, start.elapsed());
                    let focus_active = self.focus_active.load(Ordering::Relaxed);
                    for cmd in commands {
                        let Some(cmd) = filter_for_focus(cmd, focus_active) else {
                            continue;
                        };
                        if self.tx.send(cmd).is_err() {
                            log::debug!("[detect] receiver gone, exiting");
                            return;
                        }
                    }
                }
                SourceFrame::NotReady => log::trace!("[detect] source not ready"),
                SourceFrame::Unavailable => {
                    log::warn!("[detect] hand tracking unavailable, continuing with pointer input only");
                    return;
                }
                SourceFrame::Ended => {
                    for cmd in self.classifier.finish() {
                        _ = self.tx.send(cmd);
                    }
                    log::info!("[detect] source ended");
                    return;
                }
            }
            thread::sleep(self.poll);
        }
    }
}
