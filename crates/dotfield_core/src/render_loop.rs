//! Frame-callback driven animation loop
//!
//! The loop never sleeps or spins itself. It asks a [`FrameScheduler`] for
//! the next display refresh and ticks its target when that frame arrives.
//! At most one frame is pending at any time.

use std::collections::VecDeque;

/// Identifies one scheduled frame callback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// The platform's "call me on the next display refresh" primitive
pub trait FrameScheduler {
    /// Schedule a callback for the next refresh
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a previously requested callback
    ///
    /// Cancelling a handle that already fired or was already cancelled is a
    /// no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Something advanced once per frame
pub trait Tick {
    fn tick(&mut self);
}

/// Drives a [`Tick`] target at the display's refresh cadence
///
/// Missed frames are not caught up; this is best-effort animation.
pub struct RenderLoop<F: FrameScheduler> {
    scheduler: F,
    pending: Option<FrameHandle>,
    frames: u64,
}

impl<F: FrameScheduler> RenderLoop<F> {
    pub fn new(scheduler: F) -> Self {
        Self {
            scheduler,
            pending: None,
            frames: 0,
        }
    }

    /// Begin scheduling frames (no-op if already running)
    pub fn start(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
            log::trace!("Render loop started");
        }
    }

    /// Cancel the pending frame (no-op if already stopped)
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
            log::trace!("Render loop stopped after {} frames", self.frames);
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// The frame currently waiting to fire
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Handle a fired frame callback
    ///
    /// Ticks `target` and schedules the next frame, but only if `handle` is
    /// the frame this loop is waiting for. Stale or cancelled handles are
    /// ignored and return `false`.
    pub fn frame<T: Tick + ?Sized>(&mut self, handle: FrameHandle, target: &mut T) -> bool {
        if self.pending != Some(handle) {
            return false;
        }

        target.tick();
        self.frames += 1;
        self.pending = Some(self.scheduler.request_frame());
        true
    }

    /// Frames ticked since creation
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

impl RenderLoop<ManualScheduler> {
    /// Fire the next queued frame, if any
    pub fn pump<T: Tick + ?Sized>(&mut self, target: &mut T) -> bool {
        match self.scheduler.next_due() {
            Some(handle) => self.frame(handle, target),
            None => false,
        }
    }
}

/// A scheduler whose frames fire only when asked
///
/// Used for headless runs and tests: requested frames queue up in order and
/// [`ManualScheduler::next_due`] pops them one at a time.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queued: VecDeque<FrameHandle>,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest queued frame
    pub fn next_due(&mut self) -> Option<FrameHandle> {
        self.queued.pop_front()
    }

    /// Number of frames waiting to fire
    pub fn queued(&self) -> usize {
        self.queued.len()
    }

    /// Number of frames cancelled before firing
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle::new(self.next_id);
        self.queued.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.queued.len();
        self.queued.retain(|h| *h != handle);
        if self.queued.len() != before {
            self.cancelled += 1;
        }
    }
}
