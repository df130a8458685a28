//! Cursor tracking with an idle timeout
//!
//! Events handled:
//! - Cursor moved: `Moved`, and arms the idle deadline
//! - Cursor left the window: `Left`
//! - Left button pressed: `Clicked` at the last known cursor position
//! - Idle deadline passed: `Idle`, reported once by [`PointerTracker::poll`]

use std::time::{Duration, Instant};

use bitflags::bitflags;
use dotfield_core::{PointerEvent, Vec2};
use winit::event::{ElementState, MouseButton};

/// Time without movement before the pointer counts as idle
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(1000);

bitflags! {
    /// Which pointer events are forwarded to the field
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TrackedEvents: u8 {
        /// Cursor movement (and the idle timeout that follows it)
        const MOVE = 1 << 0;
        /// Cursor leaving the window
        const LEAVE = 1 << 1;
        /// Primary button presses
        const CLICK = 1 << 2;
        const ALL = Self::MOVE.bits() | Self::LEAVE.bits() | Self::CLICK.bits();
    }
}

impl Default for TrackedEvents {
    fn default() -> Self {
        Self::ALL
    }
}

/// Converts winit cursor input into [`PointerEvent`]s
#[derive(Debug, Clone)]
pub struct PointerTracker {
    tracked: TrackedEvents,
    idle_timeout: Duration,
    last_position: Option<Vec2>,
    idle_deadline: Option<Instant>,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            tracked: TrackedEvents::ALL,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            last_position: None,
            idle_deadline: None,
        }
    }

    /// Builder: set which events are forwarded
    pub fn with_tracked(mut self, tracked: TrackedEvents) -> Self {
        self.tracked = tracked;
        self
    }

    /// Builder: set the idle timeout
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn tracked(&self) -> TrackedEvents {
        self.tracked
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Last cursor position inside the window, in physical pixels
    pub fn last_position(&self) -> Option<Vec2> {
        self.last_position
    }

    /// When the next `Idle` is due, if one is armed
    ///
    /// Event loops can sleep until this instant instead of polling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.idle_deadline
    }

    /// Handle a cursor move in physical pixels
    pub fn cursor_moved(&mut self, x: f64, y: f64, now: Instant) -> Option<PointerEvent> {
        let position = Vec2::new(x as f32, y as f32);
        // Clicks need the position even when moves are not forwarded
        self.last_position = Some(position);

        if !self.tracked.contains(TrackedEvents::MOVE) {
            return None;
        }
        self.idle_deadline = Some(now + self.idle_timeout);
        Some(PointerEvent::Moved(position))
    }

    /// Handle the cursor leaving the window
    pub fn cursor_left(&mut self) -> Option<PointerEvent> {
        self.last_position = None;
        self.idle_deadline = None;

        self.tracked
            .contains(TrackedEvents::LEAVE)
            .then_some(PointerEvent::Left)
    }

    /// Handle a mouse button change
    ///
    /// Only left-button presses with a known cursor position produce a click.
    pub fn mouse_input(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<PointerEvent> {
        if button != MouseButton::Left || state != ElementState::Pressed {
            return None;
        }
        if !self.tracked.contains(TrackedEvents::CLICK) {
            return None;
        }
        self.last_position.map(PointerEvent::Clicked)
    }

    /// Report `Idle` once the pointer has been still for the timeout
    pub fn poll(&mut self, now: Instant) -> Option<PointerEvent> {
        match self.idle_deadline {
            Some(deadline) if now >= deadline => {
                self.idle_deadline = None;
                log::trace!("Pointer idle");
                Some(PointerEvent::Idle)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_emits_and_arms_deadline() {
        let mut tracker = PointerTracker::new();
        let now = Instant::now();
        let event = tracker.cursor_moved(10.0, 20.0, now);
        assert_eq!(event, Some(PointerEvent::Moved(Vec2::new(10.0, 20.0))));
        assert_eq!(tracker.next_deadline(), Some(now + DEFAULT_IDLE_TIMEOUT));
    }

    #[test]
    fn test_idle_fires_once_after_timeout() {
        let mut tracker = PointerTracker::new().with_idle_timeout(Duration::from_millis(50));
        let start = Instant::now();
        tracker.cursor_moved(1.0, 1.0, start);

        assert_eq!(tracker.poll(start + Duration::from_millis(49)), None);
        assert_eq!(
            tracker.poll(start + Duration::from_millis(50)),
            Some(PointerEvent::Idle)
        );
        assert_eq!(tracker.poll(start + Duration::from_millis(500)), None);
    }

    #[test]
    fn test_move_postpones_idle() {
        let mut tracker = PointerTracker::new();
        let start = Instant::now();
        tracker.cursor_moved(1.0, 1.0, start);
        tracker.cursor_moved(2.0, 2.0, start + Duration::from_millis(900));

        assert_eq!(tracker.poll(start + Duration::from_millis(1000)), None);
        assert_eq!(
            tracker.poll(start + Duration::from_millis(1900)),
            Some(PointerEvent::Idle)
        );
    }

    #[test]
    fn test_leave_clears_position_and_deadline() {
        let mut tracker = PointerTracker::new();
        let start = Instant::now();
        tracker.cursor_moved(5.0, 5.0, start);

        assert_eq!(tracker.cursor_left(), Some(PointerEvent::Left));
        assert_eq!(tracker.last_position(), None);
        assert_eq!(tracker.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_click_uses_last_position() {
        let mut tracker = PointerTracker::new();
        assert_eq!(
            tracker.mouse_input(MouseButton::Left, ElementState::Pressed),
            None
        );

        tracker.cursor_moved(30.0, 40.0, Instant::now());
        assert_eq!(
            tracker.mouse_input(MouseButton::Left, ElementState::Pressed),
            Some(PointerEvent::Clicked(Vec2::new(30.0, 40.0)))
        );
        assert_eq!(
            tracker.mouse_input(MouseButton::Left, ElementState::Released),
            None
        );
        assert_eq!(
            tracker.mouse_input(MouseButton::Right, ElementState::Pressed),
            None
        );
    }

    #[test]
    fn test_untracked_events_suppressed() {
        let mut tracker = PointerTracker::new().with_tracked(TrackedEvents::CLICK);
        let now = Instant::now();

        assert_eq!(tracker.cursor_moved(3.0, 4.0, now), None);
        assert_eq!(tracker.next_deadline(), None);
        // Position still recorded for clicks
        assert_eq!(
            tracker.mouse_input(MouseButton::Left, ElementState::Pressed),
            Some(PointerEvent::Clicked(Vec2::new(3.0, 4.0)))
        );
        assert_eq!(tracker.cursor_left(), None);
    }

    #[test]
    fn test_tracked_events_default_all() {
        let tracked = TrackedEvents::default();
        assert!(tracked.contains(
            TrackedEvents::MOVE | TrackedEvents::LEAVE | TrackedEvents::CLICK
        ));
    }
}
