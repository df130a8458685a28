//! Frame scheduling through winit redraw requests

use std::sync::Arc;
use winit::window::Window;
use dotfield_core::{FrameHandle, FrameScheduler};

/// Maps frame requests onto `Window::request_redraw`
///
/// winit coalesces redraw requests, so at most one frame is due at a time.
/// The app calls [`WinitScheduler::take_due`] on `RedrawRequested` to learn
/// which frame fired; a cancelled frame yields `None` and the redraw is
/// ignored.
pub struct WinitScheduler {
    window: Arc<Window>,
    due: DueFrame,
}

impl WinitScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            due: DueFrame::default(),
        }
    }

    /// Claim the frame that this redraw delivers
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.due.take()
    }
}

impl FrameScheduler for WinitScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = self.due.request();
        self.window.request_redraw();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.due.cancel(handle);
    }
}

/// Bookkeeping for the single outstanding frame
#[derive(Debug, Default)]
struct DueFrame {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl DueFrame {
    fn request(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle::new(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    fn take(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}
