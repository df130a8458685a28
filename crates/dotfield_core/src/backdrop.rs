//! A particle field wired to a render loop and to input events

use crate::events::PointerEvent;
use crate::field::ParticleField;
use crate::listeners::{Listeners, Subscription};
use crate::render_loop::{FrameHandle, FrameScheduler, RenderLoop};
use crate::surface::DrawSurface;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// An animated particle field
///
/// Owns the field and its render loop. Input callbacks share the field
/// through [`Backdrop::attach`], which returns the [`Bindings`] that keep
/// them registered.
pub struct Backdrop<S: DrawSurface, F: FrameScheduler> {
    field: Rc<RefCell<ParticleField<S>>>,
    render_loop: RenderLoop<F>,
}

impl<S: DrawSurface + 'static, F: FrameScheduler> Backdrop<S, F> {
    pub fn new(field: ParticleField<S>, scheduler: F) -> Self {
        Self {
            field: Rc::new(RefCell::new(field)),
            render_loop: RenderLoop::new(scheduler),
        }
    }

    /// Start animating
    pub fn start(&mut self) {
        self.render_loop.start();
    }

    /// Stop animating; the pending frame is cancelled
    pub fn stop(&mut self) {
        self.render_loop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.render_loop.is_running()
    }

    /// Handle a fired frame callback; returns whether the field was ticked
    pub fn frame(&mut self, handle: FrameHandle) -> bool {
        let mut field = self.field.borrow_mut();
        self.render_loop.frame(handle, &mut *field)
    }

    /// Resize the field
    ///
    /// The pending frame is cancelled before the grid is rebuilt, so a
    /// callback scheduled against the old grid can never run. The loop is
    /// restarted afterwards if it was running.
    pub fn resize(&mut self, width: u32, height: u32) {
        let was_running = self.render_loop.is_running();
        self.render_loop.stop();

        self.field.borrow_mut().resize(width, height);
        log::info!(
            "Backdrop resized to {}x{} ({} particles)",
            width,
            height,
            self.field.borrow().particle_count()
        );

        if was_running {
            self.render_loop.start();
        }
    }

    /// Set the field's "active" flag
    pub fn set_active(&mut self, active: bool) {
        self.field.borrow_mut().set_active(active);
    }

    /// Flip the field's "active" flag; returns the new state
    pub fn toggle_active(&mut self) -> bool {
        let mut field = self.field.borrow_mut();
        let active = !field.is_active();
        field.set_active(active);
        active
    }

    /// Subscribe the field to pointer events
    ///
    /// The field keeps receiving events until the returned [`Bindings`] are
    /// dropped or [`Bindings::detach`]ed.
    pub fn attach(&self, pointer: &Listeners<PointerEvent>) -> Bindings {
        let field = Rc::clone(&self.field);
        let subscription = pointer.subscribe(move |event| {
            field.borrow_mut().handle_pointer(event);
        });

        Bindings {
            subscriptions: vec![subscription],
        }
    }

    pub fn field(&self) -> Ref<'_, ParticleField<S>> {
        self.field.borrow()
    }

    pub fn field_mut(&self) -> RefMut<'_, ParticleField<S>> {
        self.field.borrow_mut()
    }

    pub fn render_loop(&self) -> &RenderLoop<F> {
        &self.render_loop
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        self.render_loop.scheduler_mut()
    }
}

/// Input subscriptions held on behalf of a [`Backdrop`]
///
/// Dropping the bindings unsubscribes everything.
#[derive(Debug)]
pub struct Bindings {
    subscriptions: Vec<Subscription>,
}

impl Bindings {
    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release every subscription now
    pub fn detach(self) {}
}
