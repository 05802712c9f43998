// Explicit animation loop. The host fires `on_frame` once per display
// refresh, the loop advances and redraws the field then asks the scheduler
// for the next frame. Stopping cancels the outstanding request.

use crate::error::{FieldError, Result};
use crate::field::ParticleField;
use crate::particle::Size;
use crate::surface::Surface;
use std::fmt::Debug;

/// Source of per-frame callbacks, `requestAnimationFrame` in the browser
pub trait FrameScheduler {
    type Handle;

    fn request_frame(&mut self) -> Result<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

pub struct FrameLoop<S: Surface, F: FrameScheduler> {
    field: ParticleField,
    surface: S,
    scheduler: F,
    pending: Option<F::Handle>,
    state: LoopState,
}

impl<S, F> FrameLoop<S, F>
where
    S: Surface,
    S::Error: Debug,
    F: FrameScheduler,
{
    pub fn new(field: ParticleField, surface: S, scheduler: F) -> Self {
        FrameLoop {
            field,
            surface,
            scheduler,
            pending: None,
            state: LoopState::Idle,
        }
    }

    /// Draws the first frame right away and schedules the next one
    pub fn start(&mut self) -> Result<()> {
        if self.state != LoopState::Idle {
            return Ok(());
        }
        self.state = LoopState::Running;
        self.frame()
    }

    pub fn on_frame(&mut self) -> Result<()> {
        // the handle that fired is spent, nothing left to cancel
        self.pending = None;
        if self.state != LoopState::Running {
            return Ok(());
        }
        self.frame()
    }

    fn frame(&mut self) -> Result<()> {
        let size = self.surface.size();
        self.field.advance_frame(size);
        if let Err(err) = self.field.render(&mut self.surface) {
            self.stop();
            return Err(FieldError::Render(format!("{:?}", err)));
        }
        match self.scheduler.request_frame() {
            Ok(handle) => {
                self.pending = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.state = LoopState::Stopped;
                Err(err)
            }
        }
    }

    /// Terminal: cancels the pending frame request, later callbacks are ignored
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = LoopState::Stopped;
    }

    /// Tracks a new viewport size. Particles keep their positions.
    pub fn resize(&mut self, size: Size) {
        self.surface.resize(size);
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }
}
