//! Presentation seam
//!
//! This module defines the trait through which the game core talks to the
//! outside: audio/visual feedback collaborators and the exclusive
//! full-viewport presentation mode. Everything here is purely
//! observational and best-effort; implementations must swallow their own
//! failures because nothing in the core ever gates on them.

use crate::FeedbackEvent;

/// Sink for feedback events and presentation-mode requests
///
/// Implementations might drive a speaker, a confetti layer, or a browser's
/// fullscreen API. The core fires and forgets: a presenter that does
/// nothing is perfectly valid.
pub trait Presenter {
    /// Delivers a discrete named feedback event
    ///
    /// # Arguments
    ///
    /// * `event` - The event emitted at a defined transition point
    fn feedback(&mut self, event: FeedbackEvent);

    /// Requests exclusive full-viewport presentation mode, best-effort
    fn enter_fullscreen(&mut self);

    /// Leaves exclusive full-viewport presentation mode, best-effort
    fn exit_fullscreen(&mut self);
}

/// A presenter that ignores everything
///
/// Useful for tests and headless drivers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn feedback(&mut self, _event: FeedbackEvent) {}

    fn enter_fullscreen(&mut self) {}

    fn exit_fullscreen(&mut self) {}
}
