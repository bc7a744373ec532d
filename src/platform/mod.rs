//! Collaborator capabilities the animators are driven through.
//!
//! The animation core has no dependency on a rendering runtime: whatever
//! hosts it (a terminal, a GUI toolkit, a test harness) supplies a
//! [`RenderSink`] to display frames, a [`TickSource`] to fire periodic
//! callbacks, and optionally [`HoverSignal`]/[`VisibilitySignal`] triggers.
//! Randomness is injected through [`RandomSource`] so runs can be seeded
//! deterministically instead of leaning on an ambient global generator.

mod harness;
mod rng;
mod ticker;

pub use harness::{FrameBuffer, HoverEmitter, VisibilityEmitter};
pub use rng::{SeededRandom, ThreadRandom};
pub use ticker::ManualTicker;

use std::time::Duration;

/// Receives each displayed frame as a plain string.
pub trait RenderSink {
    /// Display the given text, replacing whatever was shown before.
    fn display(&self, text: &str);
}

/// Handle to a scheduled periodic callback, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub(crate) u64);

/// Source of periodic callbacks with handle-based cancellation.
///
/// Contract: callbacks never fire synchronously from [`schedule`], at most
/// one callback per registration is in flight at a time, and nothing fires
/// after [`cancel`] returns.
///
/// [`schedule`]: TickSource::schedule
/// [`cancel`]: TickSource::cancel
pub trait TickSource {
    /// Register `callback` to fire every `interval` until cancelled.
    fn schedule(&self, interval: Duration, callback: Box<dyn FnMut()>) -> TimerHandle;

    /// Cancel a registration. Unknown or already-cancelled handles are ignored.
    fn cancel(&self, handle: TimerHandle);
}

/// Handle to a visibility subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionHandle(pub(crate) u64);

/// Fires when the observed element becomes sufficiently visible.
///
/// A signal instance is already scoped to one observed element; the
/// intersection threshold policy belongs to the implementation.
pub trait VisibilitySignal {
    /// Register `callback` to fire on each visibility event.
    fn subscribe(&self, callback: Box<dyn Fn()>) -> SubscriptionHandle;

    /// Remove a subscription. Unknown handles are ignored.
    fn unsubscribe(&self, handle: SubscriptionHandle);
}

/// Pointer enter/leave events for hover-triggered animations.
pub trait HoverSignal {
    /// Register `callback` to fire when the pointer enters.
    fn on_enter(&self, callback: Box<dyn Fn()>);

    /// Register `callback` to fire when the pointer leaves.
    fn on_leave(&self, callback: Box<dyn Fn()>);
}

/// Uniform random source for index permutation and character draws.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_float(&mut self) -> f64;

    /// Uniform index in `[0, bound)`. Returns 0 for an empty bound.
    fn pick_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        let index = (self.next_float() * bound as f64) as usize;
        index.min(bound - 1)
    }
}
