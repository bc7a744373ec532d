//! Decorative text animations: a decrypt-style character reveal and a
//! character-strip shuffle, decoupled from any particular rendering runtime.
//!
//! The crate never touches a screen, a timer API, or a global RNG directly.
//! Everything effectful goes through the capabilities in [`platform`]:
//! a [`platform::RenderSink`] receives each frame as a plain string, a
//! [`platform::TickSource`] drives the animation loop, and a
//! [`platform::RandomSource`] supplies the scramble randomness. Hover and
//! viewport-visibility triggers are modeled as subscription capabilities so
//! the same animator works against a terminal, a GUI toolkit, or a test
//! harness.
//!
//! ## Example
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//! use scramble::prelude::*;
//!
//! let ticker = Rc::new(ManualTicker::new());
//! let frames = Rc::new(FrameBuffer::new());
//!
//! let animator = RevealAnimator::new(
//!     "HELLO WORLD",
//!     RevealConfig::default().sequential(true),
//!     frames.clone(),
//!     ticker.clone(),
//!     Box::new(SeededRandom::new(7)),
//! );
//! animator.start();
//!
//! // Drive the loop; each tick locks in one more character.
//! for _ in 0..12 {
//!     ticker.advance(Duration::from_millis(50));
//! }
//! assert_eq!(frames.last().as_deref(), Some("HELLO WORLD"));
//! ```

pub mod animation;
pub mod platform;
pub mod reveal;
pub mod shuffle;

pub mod prelude {
    pub use crate::animation::{TimingFunction, Tween};
    pub use crate::platform::{
        FrameBuffer, HoverEmitter, HoverSignal, ManualTicker, RandomSource, RenderSink,
        SeededRandom, SubscriptionHandle, ThreadRandom, TickSource, TimerHandle,
        VisibilityEmitter, VisibilitySignal,
    };
    pub use crate::reveal::{
        AnimateOn, AnimationState, CharacterPool, RevealAnimator, RevealConfig, RevealDirection,
    };
    pub use crate::shuffle::{
        ShuffleAnimator, ShuffleConfig, ShuffleDirection, ShuffleTimeline, StaggerMode,
    };
}
