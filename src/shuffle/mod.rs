//! Character-strip shuffle.
//!
//! Each non-space character gets a vertical strip of rolled glyphs that
//! scrolls through and settles on the original character, with per-strip
//! staggering across the text. Unlike the decrypt reveal, the whole run is
//! laid out up front as a [`ShuffleTimeline`] and then sampled frame by
//! frame, so the same strips replay identically within one run.

mod timeline;

pub use timeline::{ShuffleDirection, ShuffleTimeline, StaggerMode, SHUFFLE_CHARSET};

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::animation::TimingFunction;
use crate::platform::{
    HoverSignal, RandomSource, RenderSink, SubscriptionHandle, TickSource, TimerHandle,
    VisibilitySignal,
};

/// Immutable playback configuration for a [`ShuffleAnimator`].
#[derive(Clone)]
pub struct ShuffleConfig {
    direction: ShuffleDirection,
    duration_secs: f32,
    ease: TimingFunction,
    shuffle_times: u32,
    stagger_secs: f32,
    mode: StaggerMode,
    looping: bool,
    loop_delay_secs: f32,
    trigger_once: bool,
    trigger_on_hover: bool,
    reduced_motion: bool,
    frame_interval: Duration,
    on_complete: Option<Rc<dyn Fn()>>,
}

impl ShuffleConfig {
    /// Which side each strip's roll travels from.
    pub fn direction(mut self, direction: ShuffleDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Per-strip roll duration in seconds.
    pub fn duration(mut self, duration_secs: f32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Easing curve for each strip's roll.
    pub fn ease(mut self, ease: TimingFunction) -> Self {
        self.ease = ease;
        self
    }

    /// Random glyphs rolled through before settling. Clamped to at least 1.
    pub fn shuffle_times(mut self, shuffle_times: u32) -> Self {
        self.shuffle_times = shuffle_times;
        self
    }

    /// Delay between consecutive strips within a group, in seconds.
    pub fn stagger(mut self, stagger_secs: f32) -> Self {
        self.stagger_secs = stagger_secs;
        self
    }

    /// How strip start times are grouped.
    pub fn mode(mut self, mode: StaggerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replay forever instead of completing.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Pause between loop iterations, in seconds.
    pub fn loop_delay(mut self, loop_delay_secs: f32) -> Self {
        self.loop_delay_secs = loop_delay_secs;
        self
    }

    /// Play at most once from the visibility trigger.
    pub fn trigger_once(mut self, trigger_once: bool) -> Self {
        self.trigger_once = trigger_once;
        self
    }

    /// Replay on pointer enter (when idle).
    pub fn trigger_on_hover(mut self, trigger_on_hover: bool) -> Self {
        self.trigger_on_hover = trigger_on_hover;
        self
    }

    /// Skip the animation entirely: display the final text and complete.
    /// Hosts set this from their reduced-motion preference.
    pub fn reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// Sampling cadence of the playback loop.
    pub fn frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    /// Callback invoked when a run finishes (never for looping playback).
    pub fn on_complete<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.on_complete = Some(Rc::new(callback));
        self
    }
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            direction: ShuffleDirection::Right,
            duration_secs: 0.4,
            ease: TimingFunction::EaseOutCubic,
            shuffle_times: 2,
            stagger_secs: 0.04,
            mode: StaggerMode::EvenOdd,
            looping: false,
            loop_delay_secs: 0.0,
            trigger_once: false,
            trigger_on_hover: true,
            reduced_motion: false,
            frame_interval: Duration::from_millis(16),
            on_complete: None,
        }
    }
}

struct Core {
    text: String,
    config: ShuffleConfig,
    timeline: Option<ShuffleTimeline>,
    elapsed_secs: f32,
    playing: bool,
    has_triggered: bool,
    timer: Option<TimerHandle>,
    sink: Rc<dyn RenderSink>,
    ticker: Rc<dyn TickSource>,
    rng: Box<dyn RandomSource>,
    visibility: Option<(Rc<dyn VisibilitySignal>, SubscriptionHandle)>,
}

impl Drop for Core {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.ticker.cancel(handle);
        }
        if let Some((signal, handle)) = self.visibility.take() {
            signal.unsubscribe(handle);
        }
    }
}

/// Tick-driven playback of shuffle timelines with hover/visibility triggers.
///
/// Each run builds a fresh [`ShuffleTimeline`] so replays roll new glyphs.
pub struct ShuffleAnimator {
    core: Rc<RefCell<Core>>,
}

impl ShuffleAnimator {
    /// Capture the text and configuration, and display the pristine text.
    pub fn new(
        text: impl Into<String>,
        config: ShuffleConfig,
        sink: Rc<dyn RenderSink>,
        ticker: Rc<dyn TickSource>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let text = text.into();
        let core = Rc::new(RefCell::new(Core {
            text: text.clone(),
            config,
            timeline: None,
            elapsed_secs: 0.0,
            playing: false,
            has_triggered: false,
            timer: None,
            sink,
            ticker,
            rng,
            visibility: None,
        }));
        let sink = core.borrow().sink.clone();
        sink.display(&text);
        Self { core }
    }

    /// Replay on pointer enter, if hover triggering is configured. A run
    /// already in flight is left alone.
    pub fn attach_hover(&self, hover: &dyn HoverSignal) {
        if !self.core.borrow().config.trigger_on_hover {
            return;
        }
        let weak = Rc::downgrade(&self.core);
        hover.on_enter(Box::new(move || {
            if let Some(core) = weak.upgrade() {
                if !core.borrow().playing {
                    ShuffleAnimator::play_core(&core);
                }
            }
        }));
    }

    /// Play on each visibility event, or only on the first when
    /// `trigger_once` is set.
    pub fn attach_visibility(&self, signal: Rc<dyn VisibilitySignal>) {
        if let Some((previous, handle)) = self.core.borrow_mut().visibility.take() {
            previous.unsubscribe(handle);
        }
        let weak = Rc::downgrade(&self.core);
        let handle = signal.subscribe(Box::new(move || {
            if let Some(core) = weak.upgrade() {
                {
                    let mut c = core.borrow_mut();
                    if c.config.trigger_once && c.has_triggered {
                        return;
                    }
                    c.has_triggered = true;
                    if c.playing {
                        return;
                    }
                }
                ShuffleAnimator::play_core(&core);
            }
        }));
        self.core.borrow_mut().visibility = Some((signal, handle));
    }

    /// Begin playback. No-op while already playing.
    pub fn play(&self) {
        Self::play_core(&self.core);
    }

    /// Cancel playback and restore the original text.
    pub fn reset(&self) {
        let (sink, text) = {
            let mut c = self.core.borrow_mut();
            if let Some(handle) = c.timer.take() {
                c.ticker.cancel(handle);
            }
            c.playing = false;
            c.timeline = None;
            c.elapsed_secs = 0.0;
            (c.sink.clone(), c.text.clone())
        };
        sink.display(&text);
    }

    /// Tear down: reset playback and drop the visibility subscription.
    pub fn destroy(&self) {
        if let Some((signal, handle)) = self.core.borrow_mut().visibility.take() {
            signal.unsubscribe(handle);
        }
        self.reset();
        log::debug!("shuffle: destroyed");
    }

    pub fn is_playing(&self) -> bool {
        self.core.borrow().playing
    }

    /// The original text playback converges to.
    pub fn text(&self) -> String {
        self.core.borrow().text.clone()
    }

    fn play_core(core: &Rc<RefCell<Core>>) {
        enum Startup {
            AlreadyPlaying,
            Reduced(String),
            Rolling(String),
        }

        let (sink, startup) = {
            let mut guard = core.borrow_mut();
            let c: &mut Core = &mut guard;
            let sink = c.sink.clone();
            let startup = if c.playing {
                Startup::AlreadyPlaying
            } else if c.config.reduced_motion {
                Startup::Reduced(c.text.clone())
            } else {
                log::debug!("shuffle: playing {} chars", c.text.chars().count());
                let timeline = ShuffleTimeline::build(&c.text, &c.config, &mut *c.rng);
                let first = timeline.frame(0.0);
                c.timeline = Some(timeline);
                c.elapsed_secs = 0.0;
                c.playing = true;

                let weak = Rc::downgrade(core);
                let ticker = c.ticker.clone();
                let handle = ticker.schedule(
                    c.config.frame_interval,
                    Box::new(move || {
                        if let Some(core) = weak.upgrade() {
                            ShuffleAnimator::tick(&core);
                        }
                    }),
                );
                c.timer = Some(handle);
                Startup::Rolling(first)
            };
            (sink, startup)
        };

        match startup {
            Startup::AlreadyPlaying => {}
            Startup::Reduced(text) => {
                sink.display(&text);
                let callback = core.borrow().config.on_complete.clone();
                if let Some(callback) = callback {
                    callback();
                }
            }
            Startup::Rolling(first) => sink.display(&first),
        }
    }

    fn tick(core: &Rc<RefCell<Core>>) {
        let (sink, frame, finished) = {
            let mut c = core.borrow_mut();
            if !c.playing {
                return;
            }
            c.elapsed_secs += c.config.frame_interval.as_secs_f32();
            let elapsed = c.elapsed_secs;
            let Some(timeline) = c.timeline.as_ref() else {
                return;
            };
            let frame = timeline.frame(elapsed);
            let finished = timeline.finished(elapsed);
            if finished {
                c.playing = false;
                c.timeline = None;
                if let Some(handle) = c.timer.take() {
                    c.ticker.cancel(handle);
                }
            }
            (c.sink.clone(), frame, finished)
        };

        sink.display(&frame);
        if finished {
            log::debug!("shuffle: run complete");
            let callback = core.borrow().config.on_complete.clone();
            if let Some(callback) = callback {
                callback();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FrameBuffer, ManualTicker, SeededRandom};

    fn animator(
        text: &str,
        config: ShuffleConfig,
    ) -> (ShuffleAnimator, Rc<FrameBuffer>, Rc<ManualTicker>) {
        let sink = Rc::new(FrameBuffer::new());
        let ticker = Rc::new(ManualTicker::new());
        let a = ShuffleAnimator::new(
            text,
            config,
            sink.clone(),
            ticker.clone(),
            Box::new(SeededRandom::new(17)),
        );
        (a, sink, ticker)
    }

    #[test]
    fn test_construction_displays_pristine_text() {
        let (_a, sink, _ticker) = animator("ROLL", ShuffleConfig::default());
        assert_eq!(sink.frames(), vec!["ROLL".to_string()]);
    }

    #[test]
    fn test_play_converges_and_stops_ticking() {
        let (a, sink, ticker) = animator("AB CD", ShuffleConfig::default());
        a.play();
        for _ in 0..200 {
            ticker.advance(Duration::from_millis(16));
        }
        assert!(!a.is_playing());
        assert_eq!(sink.last().as_deref(), Some("AB CD"));
        assert_eq!(ticker.active(), 0);
    }

    #[test]
    fn test_reduced_motion_skips_straight_to_text() {
        let (a, sink, ticker) = animator("SKIP", ShuffleConfig::default().reduced_motion(true));
        a.play();
        assert!(!a.is_playing());
        assert_eq!(sink.last().as_deref(), Some("SKIP"));
        assert_eq!(ticker.active(), 0);
    }

    #[test]
    fn test_reset_restores_text_mid_run() {
        let (a, sink, ticker) = animator("RESET ME", ShuffleConfig::default());
        a.play();
        ticker.advance(Duration::from_millis(48));
        a.reset();
        assert!(!a.is_playing());
        assert_eq!(sink.last().as_deref(), Some("RESET ME"));
        assert_eq!(ticker.active(), 0);
    }
}
