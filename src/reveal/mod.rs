//! Decrypt-style character reveal.
//!
//! A [`RevealAnimator`] owns an immutable original text and repeatedly
//! re-scrambles the not-yet-revealed positions on a timer, either locking in
//! one position per tick (sequential mode) until the whole text is revealed,
//! or re-randomizing everything for a fixed number of ticks and then
//! snapping to the original (iteration mode). Spaces are never scrambled.
//!
//! The animator is single-threaded and cooperative: it owns at most one
//! timer registration, starting while running is a no-op, and stopping or
//! destroying cancels the pending registration before returning.

mod direction;
mod scramble;

pub use direction::RevealDirection;
pub use scramble::{CharacterPool, DEFAULT_ALPHABET};

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use bitflags::bitflags;

use crate::platform::{
    HoverSignal, RandomSource, RenderSink, SubscriptionHandle, TickSource, TimerHandle,
    VisibilitySignal,
};

bitflags! {
    /// Which external signals drive a run.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct AnimateOn: u8 {
        /// Pointer enter starts a run; pointer leave stops it.
        const HOVER = 1;
        /// The first visibility event starts a run, once per animator
        /// lifetime. When this is the only trigger, stop() is a no-op.
        const VIEW = 1 << 1;
    }
}

impl Default for AnimateOn {
    fn default() -> Self {
        AnimateOn::HOVER
    }
}

/// Lifecycle state of a [`RevealAnimator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// No timer active; displayed text is stable.
    #[default]
    Idle,
    /// A timer is registered and ticks are re-scrambling the text.
    Running,
    /// Transient while a finished run tears down its timer.
    Completing,
}

/// Invoked once per completed run.
pub type CompletionCallback = Rc<dyn Fn()>;

/// Immutable per-animator configuration. Built once, captured at
/// construction.
#[derive(Clone)]
pub struct RevealConfig {
    interval: Duration,
    max_iterations: u32,
    sequential: bool,
    direction: RevealDirection,
    pool: CharacterPool,
    animate_on: AnimateOn,
    on_complete: Option<CompletionCallback>,
}

impl RevealConfig {
    /// Tick interval. Clamped to at least 1 ms at construction.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Number of scramble ticks before snapping to the original text
    /// (iteration mode only). Clamped to at least 1 at construction.
    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Reveal one position per tick instead of running a fixed number of
    /// scramble iterations.
    pub fn sequential(mut self, sequential: bool) -> Self {
        self.sequential = sequential;
        self
    }

    /// Order in which positions lock in (sequential mode).
    pub fn direction(mut self, direction: RevealDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Source of scramble placeholder characters.
    pub fn pool(mut self, pool: CharacterPool) -> Self {
        self.pool = pool;
        self
    }

    /// Shorthand for a fixed-alphabet pool.
    pub fn characters(mut self, chars: &str) -> Self {
        self.pool = CharacterPool::alphabet(chars);
        self
    }

    /// Which external signals drive the animation.
    pub fn animate_on(mut self, animate_on: AnimateOn) -> Self {
        self.animate_on = animate_on;
        self
    }

    /// Callback invoked once per completed run.
    pub fn on_complete<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.on_complete = Some(Rc::new(callback));
        self
    }

    fn normalized(mut self) -> Self {
        // Liveness clamp: a non-positive interval or zero iteration budget
        // would stall or never finish the loop.
        self.interval = self.interval.max(Duration::from_millis(1));
        self.max_iterations = self.max_iterations.max(1);
        self
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(50),
            max_iterations: 10,
            sequential: false,
            direction: RevealDirection::Start,
            pool: CharacterPool::default(),
            animate_on: AnimateOn::HOVER,
            on_complete: None,
        }
    }
}

struct Core {
    original: Vec<char>,
    displayed: String,
    config: RevealConfig,
    state: AnimationState,
    revealed: HashSet<usize>,
    iteration: u32,
    has_animated: bool,
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

enum TickOutcome {
    Frame(String),
    SequentialDone,
    IterationDone { frame: String, original: String },
    Stale,
}

/// The shuffle/decrypt reveal state machine.
///
/// Collaborators are injected: frames go to a [`RenderSink`], the loop is
/// driven by a [`TickSource`], and randomness comes from a [`RandomSource`].
/// Hover and visibility triggers are wired up separately via
/// [`attach_hover`](RevealAnimator::attach_hover) and
/// [`attach_visibility`](RevealAnimator::attach_visibility).
pub struct RevealAnimator {
    core: Rc<RefCell<Core>>,
}

impl RevealAnimator {
    /// Capture the original text and configuration, and display the
    /// pristine text once.
    pub fn new(
        text: impl Into<String>,
        config: RevealConfig,
        sink: Rc<dyn RenderSink>,
        ticker: Rc<dyn TickSource>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let text = text.into();
        let core = Rc::new(RefCell::new(Core {
            original: text.chars().collect(),
            displayed: text.clone(),
            config: config.normalized(),
            state: AnimationState::Idle,
            revealed: HashSet::new(),
            iteration: 0,
            has_animated: false,
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

    /// Wire pointer enter/leave to start/stop, if hover is a configured
    /// trigger.
    pub fn attach_hover(&self, hover: &dyn HoverSignal) {
        if !self.core.borrow().config.animate_on.contains(AnimateOn::HOVER) {
            return;
        }
        let weak = Rc::downgrade(&self.core);
        hover.on_enter(Box::new(move || {
            if let Some(core) = weak.upgrade() {
                RevealAnimator::start_core(&core);
            }
        }));
        let weak = Rc::downgrade(&self.core);
        hover.on_leave(Box::new(move || {
            if let Some(core) = weak.upgrade() {
                RevealAnimator::stop_core(&core);
            }
        }));
    }

    /// Subscribe to visibility events, if view is a configured trigger.
    /// Only the first event starts a run, however often visibility toggles.
    pub fn attach_visibility(&self, signal: Rc<dyn VisibilitySignal>) {
        if !self.core.borrow().config.animate_on.contains(AnimateOn::VIEW) {
            return;
        }
        if let Some((previous, handle)) = self.core.borrow_mut().visibility.take() {
            previous.unsubscribe(handle);
        }
        let weak = Rc::downgrade(&self.core);
        let handle = signal.subscribe(Box::new(move || {
            if let Some(core) = weak.upgrade() {
                {
                    let mut c = core.borrow_mut();
                    if c.has_animated {
                        return;
                    }
                    c.has_animated = true;
                }
                RevealAnimator::start_core(&core);
            }
        }));
        self.core.borrow_mut().visibility = Some((signal, handle));
    }

    /// Begin a run. No-op while a run is already active.
    pub fn start(&self) {
        Self::start_core(&self.core);
    }

    /// Interrupt the run and restore the original text. No-op when the only
    /// configured trigger is visibility: view-triggered reveals are not
    /// interruptible.
    pub fn stop(&self) {
        Self::stop_core(&self.core);
    }

    /// Tear down: cancel any pending tick, drop the visibility
    /// subscription, and display the pristine text.
    pub fn destroy(&self) {
        Self::complete_core(&self.core);
        let (sink, original) = {
            let mut c = self.core.borrow_mut();
            if let Some((signal, handle)) = c.visibility.take() {
                signal.unsubscribe(handle);
            }
            c.revealed.clear();
            let original: String = c.original.iter().collect();
            c.displayed = original.clone();
            (c.sink.clone(), original)
        };
        sink.display(&original);
        log::debug!("reveal: destroyed");
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AnimationState {
        self.core.borrow().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == AnimationState::Running
    }

    /// The text as currently displayed.
    pub fn text(&self) -> String {
        self.core.borrow().displayed.clone()
    }

    /// The original text the animation converges to.
    pub fn original_text(&self) -> String {
        self.core.borrow().original.iter().collect()
    }

    /// Number of positions locked in so far (sequential mode).
    pub fn revealed_count(&self) -> usize {
        self.core.borrow().revealed.len()
    }

    fn start_core(core: &Rc<RefCell<Core>>) {
        let mut c = core.borrow_mut();
        if c.state != AnimationState::Idle {
            return;
        }
        log::debug!(
            "reveal: starting {} run over {} chars",
            if c.config.sequential { "sequential" } else { "iteration" },
            c.original.len()
        );
        c.state = AnimationState::Running;
        c.revealed.clear();
        c.iteration = 0;

        let weak = Rc::downgrade(core);
        let ticker = c.ticker.clone();
        let handle = ticker.schedule(
            c.config.interval,
            Box::new(move || {
                if let Some(core) = weak.upgrade() {
                    RevealAnimator::tick(&core);
                }
            }),
        );
        c.timer = Some(handle);
    }

    fn stop_core(core: &Rc<RefCell<Core>>) {
        if core.borrow().config.animate_on == AnimateOn::VIEW {
            return;
        }
        Self::complete_core(core);
        let (sink, original) = {
            let mut c = core.borrow_mut();
            c.revealed.clear();
            let original: String = c.original.iter().collect();
            c.displayed = original.clone();
            (c.sink.clone(), original)
        };
        sink.display(&original);
    }

    fn tick(core: &Rc<RefCell<Core>>) {
        let (sink, outcome) = {
            let mut guard = core.borrow_mut();
            let c: &mut Core = &mut guard;
            let sink = c.sink.clone();
            let outcome = match c.state {
                AnimationState::Running => Self::advance(c),
                // A tick that raced a teardown; nothing to do.
                _ => TickOutcome::Stale,
            };
            (sink, outcome)
        };

        match outcome {
            TickOutcome::Frame(frame) => sink.display(&frame),
            TickOutcome::SequentialDone => Self::complete_core(core),
            TickOutcome::IterationDone { frame, original } => {
                sink.display(&frame);
                sink.display(&original);
                Self::complete_core(core);
            }
            TickOutcome::Stale => {}
        }
    }

    fn advance(c: &mut Core) -> TickOutcome {
        let len = c.original.len();
        if c.config.sequential {
            if c.revealed.len() < len {
                let next = c.config.direction.next_index(len, &c.revealed);
                c.revealed.insert(next);
                let frame =
                    scramble::scramble_frame(&c.original, &c.revealed, &c.config.pool, &mut *c.rng);
                c.displayed = frame.clone();
                TickOutcome::Frame(frame)
            } else {
                TickOutcome::SequentialDone
            }
        } else {
            let frame =
                scramble::scramble_frame(&c.original, &c.revealed, &c.config.pool, &mut *c.rng);
            c.iteration += 1;
            if c.iteration >= c.config.max_iterations {
                let original: String = c.original.iter().collect();
                c.displayed = original.clone();
                TickOutcome::IterationDone { frame, original }
            } else {
                c.displayed = frame.clone();
                TickOutcome::Frame(frame)
            }
        }
    }

    /// Cancel the pending tick and return to idle. The completion callback
    /// fires only when this actually ended an active run.
    fn complete_core(core: &Rc<RefCell<Core>>) {
        let callback = {
            let mut c = core.borrow_mut();
            let was_running = c.state == AnimationState::Running;
            c.state = AnimationState::Completing;
            if let Some(handle) = c.timer.take() {
                c.ticker.cancel(handle);
            }
            c.state = AnimationState::Idle;
            if was_running {
                log::debug!("reveal: run complete");
                c.config.on_complete.clone()
            } else {
                None
            }
        };
        // Invoked with no borrow held, so the callback may start a new run.
        if let Some(callback) = callback {
            callback();
        }
    }
}
