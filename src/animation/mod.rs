mod timing;

pub use timing::TimingFunction;

/// Configuration for one tweened value: how long it runs, which easing
/// curve shapes it, and how long it waits before starting.
#[derive(Clone, Debug)]
pub struct Tween {
    /// Duration of the tween in seconds
    pub duration_secs: f32,
    /// Timing function controlling the curve
    pub ease: TimingFunction,
    /// Delay before the tween starts, in seconds
    pub delay_secs: f32,
}

impl Tween {
    /// Create a new tween with the given duration and timing function
    pub fn new(duration_secs: f32, ease: TimingFunction) -> Self {
        Self {
            duration_secs,
            ease,
            delay_secs: 0.0,
        }
    }

    /// Set the delay before the tween starts
    pub fn delay(mut self, delay_secs: f32) -> Self {
        self.delay_secs = delay_secs;
        self
    }

    /// Set the duration of the tween
    pub fn duration(mut self, duration_secs: f32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Set the timing function
    pub fn ease(mut self, ease: TimingFunction) -> Self {
        self.ease = ease;
        self
    }

    /// Eased progress at `elapsed_secs` since the timeline started.
    ///
    /// Returns 0.0 before the delay has passed and 1.0 once the tween has
    /// run its full duration. Zero-duration tweens snap straight to 1.0.
    pub fn progress(&self, elapsed_secs: f32) -> f32 {
        let active = elapsed_secs - self.delay_secs;
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration_secs <= 0.0 || active >= self.duration_secs {
            return 1.0;
        }
        self.ease.evaluate(active / self.duration_secs)
    }

    /// Time at which this tween has fully played out, in seconds
    pub fn end_secs(&self) -> f32 {
        self.delay_secs + self.duration_secs.max(0.0)
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new(0.4, TimingFunction::EaseOutCubic)
    }
}
