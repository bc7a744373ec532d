use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

use super::{TickSource, TimerHandle};

// Intervals below this would make the catch-up division in advance() spin.
const MIN_INTERVAL: Duration = Duration::from_micros(1);

/// Step-driven [`TickSource`] for headless hosts and tests.
///
/// Nothing fires on its own; the owner calls [`advance`] with the elapsed
/// wall-clock time and every registration that has accumulated at least one
/// full interval fires, oldest registration first. A callback may cancel its
/// own registration (or any other) while it runs.
///
/// [`advance`]: ManualTicker::advance
pub struct ManualTicker {
    inner: RefCell<TickerInner>,
}

struct TickerInner {
    next_id: u64,
    timers: BTreeMap<u64, Timer>,
}

struct Timer {
    interval: Duration,
    carry: Duration,
    // Taken out of the slot while the callback runs, so a cancel from
    // inside the callback is observed when putting it back.
    callback: Option<Box<dyn FnMut()>>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(TickerInner {
                next_id: 0,
                timers: BTreeMap::new(),
            }),
        }
    }

    /// Number of live registrations.
    pub fn active(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Advance time by `dt`, firing every due callback.
    ///
    /// A registration whose interval fits multiple times into `dt` fires
    /// once per elapsed interval. Registrations created during dispatch
    /// start counting from the next `advance` call.
    pub fn advance(&self, dt: Duration) {
        let ids: Vec<u64> = self.inner.borrow().timers.keys().copied().collect();
        for id in ids {
            let mut fires = {
                let mut inner = self.inner.borrow_mut();
                let Some(timer) = inner.timers.get_mut(&id) else {
                    continue;
                };
                timer.carry += dt;
                let mut due = 0u32;
                while timer.carry >= timer.interval {
                    timer.carry -= timer.interval;
                    due += 1;
                }
                due
            };

            while fires > 0 {
                fires -= 1;
                let taken = {
                    let mut inner = self.inner.borrow_mut();
                    inner.timers.get_mut(&id).and_then(|t| t.callback.take())
                };
                let Some(mut callback) = taken else {
                    break;
                };
                callback();
                let mut inner = self.inner.borrow_mut();
                if let Some(timer) = inner.timers.get_mut(&id) {
                    timer.callback = Some(callback);
                }
            }
        }
    }
}

impl Default for ManualTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for ManualTicker {
    fn schedule(&self, interval: Duration, callback: Box<dyn FnMut()>) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.timers.insert(
            id,
            Timer {
                interval: interval.max(MIN_INTERVAL),
                carry: Duration::ZERO,
                callback: Some(callback),
            },
        );
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        self.inner.borrow_mut().timers.remove(&handle.0);
    }
}
