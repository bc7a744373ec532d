//! Headless collaborator implementations.
//!
//! These stand in for the host environment: [`FrameBuffer`] records what a
//! real surface would display, and the emitters replay pointer/visibility
//! events on demand. They are used by the integration tests and the demos,
//! and are handy for driving the animators from any non-interactive host.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{HoverSignal, RenderSink, SubscriptionHandle, VisibilitySignal};

/// [`RenderSink`] that records every frame it is asked to display.
pub struct FrameBuffer {
    frames: RefCell<Vec<String>>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            frames: RefCell::new(Vec::new()),
        }
    }

    /// All frames displayed so far, oldest first.
    pub fn frames(&self) -> Vec<String> {
        self.frames.borrow().clone()
    }

    /// The most recently displayed frame, if any.
    pub fn last(&self) -> Option<String> {
        self.frames.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.frames.borrow_mut().clear();
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for FrameBuffer {
    fn display(&self, text: &str) {
        self.frames.borrow_mut().push(text.to_string());
    }
}

/// [`HoverSignal`] driven by explicit [`enter`]/[`leave`] calls.
///
/// [`enter`]: HoverEmitter::enter
/// [`leave`]: HoverEmitter::leave
pub struct HoverEmitter {
    enter: RefCell<Vec<Rc<dyn Fn()>>>,
    leave: RefCell<Vec<Rc<dyn Fn()>>>,
}

impl HoverEmitter {
    pub fn new() -> Self {
        Self {
            enter: RefCell::new(Vec::new()),
            leave: RefCell::new(Vec::new()),
        }
    }

    /// Simulate the pointer entering the element.
    pub fn enter(&self) {
        // Snapshot so callbacks can register more listeners without a
        // borrow conflict.
        let callbacks: Vec<_> = self.enter.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }

    /// Simulate the pointer leaving the element.
    pub fn leave(&self) {
        let callbacks: Vec<_> = self.leave.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }
}

impl Default for HoverEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl HoverSignal for HoverEmitter {
    fn on_enter(&self, callback: Box<dyn Fn()>) {
        self.enter.borrow_mut().push(Rc::from(callback));
    }

    fn on_leave(&self, callback: Box<dyn Fn()>) {
        self.leave.borrow_mut().push(Rc::from(callback));
    }
}

/// [`VisibilitySignal`] driven by explicit [`emit`] calls.
///
/// [`emit`]: VisibilityEmitter::emit
pub struct VisibilityEmitter {
    inner: RefCell<EmitterInner>,
}

struct EmitterInner {
    next_id: u64,
    subscribers: BTreeMap<u64, Rc<dyn Fn()>>,
}

impl VisibilityEmitter {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(EmitterInner {
                next_id: 0,
                subscribers: BTreeMap::new(),
            }),
        }
    }

    /// Simulate the element becoming visible.
    pub fn emit(&self) {
        let callbacks: Vec<_> = self.inner.borrow().subscribers.values().cloned().collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl Default for VisibilityEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilitySignal for VisibilityEmitter {
    fn subscribe(&self, callback: Box<dyn Fn()>) -> SubscriptionHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.insert(id, Rc::from(callback));
        SubscriptionHandle(id)
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.inner.borrow_mut().subscribers.remove(&handle.0);
    }
}
