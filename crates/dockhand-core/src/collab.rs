// In-process collaborators. Hosts without a native event loop (and every
// test in the workspace) drive panels through these.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::{EventSink, EventTarget, LayoutPersistence, PanelEvent, Timer, TimerToken};

// ──────────────────────────────────────────────
// EventLog
// ──────────────────────────────────────────────

/// Records every fired event in dispatch order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: RefCell<Vec<(EventTarget, PanelEvent)>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(EventTarget, PanelEvent)> {
        self.events.borrow().clone()
    }

    pub fn count(&self, target: EventTarget, event: PanelEvent) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|(t, e)| *t == target && *e == event)
            .count()
    }

    /// Drain the log, returning what was recorded so far.
    pub fn take(&self) -> Vec<(EventTarget, PanelEvent)> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl EventSink for EventLog {
    fn fire(&self, target: EventTarget, event: PanelEvent) {
        log::trace!("fire {} on {:?}", event.name(), target);
        self.events.borrow_mut().push((target, event));
    }
}

// ──────────────────────────────────────────────
// LayoutChangeCounter
// ──────────────────────────────────────────────

/// Counts "layout changed" notifications; a host polls `take_dirty` to
/// decide when to write its saved layout.
#[derive(Debug, Default)]
pub struct LayoutChangeCounter {
    count: Cell<usize>,
    dirty: Cell<bool>,
}

impl LayoutChangeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }

    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }
}

impl LayoutPersistence for LayoutChangeCounter {
    fn layout_changed(&self) {
        self.count.set(self.count.get() + 1);
        self.dirty.set(true);
    }
}

// ──────────────────────────────────────────────
// TimerQueue
// ──────────────────────────────────────────────

/// Manually advanced timer queue. Time only moves when `advance` is called,
/// which keeps debounce behaviour reproducible.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Cell<Duration>,
    /// (deadline, sequence, token)
    pending: RefCell<Vec<(Duration, u64, TimerToken)>>,
    seq: Cell<u64>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Move the clock forward and return the tokens that came due, in
    /// deadline order (ties keep scheduling order).
    pub fn advance(&self, by: Duration) -> Vec<TimerToken> {
        let now = self.now.get() + by;
        self.now.set(now);

        let mut pending = self.pending.borrow_mut();
        let mut due: Vec<(Duration, u64, TimerToken)> = Vec::new();
        pending.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, token)| token).collect()
    }
}

impl Timer for TimerQueue {
    fn schedule(&self, delay: Duration, token: TimerToken) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.pending
            .borrow_mut()
            .push((self.now.get() + delay, seq, token));
    }
}
