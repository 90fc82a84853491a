// SPDX-License-Identifier: MPL-2.0
//! Delayed actions ("run this after N") without blocking the caller.
//!
//! Both schedulers run actions on the thread that owns the manager, so a
//! delayed dismissal is ordered with every other `queue`/`dismiss` call.
//! Scheduled actions cannot be cancelled; a late auto-dismiss of a message
//! that was already dismissed is absorbed by the manager's no-op policy.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use tokio::task::LocalSet;

/// A one-shot action handed to a [`Scheduler`].
pub type DelayedAction = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Runs `action` once, after `delay` has elapsed.
    fn schedule(&self, delay: Duration, action: DelayedAction);

    /// Runs every action due at `now`. Only polled schedulers do anything
    /// here; returns how many actions ran.
    fn tick(&self, _now: Instant) -> usize {
        0
    }

    /// Number of actions scheduled but not yet run.
    fn pending(&self) -> usize;
}

struct Pending {
    deadline: Instant,
    seq: u64,
    action: DelayedAction,
}

/// Scheduler driven by the host's event loop.
///
/// The host calls [`tick`](Scheduler::tick) periodically (e.g., every
/// 100-500ms); due actions run in deadline order on that call. Actions
/// scheduled while a tick is running wait for the next tick. If an action
/// panics, the panic reaches the caller of `tick` and the remaining due
/// actions run on the next tick.
#[derive(Default)]
pub struct TickScheduler {
    pending: RefCell<Vec<Pending>>,
    next_seq: Cell<u64>,
    /// Virtual clock; `None` means wall-clock time.
    virtual_now: Cell<Option<Instant>>,
}

impl TickScheduler {
    /// Creates a scheduler that measures delays on the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler whose clock starts at `origin` and only moves
    /// through [`tick`](Scheduler::tick) and [`advance`](Self::advance).
    #[must_use]
    pub fn manual(origin: Instant) -> Self {
        Self {
            virtual_now: Cell::new(Some(origin)),
            ..Self::default()
        }
    }

    /// The scheduler's idea of the current time.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.virtual_now.get().unwrap_or_else(Instant::now)
    }

    /// Moves the clock forward by `by` and runs what became due.
    pub fn advance(&self, by: Duration) -> usize {
        self.tick(self.now() + by)
    }

    /// Deadline of the next action to run.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.borrow().iter().map(|p| p.deadline).min()
    }

    /// Removes the earliest action due at `now` that was scheduled before
    /// `seq_limit`.
    fn take_next_due(&self, now: Instant, seq_limit: u64) -> Option<Pending> {
        let mut pending = self.pending.borrow_mut();
        let index = pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= now && p.seq < seq_limit)
            .min_by_key(|(_, p)| (p.deadline, p.seq))
            .map(|(index, _)| index)?;
        Some(pending.swap_remove(index))
    }
}

impl Scheduler for TickScheduler {
    fn schedule(&self, delay: Duration, action: DelayedAction) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.pending.borrow_mut().push(Pending {
            deadline: self.now() + delay,
            seq,
            action,
        });
    }

    fn tick(&self, now: Instant) -> usize {
        if let Some(current) = self.virtual_now.get() {
            self.virtual_now.set(Some(current.max(now)));
        }
        // One at a time: if an action panics, the rest stay pending.
        let seq_limit = self.next_seq.get();
        let mut count = 0;
        while let Some(pending) = self.take_next_due(now, seq_limit) {
            (pending.action)();
            count += 1;
        }
        count
    }

    fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

/// Scheduler backed by a tokio [`LocalSet`].
///
/// Actions run on whichever thread drives the set (`run_until` or awaiting
/// it), which is expected to be the thread that owns the manager.
pub struct LocalScheduler {
    local: Rc<LocalSet>,
    in_flight: Rc<Cell<usize>>,
}

impl LocalScheduler {
    #[must_use]
    pub fn new(local: Rc<LocalSet>) -> Self {
        Self {
            local,
            in_flight: Rc::new(Cell::new(0)),
        }
    }

    #[must_use]
    pub fn local_set(&self) -> &Rc<LocalSet> {
        &self.local
    }
}

impl Scheduler for LocalScheduler {
    fn schedule(&self, delay: Duration, action: DelayedAction) {
        let deadline = tokio::time::Instant::now() + delay;
        let in_flight = Rc::clone(&self.in_flight);
        in_flight.set(in_flight.get() + 1);

        self.local.spawn_local(async move {
            tokio::time::sleep_until(deadline).await;
            in_flight.set(in_flight.get().saturating_sub(1));
            action();
        });
    }

    fn pending(&self) -> usize {
        self.in_flight.get()
    }
}
