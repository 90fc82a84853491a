// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` is the single source of truth for which messages are
//! active. It raises `Queued` and `Dismissed` events synchronously, in call
//! order, to every subscribed observer. Duplicate queues, re-queues of
//! dismissed messages and dismissals of inactive messages are silent no-ops.
//!
//! Observers only see events raised after they subscribe; messages queued
//! earlier are not replayed.
//!
//! A manager and everything it hands out are bound to one thread.

use super::builder::Builder;
use super::factory::{DefaultFactory, NotificationFactory};
use super::message::{Lifecycle, MessageRef};
use super::scheduler::{DelayedAction, Scheduler, TickScheduler};
use crate::config::Config;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::error::Result;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Lifecycle transitions observers are told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerEvent {
    Queued(MessageRef),
    Dismissed(MessageRef),
}

impl ManagerEvent {
    #[must_use]
    pub fn message(&self) -> &MessageRef {
        match self {
            ManagerEvent::Queued(message) | ManagerEvent::Dismissed(message) => message,
        }
    }
}

/// Token returned by [`Manager::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Rc<dyn Fn(&ManagerEvent)>;

#[derive(Default)]
struct State {
    /// Active messages in queue order.
    queued: Vec<MessageRef>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    diagnostics: Option<DiagnosticsHandle>,
}

struct Inner {
    state: RefCell<State>,
    factory: Rc<dyn NotificationFactory>,
    scheduler: Rc<dyn Scheduler>,
    auto_dismiss: Cell<Option<Duration>>,
}

/// Cheap-to-clone handle to a message queue.
#[derive(Clone)]
pub struct Manager {
    inner: Rc<Inner>,
}

impl Manager {
    /// Creates a manager with the default factory and a [`TickScheduler`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(Rc::new(DefaultFactory::new()), Rc::new(TickScheduler::new()))
    }

    #[must_use]
    pub fn with_factory(factory: Rc<dyn NotificationFactory>) -> Self {
        Self::with_parts(factory, Rc::new(TickScheduler::new()))
    }

    #[must_use]
    pub fn with_parts(factory: Rc<dyn NotificationFactory>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(State::default()),
                factory,
                scheduler,
                auto_dismiss: Cell::new(None),
            }),
        }
    }

    /// Creates a manager whose messages start from the configured defaults
    /// and, if configured, dismiss themselves after `auto_dismiss_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::error::Error::InvalidArgument)
    /// if the configuration holds unusable durations.
    pub fn with_config(config: &Config, scheduler: Rc<dyn Scheduler>) -> Result<Self> {
        let manager = Self::with_parts(Rc::new(DefaultFactory::from_config(config)?), scheduler);
        manager.set_auto_dismiss(config.auto_dismiss()?);
        Ok(manager)
    }

    /// Sets the diagnostics handle for logging lifecycle events.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        self.inner.state.borrow_mut().diagnostics = Some(handle);
    }

    /// Delay after which messages queued through a builder dismiss themselves.
    pub fn set_auto_dismiss(&self, delay: Option<Duration>) {
        self.inner.auto_dismiss.set(delay);
    }

    #[must_use]
    pub fn auto_dismiss(&self) -> Option<Duration> {
        self.inner.auto_dismiss.get()
    }

    #[must_use]
    pub fn factory(&self) -> Rc<dyn NotificationFactory> {
        Rc::clone(&self.inner.factory)
    }

    #[must_use]
    pub fn scheduler(&self) -> Rc<dyn Scheduler> {
        Rc::clone(&self.inner.scheduler)
    }

    /// Starts building a new message bound to this manager.
    pub fn create_message(&self) -> Builder {
        Builder::new(self.clone())
    }

    /// Adds `message` to the active set and raises `Queued`.
    ///
    /// Returns `false` without raising anything if the message is already
    /// active or has been dismissed; a dismissed message never comes back.
    pub fn queue(&self, message: &MessageRef) -> bool {
        let (observers, diagnostics, active_count) = {
            let mut state = self.inner.state.borrow_mut();
            let ignored = if state.queued.contains(message) {
                Some(DiagnosticEventKind::DuplicateQueueIgnored)
            } else if message.lifecycle() == Lifecycle::Dismissed {
                Some(DiagnosticEventKind::DismissedQueueIgnored)
            } else {
                None
            };
            if let Some(kind) = ignored {
                if let Some(handle) = &state.diagnostics {
                    handle.log(kind);
                }
                return false;
            }
            message.set_lifecycle(Lifecycle::Queued);
            state.queued.push(message.clone());
            (state.snapshot_observers(), state.diagnostics.clone(), state.queued.len())
        };

        if let Some(handle) = diagnostics {
            handle.log(DiagnosticEventKind::Queued {
                header: message.header(),
                active_count,
            });
        }
        Self::emit(&observers, &ManagerEvent::Queued(message.clone()));
        true
    }

    /// Removes `message` from the active set and raises `Dismissed`.
    ///
    /// Returns `false` without raising anything if the message is not
    /// active, so repeated or late dismissals are harmless.
    pub fn dismiss(&self, message: &MessageRef) -> bool {
        let (observers, diagnostics, active_count) = {
            let mut state = self.inner.state.borrow_mut();
            let Some(pos) = state.queued.iter().position(|m| m == message) else {
                if let Some(handle) = &state.diagnostics {
                    handle.log(DiagnosticEventKind::UnknownDismissIgnored);
                }
                return false;
            };
            state.queued.remove(pos);
            message.set_lifecycle(Lifecycle::Dismissed);
            (state.snapshot_observers(), state.diagnostics.clone(), state.queued.len())
        };

        if let Some(handle) = diagnostics {
            handle.log(DiagnosticEventKind::Dismissed {
                header: message.header(),
                active_count,
            });
        }
        Self::emit(&observers, &ManagerEvent::Dismissed(message.clone()));
        true
    }

    /// Dismisses every active message, oldest first. Returns how many.
    pub fn dismiss_all(&self) -> usize {
        let mut dismissed = 0;
        for message in self.messages() {
            if self.dismiss(&message) {
                dismissed += 1;
            }
        }
        dismissed
    }

    #[must_use]
    pub fn contains(&self, message: &MessageRef) -> bool {
        self.inner.state.borrow().queued.contains(message)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.borrow().queued.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().queued.is_empty()
    }

    /// Active messages in queue order.
    #[must_use]
    pub fn messages(&self) -> Vec<MessageRef> {
        self.inner.state.borrow().queued.clone()
    }

    /// Registers an observer for both events.
    ///
    /// Observers run on the calling thread, inside `queue`/`dismiss`, and
    /// may call back into the manager.
    pub fn subscribe(&self, observer: impl Fn(&ManagerEvent) + 'static) -> SubscriptionId {
        let mut state = self.inner.state.borrow_mut();
        let id = SubscriptionId(state.next_subscription);
        state.next_subscription += 1;
        state.observers.push((id, Rc::new(observer)));
        id
    }

    pub fn on_queued(&self, observer: impl Fn(&MessageRef) + 'static) -> SubscriptionId {
        self.subscribe(move |event| {
            if let ManagerEvent::Queued(message) = event {
                observer(message);
            }
        })
    }

    pub fn on_dismissed(&self, observer: impl Fn(&MessageRef) + 'static) -> SubscriptionId {
        self.subscribe(move |event| {
            if let ManagerEvent::Dismissed(message) = event {
                observer(message);
            }
        })
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.inner.state.borrow_mut();
        let before = state.observers.len();
        state.observers.retain(|(sub, _)| *sub != id);
        state.observers.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.state.borrow().observers.len()
    }

    /// Hands `action` to the scheduler, logging when it is scheduled and run.
    pub fn schedule(&self, delay: Duration, action: DelayedAction) {
        let diagnostics = self.inner.state.borrow().diagnostics.clone();
        let action: DelayedAction = match diagnostics {
            Some(handle) => {
                #[allow(clippy::cast_possible_truncation)] // Delays in ms fit comfortably in u64
                let delay_ms = delay.as_millis() as u64;
                handle.log(DiagnosticEventKind::DelayScheduled { delay_ms });
                Box::new(move || {
                    handle.log(DiagnosticEventKind::DelayFired);
                    action();
                })
            }
            None => action,
        };
        self.inner.scheduler.schedule(delay, action);
    }

    /// Dismisses `message` once `delay` has elapsed.
    ///
    /// The pending action holds the manager weakly; if the manager is gone
    /// by then, nothing happens.
    pub fn dismiss_after(&self, message: &MessageRef, delay: Duration) {
        let manager = self.downgrade();
        let message = message.clone();
        self.schedule(
            delay,
            Box::new(move || {
                if let Some(manager) = manager.upgrade() {
                    manager.dismiss(&message);
                }
            }),
        );
    }

    /// Runs due actions of a polled scheduler. Call this from the host's
    /// periodic tick (e.g., every 100-500ms).
    pub fn tick(&self) -> usize {
        self.inner.scheduler.tick(Instant::now())
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakManager {
        WeakManager(Rc::downgrade(&self.inner))
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Manager) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn log(&self, kind: DiagnosticEventKind) {
        if let Some(handle) = &self.inner.state.borrow().diagnostics {
            handle.log(kind);
        }
    }

    fn emit(observers: &[Observer], event: &ManagerEvent) {
        for observer in observers {
            observer(event);
        }
    }
}

impl State {
    /// Observers are called on a snapshot so they can (un)subscribe, queue
    /// or dismiss while an event is being delivered.
    fn snapshot_observers(&self) -> Vec<Observer> {
        self.observers.iter().map(|(_, o)| Rc::clone(o)).collect()
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Manager")
            .field("queued", &state.queued.len())
            .field("observers", &state.observers.len())
            .field("auto_dismiss", &self.inner.auto_dismiss.get())
            .finish_non_exhaustive()
    }
}

/// Non-owning counterpart of [`Manager`], held by callbacks that messages own.
#[derive(Clone)]
pub struct WeakManager(Weak<Inner>);

impl WeakManager {
    #[must_use]
    pub fn upgrade(&self) -> Option<Manager> {
        self.0.upgrade().map(|inner| Manager { inner })
    }
}

impl fmt::Debug for WeakManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakManager(..)")
    }
}
