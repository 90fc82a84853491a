// SPDX-License-Identifier: MPL-2.0
//! Headless display collection mirroring a manager's active set.
//!
//! A renderer owns one `Container` per manager it draws. While attached,
//! the container is the only writer of its item list: `Queued` appends,
//! `Dismissed` removes. An external items source and an attached manager
//! are mutually exclusive.

use super::manager::{Manager, ManagerEvent, SubscriptionId, WeakManager};
use super::message::MessageRef;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Default)]
struct ContainerState {
    items: Vec<MessageRef>,
    items_source: Option<Vec<MessageRef>>,
    attachment: Option<(WeakManager, SubscriptionId)>,
}

#[derive(Default)]
pub struct Container {
    state: Rc<RefCell<ContainerState>>,
}

impl Container {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts mirroring `manager`, seeded with its currently active messages.
    ///
    /// Attaching to the manager already attached is a no-op; attaching to
    /// another manager detaches from the previous one first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ItemsSourceConflict`] if an items source is set.
    pub fn attach(&self, manager: &Manager) -> Result<()> {
        if self.state.borrow().items_source.is_some() {
            return Err(Error::ItemsSourceConflict);
        }
        if self.attached_manager().is_some_and(|m| m.ptr_eq(manager)) {
            return Ok(());
        }
        self.detach();

        let weak_state = Rc::downgrade(&self.state);
        let id = manager.subscribe(move |event| Self::apply(&weak_state, event));

        let mut state = self.state.borrow_mut();
        state.items = manager.messages();
        state.attachment = Some((manager.downgrade(), id));
        Ok(())
    }

    /// Stops mirroring and clears the items. Returns `false` if nothing
    /// was attached.
    pub fn detach(&self) -> bool {
        let Some((manager, id)) = self.state.borrow_mut().attachment.take() else {
            return false;
        };
        if let Some(manager) = manager.upgrade() {
            manager.unsubscribe(id);
        }
        self.state.borrow_mut().items.clear();
        true
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state.borrow().attachment.is_some()
    }

    /// Displays `source` instead of a manager's messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ItemsSourceConflict`] while attached to a manager.
    pub fn set_items_source(&self, source: Vec<MessageRef>) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.attachment.is_some() {
            return Err(Error::ItemsSourceConflict);
        }
        state.items_source = Some(source);
        Ok(())
    }

    pub fn clear_items_source(&self) -> Option<Vec<MessageRef>> {
        self.state.borrow_mut().items_source.take()
    }

    /// What a renderer should draw, in display order.
    #[must_use]
    pub fn items(&self) -> Vec<MessageRef> {
        let state = self.state.borrow();
        state
            .items_source
            .clone()
            .unwrap_or_else(|| state.items.clone())
    }

    fn attached_manager(&self) -> Option<Manager> {
        self.state
            .borrow()
            .attachment
            .as_ref()
            .and_then(|(manager, _)| manager.upgrade())
    }

    fn apply(state: &Weak<RefCell<ContainerState>>, event: &ManagerEvent) {
        let Some(state) = state.upgrade() else {
            return;
        };
        let mut state = state.borrow_mut();
        match event {
            ManagerEvent::Queued(message) => {
                if !state.items.contains(message) {
                    state.items.push(message.clone());
                }
            }
            ManagerEvent::Dismissed(message) => state.items.retain(|m| m != message),
        }
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Container")
            .field("items", &state.items.len())
            .field("has_items_source", &state.items_source.is_some())
            .field("attached", &state.attachment.is_some())
            .finish()
    }
}
