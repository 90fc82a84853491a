// SPDX-License-Identifier: MPL-2.0
//! Action buttons attached to a message.

use super::message::Content;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Callback run when a button is activated; receives the button itself.
pub type ButtonCallback = Rc<dyn Fn(&dyn NotificationButton)>;

/// Contract every button variant fulfils.
pub trait NotificationButton: Any {
    fn content(&self) -> Option<&Content>;

    fn set_content(&mut self, content: Content);

    fn callback(&self) -> Option<ButtonCallback>;

    fn set_callback(&mut self, callback: ButtonCallback);

    fn as_any(&self) -> &dyn Any;
}

impl dyn NotificationButton {
    /// Runs the callback, if one is set.
    pub fn activate(&self) {
        if let Some(callback) = self.callback() {
            callback(self);
        }
    }
}

/// The stock button: content plus an optional callback.
#[derive(Clone, Default)]
pub struct Button {
    content: Option<Content>,
    callback: Option<ButtonCallback>,
}

impl NotificationButton for Button {
    fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    fn set_content(&mut self, content: Content) {
        self.content = Some(content);
    }

    fn callback(&self) -> Option<ButtonCallback> {
        self.callback.clone()
    }

    fn set_callback(&mut self, callback: ButtonCallback) {
        self.callback = Some(callback);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("content", &self.content)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
