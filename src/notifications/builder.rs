// SPDX-License-Identifier: MPL-2.0
//! Fluent construction of a message.
//!
//! ```
//! use toast_queue::notifications::Manager;
//!
//! let manager = Manager::new();
//! let message = manager
//!     .create_message()
//!     .accent("#1751C3")
//!     .background("#333")
//!     .badge("Info")
//!     .body("Update will be installed on next application restart.")
//!     .dismiss().with_button("Update now", |_| {})
//!     .dismiss().with_button("Later", |_| {})
//!     .queue();
//!
//! assert!(manager.contains(&message));
//! ```

use super::button::NotificationButton;
use super::manager::Manager;
use super::message::{Animation, Brush, Content, ContentLocation, Curve, MessageContent, MessageRef};
use crate::diagnostics::DiagnosticEventKind;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::time::Duration;

/// Configures one message and submits it to its manager.
///
/// The message is created by the manager's factory when the builder is
/// created; every setter mutates it in place.
#[derive(Clone)]
#[must_use]
pub struct Builder {
    manager: Manager,
    message: MessageRef,
}

impl Builder {
    pub(crate) fn new(manager: Manager) -> Self {
        let message = manager.factory().new_message();
        Self { manager, message }
    }

    /// The message being built.
    #[must_use]
    pub fn message(&self) -> &MessageRef {
        &self.message
    }

    #[must_use]
    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    fn edit(self, f: impl FnOnce(&mut MessageContent)) -> Self {
        f(self.message.borrow_mut().content_mut());
        self
    }

    /// Applies `f` only if the message supports animation.
    fn edit_animation(self, f: impl FnOnce(&mut Animation)) -> Self {
        if let Some(animation) = self.message.borrow_mut().animation_mut() {
            f(animation);
        }
        self
    }

    pub fn header(self, header: impl Into<String>) -> Self {
        let header = header.into();
        self.edit(|c| c.set_header(Some(header)))
    }

    pub fn body(self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.edit(|c| c.set_body(Some(body)))
    }

    pub fn badge(self, badge: impl Into<String>) -> Self {
        let badge = badge.into();
        self.edit(|c| c.set_badge(Some(badge)))
    }

    pub fn accent(self, brush: impl Into<Brush>) -> Self {
        let brush = brush.into();
        self.edit(|c| c.set_accent(Some(brush)))
    }

    pub fn background(self, brush: impl Into<Brush>) -> Self {
        let brush = brush.into();
        self.edit(|c| c.set_background(Some(brush)))
    }

    pub fn foreground(self, brush: impl Into<Brush>) -> Self {
        let brush = brush.into();
        self.edit(|c| c.set_foreground(Some(brush)))
    }

    pub fn badge_accent(self, brush: impl Into<Brush>) -> Self {
        let brush = brush.into();
        self.edit(|c| c.set_badge_accent(Some(brush)))
    }

    pub fn button_accent(self, brush: impl Into<Brush>) -> Self {
        let brush = brush.into();
        self.edit(|c| c.set_button_accent(Some(brush)))
    }

    /// Content drawn over the whole message, e.g. a progress indicator.
    pub fn overlay(self, content: impl Into<Content>) -> Self {
        let content = content.into();
        self.edit(|c| c.set_overlay(Some(content)))
    }

    pub fn additional_content(self, location: ContentLocation, content: impl Into<Content>) -> Self {
        let content = content.into();
        self.edit(|c| c.set_additional_content(location, Some(content)))
    }

    pub fn animates(self, enabled: bool) -> Self {
        self.edit_animation(|a| a.enabled = enabled)
    }

    pub fn animation_in_duration(self, duration: Duration) -> Self {
        self.edit_animation(|a| a.in_duration = duration)
    }

    pub fn animation_out_duration(self, duration: Duration) -> Self {
        self.edit_animation(|a| a.out_duration = duration)
    }

    pub fn animation_in(self, curve: Curve) -> Self {
        self.edit_animation(|a| a.in_curve = Some(curve))
    }

    pub fn animation_out(self, curve: Curve) -> Self {
        self.edit_animation(|a| a.out_curve = Some(curve))
    }

    /// Appends a button created by the manager's factory.
    pub fn with_button(
        self,
        content: impl Into<Content>,
        callback: impl Fn(&dyn NotificationButton) + 'static,
    ) -> Self {
        let mut button = self.manager.factory().new_button();
        button.set_callback(Rc::new(callback));
        button.set_content(content.into());
        self.add_button(button)
    }

    /// Appends an already configured button.
    pub fn add_button(self, button: Box<dyn NotificationButton>) -> Self {
        let button: Rc<dyn NotificationButton> = Rc::from(button);
        self.edit(|c| c.push_button(button))
    }

    /// Makes the next button (or delay) dismiss this message first.
    pub fn dismiss(self) -> DismissButton {
        DismissButton { builder: self }
    }

    /// Runs `action` with the message once `delay` has elapsed.
    ///
    /// The delay cannot be cancelled. Pass an action that dismisses the
    /// message for auto-dismiss, or use `.dismiss().with_delay(..)`.
    pub fn delay(self, delay: Duration, action: impl FnOnce(&MessageRef) + 'static) -> Self {
        let message = self.message.clone();
        self.manager
            .schedule(delay, Box::new(move || action(&message)));
        self
    }

    /// Submits the message to the manager and returns it.
    ///
    /// Queueing twice is harmless: the second call is the manager's
    /// "already queued" no-op. A newly queued message also starts the
    /// manager's auto-dismiss timer, when one is configured.
    pub fn queue(&self) -> MessageRef {
        if self.manager.queue(&self.message) {
            if let Some(delay) = self.manager.auto_dismiss() {
                self.manager.dismiss_after(&self.message, delay);
            }
        }
        self.message.clone()
    }
}

/// Returned by [`Builder::dismiss`]: whatever is attached next dismisses
/// the message before doing anything else.
#[must_use]
pub struct DismissButton {
    builder: Builder,
}

impl DismissButton {
    /// Appends a button that dismisses the message, then runs `callback`.
    ///
    /// The callback runs even if a dismissal observer panics; the panic is
    /// resumed once the callback has returned.
    pub fn with_button(
        self,
        content: impl Into<Content>,
        callback: impl Fn(&dyn NotificationButton) + 'static,
    ) -> Builder {
        let manager = self.builder.manager.downgrade();
        let message = self.builder.message.downgrade();

        let dismiss_then_callback = move |button: &dyn NotificationButton| {
            let live_manager = manager.upgrade();
            let dismissal = panic::catch_unwind(AssertUnwindSafe(|| {
                if let (Some(manager), Some(message)) = (&live_manager, message.upgrade()) {
                    manager.dismiss(&message);
                }
            }));
            callback(button);
            if let Err(payload) = dismissal {
                if let Some(manager) = &live_manager {
                    manager.log(DiagnosticEventKind::CallbackPanicked {
                        message: panic_message(payload.as_ref()),
                    });
                }
                panic::resume_unwind(payload);
            }
        };

        self.builder.with_button(content, dismiss_then_callback)
    }

    /// Dismisses the message once `delay` has elapsed.
    pub fn with_delay(self, delay: Duration) -> Builder {
        self.builder
            .manager
            .dismiss_after(&self.builder.message, delay);
        self.builder
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticsCollector;
    use crate::notifications::factory::{DefaultFactory, NotificationFactory};
    use crate::notifications::{
        Button, Lifecycle, ManagerEvent, NotificationMessage, Scheduler, TickScheduler, Visibility,
    };
    use std::any::Any;
    use std::cell::{Cell, RefCell};
    use std::time::Instant;

    /// Message variant without the animation capability.
    #[derive(Default)]
    struct PlainMessage {
        content: MessageContent,
    }

    impl NotificationMessage for PlainMessage {
        fn content(&self) -> &MessageContent {
            &self.content
        }

        fn content_mut(&mut self) -> &mut MessageContent {
            &mut self.content
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct PlainFactory;

    impl NotificationFactory for PlainFactory {
        fn new_message(&self) -> MessageRef {
            MessageRef::new(PlainMessage::default())
        }

        fn new_button(&self) -> Box<dyn NotificationButton> {
            Box::new(Button::default())
        }
    }

    fn manual_manager() -> (Manager, Rc<TickScheduler>) {
        let scheduler = Rc::new(TickScheduler::manual(Instant::now()));
        let manager = Manager::with_parts(Rc::new(DefaultFactory::new()), scheduler.clone());
        (manager, scheduler)
    }

    fn button_text(button: &Rc<dyn NotificationButton>) -> Option<String> {
        button
            .content()
            .and_then(Content::as_text)
            .map(str::to_owned)
    }

    #[test]
    fn setters_mutate_the_bound_message() {
        let manager = Manager::new();
        let builder = manager
            .create_message()
            .header("Lost connection to server")
            .body("Reconnecting...")
            .accent("#F15B19")
            .background("#F15B19")
            .foreground("#FFFFFF")
            .overlay(Content::custom(0.5_f32));

        let message = builder.message().borrow();
        let content = message.content();
        assert_eq!(content.header(), Some("Lost connection to server"));
        assert_eq!(content.body(), Some("Reconnecting..."));
        assert_eq!(content.accent(), Some(&Brush::from("#F15B19")));
        assert_eq!(content.foreground(), Some(&Brush::from("#FFFFFF")));
        assert_eq!(
            content.overlay().and_then(|o| o.downcast_ref::<f32>()),
            Some(&0.5)
        );
    }

    #[test]
    fn builder_does_not_queue_until_asked() {
        let manager = Manager::new();
        let builder = manager.create_message().header("Pending");
        assert!(!manager.contains(builder.message()));

        let message = builder.queue();
        assert!(manager.contains(&message));
    }

    #[test]
    fn queue_twice_is_harmless() {
        let manager = Manager::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        manager.on_queued(move |_| c.set(c.get() + 1));

        let builder = manager.create_message().body("Once");
        let first = builder.queue();
        let second = builder.queue();

        assert_eq!(first, second);
        assert_eq!(manager.len(), 1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn visibility_scenario_header_and_body() {
        let manager = Manager::new();
        let message = manager
            .create_message()
            .header("Lost connection")
            .body("Reconnecting...")
            .queue();

        assert_eq!(manager.len(), 1);
        let borrowed = message.borrow();
        let content = borrowed.content();
        assert_eq!(content.header_visibility(), Visibility::Visible);
        assert_eq!(content.body_visibility(), Visibility::Visible);
        assert_eq!(content.badge_visibility(), Visibility::Hidden);
        assert!(content.buttons().is_empty());
    }

    #[test]
    fn empty_text_stays_hidden() {
        let manager = Manager::new();
        let message = manager.create_message().header("").badge("Warn").queue();

        let borrowed = message.borrow();
        assert_eq!(borrowed.content().header_visibility(), Visibility::Hidden);
        assert_eq!(borrowed.content().badge_visibility(), Visibility::Visible);
    }

    #[test]
    fn buttons_keep_insertion_order() {
        let manager = Manager::new();
        let message = manager
            .create_message()
            .with_button("Try again", |_| {})
            .dismiss()
            .with_button("Ignore", |_| {})
            .queue();

        let labels: Vec<_> = message.buttons().iter().map(button_text).collect();
        assert_eq!(
            labels,
            vec![Some("Try again".to_string()), Some("Ignore".to_string())]
        );
    }

    #[test]
    fn plain_button_does_not_dismiss() {
        let manager = Manager::new();
        let pressed = Rc::new(Cell::new(false));
        let p = Rc::clone(&pressed);
        let message = manager
            .create_message()
            .with_button("Try again", move |_| p.set(true))
            .queue();

        message.buttons()[0].activate();

        assert!(pressed.get());
        assert!(manager.contains(&message));
    }

    #[test]
    fn dismiss_button_dismisses_before_callback() {
        let manager = Manager::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let observer_log = Rc::clone(&log);
        manager.on_dismissed(move |_| observer_log.borrow_mut().push("dismissed"));

        let callback_log = Rc::clone(&log);
        let weak = manager.downgrade();
        let message = manager
            .create_message()
            .dismiss()
            .with_button("Update now", move |_| {
                let still_active = weak
                    .upgrade()
                    .map(|m| m.len())
                    .unwrap_or_default();
                callback_log.borrow_mut().push(if still_active == 0 {
                    "callback-after-removal"
                } else {
                    "callback-too-early"
                });
            })
            .queue();

        message.buttons()[0].activate();

        assert_eq!(*log.borrow(), vec!["dismissed", "callback-after-removal"]);
        assert!(manager.is_empty());
    }

    #[test]
    fn dismiss_button_passes_itself_to_callback() {
        let manager = Manager::new();
        let seen = Rc::new(RefCell::new(None));
        let s = Rc::clone(&seen);
        let message = manager
            .create_message()
            .dismiss()
            .with_button("Later", move |b| {
                *s.borrow_mut() = b.content().and_then(Content::as_text).map(str::to_owned);
            })
            .queue();

        message.buttons()[0].activate();
        assert_eq!(seen.borrow().as_deref(), Some("Later"));
    }

    #[test]
    fn callback_runs_even_if_dismissal_observer_panics() {
        let manager = Manager::new();
        let mut collector = DiagnosticsCollector::default();
        manager.set_diagnostics(collector.handle());
        manager.on_dismissed(|_| panic!("renderer failed"));

        let ran = Rc::new(Cell::new(false));
        let r = Rc::clone(&ran);
        let message = manager
            .create_message()
            .dismiss()
            .with_button("Dismiss", move |_| r.set(true))
            .queue();

        let button = Rc::clone(&message.buttons()[0]);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| button.activate()));

        assert!(outcome.is_err());
        assert!(ran.get());
        assert!(!manager.contains(&message));

        collector.process_pending();
        assert!(collector.iter().any(|e| matches!(
            &e.kind,
            DiagnosticEventKind::CallbackPanicked { message } if message == "renderer failed"
        )));
    }

    #[test]
    fn dismiss_button_on_unqueued_message_still_runs_callback() {
        let manager = Manager::new();
        let ran = Rc::new(Cell::new(false));
        let r = Rc::clone(&ran);
        let builder = manager
            .create_message()
            .dismiss()
            .with_button("Ok", move |_| r.set(true));

        builder.message().buttons()[0].activate();
        assert!(ran.get());
        assert!(manager.is_empty());
    }

    #[test]
    fn two_dismiss_buttons_fire_one_dismissal() {
        let manager = Manager::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        manager.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let message = manager
            .create_message()
            .dismiss()
            .with_button("Update now", |_| {})
            .dismiss()
            .with_button("Later", |_| {})
            .queue();

        let buttons = message.buttons();
        buttons[1].activate();
        buttons[0].activate();

        assert!(manager.is_empty());
        assert_eq!(
            *events.borrow(),
            vec![
                ManagerEvent::Queued(message.clone()),
                ManagerEvent::Dismissed(message)
            ]
        );
    }

    #[test]
    fn animation_setters_apply_when_capable() {
        let manager = Manager::new();
        let message = manager
            .create_message()
            .animates(true)
            .animation_in_duration(Duration::from_millis(750))
            .animation_out_duration(Duration::from_secs(2))
            .animation_in(Curve::new("ease-out"))
            .queue();

        let borrowed = message.borrow();
        let animation = borrowed.animation().expect("stock message animates");
        assert!(animation.enabled);
        assert_eq!(animation.in_duration, Duration::from_millis(750));
        assert_eq!(animation.out_duration, Duration::from_secs(2));
        assert_eq!(
            animation
                .in_curve
                .as_ref()
                .and_then(|c| c.downcast_ref::<&str>()),
            Some(&"ease-out")
        );
        assert!(animation.out_curve.is_none());
    }

    #[test]
    fn animation_setters_are_no_ops_without_capability() {
        let manager = Manager::with_factory(Rc::new(PlainFactory));
        let message = manager
            .create_message()
            .header("Plain")
            .animates(true)
            .animation_in_duration(Duration::from_secs(1))
            .animation_out(Curve::new(()))
            .queue();

        let borrowed = message.borrow();
        assert!(borrowed.animation().is_none());
        assert_eq!(borrowed.content().header(), Some("Plain"));
        assert!(borrowed.as_any().downcast_ref::<PlainMessage>().is_some());
    }

    #[test]
    fn additional_content_targets_each_slot() {
        let manager = Manager::new();
        let mut builder = manager.create_message();
        for location in ContentLocation::ALL {
            builder = builder.additional_content(location, format!("{location:?}"));
        }

        let message = builder.message().borrow();
        for location in ContentLocation::ALL {
            assert_eq!(
                message
                    .content()
                    .additional_content(location)
                    .and_then(Content::as_text),
                Some(format!("{location:?}").as_str())
            );
        }
    }

    #[test]
    fn delay_runs_action_with_message_after_elapsed() {
        let (manager, scheduler) = manual_manager();
        let seen = Rc::new(RefCell::new(None));
        let s = Rc::clone(&seen);

        let builder = manager
            .create_message()
            .header("Delayed")
            .delay(Duration::from_millis(300), move |m| {
                *s.borrow_mut() = Some(m.clone())
            });

        scheduler.advance(Duration::from_millis(299));
        assert!(seen.borrow().is_none());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(seen.borrow().as_ref(), Some(builder.message()));
    }

    #[test]
    fn dismiss_with_delay_auto_dismisses() {
        let (manager, scheduler) = manual_manager();
        let message = manager
            .create_message()
            .body("This message will be dismissed after 5 seconds.")
            .dismiss()
            .with_delay(Duration::from_secs(5))
            .queue();

        scheduler.advance(Duration::from_millis(4999));
        assert!(manager.contains(&message));

        scheduler.advance(Duration::from_millis(1));
        assert!(manager.is_empty());
    }

    #[test]
    fn configured_auto_dismiss_starts_on_queue() {
        let (manager, scheduler) = manual_manager();
        manager.set_auto_dismiss(Some(Duration::from_secs(3)));

        let builder = manager.create_message().body("Saved");
        assert_eq!(scheduler.pending(), 0);

        let message = builder.queue();
        builder.queue();
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_secs(3));
        assert!(!manager.contains(&message));
    }

    #[test]
    fn late_queue_after_auto_dismiss_stays_dismissed() {
        let (manager, scheduler) = manual_manager();
        manager.set_auto_dismiss(Some(Duration::from_secs(1)));
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        manager.on_queued(move |_| c.set(c.get() + 1));

        let builder = manager.create_message().body("Saved");
        let message = builder.queue();
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(message.lifecycle(), Lifecycle::Dismissed);

        assert_eq!(builder.queue(), message);
        assert!(!manager.contains(&message));
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn add_button_keeps_custom_buttons() {
        let manager = Manager::new();
        let mut custom = Button::default();
        custom.set_content(Content::custom(7_u8));
        let message = manager
            .create_message()
            .add_button(Box::new(custom))
            .queue();

        let buttons = message.buttons();
        assert_eq!(buttons.len(), 1);
        assert_eq!(
            buttons[0].content().and_then(|c| c.downcast_ref::<u8>()),
            Some(&7)
        );
    }

    #[test]
    fn dismiss_buttons_do_not_keep_manager_alive() {
        let manager = Manager::new();
        let weak = manager.downgrade();
        let message = manager
            .create_message()
            .dismiss()
            .with_button("Close", |_| {})
            .queue();

        drop(manager);
        assert!(weak.upgrade().is_none());

        // With the manager gone the button only runs its callback.
        message.buttons()[0].activate();
    }
}
