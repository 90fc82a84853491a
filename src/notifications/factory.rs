// SPDX-License-Identifier: MPL-2.0
//! Creation of message and button instances.
//!
//! The factory is the single place an application plugs in its own message
//! or button types; builders and managers only ever see the trait objects.

use super::button::{Button, NotificationButton};
use super::message::{Animation, Brush, MessageRef, Notification};
use crate::config::Config;
use crate::error::Result;

pub trait NotificationFactory {
    /// Returns a fresh message; every call yields a distinct identity.
    fn new_message(&self) -> MessageRef;

    /// Returns a fresh button with no content and no callback.
    fn new_button(&self) -> Box<dyn NotificationButton>;
}

/// Produces [`Notification`]s and [`Button`]s.
///
/// [`DefaultFactory::new`] yields empty messages. [`DefaultFactory::from_config`]
/// pre-applies the configured style and animation defaults, which the
/// builder can still override.
#[derive(Debug, Clone, Default)]
pub struct DefaultFactory {
    accent: Option<Brush>,
    background: Option<Brush>,
    foreground: Option<Brush>,
    animation: Animation,
}

impl DefaultFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::error::Error::InvalidArgument)
    /// if the configured animation durations are unusable.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            accent: config.accent_brush(),
            background: config.background_brush(),
            foreground: config.foreground_brush(),
            animation: config.animation()?,
        })
    }
}

impl NotificationFactory for DefaultFactory {
    fn new_message(&self) -> MessageRef {
        let mut message = Notification {
            animation: self.animation.clone(),
            ..Notification::default()
        };
        message.content.set_accent(self.accent.clone());
        message.content.set_background(self.background.clone());
        message.content.set_foreground(self.foreground.clone());
        MessageRef::new(message)
    }

    fn new_button(&self) -> Box<dyn NotificationButton> {
        Box::new(Button::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::notifications::Visibility;

    #[test]
    fn default_factory_yields_empty_messages() {
        let factory = DefaultFactory::new();
        let message = factory.new_message();
        let borrowed = message.borrow();
        let content = borrowed.content();

        assert!(content.header().is_none());
        assert_eq!(content.header_visibility(), Visibility::Hidden);
        assert_eq!(content.body_visibility(), Visibility::Hidden);
        assert_eq!(content.badge_visibility(), Visibility::Hidden);
        assert!(content.accent().is_none());
        assert!(content.buttons().is_empty());
    }

    #[test]
    fn each_message_is_a_new_identity() {
        let factory = DefaultFactory::new();
        assert_ne!(factory.new_message(), factory.new_message());
    }

    #[test]
    fn new_button_is_blank() {
        let button = DefaultFactory::new().new_button();
        assert!(button.content().is_none());
        assert!(button.callback().is_none());
    }

    #[test]
    fn from_config_applies_style_and_animation() {
        let config = Config {
            accent: Some("#1751C3".into()),
            background: Some("#333".into()),
            animates: Some(true),
            animation_in_secs: Some(0.75),
            animation_out_secs: Some(2.0),
            ..Config::default()
        };
        let factory = DefaultFactory::from_config(&config).expect("valid config");
        let message = factory.new_message();
        let borrowed = message.borrow();

        assert_eq!(borrowed.content().accent(), Some(&Brush::from("#1751C3")));
        assert_eq!(borrowed.content().background(), Some(&Brush::from("#333")));
        assert!(borrowed.content().foreground().is_none());
        let animation = borrowed.animation().expect("animatable");
        assert!(animation.enabled);
        assert_eq!(animation.in_duration.as_millis(), 750);
        assert_eq!(animation.out_duration.as_secs(), 2);
    }

    #[test]
    fn from_config_rejects_invalid_durations() {
        let config = Config {
            animation_out_secs: Some(f64::INFINITY),
            ..Config::default()
        };
        assert!(matches!(
            DefaultFactory::from_config(&config),
            Err(Error::InvalidArgument(_))
        ));
    }
}
