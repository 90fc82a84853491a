// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! A message is shared by reference: the manager, the builder, scheduled
//! actions and the renderer all hold the same [`MessageRef`], and two
//! handles are equal only when they point at the same message.

use super::button::NotificationButton;
use crate::config::{DEFAULT_ANIMATION_IN_MS, DEFAULT_ANIMATION_OUT_MS};
use std::any::Any;
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Style token handed through to the renderer untouched (e.g. `"#F15B19"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Brush(String);

impl Brush {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Brush {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Brush {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Brush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque content: plain text, or any value the renderer knows how to show
/// (a progress indicator, an image handle, a widget description...).
#[derive(Clone)]
pub enum Content {
    Text(String),
    Custom(Rc<dyn Any>),
}

impl Content {
    pub fn custom<T: Any>(value: T) -> Self {
        Content::Custom(Rc::new(value))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Custom(_) => None,
        }
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Content::Text(_) => None,
            Content::Custom(value) => value.downcast_ref::<T>(),
        }
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Content::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Text(value.to_string())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Text(value)
    }
}

/// Opaque easing curve for entrance/exit animations.
#[derive(Clone)]
pub struct Curve(Rc<dyn Any>);

impl Curve {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Curve(..)")
    }
}

/// Whether a text region should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Visible,
    #[default]
    Hidden,
}

impl Visibility {
    /// Visible iff the text is present and non-empty.
    #[must_use]
    pub fn of(text: Option<&str>) -> Self {
        match text {
            Some(text) if !text.is_empty() => Visibility::Visible,
            _ => Visibility::Hidden,
        }
    }
}

/// Slot for additional content around the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentLocation {
    Top,
    Bottom,
    Left,
    Right,
    Main,
    AboveBadge,
}

impl ContentLocation {
    pub const ALL: [ContentLocation; 6] = [
        ContentLocation::Top,
        ContentLocation::Bottom,
        ContentLocation::Left,
        ContentLocation::Right,
        ContentLocation::Main,
        ContentLocation::AboveBadge,
    ];

    fn index(self) -> usize {
        match self {
            ContentLocation::Top => 0,
            ContentLocation::Bottom => 1,
            ContentLocation::Left => 2,
            ContentLocation::Right => 3,
            ContentLocation::Main => 4,
            ContentLocation::AboveBadge => 5,
        }
    }
}

/// Entrance/exit animation settings, consumed by the renderer.
#[derive(Debug, Clone)]
pub struct Animation {
    pub enabled: bool,
    pub in_duration: Duration,
    pub out_duration: Duration,
    pub in_curve: Option<Curve>,
    pub out_curve: Option<Curve>,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            enabled: false,
            in_duration: Duration::from_millis(DEFAULT_ANIMATION_IN_MS),
            out_duration: Duration::from_millis(DEFAULT_ANIMATION_OUT_MS),
            in_curve: None,
            out_curve: None,
        }
    }
}

/// The configurable content every message variant carries.
#[derive(Clone, Default)]
pub struct MessageContent {
    header: Option<String>,
    header_visibility: Visibility,
    body: Option<String>,
    body_visibility: Visibility,
    badge: Option<String>,
    badge_visibility: Visibility,
    accent: Option<Brush>,
    background: Option<Brush>,
    foreground: Option<Brush>,
    badge_accent: Option<Brush>,
    button_accent: Option<Brush>,
    overlay: Option<Content>,
    additional: [Option<Content>; 6],
    buttons: Vec<Rc<dyn NotificationButton>>,
}

impl MessageContent {
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn set_header(&mut self, header: Option<String>) {
        self.header_visibility = Visibility::of(header.as_deref());
        self.header = header;
    }

    #[must_use]
    pub fn header_visibility(&self) -> Visibility {
        self.header_visibility
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn set_body(&mut self, body: Option<String>) {
        self.body_visibility = Visibility::of(body.as_deref());
        self.body = body;
    }

    #[must_use]
    pub fn body_visibility(&self) -> Visibility {
        self.body_visibility
    }

    #[must_use]
    pub fn badge(&self) -> Option<&str> {
        self.badge.as_deref()
    }

    pub fn set_badge(&mut self, badge: Option<String>) {
        self.badge_visibility = Visibility::of(badge.as_deref());
        self.badge = badge;
    }

    #[must_use]
    pub fn badge_visibility(&self) -> Visibility {
        self.badge_visibility
    }

    #[must_use]
    pub fn accent(&self) -> Option<&Brush> {
        self.accent.as_ref()
    }

    pub fn set_accent(&mut self, accent: Option<Brush>) {
        self.accent = accent;
    }

    #[must_use]
    pub fn background(&self) -> Option<&Brush> {
        self.background.as_ref()
    }

    pub fn set_background(&mut self, background: Option<Brush>) {
        self.background = background;
    }

    #[must_use]
    pub fn foreground(&self) -> Option<&Brush> {
        self.foreground.as_ref()
    }

    pub fn set_foreground(&mut self, foreground: Option<Brush>) {
        self.foreground = foreground;
    }

    #[must_use]
    pub fn badge_accent(&self) -> Option<&Brush> {
        self.badge_accent.as_ref()
    }

    pub fn set_badge_accent(&mut self, brush: Option<Brush>) {
        self.badge_accent = brush;
    }

    #[must_use]
    pub fn button_accent(&self) -> Option<&Brush> {
        self.button_accent.as_ref()
    }

    pub fn set_button_accent(&mut self, brush: Option<Brush>) {
        self.button_accent = brush;
    }

    /// Badge accent, falling back to the message accent when unset.
    #[must_use]
    pub fn effective_badge_accent(&self) -> Option<&Brush> {
        self.badge_accent.as_ref().or(self.accent.as_ref())
    }

    /// Button accent, falling back to the message accent when unset.
    #[must_use]
    pub fn effective_button_accent(&self) -> Option<&Brush> {
        self.button_accent.as_ref().or(self.accent.as_ref())
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&Content> {
        self.overlay.as_ref()
    }

    pub fn set_overlay(&mut self, overlay: Option<Content>) {
        self.overlay = overlay;
    }

    #[must_use]
    pub fn additional_content(&self, location: ContentLocation) -> Option<&Content> {
        self.additional[location.index()].as_ref()
    }

    pub fn set_additional_content(&mut self, location: ContentLocation, content: Option<Content>) {
        self.additional[location.index()] = content;
    }

    /// Buttons in display order.
    #[must_use]
    pub fn buttons(&self) -> &[Rc<dyn NotificationButton>] {
        &self.buttons
    }

    pub fn push_button(&mut self, button: Rc<dyn NotificationButton>) {
        self.buttons.push(button);
    }
}

impl fmt::Debug for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageContent")
            .field("header", &self.header)
            .field("body", &self.body)
            .field("badge", &self.badge)
            .field("accent", &self.accent)
            .field("background", &self.background)
            .field("foreground", &self.foreground)
            .field("overlay", &self.overlay)
            .field("buttons", &self.buttons.len())
            .finish_non_exhaustive()
    }
}

/// Contract every message variant fulfils.
///
/// Applications add fields by wrapping a [`MessageContent`] in their own type
/// and supplying it through a custom factory. Animation is an optional
/// capability: variants without it keep the default `None` accessors and
/// animation setters on the builder become no-ops.
pub trait NotificationMessage: Any {
    fn content(&self) -> &MessageContent;

    fn content_mut(&mut self) -> &mut MessageContent;

    fn animation(&self) -> Option<&Animation> {
        None
    }

    fn animation_mut(&mut self) -> Option<&mut Animation> {
        None
    }

    /// Lets hosts recover their own message type.
    fn as_any(&self) -> &dyn Any;
}

/// The stock message: full content plus the animation capability.
#[derive(Debug, Clone, Default)]
pub struct Notification {
    pub content: MessageContent,
    pub animation: Animation,
}

impl NotificationMessage for Notification {
    fn content(&self) -> &MessageContent {
        &self.content
    }

    fn content_mut(&mut self) -> &mut MessageContent {
        &mut self.content
    }

    fn animation(&self) -> Option<&Animation> {
        Some(&self.animation)
    }

    fn animation_mut(&mut self) -> Option<&mut Animation> {
        Some(&mut self.animation)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Where a message is in its lifecycle. Only ever moves forward:
/// `Unqueued` to `Queued` to `Dismissed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Unqueued,
    Queued,
    Dismissed,
}

struct Slot<M: ?Sized> {
    lifecycle: Cell<Lifecycle>,
    message: RefCell<M>,
}

/// Shared handle to a message. Equality is identity.
#[derive(Clone)]
pub struct MessageRef(Rc<Slot<dyn NotificationMessage>>);

impl MessageRef {
    pub fn new<M: NotificationMessage>(message: M) -> Self {
        Self(Rc::new(Slot {
            lifecycle: Cell::new(Lifecycle::Unqueued),
            message: RefCell::new(message),
        }))
    }

    /// # Panics
    ///
    /// Panics if the message is currently mutably borrowed.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, dyn NotificationMessage> {
        self.0.message.borrow()
    }

    /// # Panics
    ///
    /// Panics if the message is currently borrowed.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, dyn NotificationMessage> {
        self.0.message.borrow_mut()
    }

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.0.lifecycle.get()
    }

    pub(crate) fn set_lifecycle(&self, lifecycle: Lifecycle) {
        self.0.lifecycle.set(lifecycle);
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &MessageRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakMessageRef {
        WeakMessageRef(Rc::downgrade(&self.0))
    }

    /// Snapshot of the buttons, so they can be activated without holding a
    /// borrow of the message.
    #[must_use]
    pub fn buttons(&self) -> Vec<Rc<dyn NotificationButton>> {
        self.0.message.borrow().content().buttons().to_vec()
    }

    /// Header text, or `None` when absent or the message is being mutated.
    #[must_use]
    pub fn header(&self) -> Option<String> {
        self.0
            .message
            .try_borrow()
            .ok()
            .and_then(|message| message.content().header().map(str::to_owned))
    }
}

impl PartialEq for MessageRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for MessageRef {}

impl fmt::Debug for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageRef")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .field(&self.lifecycle())
            .field(&self.header())
            .finish()
    }
}

/// Non-owning counterpart of [`MessageRef`], used by callbacks the message
/// itself owns.
#[derive(Clone)]
pub struct WeakMessageRef(Weak<Slot<dyn NotificationMessage>>);

impl WeakMessageRef {
    #[must_use]
    pub fn upgrade(&self) -> Option<MessageRef> {
        self.0.upgrade().map(MessageRef)
    }
}

impl fmt::Debug for WeakMessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakMessageRef(..)")
    }
}
