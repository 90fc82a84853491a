// SPDX-License-Identifier: MPL-2.0
//! Toast notification queue.
//!
//! This module holds the rendering-agnostic core: which messages are active,
//! how they are configured, and when observers hear about them. Drawing is
//! left to whoever subscribes.
//!
//! # Components
//!
//! - [`message`] - `MessageContent`, the `NotificationMessage` contract and `MessageRef` handles
//! - [`button`] - `NotificationButton` contract and the stock `Button`
//! - [`factory`] - `NotificationFactory` for plugging in custom message/button types
//! - [`manager`] - `Manager`, the queue and its `Queued`/`Dismissed` events
//! - [`builder`] - fluent `Builder` and the dismiss-first `DismissButton`
//! - [`scheduler`] - delayed actions, polled (`TickScheduler`) or tokio-driven (`LocalScheduler`)
//! - [`container`] - headless `Container` a renderer can mirror a manager into
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use toast_queue::notifications::Manager;
//!
//! let manager = Manager::new();
//! manager.on_queued(|message| println!("show {:?}", message.header()));
//! manager.on_dismissed(|message| println!("hide {:?}", message.header()));
//!
//! manager
//!     .create_message()
//!     .header("Lost connection to server")
//!     .body("Reconnecting...")
//!     .dismiss().with_delay(Duration::from_secs(5))
//!     .queue();
//!
//! // From the host's periodic tick:
//! manager.tick();
//! ```
//!
//! Everything here is single-threaded (`Rc`-based). Queue, dismiss and
//! observer callbacks all run on the thread that owns the manager.

pub mod builder;
pub mod button;
pub mod container;
pub mod factory;
pub mod manager;
pub mod message;
pub mod scheduler;

pub use builder::{Builder, DismissButton};
pub use button::{Button, ButtonCallback, NotificationButton};
pub use container::Container;
pub use factory::{DefaultFactory, NotificationFactory};
pub use manager::{Manager, ManagerEvent, SubscriptionId, WeakManager};
pub use message::{
    Animation, Brush, Content, ContentLocation, Curve, Lifecycle, MessageContent, MessageRef,
    Notification, NotificationMessage, Visibility, WeakMessageRef,
};
pub use scheduler::{DelayedAction, LocalScheduler, Scheduler, TickScheduler};
