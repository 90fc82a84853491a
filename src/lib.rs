// SPDX-License-Identifier: MPL-2.0
//! `toast_queue` keeps an ordered queue of toast notifications and tells
//! renderers when messages appear and disappear.
//!
//! It provides a fluent builder for message content, dismiss-first buttons,
//! delayed auto-dismissal, TOML-backed defaults and a bounded diagnostics
//! log of lifecycle events.

#![doc(html_root_url = "https://docs.rs/toast_queue/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod notifications;
