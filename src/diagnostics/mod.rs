// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording notification lifecycle activity.
//!
//! This module captures what managers and schedulers do (including the
//! silent no-ops of duplicate queues and unknown dismissals), stores it in a
//! memory-bounded circular buffer, and exports it as a JSON report.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped lifecycle event
//! - [`DiagnosticsCollector`] / [`DiagnosticsHandle`]: Storage and the
//!   cheap, non-blocking sender handed to managers

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticReport, DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, SerializableEvent};
