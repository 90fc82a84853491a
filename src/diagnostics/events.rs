// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for notification lifecycle tracking.
//!
//! Events describe what the manager and scheduler did, including the
//! silent no-ops, so a host can reconstruct a timeline after the fact.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    /// Creates a new diagnostic event with a specific timestamp.
    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A message entered the active set.
    Queued {
        /// Header of the message, when it has one.
        #[serde(skip_serializing_if = "Option::is_none")]
        header: Option<String>,
        /// Active set size after the operation.
        active_count: usize,
    },

    /// A message left the active set.
    Dismissed {
        #[serde(skip_serializing_if = "Option::is_none")]
        header: Option<String>,
        active_count: usize,
    },

    /// `queue` was called for a message that is already active.
    DuplicateQueueIgnored,

    /// `queue` was called for a message that was already dismissed.
    DismissedQueueIgnored,

    /// `dismiss` was called for a message that is not active.
    UnknownDismissIgnored,

    /// A delayed action was handed to the scheduler.
    DelayScheduled {
        /// Requested delay in milliseconds.
        delay_ms: u64,
    },

    /// A delayed action ran.
    DelayFired,

    /// A dismissal observer panicked inside a dismiss-wrapped button.
    CallbackPanicked {
        /// Panic payload, when it was a string.
        message: String,
    },
}

/// Serializable form of a [`DiagnosticEvent`] with a timestamp relative to
/// the start of collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableEvent {
    /// Milliseconds since collection started.
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(timestamp: Instant, started_at: Instant, kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp_ms: timestamp.saturating_duration_since(started_at).as_millis() as u64,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn kind_serializes_with_type_tag() {
        let kind = DiagnosticEventKind::Queued {
            header: Some("Lost connection".into()),
            active_count: 1,
        };
        let json = serde_json::to_string(&kind).expect("serialize");
        assert!(json.contains("\"type\":\"queued\""));
        assert!(json.contains("\"active_count\":1"));
    }

    #[test]
    fn missing_header_is_omitted() {
        let kind = DiagnosticEventKind::Dismissed {
            header: None,
            active_count: 0,
        };
        let json = serde_json::to_string(&kind).expect("serialize");
        assert!(!json.contains("header"));
    }

    #[test]
    fn serializable_event_is_relative_to_start() {
        let start = Instant::now();
        let event = SerializableEvent::new(
            start + Duration::from_millis(1500),
            start,
            DiagnosticEventKind::DelayFired,
        );
        assert_eq!(event.timestamp_ms, 1500);
    }

    #[test]
    fn events_before_start_clamp_to_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let event = SerializableEvent::new(Instant::now(), start, DiagnosticEventKind::DelayFired);
        assert_eq!(event.timestamp_ms, 0);
    }
}
