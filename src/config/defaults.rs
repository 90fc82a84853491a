// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Animation**: Entrance/exit durations handed to the renderer
//! - **Auto-dismiss**: Bounds for delayed dismissal
//! - **Diagnostics**: Event buffer and channel sizing

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Default entrance animation duration (in milliseconds).
pub const DEFAULT_ANIMATION_IN_MS: u64 = 250;

/// Default exit animation duration (in milliseconds).
pub const DEFAULT_ANIMATION_OUT_MS: u64 = 250;

/// Longest animation a config file may request (in seconds).
pub const MAX_ANIMATION_SECS: f64 = 60.0;

// ==========================================================================
// Auto-dismiss Defaults
// ==========================================================================

/// Auto-dismiss delay used by the demo when none is configured (in seconds).
pub const DEFAULT_AUTO_DISMISS_SECS: f64 = 5.0;

/// Longest auto-dismiss delay a config file may request (in seconds).
pub const MAX_AUTO_DISMISS_SECS: f64 = 3600.0;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of lifecycle events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 256;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

/// Capacity of the channel between diagnostics handles and the collector.
pub const DIAGNOSTICS_CHANNEL_CAPACITY: usize = 100;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_ANIMATION_IN_MS > 0);
    assert!(DEFAULT_ANIMATION_OUT_MS > 0);
    assert!(MAX_ANIMATION_SECS > 0.0);

    assert!(DEFAULT_AUTO_DISMISS_SECS > 0.0);
    assert!(DEFAULT_AUTO_DISMISS_SECS <= MAX_AUTO_DISMISS_SECS);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DIAGNOSTICS_CHANNEL_CAPACITY > 0);
};
