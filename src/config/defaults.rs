// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Timing**: Dismiss floor, default duration and animation lengths
//! - **Layout**: Stack margin, capacity and notice dimensions
//! - **Diagnostics**: Lifecycle trace buffer bounds

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Minimum time a notice stays up once its entry animation has finished.
pub const DEFAULT_NOTICE_FLOOR_MS: u64 = 5_000;

/// Lowest floor a config file may request.
pub const MIN_NOTICE_FLOOR_MS: u64 = 1_000;

/// Highest floor a config file may request.
pub const MAX_NOTICE_FLOOR_MS: u64 = 60_000;

/// Duration used by the `info`/`warning`/`error` shortcuts.
pub const DEFAULT_NOTICE_DURATION_MS: u64 = 8_000;

/// Longest time a notice may stay up. Longer requests are shortened.
pub const MAX_NOTICE_DURATION_MS: u64 = 3_600_000;

/// Entry slide + fade.
pub const DEFAULT_ENTRY_ANIMATION_MS: u64 = 1_000;

/// Exit slide + fade.
pub const DEFAULT_EXIT_ANIMATION_MS: u64 = 800;

/// Survivor repositioning after a removal.
pub const DEFAULT_REFLOW_ANIMATION_MS: u64 = 600;

/// Upper bound for any configured animation length.
pub const MAX_ANIMATION_MS: u64 = 5_000;

/// Delay before retrying a dismiss that arrived while the notice was
/// still entering.
pub const DISMISS_RETRY_DELAY_MS: u64 = 250;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Gap between notices and between the stack and the work-area edge.
pub const DEFAULT_STACK_MARGIN: f32 = 20.0;

/// Largest accepted margin.
pub const MAX_STACK_MARGIN: f32 = 200.0;

/// Soft cap of notices holding an on-screen slot.
pub const DEFAULT_STACK_CAPACITY: usize = 15;

/// Smallest accepted capacity.
pub const MIN_STACK_CAPACITY: usize = 1;

/// Largest accepted capacity.
pub const MAX_STACK_CAPACITY: usize = 64;

/// Fixed notice width.
pub const DEFAULT_NOTICE_WIDTH: f32 = 360.0;

/// Height of a one-line notice.
pub const DEFAULT_NOTICE_HEIGHT: f32 = 88.0;

/// Notices are never shorter than this.
pub const MIN_NOTICE_HEIGHT: f32 = 48.0;

/// Notices are never taller than this.
pub const MAX_NOTICE_HEIGHT: f32 = 150.0;

/// Work area assumed before any geometry has been reported.
pub const FALLBACK_WORK_AREA_WIDTH: f32 = 1280.0;

/// Work area assumed before any geometry has been reported.
pub const FALLBACK_WORK_AREA_HEIGHT: f32 = 720.0;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of lifecycle events retained.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 500;

/// Minimum lifecycle buffer size.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum lifecycle buffer size.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Timing validation
    assert!(MIN_NOTICE_FLOOR_MS > 0);
    assert!(MIN_NOTICE_FLOOR_MS <= DEFAULT_NOTICE_FLOOR_MS);
    assert!(MAX_NOTICE_FLOOR_MS >= DEFAULT_NOTICE_FLOOR_MS);
    assert!(DEFAULT_NOTICE_DURATION_MS >= DEFAULT_NOTICE_FLOOR_MS);
    assert!(MAX_NOTICE_DURATION_MS >= MAX_NOTICE_FLOOR_MS);
    assert!(MAX_NOTICE_DURATION_MS >= DEFAULT_NOTICE_DURATION_MS);
    assert!(DEFAULT_ENTRY_ANIMATION_MS <= MAX_ANIMATION_MS);
    assert!(DEFAULT_EXIT_ANIMATION_MS <= MAX_ANIMATION_MS);
    assert!(DEFAULT_REFLOW_ANIMATION_MS <= MAX_ANIMATION_MS);
    assert!(DISMISS_RETRY_DELAY_MS > 0);

    // Layout validation
    assert!(MIN_STACK_CAPACITY > 0);
    assert!(DEFAULT_STACK_CAPACITY >= MIN_STACK_CAPACITY);
    assert!(DEFAULT_STACK_CAPACITY <= MAX_STACK_CAPACITY);
    assert!(DEFAULT_STACK_MARGIN >= 0.0);
    assert!(DEFAULT_STACK_MARGIN <= MAX_STACK_MARGIN);
    assert!(MIN_NOTICE_HEIGHT > 0.0);
    assert!(DEFAULT_NOTICE_HEIGHT >= MIN_NOTICE_HEIGHT);
    assert!(DEFAULT_NOTICE_HEIGHT <= MAX_NOTICE_HEIGHT);

    // Diagnostics validation
    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
