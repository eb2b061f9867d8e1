// SPDX-License-Identifier: MPL-2.0
//! Lifecycle events recorded by the notice stack.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stack::NoticeKind;

/// Why a notice started its exit animation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// The dismiss timer elapsed.
    Timeout,
    /// The host asked for an animated dismiss.
    Dismissed,
}

/// What happened in the stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A notice got a slot and started entering.
    NoticeShown {
        notice: u64,
        kind: NoticeKind,
        slot: usize,
    },

    /// A notice arrived while the stack was full.
    NoticeQueued { notice: u64, kind: NoticeKind },

    /// The entry animation of a notice was observed as complete.
    EntryCompleted { notice: u64 },

    /// The dismiss countdown started.
    TimerArmed { notice: u64, duration_ms: u64 },

    /// The dismiss timer fired during an entry and was pushed back.
    DismissDeferred { notice: u64 },

    /// A notice started sliding out.
    ExitStarted { notice: u64, reason: ExitReason },

    /// A notice left the registry.
    NoticeRemoved { notice: u64, forced: bool },

    /// Survivors were repositioned after a removal.
    StackReflowed { moved: usize, promoted: usize },

    /// Every notice was dropped at once.
    StackCleared { count: usize },

    /// An internal error was absorbed.
    Failure {
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<u64>,
        message: String,
    },
}

/// A recorded event with its monotonic and wall-clock times.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    pub kind: DiagnosticEventKind,
    pub at: Instant,
    pub recorded_at: DateTime<Utc>,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            kind,
            at: Instant::now(),
            recorded_at: Utc::now(),
        }
    }

    /// The notice the event is about, if it concerns a single notice.
    #[must_use]
    pub fn notice(&self) -> Option<u64> {
        match &self.kind {
            DiagnosticEventKind::NoticeShown { notice, .. }
            | DiagnosticEventKind::NoticeQueued { notice, .. }
            | DiagnosticEventKind::EntryCompleted { notice }
            | DiagnosticEventKind::TimerArmed { notice, .. }
            | DiagnosticEventKind::DismissDeferred { notice }
            | DiagnosticEventKind::ExitStarted { notice, .. }
            | DiagnosticEventKind::NoticeRemoved { notice, .. } => Some(*notice),
            DiagnosticEventKind::Failure { notice, .. } => *notice,
            DiagnosticEventKind::StackReflowed { .. } | DiagnosticEventKind::StackCleared { .. } => {
                None
            }
        }
    }
}

/// Serializable form of an event, used for text exports.
#[derive(Debug, Clone, Serialize)]
pub struct SerializableEvent {
    /// Milliseconds since the collector started.
    pub offset_ms: u64,
    /// RFC 3339 wall-clock time.
    pub recorded_at: String,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[allow(clippy::cast_possible_truncation)] // session offsets fit in u64 ms
    #[must_use]
    pub fn new(event: &DiagnosticEvent, started_at: Instant) -> Self {
        Self {
            offset_ms: event.at.saturating_duration_since(started_at).as_millis() as u64,
            recorded_at: event.recorded_at.to_rfc3339(),
            kind: event.kind.clone(),
        }
    }
}
