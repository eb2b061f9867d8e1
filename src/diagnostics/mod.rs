// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the notice stack.
//!
//! The coordinator reports lifecycle events through a [`DiagnosticsHandle`].
//! Events land in a memory-bounded [`CircularBuffer`] owned by the
//! [`DiagnosticsCollector`], which the host drains on each tick and can
//! export as a TOML report.
//!
//! - [`CircularBuffer`]: ring buffer with validated capacity
//! - [`DiagnosticEvent`]: one recorded event with its timestamps
//! - [`BufferCapacity`]: newtype for the buffer bounds

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{default_export_filename, DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, ExitReason, SerializableEvent};
