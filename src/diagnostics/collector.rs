// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing lifecycle events.
//!
//! The collector owns the ring buffer. Producers hold a cloneable
//! [`DiagnosticsHandle`] and never block: events travel over a bounded
//! channel and are dropped when it is full.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, SerializableEvent};
use crate::error::Result;

/// Builds the file name of an export written at `now`.
#[must_use]
pub fn default_export_filename(now: DateTime<Local>) -> String {
    format!("notice_stack_diagnostics_{}.toml", now.format("%Y%m%d_%H%M%S"))
}

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Handle for sending diagnostic events to the collector.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Records an event. Non-blocking; the event is dropped if the channel
    /// is full or the collector is gone.
    pub fn record(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    started_at: String,
    event_count: usize,
    events: &'a [SerializableEvent],
}

/// Central collector for diagnostic events.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves all pending events from the channel into the buffer.
    ///
    /// Call this on each UI tick.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Stored events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Renders the stored events as a TOML report.
    pub fn export_toml(&self) -> Result<String> {
        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| SerializableEvent::new(event, self.started_at))
            .collect();
        let report = Report {
            started_at: self.started_at_utc.to_rfc3339(),
            event_count: events.len(),
            events: &events,
        };
        Ok(toml::to_string(&report)?)
    }

    /// Drains pending events and writes the report into `dir`, creating it
    /// if needed. Returns the path of the written file.
    pub fn export_to_dir(&mut self, dir: &Path) -> Result<PathBuf> {
        self.process_pending();
        let report = self.export_toml()?;
        fs::create_dir_all(dir)?;
        let path = dir.join(default_export_filename(Local::now()));
        fs::write(&path, report)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_flow_from_handle_to_buffer() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.record(DiagnosticEventKind::EntryCompleted { notice: 1 });
        handle.record(DiagnosticEventKind::NoticeRemoved {
            notice: 1,
            forced: false,
        });
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 2);
        assert_eq!(collector.iter().next().and_then(DiagnosticEvent::notice), Some(1));
    }

    #[test]
    fn handle_never_blocks_when_channel_is_full() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(10_000));
        let handle = collector.handle();

        for notice in 0..(DEFAULT_CHANNEL_CAPACITY as u64 + 50) {
            handle.record(DiagnosticEventKind::EntryCompleted { notice });
        }
        collector.process_pending();

        assert_eq!(collector.len(), DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn export_lists_every_event() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        handle.record(DiagnosticEventKind::StackCleared { count: 2 });
        handle.record(DiagnosticEventKind::Failure {
            notice: None,
            message: "geometry unavailable".into(),
        });
        collector.process_pending();

        let report = collector.export_toml().unwrap();
        assert!(report.contains("event_count = 2"));
        assert!(report.contains("stack_cleared"));
        assert!(report.contains("geometry unavailable"));
    }

    #[test]
    fn export_to_dir_writes_pending_events() {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut collector = DiagnosticsCollector::default();
        collector
            .handle()
            .record(DiagnosticEventKind::StackCleared { count: 4 });

        let target = temp_dir.path().join("exports");
        let path = collector.export_to_dir(&target).expect("export failed");

        assert!(path.starts_with(&target));
        let written = std::fs::read_to_string(&path).expect("read failed");
        assert!(written.contains("event_count = 1"));
        assert!(written.contains("stack_cleared"));
    }

    #[test]
    fn export_filename_carries_timestamp() {
        let name = default_export_filename(Local::now());
        assert!(name.starts_with("notice_stack_diagnostics_"));
        assert!(name.ends_with(".toml"));
        // YYYYMMDD_HHMMSS between prefix and extension.
        assert_eq!(name.len(), "notice_stack_diagnostics_".len() + 15 + ".toml".len());
    }
}
