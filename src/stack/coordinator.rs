// SPDX-License-Identifier: MPL-2.0
//! Public entry point of the notice stack.
//!
//! The [`Coordinator`] owns the [`Registry`] and a [`GeometryProvider`]. It
//! turns show requests into positioned notices, drives every notice through
//! its lifecycle from [`Coordinator::tick`], and reflows the survivors when
//! a notice leaves.
//!
//! None of the mutating operations return errors. Failures inside a single
//! notice are logged, recorded in diagnostics when a handle is attached,
//! and resolved by force-closing that notice.
//!
//! # Example
//!
//! ```
//! use notice_stack::stack::{Coordinator, FixedWorkArea, NoticeKind, Rect, StackSettings};
//! use std::time::{Duration, Instant};
//!
//! let area = FixedWorkArea(Rect::new(0.0, 0.0, 1280.0, 720.0));
//! let mut stack = Coordinator::with_settings(area, StackSettings::default());
//!
//! let start = Instant::now();
//! let handle = stack.show("Saved", NoticeKind::Info, Duration::from_secs(5), start);
//! stack.tick(start + Duration::from_secs(1));
//! assert!(stack.get(handle).is_some());
//! ```

use super::geometry::{GeometryProvider, Rect};
use super::kind::NoticeKind;
use super::notice::{
    Lifecycle, Notice, NoticeEvent, NoticeHandle, NoticeId, NoticeRequest, TimerOutcome,
};
use super::registry::Registry;
use super::settings::StackSettings;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle, ExitReason};
use crate::error::{Error, Result};
use std::time::{Duration, Instant};

/// Drives the notice stack.
#[derive(Debug)]
pub struct Coordinator<G> {
    registry: Registry,
    geometry: G,
    settings: StackSettings,
    last_area: Option<Rect>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl<G: GeometryProvider> Coordinator<G> {
    /// Creates a coordinator around an existing registry.
    pub fn new(registry: Registry, geometry: G, settings: StackSettings) -> Self {
        Self {
            registry,
            geometry,
            settings,
            last_area: None,
            diagnostics: None,
        }
    }

    /// Creates a coordinator with an empty registry capped at the
    /// configured capacity.
    pub fn with_settings(geometry: G, settings: StackSettings) -> Self {
        Self::new(Registry::new(settings.capacity()), geometry, settings)
    }

    /// Attaches a diagnostics handle. Lifecycle events are recorded from
    /// now on.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn settings(&self) -> &StackSettings {
        &self.settings
    }

    #[must_use]
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Mutable access to the geometry provider, e.g. to report a resize.
    /// Call [`Coordinator::relayout`] afterwards.
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    // ---------------------------------------------------------------------
    // Show requests
    // ---------------------------------------------------------------------

    /// Shows a notice. The duration is raised to the configured floor.
    pub fn show(
        &mut self,
        text: impl Into<String>,
        kind: NoticeKind,
        duration: Duration,
        now: Instant,
    ) -> NoticeHandle {
        self.show_request(NoticeRequest::new(kind, text, duration), now)
    }

    /// Shows an informational notice for the default duration.
    pub fn info(&mut self, text: impl Into<String>, now: Instant) -> NoticeHandle {
        let duration = self.settings.default_duration();
        self.show(text, NoticeKind::Info, duration, now)
    }

    /// Shows a warning notice for the default duration.
    pub fn warning(&mut self, text: impl Into<String>, now: Instant) -> NoticeHandle {
        let duration = self.settings.default_duration();
        self.show(text, NoticeKind::Warning, duration, now)
    }

    /// Shows an error notice for the default duration.
    pub fn error(&mut self, text: impl Into<String>, now: Instant) -> NoticeHandle {
        let duration = self.settings.default_duration();
        self.show(text, NoticeKind::Error, duration, now)
    }

    /// Shows a notice described by a full request.
    ///
    /// The notice is appended to the registry before this returns, so
    /// consecutive calls get consecutive slots. When the stack is full, or
    /// other notices are already waiting, the notice is queued and enters
    /// once a slot frees up.
    pub fn show_request(&mut self, request: NoticeRequest, now: Instant) -> NoticeHandle {
        let mut notice = Notice::new(request, &self.settings, now);
        let id = notice.id();
        let kind = notice.kind();

        let Some(slot) = self.registry.insertion_slot() else {
            tracing::debug!(notice = id.value(), %kind, "stack full, notice queued");
            self.registry.push(notice);
            self.record(DiagnosticEventKind::NoticeQueued {
                notice: id.value(),
                kind,
            });
            return id;
        };

        let area = self.work_area();
        let margin = self.settings.margin();
        let entry = self.settings.entry();
        let entered = self
            .registry
            .insertion_target(area, margin, notice.size())
            .and_then(|target| notice.begin_entry(target, margin, now, entry));
        self.registry.push(notice);

        match entered {
            Ok(()) => {
                tracing::debug!(notice = id.value(), %kind, slot, "notice shown");
                self.record(DiagnosticEventKind::NoticeShown {
                    notice: id.value(),
                    kind,
                    slot,
                });
            }
            Err(err) => self.fail(id, &err, now),
        }
        id
    }

    /// Shows an already displayed notice again.
    ///
    /// Restarts the entry from wherever the notice currently is, cancelling
    /// any running motion. An exit in progress is superseded and will not
    /// remove the notice. Returns `false` for unknown or queued notices.
    pub fn reshow(&mut self, handle: NoticeHandle, now: Instant) -> bool {
        let margin = self.settings.margin();
        let entry = self.settings.entry();
        let Some(notice) = self.registry.get_mut(handle) else {
            return false;
        };
        if !notice.is_on_screen() {
            return false;
        }
        let Some(target) = notice.target() else {
            return false;
        };
        let was_exiting = notice.lifecycle() == Lifecycle::Exiting;

        if let Err(err) = notice.begin_entry(target, margin, now, entry) {
            self.fail(handle, &err, now);
            return false;
        }
        tracing::debug!(notice = handle.value(), was_exiting, "notice shown again");

        // The notice holds a slot again; others may have moved into it.
        if was_exiting {
            self.reflow(now);
        }
        true
    }

    // ---------------------------------------------------------------------
    // Closing
    // ---------------------------------------------------------------------

    /// Starts the exit animation of a notice.
    ///
    /// A queued notice is dropped right away since it was never drawn.
    /// Returns `false` when the notice is unknown or already leaving.
    pub fn dismiss(&mut self, handle: NoticeHandle, now: Instant) -> bool {
        let margin = self.settings.margin();
        let exit = self.settings.exit();
        let Some(notice) = self.registry.get_mut(handle) else {
            return false;
        };

        match notice.lifecycle() {
            Lifecycle::Created => {
                notice.force_close();
                self.registry.remove(handle);
                self.record(DiagnosticEventKind::NoticeRemoved {
                    notice: handle.value(),
                    forced: false,
                });
                true
            }
            Lifecycle::Entering | Lifecycle::Visible | Lifecycle::TimerArmed => {
                match notice.begin_exit(margin, now, exit) {
                    Ok(()) => {
                        self.record(DiagnosticEventKind::ExitStarted {
                            notice: handle.value(),
                            reason: ExitReason::Dismissed,
                        });
                        true
                    }
                    Err(err) => {
                        self.fail(handle, &err, now);
                        false
                    }
                }
            }
            Lifecycle::Exiting | Lifecycle::Removed => false,
        }
    }

    /// Removes a notice immediately, without animation, and reflows the
    /// survivors. A second call for the same handle is a no-op.
    pub fn close(&mut self, handle: NoticeHandle, now: Instant) -> bool {
        if !self.remove_forced(handle) {
            return false;
        }
        self.reflow(now);
        true
    }

    /// Drops every notice at once, without animation.
    pub fn close_all(&mut self) {
        let mut notices = self.registry.drain();
        if notices.is_empty() {
            return;
        }
        for notice in &mut notices {
            notice.force_close();
        }
        tracing::debug!(count = notices.len(), "notice stack cleared");
        self.record(DiagnosticEventKind::StackCleared {
            count: notices.len(),
        });
    }

    // ---------------------------------------------------------------------
    // Event loop
    // ---------------------------------------------------------------------

    /// Processes every lifecycle event due at `now`, earliest first, then
    /// samples all animations.
    ///
    /// Transitions are stamped with `now`, the instant they are observed,
    /// so a late tick delays the dismiss countdown instead of shortening
    /// it.
    pub fn tick(&mut self, now: Instant) {
        while let Some((id, event)) = self.next_due(now) {
            if let Err(err) = self.handle_event(id, event, now) {
                self.fail(id, &err, now);
            }
        }
        for notice in self.registry.iter_mut() {
            notice.sample(now);
        }
    }

    /// Recomputes every slot against the current work area. Call after the
    /// geometry changed.
    pub fn relayout(&mut self, now: Instant) {
        self.reflow(now);
    }

    fn next_due(&self, now: Instant) -> Option<(NoticeId, NoticeEvent)> {
        self.registry
            .iter()
            .filter_map(|n| n.next_event().map(|(at, event)| (at, n.id(), event)))
            .filter(|(at, _, _)| *at <= now)
            .min_by_key(|(at, id, _)| (*at, *id))
            .map(|(_, id, event)| (id, event))
    }

    fn handle_event(&mut self, id: NoticeId, event: NoticeEvent, now: Instant) -> Result<()> {
        let margin = self.settings.margin();
        let exit = self.settings.exit();
        let retry_delay = self.settings.retry_delay();
        let notice = self
            .registry
            .get_mut(id)
            .ok_or(Error::UnknownNotice(id.value()))?;

        match event {
            NoticeEvent::EntryFinished => {
                notice.complete_entry(now)?;
                notice.arm_timer(now)?;
                let duration_ms = u64::try_from(notice.duration().as_millis()).unwrap_or(u64::MAX);
                self.record(DiagnosticEventKind::EntryCompleted { notice: id.value() });
                self.record(DiagnosticEventKind::TimerArmed {
                    notice: id.value(),
                    duration_ms,
                });
            }
            NoticeEvent::TimerElapsed => match notice.elapse_timer(now, retry_delay)? {
                TimerOutcome::Expired => {
                    notice.begin_exit(margin, now, exit)?;
                    tracing::debug!(notice = id.value(), "notice timed out");
                    self.record(DiagnosticEventKind::ExitStarted {
                        notice: id.value(),
                        reason: ExitReason::Timeout,
                    });
                }
                TimerOutcome::Deferred => {
                    tracing::debug!(notice = id.value(), "dismiss deferred until entry completes");
                    self.record(DiagnosticEventKind::DismissDeferred { notice: id.value() });
                }
            },
            NoticeEvent::ExitFinished => {
                notice.complete_exit(now)?;
                let age = now.saturating_duration_since(notice.created_at());
                let age_ms = u64::try_from(age.as_millis()).unwrap_or(u64::MAX);
                self.registry.remove(id);
                tracing::debug!(notice = id.value(), age_ms, "notice removed");
                self.record(DiagnosticEventKind::NoticeRemoved {
                    notice: id.value(),
                    forced: false,
                });
                self.reflow(now);
            }
        }
        Ok(())
    }

    /// Reflows the registry. Notices that cannot be placed are closed and
    /// the pass repeats, so the loop ends once every survivor was placed.
    fn reflow(&mut self, now: Instant) {
        loop {
            let area = self.work_area();
            let report = self.registry.reflow(area, now, &self.settings);

            for &id in &report.promoted {
                let slot = self.registry.position(id).unwrap_or_default();
                let kind = self.registry.get(id).map(Notice::kind).unwrap_or_default();
                self.record(DiagnosticEventKind::NoticeShown {
                    notice: id.value(),
                    kind,
                    slot,
                });
            }
            if !report.moved.is_empty() || !report.promoted.is_empty() {
                self.record(DiagnosticEventKind::StackReflowed {
                    moved: report.moved.len(),
                    promoted: report.promoted.len(),
                });
            }

            if report.failed.is_empty() {
                break;
            }
            for (id, err) in report.failed {
                self.report_failure(id, &err);
                self.remove_forced(id);
            }
        }
    }

    fn remove_forced(&mut self, id: NoticeId) -> bool {
        let Some(notice) = self.registry.get_mut(id) else {
            return false;
        };
        if !notice.force_close() {
            return false;
        }
        self.registry.remove(id);
        tracing::debug!(notice = id.value(), "notice closed");
        self.record(DiagnosticEventKind::NoticeRemoved {
            notice: id.value(),
            forced: true,
        });
        true
    }

    fn fail(&mut self, id: NoticeId, err: &Error, now: Instant) {
        self.report_failure(id, err);
        if self.remove_forced(id) {
            self.reflow(now);
        }
    }

    fn report_failure(&self, id: NoticeId, err: &Error) {
        tracing::warn!(notice = id.value(), error = %err, "notice failed, closing it");
        self.record(DiagnosticEventKind::Failure {
            notice: Some(id.value()),
            message: err.to_string(),
        });
    }

    /// Work area from the provider, else the last valid one, else the
    /// configured fallback.
    fn work_area(&mut self) -> Rect {
        match self.geometry.work_area().map(Rect::validate) {
            Some(Ok(area)) => {
                self.last_area = Some(area);
                area
            }
            Some(Err(err)) => {
                tracing::warn!(error = %err, "work area rejected, using last known");
                self.last_area.unwrap_or_else(|| self.settings.fallback_area())
            }
            None => self.last_area.unwrap_or_else(|| self.settings.fallback_area()),
        }
    }

    fn record(&self, kind: DiagnosticEventKind) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.record(kind);
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn get(&self, handle: NoticeHandle) -> Option<&Notice> {
        self.registry.get(handle)
    }

    /// All tracked notices in stacking order, queued ones last.
    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.registry.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    #[must_use]
    pub fn on_screen_count(&self) -> usize {
        self.registry.on_screen_count()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.registry.queued_count()
    }

    /// Earliest pending lifecycle event. A host can sleep until then.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.registry
            .iter()
            .filter_map(|n| n.next_event().map(|(at, _)| at))
            .min()
    }

    /// Whether any notice is still moving or fading at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.registry.iter().any(|n| n.is_animating(now))
    }
}
