// SPDX-License-Identifier: MPL-2.0
//! A single transient notice and its lifecycle state machine.
//!
//! ```text
//! Created -> Entering -> Visible -> TimerArmed -> Exiting -> Removed
//! ```
//!
//! A notice never advances itself. The coordinator asks it for its next
//! due event ([`Notice::next_event`]), and calls the matching transition
//! when the event loop reaches that instant. Every transition is checked
//! and returns [`Error::InvalidTransition`] when called from the wrong
//! state.

use super::animation::{Easing, Tween};
use super::geometry::{Point, Rect, Size};
use super::kind::NoticeKind;
use super::settings::StackSettings;
use super::timer::Timer;
use crate::error::{Error, Result};
use std::time::{Duration, Instant};

/// Unique identifier for a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(u64);

impl NoticeId {
    /// Creates a new unique notice ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for NoticeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned to callers of `show`.
pub type NoticeHandle = NoticeId;

/// Lifecycle state of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, or waiting for a free slot.
    Created,
    /// Entry slide and fade running. No dismiss timer is counting.
    Entering,
    /// Entry observed as complete; the timer is about to be armed.
    Visible,
    /// Dismiss timer counting down.
    TimerArmed,
    /// Exit slide and fade running.
    Exiting,
    /// Terminal.
    Removed,
}

/// Lifecycle events a notice can have pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeEvent {
    EntryFinished,
    TimerElapsed,
    ExitFinished,
}

/// What happened when the dismiss timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// The notice should start its exit animation.
    Expired,
    /// The notice was still entering; the timer was re-armed.
    Deferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Enter,
    Exit,
}

/// The lifecycle animation whose end fires a completion event.
#[derive(Debug, Clone, Copy)]
struct Transition {
    phase: Phase,
    fade: Tween<f32>,
}

/// Parameters of a show request.
#[derive(Debug, Clone, PartialEq)]
pub struct NoticeRequest {
    pub text: String,
    pub kind: NoticeKind,
    pub duration: Duration,
    /// Overrides the localized kind name shown as the title.
    pub title: Option<String>,
    /// Measured size. The width is always replaced by the configured width.
    pub size: Option<Size>,
}

impl NoticeRequest {
    pub fn new(kind: NoticeKind, text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            kind,
            duration,
            title: None,
            size: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }
}

/// One transient overlay notice.
#[derive(Debug, Clone)]
pub struct Notice {
    id: NoticeId,
    text: String,
    title: Option<String>,
    kind: NoticeKind,
    duration: Duration,
    size: Size,
    position: Point,
    opacity: f32,
    lifecycle: Lifecycle,
    closing: bool,
    /// Resting position of the notice's current slot.
    target: Option<Point>,
    motion: Option<Tween<Point>>,
    transition: Option<Transition>,
    timer: Option<Timer>,
    created_at: Instant,
}

impl Notice {
    /// Builds a notice from a request, applying the duration floor and the
    /// size bounds of `settings`.
    pub fn new(request: NoticeRequest, settings: &StackSettings, now: Instant) -> Self {
        let size = settings.normalize_size(request.size.unwrap_or_else(|| settings.default_size()));
        Self {
            id: NoticeId::new(),
            text: request.text,
            title: request.title,
            kind: request.kind,
            duration: settings.clamp_duration(request.duration),
            size,
            position: Point::ORIGIN,
            opacity: 0.0,
            lifecycle: Lifecycle::Created,
            closing: false,
            target: None,
            motion: None,
            transition: None,
            timer: None,
            created_at: now,
        }
    }

    #[must_use]
    pub fn id(&self) -> NoticeId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    /// Effective dismiss duration, already raised to the floor.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Position sampled at the last tick.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    #[must_use]
    pub fn target(&self) -> Option<Point> {
        self.target
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Deadline of the armed dismiss timer, if any.
    #[must_use]
    pub fn dismiss_deadline(&self) -> Option<Instant> {
        self.timer.map(|t| t.deadline())
    }

    /// Whether the notice is drawn on screen (including while leaving).
    #[must_use]
    pub fn is_on_screen(&self) -> bool {
        !self.closing
            && matches!(
                self.lifecycle,
                Lifecycle::Entering | Lifecycle::Visible | Lifecycle::TimerArmed | Lifecycle::Exiting
            )
    }

    /// Whether the notice takes part in slot assignment during a reflow.
    #[must_use]
    pub fn holds_slot(&self) -> bool {
        !self.closing
            && matches!(
                self.lifecycle,
                Lifecycle::Entering | Lifecycle::Visible | Lifecycle::TimerArmed
            )
    }

    /// Whether the notice is waiting beyond the visible cap.
    #[must_use]
    pub fn is_queued(&self) -> bool {
        !self.closing && self.lifecycle == Lifecycle::Created
    }

    /// Whether any motion or fade is still interpolating at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.motion.is_some_and(|m| !m.is_finished(now))
            || self.transition.is_some_and(|t| !t.fade.is_finished(now))
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            notice: self.id.value(),
            from: self.lifecycle,
            action,
        }
    }

    /// Motion toward `to`, superseding the running one from the value it
    /// reached at `now`.
    fn motion_to(&self, to: Point, now: Instant, duration: Duration, easing: Easing) -> Tween<Point> {
        match self.motion {
            Some(motion) => motion.retarget(now, to, duration, easing),
            None => Tween::new(self.position, to, now, duration, easing),
        }
    }

    /// Fade toward `to`, superseding the running one the same way.
    fn fade_to(&self, to: f32, now: Instant, duration: Duration, easing: Easing) -> Tween<f32> {
        match self.transition {
            Some(transition) => transition.fade.retarget(now, to, duration, easing),
            None => Tween::new(self.opacity, to, now, duration, easing),
        }
    }

    /// Starts (or restarts) the entry animation toward `target`.
    ///
    /// A fresh notice slides in from one notice-height above its slot while
    /// fading in. Any other on-screen state (a second show) supersedes the
    /// running motion and fade from their current values; a pending exit
    /// is cancelled and will never report completion.
    pub fn begin_entry(
        &mut self,
        target: Point,
        margin: f32,
        now: Instant,
        duration: Duration,
    ) -> Result<()> {
        if self.closing {
            return Err(self.invalid("begin entry"));
        }
        let (motion, fade) = match self.lifecycle {
            Lifecycle::Created => {
                let from = target.offset_y(-(self.size.height + margin));
                (
                    Tween::new(from, target, now, duration, Easing::OutCubic),
                    Tween::new(0.0, 1.0, now, duration, Easing::OutCubic),
                )
            }
            Lifecycle::Entering | Lifecycle::Visible | Lifecycle::TimerArmed | Lifecycle::Exiting => (
                self.motion_to(target, now, duration, Easing::OutCubic),
                self.fade_to(1.0, now, duration, Easing::OutCubic),
            ),
            Lifecycle::Removed => return Err(self.invalid("begin entry")),
        };

        self.position = motion.sample(now);
        self.opacity = fade.sample(now);
        self.target = Some(target);
        self.motion = Some(motion);
        self.transition = Some(Transition {
            phase: Phase::Enter,
            fade,
        });
        self.lifecycle = Lifecycle::Entering;
        Ok(())
    }

    /// Marks the entry animation as observed complete.
    pub fn complete_entry(&mut self, now: Instant) -> Result<()> {
        match (self.lifecycle, self.transition) {
            (Lifecycle::Entering, Some(t)) if t.phase == Phase::Enter => {
                self.transition = None;
                self.opacity = 1.0;
                self.sample(now);
                self.lifecycle = Lifecycle::Visible;
                Ok(())
            }
            _ => Err(self.invalid("complete entry")),
        }
    }

    /// Starts the dismiss countdown. The full duration counts from `now`,
    /// the instant the entry completion was observed.
    pub fn arm_timer(&mut self, now: Instant) -> Result<()> {
        if self.closing || self.lifecycle != Lifecycle::Visible {
            return Err(self.invalid("arm timer"));
        }
        self.timer = Some(Timer::start(now, self.duration));
        self.lifecycle = Lifecycle::TimerArmed;
        Ok(())
    }

    /// Handles the dismiss timer firing.
    ///
    /// A timer that fires while the notice is entering again is re-armed
    /// for `retry_delay` instead of interrupting the entry. Fails when no
    /// timer is due at `now`.
    pub fn elapse_timer(&mut self, now: Instant, retry_delay: Duration) -> Result<TimerOutcome> {
        if self.closing || !self.timer.is_some_and(|t| t.is_due(now)) {
            return Err(self.invalid("elapse timer"));
        }
        match self.lifecycle {
            Lifecycle::TimerArmed => {
                self.timer = None;
                Ok(TimerOutcome::Expired)
            }
            Lifecycle::Entering => {
                self.timer = Some(Timer::start(now, retry_delay));
                Ok(TimerOutcome::Deferred)
            }
            _ => Err(self.invalid("elapse timer")),
        }
    }

    /// Starts the exit animation: slide up by one notice-height and fade
    /// out, starting from wherever the notice currently is.
    pub fn begin_exit(&mut self, margin: f32, now: Instant, duration: Duration) -> Result<()> {
        if self.closing {
            return Err(self.invalid("begin exit"));
        }
        match self.lifecycle {
            Lifecycle::Entering | Lifecycle::Visible | Lifecycle::TimerArmed => {
                let from = self.motion.map_or(self.position, |m| m.sample(now));
                let to = from.offset_y(-(self.size.height + margin));
                let motion = self.motion_to(to, now, duration, Easing::InCubic);
                let fade = self.fade_to(0.0, now, duration, Easing::InCubic);
                self.position = motion.sample(now);
                self.opacity = fade.sample(now);
                self.timer = None;
                self.motion = Some(motion);
                self.transition = Some(Transition {
                    phase: Phase::Exit,
                    fade,
                });
                self.lifecycle = Lifecycle::Exiting;
                Ok(())
            }
            _ => Err(self.invalid("begin exit")),
        }
    }

    /// Marks the exit animation as complete. The notice is terminal after
    /// this and must be removed from the registry.
    pub fn complete_exit(&mut self, now: Instant) -> Result<()> {
        match (self.lifecycle, self.transition) {
            (Lifecycle::Exiting, Some(t)) if t.phase == Phase::Exit => {
                self.sample(now);
                self.transition = None;
                self.motion = None;
                self.opacity = 0.0;
                self.lifecycle = Lifecycle::Removed;
                Ok(())
            }
            _ => Err(self.invalid("complete exit")),
        }
    }

    /// Moves the notice to a new slot during a reflow.
    ///
    /// Only the motion is replaced; a running entry fade keeps its own
    /// schedule. Returns whether an animation was started.
    pub fn retarget(&mut self, target: Point, now: Instant, duration: Duration) -> Result<bool> {
        if !self.holds_slot() {
            return Err(self.invalid("reflow"));
        }
        if self.target == Some(target) {
            return Ok(false);
        }
        let motion = self.motion_to(target, now, duration, Easing::OutCubic);
        self.target = Some(target);
        self.position = motion.sample(now);
        self.motion = Some(motion);
        Ok(true)
    }

    /// Forced removal from any non-terminal state, without animation.
    ///
    /// Returns `false` when the notice was already closing.
    pub fn force_close(&mut self) -> bool {
        if self.closing {
            return false;
        }
        self.closing = true;
        self.timer = None;
        self.motion = None;
        self.transition = None;
        self.lifecycle = Lifecycle::Removed;
        true
    }

    /// Earliest pending lifecycle event, if any.
    #[must_use]
    pub fn next_event(&self) -> Option<(Instant, NoticeEvent)> {
        if self.closing {
            return None;
        }
        let transition = self.transition.map(|t| {
            let event = match t.phase {
                Phase::Enter => NoticeEvent::EntryFinished,
                Phase::Exit => NoticeEvent::ExitFinished,
            };
            (t.fade.ends_at(), event)
        });
        let timer = self.timer.map(|t| (t.deadline(), NoticeEvent::TimerElapsed));

        match (transition, timer) {
            (Some(a), Some(b)) => Some(if b.0 < a.0 { b } else { a }),
            (a, b) => a.or(b),
        }
    }

    /// Samples motion and fade at `now`. Finished motions are dropped; the
    /// lifecycle transition is left for the event loop to complete.
    pub fn sample(&mut self, now: Instant) {
        if let Some(motion) = self.motion {
            self.position = motion.sample(now);
            if motion.is_finished(now) {
                self.motion = None;
            }
        }
        if let Some(transition) = self.transition {
            self.opacity = transition.fade.sample(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> StackSettings {
        StackSettings::default()
    }

    fn notice(now: Instant) -> Notice {
        Notice::new(
            NoticeRequest::new(NoticeKind::Info, "hello", Duration::from_secs(6)),
            &settings(),
            now,
        )
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn notice_ids_are_unique() {
        let now = Instant::now();
        assert_ne!(notice(now).id(), notice(now).id());
    }

    #[test]
    fn short_durations_are_raised_to_floor() {
        let now = Instant::now();
        let n = Notice::new(
            NoticeRequest::new(NoticeKind::Error, "", Duration::ZERO),
            &settings(),
            now,
        );
        assert_eq!(n.duration(), settings().floor());
        assert_eq!(n.text(), "");
    }

    #[test]
    fn entry_starts_above_target_and_fades_in() {
        let now = Instant::now();
        let mut n = notice(now);
        let target = Point::new(900.0, 20.0);
        n.begin_entry(target, 20.0, now, ms(1000)).unwrap();

        assert_eq!(n.lifecycle(), Lifecycle::Entering);
        assert_eq!(n.position().y, 20.0 - (n.size().height + 20.0));
        assert_eq!(n.opacity(), 0.0);
        assert_eq!(n.next_event(), Some((now + ms(1000), NoticeEvent::EntryFinished)));

        n.sample(now + ms(1000));
        assert_eq!(n.position(), target);
        assert_eq!(n.opacity(), 1.0);
    }

    #[test]
    fn full_lifecycle_walks_every_state() {
        let now = Instant::now();
        let mut n = notice(now);
        n.begin_entry(Point::new(0.0, 20.0), 20.0, now, ms(1000)).unwrap();
        n.complete_entry(now + ms(1000)).unwrap();
        assert_eq!(n.lifecycle(), Lifecycle::Visible);

        n.arm_timer(now + ms(1000)).unwrap();
        assert_eq!(n.lifecycle(), Lifecycle::TimerArmed);
        assert_eq!(n.dismiss_deadline(), Some(now + ms(7000)));

        assert_eq!(n.elapse_timer(now + ms(7000), ms(250)).unwrap(), TimerOutcome::Expired);
        n.begin_exit(20.0, now + ms(7000), ms(800)).unwrap();
        assert_eq!(n.lifecycle(), Lifecycle::Exiting);
        assert_eq!(n.next_event(), Some((now + ms(7800), NoticeEvent::ExitFinished)));

        n.complete_exit(now + ms(7800)).unwrap();
        assert_eq!(n.lifecycle(), Lifecycle::Removed);
        assert_eq!(n.next_event(), None);
    }

    #[test]
    fn timer_cannot_be_armed_while_entering() {
        let now = Instant::now();
        let mut n = notice(now);
        n.begin_entry(Point::new(0.0, 20.0), 20.0, now, ms(1000)).unwrap();
        assert!(matches!(n.arm_timer(now), Err(Error::InvalidTransition { .. })));
    }

    #[test]
    fn timer_firing_during_reentry_is_deferred() {
        let now = Instant::now();
        let mut n = notice(now);
        n.begin_entry(Point::new(0.0, 20.0), 20.0, now, ms(1000)).unwrap();
        n.complete_entry(now + ms(1000)).unwrap();
        n.arm_timer(now + ms(1000)).unwrap();

        // A second show restarts the entry while the countdown is running.
        n.begin_entry(Point::new(0.0, 20.0), 20.0, now + ms(6900), ms(1000)).unwrap();
        let outcome = n.elapse_timer(now + ms(7000), ms(250)).unwrap();

        assert_eq!(outcome, TimerOutcome::Deferred);
        assert_eq!(n.lifecycle(), Lifecycle::Entering);
        assert_eq!(n.dismiss_deadline(), Some(now + ms(7250)));
    }

    #[test]
    fn reentry_during_exit_resumes_from_current_position() {
        let now = Instant::now();
        let mut n = notice(now);
        let target = Point::new(0.0, 20.0);
        n.begin_entry(target, 20.0, now, ms(1000)).unwrap();
        n.complete_entry(now + ms(1000)).unwrap();
        n.begin_exit(20.0, now + ms(1000), ms(800)).unwrap();

        let midway = now + ms(1400);
        let mut snapshot = n.clone();
        snapshot.sample(midway);
        let expected = snapshot.position();
        n.begin_entry(target, 20.0, midway, ms(1000)).unwrap();

        assert_eq!(n.lifecycle(), Lifecycle::Entering);
        assert_eq!(n.position(), expected);
        assert_eq!(n.next_event(), Some((midway + ms(1000), NoticeEvent::EntryFinished)));
    }

    #[test]
    fn timer_cannot_elapse_before_its_deadline() {
        let now = Instant::now();
        let mut n = notice(now);
        n.begin_entry(Point::new(0.0, 20.0), 20.0, now, ms(1000)).unwrap();
        n.complete_entry(now + ms(1000)).unwrap();
        n.arm_timer(now + ms(1000)).unwrap();

        assert!(n.elapse_timer(now + ms(6999), ms(250)).is_err());
        assert_eq!(n.lifecycle(), Lifecycle::TimerArmed);
    }

    #[test]
    fn force_close_is_idempotent_and_terminal() {
        let now = Instant::now();
        let mut n = notice(now);
        n.begin_entry(Point::new(0.0, 20.0), 20.0, now, ms(1000)).unwrap();

        assert!(n.force_close());
        assert!(!n.force_close());
        assert!(n.is_closing());
        assert_eq!(n.lifecycle(), Lifecycle::Removed);
        assert!(n.begin_entry(Point::ORIGIN, 20.0, now, ms(1000)).is_err());
        assert!(n.begin_exit(20.0, now, ms(800)).is_err());
        assert_eq!(n.next_event(), None);
    }

    #[test]
    fn retarget_keeps_entry_fade_schedule() {
        let now = Instant::now();
        let mut n = notice(now);
        n.begin_entry(Point::new(0.0, 128.0), 20.0, now, ms(1000)).unwrap();

        let started = n.retarget(Point::new(0.0, 20.0), now + ms(300), ms(600)).unwrap();
        assert!(started);
        assert_eq!(n.next_event(), Some((now + ms(1000), NoticeEvent::EntryFinished)));

        // Same target again is a no-op.
        assert!(!n.retarget(Point::new(0.0, 20.0), now + ms(400), ms(600)).unwrap());
    }

    #[test]
    fn exiting_notice_cannot_be_retargeted() {
        let now = Instant::now();
        let mut n = notice(now);
        n.begin_entry(Point::new(0.0, 20.0), 20.0, now, ms(1000)).unwrap();
        n.begin_exit(20.0, now + ms(100), ms(800)).unwrap();
        assert!(n.retarget(Point::new(0.0, 40.0), now + ms(200), ms(600)).is_err());
        assert!(!n.holds_slot());
        assert!(n.is_on_screen());
    }
}
