// SPDX-License-Identifier: MPL-2.0
//! Time-based interpolation used for notice motion and fading.
//!
//! A [`Tween`] is a pure function of time: it never runs by itself and is
//! sampled by the event loop with the current `Instant`. Superseding an
//! animation starts the replacement from the value the old one had reached,
//! so a notice never snaps back to an earlier position.

use super::geometry::Point;
use super::timer::saturating_add;
use std::time::{Duration, Instant};

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    fn lerp(from: Self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Lerp for Point {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Point::new(f32::lerp(from.x, to.x, t), f32::lerp(from.y, to.y, t))
    }
}

/// Easing curve applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Fast start, gentle landing. Used for entry and reflow.
    OutCubic,
    /// Gentle start, fast finish. Used for exit.
    InCubic,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::OutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::InCubic => t * t * t,
        }
    }
}

/// Interpolation of a value between two endpoints over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    #[must_use]
    pub fn new(from: T, to: T, started_at: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
            easing,
        }
    }

    /// Linear progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Interpolated value at `now`.
    #[must_use]
    pub fn sample(&self, now: Instant) -> T {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        T::lerp(self.from, self.to, self.easing.apply(t))
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.ends_at()
    }

    #[must_use]
    pub fn ends_at(&self) -> Instant {
        saturating_add(self.started_at, self.duration)
    }

    /// Replaces this animation with one heading to `to`, starting from the
    /// value reached at `now`.
    #[must_use]
    pub fn retarget(&self, now: Instant, to: T, duration: Duration, easing: Easing) -> Self {
        Self::new(self.sample(now), to, now, duration, easing)
    }
}
