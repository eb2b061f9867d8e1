// SPDX-License-Identifier: MPL-2.0
//! Runtime settings of the notice stack.
//!
//! [`StackSettings`] is the validated form of the `[notifications]` config
//! section. Every value is clamped on construction so the coordinator never
//! has to re-check bounds.

use super::geometry::{Rect, Size};
use crate::config::{self, NotificationsConfig};
use std::time::Duration;

/// Validated timings and layout parameters for the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct StackSettings {
    floor: Duration,
    default_duration: Duration,
    entry: Duration,
    exit: Duration,
    reflow: Duration,
    retry_delay: Duration,
    margin: f32,
    capacity: usize,
    width: f32,
    min_height: f32,
    max_height: f32,
    fallback_area: Rect,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self::from(&NotificationsConfig::default())
    }
}

impl From<&NotificationsConfig> for StackSettings {
    fn from(cfg: &NotificationsConfig) -> Self {
        let floor_ms = cfg
            .floor_ms
            .unwrap_or(config::DEFAULT_NOTICE_FLOOR_MS)
            .clamp(config::MIN_NOTICE_FLOOR_MS, config::MAX_NOTICE_FLOOR_MS);
        let animation = |value: Option<u64>, default: u64| {
            Duration::from_millis(value.unwrap_or(default).min(config::MAX_ANIMATION_MS))
        };
        let min_height = cfg
            .min_height
            .filter(|h| h.is_finite() && *h > 0.0)
            .unwrap_or(config::MIN_NOTICE_HEIGHT);
        let max_height = cfg
            .max_height
            .filter(|h| h.is_finite())
            .unwrap_or(config::MAX_NOTICE_HEIGHT)
            .max(min_height);

        Self {
            floor: Duration::from_millis(floor_ms),
            default_duration: Duration::from_millis(
                cfg.default_duration_ms
                    .unwrap_or(config::DEFAULT_NOTICE_DURATION_MS)
                    .clamp(floor_ms, config::MAX_NOTICE_DURATION_MS),
            ),
            entry: animation(cfg.entry_ms, config::DEFAULT_ENTRY_ANIMATION_MS),
            exit: animation(cfg.exit_ms, config::DEFAULT_EXIT_ANIMATION_MS),
            reflow: animation(cfg.reflow_ms, config::DEFAULT_REFLOW_ANIMATION_MS),
            retry_delay: Duration::from_millis(config::DISMISS_RETRY_DELAY_MS),
            margin: cfg
                .margin
                .filter(|m| m.is_finite())
                .unwrap_or(config::DEFAULT_STACK_MARGIN)
                .clamp(0.0, config::MAX_STACK_MARGIN),
            capacity: cfg
                .capacity
                .unwrap_or(config::DEFAULT_STACK_CAPACITY)
                .clamp(config::MIN_STACK_CAPACITY, config::MAX_STACK_CAPACITY),
            width: cfg
                .width
                .filter(|w| w.is_finite() && *w > 0.0)
                .unwrap_or(config::DEFAULT_NOTICE_WIDTH),
            min_height,
            max_height,
            fallback_area: Rect::new(
                0.0,
                0.0,
                config::FALLBACK_WORK_AREA_WIDTH,
                config::FALLBACK_WORK_AREA_HEIGHT,
            ),
        }
    }
}

impl StackSettings {
    /// Overrides the soft cap. Mostly useful in tests.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.clamp(config::MIN_STACK_CAPACITY, config::MAX_STACK_CAPACITY);
        self
    }

    /// Overrides the rectangle used when no geometry was ever reported.
    #[must_use]
    pub fn with_fallback_area(mut self, area: Rect) -> Self {
        self.fallback_area = area;
        self
    }

    /// Raises `requested` to the floor and caps it at
    /// [`config::MAX_NOTICE_DURATION_MS`].
    #[must_use]
    pub fn clamp_duration(&self, requested: Duration) -> Duration {
        requested.clamp(self.floor, Duration::from_millis(config::MAX_NOTICE_DURATION_MS))
    }

    /// Applies the fixed width and the height bounds to a measured size.
    #[must_use]
    pub fn normalize_size(&self, measured: Size) -> Size {
        Size::new(
            self.width,
            measured.height.clamp(self.min_height, self.max_height),
        )
    }

    /// Size used when the host did not measure the notice.
    #[must_use]
    pub fn default_size(&self) -> Size {
        self.normalize_size(Size::new(self.width, config::DEFAULT_NOTICE_HEIGHT))
    }

    #[must_use]
    pub fn floor(&self) -> Duration {
        self.floor
    }

    #[must_use]
    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    #[must_use]
    pub fn entry(&self) -> Duration {
        self.entry
    }

    #[must_use]
    pub fn exit(&self) -> Duration {
        self.exit
    }

    #[must_use]
    pub fn reflow(&self) -> Duration {
        self.reflow
    }

    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    #[must_use]
    pub fn margin(&self) -> f32 {
        self.margin
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn fallback_area(&self) -> Rect {
        self.fallback_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_constants() {
        let settings = StackSettings::default();
        assert_eq!(settings.floor(), Duration::from_millis(config::DEFAULT_NOTICE_FLOOR_MS));
        assert_eq!(settings.entry(), Duration::from_millis(1_000));
        assert_eq!(settings.exit(), Duration::from_millis(800));
        assert_eq!(settings.reflow(), Duration::from_millis(600));
        assert_eq!(settings.capacity(), 15);
        assert_eq!(settings.margin(), 20.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let cfg = NotificationsConfig {
            floor_ms: Some(1),
            capacity: Some(0),
            margin: Some(-5.0),
            entry_ms: Some(999_999),
            ..NotificationsConfig::default()
        };
        let settings = StackSettings::from(&cfg);
        assert_eq!(settings.floor(), Duration::from_millis(config::MIN_NOTICE_FLOOR_MS));
        assert_eq!(settings.capacity(), config::MIN_STACK_CAPACITY);
        assert_eq!(settings.margin(), 0.0);
        assert_eq!(settings.entry(), Duration::from_millis(config::MAX_ANIMATION_MS));
    }

    #[test]
    fn default_duration_never_undercuts_floor() {
        let cfg = NotificationsConfig {
            floor_ms: Some(7_000),
            default_duration_ms: Some(3_000),
            ..NotificationsConfig::default()
        };
        let settings = StackSettings::from(&cfg);
        assert_eq!(settings.default_duration(), Duration::from_millis(7_000));
    }

    #[test]
    fn clamp_duration_raises_short_requests() {
        let settings = StackSettings::default();
        assert_eq!(settings.clamp_duration(Duration::ZERO), settings.floor());
        assert_eq!(
            settings.clamp_duration(Duration::from_secs(30)),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn clamp_duration_caps_huge_requests() {
        let settings = StackSettings::default();
        let max = Duration::from_millis(config::MAX_NOTICE_DURATION_MS);
        assert_eq!(settings.clamp_duration(Duration::MAX), max);

        let cfg = NotificationsConfig {
            default_duration_ms: Some(u64::MAX),
            ..NotificationsConfig::default()
        };
        assert_eq!(StackSettings::from(&cfg).default_duration(), max);
    }

    #[test]
    fn normalize_size_fixes_width_and_bounds_height() {
        let settings = StackSettings::default();
        let tall = settings.normalize_size(Size::new(10.0, 1_000.0));
        assert_eq!(tall, Size::new(config::DEFAULT_NOTICE_WIDTH, config::MAX_NOTICE_HEIGHT));
        let short = settings.normalize_size(Size::new(10.0, 1.0));
        assert_eq!(short.height, config::MIN_NOTICE_HEIGHT);
    }
}
