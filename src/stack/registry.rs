// SPDX-License-Identifier: MPL-2.0
//! Ordered registry of active notices and the stacking layout.
//!
//! Notices are kept in insertion order. The notices drawn on screen always
//! form a prefix of the list, and the ones waiting beyond the soft cap form
//! the suffix, so list order is also top-to-bottom stacking order.

use super::geometry::{Point, Rect, Size};
use super::notice::{Notice, NoticeId};
use super::settings::StackSettings;
use crate::error::{Error, Result};
use std::time::Instant;

/// Outcome of a reflow pass.
#[derive(Debug, Default)]
pub struct Reflow {
    /// Survivors that were animated to a new slot.
    pub moved: Vec<NoticeId>,
    /// Queued notices that received a slot and started entering.
    pub promoted: Vec<NoticeId>,
    /// Notices whose transition failed. The caller closes them.
    pub failed: Vec<(NoticeId, Error)>,
}

/// The ordered collection of active notices.
#[derive(Debug)]
pub struct Registry {
    notices: Vec<Notice>,
    capacity: usize,
}

impl Registry {
    /// Creates an empty registry with a soft cap of `capacity` on-screen
    /// notices.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            notices: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Iterates in stacking order, topmost first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Notice> {
        self.notices.iter_mut()
    }

    #[must_use]
    pub fn get(&self, id: NoticeId) -> Option<&Notice> {
        self.notices.iter().find(|n| n.id() == id)
    }

    pub fn get_mut(&mut self, id: NoticeId) -> Option<&mut Notice> {
        self.notices.iter_mut().find(|n| n.id() == id)
    }

    /// List index of a notice.
    #[must_use]
    pub fn position(&self, id: NoticeId) -> Option<usize> {
        self.notices.iter().position(|n| n.id() == id)
    }

    /// Notices drawn on screen, including ones sliding out.
    #[must_use]
    pub fn on_screen_count(&self) -> usize {
        self.notices.iter().filter(|n| n.is_on_screen()).count()
    }

    /// Notices waiting for a slot.
    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.notices.iter().filter(|n| n.is_queued()).count()
    }

    /// Slot a newly shown notice takes, or `None` when it has to wait.
    ///
    /// A new notice never jumps the queue: while anything is waiting, new
    /// requests wait too. Exiting notices still count toward the cap but
    /// hold no slot.
    #[must_use]
    pub fn insertion_slot(&self) -> Option<usize> {
        if self.queued_count() > 0 || self.on_screen_count() >= self.capacity {
            return None;
        }
        Some(self.notices.iter().filter(|n| n.holds_slot()).count())
    }

    /// Resting position for a notice of `size` placed below the lowest
    /// slot currently held.
    ///
    /// Exiting notices are ignored, as in [`Registry::reflow`]. Holders are
    /// measured by their targets, so the new notice never lands on a
    /// survivor that has not been reflowed yet.
    pub fn insertion_target(&self, area: Rect, margin: f32, size: Size) -> Result<Point> {
        let above = self
            .notices
            .iter()
            .filter(|n| n.holds_slot())
            .filter_map(|n| n.target().map(|t| t.y - area.top + n.size().height))
            .fold(0.0_f32, f32::max);
        slot_position(area, margin, size, above)
    }

    /// Appends a notice at the bottom of the stack.
    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Removes a notice, returning it with its former list index.
    pub fn remove(&mut self, id: NoticeId) -> Option<(usize, Notice)> {
        let index = self.position(id)?;
        Some((index, self.notices.remove(index)))
    }

    /// Empties the registry.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Recomputes every slot from the top and animates notices toward it.
    ///
    /// Slots are always recomputed from index 0 rather than patched after
    /// the removed notice, so the stack ends up contiguous even when several
    /// removals overlap. Exiting notices take no slot. Queued notices are
    /// promoted in order while the on-screen count stays under the cap.
    pub fn reflow(&mut self, area: Rect, now: Instant, settings: &StackSettings) -> Reflow {
        let margin = settings.margin();
        let mut report = Reflow::default();
        let mut on_screen = self.on_screen_count();
        let mut above = 0.0_f32;

        for notice in &mut self.notices {
            let promote = notice.is_queued() && on_screen < self.capacity;
            if !notice.holds_slot() && !promote {
                continue;
            }

            let target = match slot_position(area, margin, notice.size(), above) {
                Ok(target) => target,
                Err(err) => {
                    report.failed.push((notice.id(), err));
                    continue;
                }
            };

            let id = notice.id();
            let result = if promote {
                notice
                    .begin_entry(target, margin, now, settings.entry())
                    .map(|()| true)
            } else {
                notice.retarget(target, now, settings.reflow())
            };

            match result {
                Ok(changed) => {
                    if promote {
                        on_screen += 1;
                        report.promoted.push(id);
                    } else if changed {
                        report.moved.push(id);
                    }
                    above += notice.size().height + margin;
                }
                Err(err) => report.failed.push((id, err)),
            }
        }

        report
    }
}

/// Resting position of a slot whose preceding notices (and their margins)
/// take `above` pixels: right-aligned, one margin in from the work-area
/// edges.
fn slot_position(area: Rect, margin: f32, size: Size, above: f32) -> Result<Point> {
    let size = size.validate()?;
    let point = Point::new(
        area.right - size.width - margin,
        area.top + margin + above,
    );
    if point.x.is_finite() && point.y.is_finite() {
        Ok(point)
    } else {
        Err(Error::Geometry(format!(
            "non-finite slot position ({}, {})",
            point.x, point.y
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::kind::NoticeKind;
    use crate::stack::notice::{Lifecycle, NoticeRequest};
    use std::time::Duration;

    const AREA: Rect = Rect::new(0.0, 0.0, 1280.0, 720.0);

    fn settings() -> StackSettings {
        StackSettings::default()
    }

    fn shown(registry: &mut Registry, now: Instant) -> NoticeId {
        let settings = settings();
        let mut notice = Notice::new(
            NoticeRequest::new(NoticeKind::Info, "n", Duration::from_secs(5)),
            &settings,
            now,
        );
        if registry.insertion_slot().is_some() {
            let target = registry
                .insertion_target(AREA, settings.margin(), notice.size())
                .unwrap();
            notice
                .begin_entry(target, settings.margin(), now, settings.entry())
                .unwrap();
        }
        let id = notice.id();
        registry.push(notice);
        id
    }

    #[test]
    fn insertion_target_stacks_below_on_screen_notices() {
        let now = Instant::now();
        let mut registry = Registry::new(15);
        let first = shown(&mut registry, now);
        let second = shown(&mut registry, now);

        let a = registry.get(first).unwrap().target().unwrap();
        let b = registry.get(second).unwrap().target().unwrap();
        let height = registry.get(first).unwrap().size().height;

        assert_eq!(a.y, 20.0);
        assert_eq!(b.y, a.y + height + 20.0);
        assert_eq!(a.x, 1280.0 - 360.0 - 20.0);
        assert_eq!(a.x, b.x);
    }

    #[test]
    fn insertion_slot_is_none_at_capacity_and_while_queued() {
        let now = Instant::now();
        let mut registry = Registry::new(2);
        assert_eq!(registry.insertion_slot(), Some(0));
        shown(&mut registry, now);
        assert_eq!(registry.insertion_slot(), Some(1));
        shown(&mut registry, now);
        assert_eq!(registry.insertion_slot(), None);
        shown(&mut registry, now);
        assert_eq!(registry.queued_count(), 1);
        assert_eq!(registry.on_screen_count(), 2);
    }

    #[test]
    fn reflow_closes_gap_from_the_top() {
        let now = Instant::now();
        let mut registry = Registry::new(15);
        let ids: Vec<_> = (0..3).map(|_| shown(&mut registry, now)).collect();

        let (index, _) = registry.remove(ids[0]).unwrap();
        assert_eq!(index, 0);

        let report = registry.reflow(AREA, now + Duration::from_secs(2), &settings());
        assert_eq!(report.moved, vec![ids[1], ids[2]]);
        assert!(report.failed.is_empty());

        let later = now + Duration::from_secs(3);
        for notice in registry.iter_mut() {
            notice.sample(later);
        }
        let first = registry.get(ids[1]).unwrap();
        let second = registry.get(ids[2]).unwrap();
        assert_eq!(first.position().y, 20.0);
        assert_eq!(second.position().y, 20.0 + first.size().height + 20.0);
    }

    #[test]
    fn reflow_promotes_queued_notices_in_order() {
        let now = Instant::now();
        let mut registry = Registry::new(2);
        let ids: Vec<_> = (0..4).map(|_| shown(&mut registry, now)).collect();
        assert_eq!(registry.queued_count(), 2);

        registry.remove(ids[1]);
        let report = registry.reflow(AREA, now, &settings());

        assert_eq!(report.promoted, vec![ids[2]]);
        assert_eq!(registry.get(ids[2]).unwrap().lifecycle(), Lifecycle::Entering);
        assert_eq!(registry.get(ids[3]).unwrap().lifecycle(), Lifecycle::Created);
    }

    #[test]
    fn exiting_notices_take_no_slot() {
        let now = Instant::now();
        let settings = settings();
        let mut registry = Registry::new(15);
        let ids: Vec<_> = (0..3).map(|_| shown(&mut registry, now)).collect();

        registry
            .get_mut(ids[0])
            .unwrap()
            .begin_exit(settings.margin(), now, settings.exit())
            .unwrap();
        registry.remove(ids[1]);
        registry.reflow(AREA, now, &settings);

        assert_eq!(registry.get(ids[2]).unwrap().target().unwrap().y, 20.0);
    }

    #[test]
    fn insertion_target_ignores_exiting_notices() {
        let now = Instant::now();
        let settings = settings();
        let mut registry = Registry::new(15);
        let ids: Vec<_> = (0..3).map(|_| shown(&mut registry, now)).collect();

        registry
            .get_mut(ids[0])
            .unwrap()
            .begin_exit(settings.margin(), now, settings.exit())
            .unwrap();
        registry.remove(ids[2]);
        registry.reflow(AREA, now, &settings);

        let height = registry.get(ids[1]).unwrap().size().height;
        assert_eq!(registry.insertion_slot(), Some(1));
        let target = registry
            .insertion_target(AREA, settings.margin(), Size::new(360.0, height))
            .unwrap();
        assert_eq!(target.y, 20.0 + height + 20.0);
    }

    #[test]
    fn insertion_target_stays_below_unreflowed_survivors() {
        let now = Instant::now();
        let settings = settings();
        let mut registry = Registry::new(15);
        let ids: Vec<_> = (0..2).map(|_| shown(&mut registry, now)).collect();

        // The top notice starts leaving; the survivor keeps its slot until
        // the exit completes.
        registry
            .get_mut(ids[0])
            .unwrap()
            .begin_exit(settings.margin(), now, settings.exit())
            .unwrap();

        let survivor = registry.get(ids[1]).unwrap();
        let below = survivor.target().unwrap().y + survivor.size().height + 20.0;
        let target = registry
            .insertion_target(AREA, settings.margin(), survivor.size())
            .unwrap();
        assert_eq!(target.y, below);
    }

    #[test]
    fn degenerate_size_is_reported_as_failure() {
        assert!(slot_position(AREA, 20.0, Size::new(360.0, f32::NAN), 0.0).is_err());
    }
}
