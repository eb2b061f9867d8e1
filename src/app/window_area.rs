// SPDX-License-Identifier: MPL-2.0
//! Work area backed by the application window.

use crate::stack::{GeometryProvider, Rect};

/// Reports the window's client area as the notice work area.
///
/// Notices are drawn in an overlay covering the whole window, so the work
/// area starts at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowArea {
    size: Option<iced::Size>,
}

impl WindowArea {
    #[must_use]
    pub fn new(size: iced::Size) -> Self {
        Self { size: Some(size) }
    }

    pub fn resize(&mut self, size: iced::Size) {
        self.size = Some(size);
    }
}

impl GeometryProvider for WindowArea {
    fn work_area(&self) -> Option<Rect> {
        self.size
            .map(|size| Rect::new(0.0, 0.0, size.width, size.height))
    }
}
