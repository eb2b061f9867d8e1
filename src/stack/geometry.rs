// SPDX-License-Identifier: MPL-2.0
//! Screen geometry consumed by the notice stack.
//!
//! The stack never talks to a windowing system directly. It asks a
//! [`GeometryProvider`] for the usable work area each time it places or
//! reflows notices, which keeps multi-monitor and resizable hosts working.

use crate::error::{Error, Result};

/// A position in work-area coordinates (logical pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the point shifted vertically by `dy`.
    #[must_use]
    pub fn offset_y(self, dy: f32) -> Self {
        Self {
            x: self.x,
            y: self.y + dy,
        }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of a notice surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fails when either dimension is negative, NaN or infinite.
    pub fn validate(self) -> Result<Self> {
        if self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
        {
            Ok(self)
        } else {
            Err(Error::Geometry(format!(
                "invalid notice size {}x{}",
                self.width, self.height
            )))
        }
    }
}

/// Axis-aligned rectangle described by its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a rectangle from an origin and a size.
    #[must_use]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Returns whether the two rectangles share any interior area.
    ///
    /// Rectangles that only touch along an edge do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Rejects rectangles a stack cannot be laid out in: non-finite edges
    /// or an empty area.
    pub fn validate(self) -> Result<Self> {
        let finite = Point::new(self.left, self.top).is_finite()
            && Point::new(self.right, self.bottom).is_finite();
        if finite && self.width() > 0.0 && self.height() > 0.0 {
            Ok(self)
        } else {
            Err(Error::Geometry(format!(
                "degenerate work area ({}, {}, {}, {})",
                self.left, self.top, self.right, self.bottom
            )))
        }
    }
}

/// Source of the usable on-screen rectangle.
///
/// Returning `None` means the host has no screen information right now;
/// the stack then falls back to the last rectangle it saw.
pub trait GeometryProvider {
    fn work_area(&self) -> Option<Rect>;
}

/// A provider that always reports the same rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWorkArea(pub Rect);

impl GeometryProvider for FixedWorkArea {
    fn work_area(&self) -> Option<Rect> {
        Some(self.0)
    }
}

impl<G: GeometryProvider + ?Sized> GeometryProvider for &G {
    fn work_area(&self) -> Option<Rect> {
        (**self).work_area()
    }
}
