// SPDX-License-Identifier: MPL-2.0
//! Transient notice stack.
//!
//! Toolkit-independent core: notices are positioned against a work area
//! reported by a [`GeometryProvider`], animated with [`Tween`]s and
//! dismissed by single-shot [`Timer`]s. Time never advances on its own;
//! every operation takes the current [`std::time::Instant`] and the host
//! calls [`Coordinator::tick`] from its event loop.

pub mod animation;
pub mod coordinator;
pub mod geometry;
pub mod kind;
pub mod notice;
pub mod registry;
pub mod settings;
pub mod timer;

pub use animation::{Easing, Lerp, Tween};
pub use coordinator::Coordinator;
pub use geometry::{FixedWorkArea, GeometryProvider, Point, Rect, Size};
pub use kind::{NoticeKind, UnknownKind};
pub use notice::{
    Lifecycle, Notice, NoticeEvent, NoticeHandle, NoticeId, NoticeRequest, TimerOutcome,
};
pub use registry::{Reflow, Registry};
pub use settings::StackSettings;
pub use timer::Timer;
