// SPDX-License-Identifier: MPL-2.0
//! `notice_stack` is a transient notification stack for desktop shells.
//!
//! The [`stack`] module is toolkit independent: it positions short-lived
//! notices against a work area, animates their entry, exit and reflow, and
//! dismisses them on single-shot timers, all driven by explicit instants.
//! The [`app`] and [`ui`] modules host the stack in an iced window.

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod stack;
pub mod ui;
