// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.

use super::window_area::WindowArea;
use crate::config::{self, Config};
use crate::diagnostics::DiagnosticsCollector;
use crate::i18n::fluent::I18n;
use crate::stack::{Coordinator, NoticeKind};
use std::path::Path;
use std::time::Instant;
use unic_langid::LanguageIdentifier;

/// Number of notices raised by the burst button. Larger than the default
/// soft cap so the queue is visible.
pub const BURST_SIZE: usize = 20;

/// Mutable state the handlers work on.
pub struct UpdateContext<'a> {
    pub i18n: &'a mut I18n,
    pub stack: &'a mut Coordinator<WindowArea>,
    pub diagnostics: &'a mut DiagnosticsCollector,
    pub config: &'a mut Config,
}

fn demo_message_key(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Info => "demo-message-info",
        NoticeKind::Warning => "demo-message-warning",
        NoticeKind::Error => "demo-message-error",
    }
}

pub fn handle_show_notice(ctx: &mut UpdateContext<'_>, kind: NoticeKind, now: Instant) {
    let text = ctx.i18n.tr(demo_message_key(kind));
    let duration = ctx.stack.settings().default_duration();
    ctx.stack.show(text, kind, duration, now);
}

pub fn handle_show_burst(ctx: &mut UpdateContext<'_>, now: Instant) {
    for index in 1..=BURST_SIZE {
        let index = index.to_string();
        let text = ctx
            .i18n
            .tr_with_args("demo-message-burst", &[("index", index.as_str())]);
        ctx.stack.info(text, now);
    }
}

/// Switches the UI language. Notices already on screen were rendered in the
/// old language, so the stack is cleared.
pub fn handle_language_selected(ctx: &mut UpdateContext<'_>, locale: LanguageIdentifier) {
    if !ctx.i18n.set_locale(locale.clone()) {
        tracing::warn!(%locale, "no translations for selected language");
        return;
    }
    ctx.stack.close_all();
    ctx.config.general.language = Some(locale.to_string());
    if let Err(err) = config::save(ctx.config) {
        tracing::warn!(error = %err, "failed to persist language");
    }
}

pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) {
    ctx.stack.tick(now);
    ctx.diagnostics.process_pending();
}

/// Writes the diagnostics report into `dir` and reports the outcome as a
/// notice.
pub fn handle_export_diagnostics(ctx: &mut UpdateContext<'_>, dir: Option<&Path>, now: Instant) {
    let result = match dir {
        Some(dir) => ctx.diagnostics.export_to_dir(dir),
        None => Err(crate::error::Error::Config(
            "no configuration directory available".into(),
        )),
    };

    match result {
        Ok(path) => {
            tracing::info!(path = %path.display(), "diagnostics exported");
            let path = path.display().to_string();
            let text = ctx
                .i18n
                .tr_with_args("diagnostics-exported", &[("path", path.as_str())]);
            ctx.stack.info(text, now);
        }
        Err(err) => {
            tracing::warn!(error = %err, "diagnostics export failed");
            let error = err.to_string();
            let text = ctx
                .i18n
                .tr_with_args("diagnostics-export-failed", &[("error", error.as_str())]);
            ctx.stack.error(text, now);
        }
    }
}

pub fn handle_window_resized(ctx: &mut UpdateContext<'_>, size: iced::Size, now: Instant) {
    ctx.stack.geometry_mut().resize(size);
    ctx.stack.relayout(now);
}
