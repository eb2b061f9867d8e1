// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::stack::{NoticeId, NoticeKind};
use std::time::Instant;
use unic_langid::LanguageIdentifier;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Raise a demo notice of the given kind.
    ShowNotice(NoticeKind),
    /// Raise more notices than the stack shows at once.
    ShowBurst,
    DismissNotice(NoticeId),
    CloseAll,
    /// Write the lifecycle event buffer next to `settings.toml`.
    ExportDiagnostics,
    LanguageSelected(LanguageIdentifier),
    /// Animation frame. Only subscribed to while notices exist.
    Tick(Instant),
    WindowResized(iced::Size),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `NOTICE_STACK_CONFIG_DIR`.
    pub config_dir: Option<String>,
}
