// SPDX-License-Identifier: MPL-2.0
//! Application root state for the notice stack demo shell.
//!
//! The `App` struct wires the notice [`Coordinator`] to iced: it forwards
//! animation ticks and window resizes to the stack, renders the stack as an
//! overlay, and turns button presses into show/dismiss requests.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;
mod window_area;

pub use message::{Flags, Message};
pub use window_area::WindowArea;

use crate::config::{self, Config};
use crate::diagnostics::{BufferCapacity, DiagnosticsCollector};
use crate::i18n::fluent::I18n;
use crate::stack::{Coordinator, StackSettings};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::time::Instant;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    stack: Coordinator<WindowArea>,
    diagnostics: DiagnosticsCollector,
    config: Config,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("notices", &self.stack.len())
            .field("locale", self.i18n.current_locale())
            .finish()
    }
}

pub const WINDOW_DEFAULT_WIDTH: f32 = 1024.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 720.0;
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 360.0;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced calls boot through `Fn`; the flags are only consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::from_config(None, Config::default())
    }
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.config_dir);
        let (config, config_warning) = config::load();
        let mut app = Self::from_config(flags.lang, config);

        if let Some(key) = config_warning {
            let text = app.i18n.tr(&key);
            app.stack.warning(text, Instant::now());
        }

        (app, Task::none())
    }

    fn from_config(lang: Option<String>, config: Config) -> Self {
        let i18n = I18n::new(lang, &config);
        let settings = StackSettings::from(&config.notifications);
        let capacity = config
            .diagnostics
            .buffer_capacity
            .map(BufferCapacity::new)
            .unwrap_or_default();
        let diagnostics = DiagnosticsCollector::new(capacity);

        let area = WindowArea::new(iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT));
        let mut stack = Coordinator::with_settings(area, settings);
        stack.set_diagnostics(diagnostics.handle());

        Self {
            i18n,
            stack,
            diagnostics,
            config,
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(!self.stack.is_empty()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let now = Instant::now();
        let mut ctx = update::UpdateContext {
            i18n: &mut self.i18n,
            stack: &mut self.stack,
            diagnostics: &mut self.diagnostics,
            config: &mut self.config,
        };

        match message {
            Message::ShowNotice(kind) => update::handle_show_notice(&mut ctx, kind, now),
            Message::ShowBurst => update::handle_show_burst(&mut ctx, now),
            Message::DismissNotice(id) => {
                ctx.stack.dismiss(id, now);
            }
            Message::CloseAll => ctx.stack.close_all(),
            Message::ExportDiagnostics => {
                let dir = paths::get_app_config_dir();
                update::handle_export_diagnostics(&mut ctx, dir.as_deref(), now);
            }
            Message::LanguageSelected(locale) => update::handle_language_selected(&mut ctx, locale),
            Message::Tick(instant) => update::handle_tick(&mut ctx, instant),
            Message::WindowResized(size) => update::handle_window_resized(&mut ctx, size, now),
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            stack: &self.stack,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticEventKind;
    use crate::stack::NoticeKind;
    use std::time::Duration;

    #[test]
    fn show_notice_adds_to_stack() {
        let mut app = App::default();
        let _ = app.update(Message::ShowNotice(NoticeKind::Warning));

        assert_eq!(app.stack.len(), 1);
        let notice = app.stack.notices().next().unwrap();
        assert_eq!(notice.kind(), NoticeKind::Warning);
        assert!(!notice.text().starts_with("MISSING"));
    }

    #[test]
    fn burst_queues_beyond_capacity() {
        let mut app = App::default();
        let _ = app.update(Message::ShowBurst);

        let capacity = app.stack.settings().capacity();
        assert_eq!(app.stack.on_screen_count(), capacity);
        assert_eq!(app.stack.queued_count(), update::BURST_SIZE - capacity);
    }

    #[test]
    fn dismiss_message_starts_exit() {
        let mut app = App::default();
        let _ = app.update(Message::ShowNotice(NoticeKind::Info));
        let id = app.stack.notices().next().unwrap().id();

        let _ = app.update(Message::DismissNotice(id));
        assert_eq!(
            app.stack.get(id).unwrap().lifecycle(),
            crate::stack::Lifecycle::Exiting
        );
    }

    #[test]
    fn close_all_message_empties_stack() {
        let mut app = App::default();
        let _ = app.update(Message::ShowBurst);
        let _ = app.update(Message::CloseAll);
        assert!(app.stack.is_empty());
    }

    #[test]
    fn tick_drains_diagnostics() {
        let mut app = App::default();
        let _ = app.update(Message::ShowNotice(NoticeKind::Error));
        let _ = app.update(Message::Tick(Instant::now() + Duration::from_secs(2)));

        assert!(app
            .diagnostics
            .iter()
            .any(|e| matches!(e.kind, DiagnosticEventKind::NoticeShown { .. })));
    }

    #[test]
    fn export_writes_report_and_confirms_with_notice() {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut app = App::default();
        let _ = app.update(Message::ShowNotice(NoticeKind::Warning));

        let mut ctx = update::UpdateContext {
            i18n: &mut app.i18n,
            stack: &mut app.stack,
            diagnostics: &mut app.diagnostics,
            config: &mut app.config,
        };
        update::handle_export_diagnostics(&mut ctx, Some(temp_dir.path()), Instant::now());

        let written: Vec<_> = std::fs::read_dir(temp_dir.path())
            .expect("read_dir failed")
            .collect();
        assert_eq!(written.len(), 1);

        let confirmation = app.stack.notices().last().unwrap();
        assert_eq!(confirmation.kind(), NoticeKind::Info);
        assert!(confirmation.text().contains("notice_stack_diagnostics_"));
    }

    #[test]
    fn export_without_directory_raises_error_notice() {
        let mut app = App::default();
        let mut ctx = update::UpdateContext {
            i18n: &mut app.i18n,
            stack: &mut app.stack,
            diagnostics: &mut app.diagnostics,
            config: &mut app.config,
        };
        update::handle_export_diagnostics(&mut ctx, None, Instant::now());

        let notice = app.stack.notices().next().unwrap();
        assert_eq!(notice.kind(), NoticeKind::Error);
        assert!(!notice.text().starts_with("MISSING"));
    }

    #[test]
    fn resize_moves_notices_to_new_right_edge() {
        let mut app = App::default();
        let _ = app.update(Message::ShowNotice(NoticeKind::Info));
        let _ = app.update(Message::WindowResized(iced::Size::new(600.0, 400.0)));

        let target = app.stack.notices().next().unwrap().target().unwrap();
        let margin = app.stack.settings().margin();
        assert_eq!(target.x, 600.0 - 360.0 - margin);
    }
}
