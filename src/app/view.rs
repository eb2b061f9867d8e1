// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The page holds the demo controls. The notice overlay is layered on top
//! and spans the whole window, matching the coordinate space of the stack.

use super::update::BURST_SIZE;
use super::window_area::WindowArea;
use super::Message;
use crate::i18n::fluent::I18n;
use crate::stack::{Coordinator, NoticeKind};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::toast::{self, Toast};
use iced::widget::{button, pick_list, Column, Container, Row, Stack, Text};
use iced::{alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub stack: &'a Coordinator<WindowArea>,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let overlay = Toast::view_overlay(ctx.stack.notices(), ctx.i18n).map(
        |toast::Message::Dismiss(id)| Message::DismissNotice(id),
    );

    Stack::new()
        .push(view_controls(ctx.i18n, ctx.stack))
        .push(overlay)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_controls<'a>(i18n: &'a I18n, stack: &Coordinator<WindowArea>) -> Element<'a, Message> {
    let show_buttons = NoticeKind::ALL.into_iter().fold(
        Row::new().spacing(spacing::XS),
        |row, kind| {
            let key = match kind {
                NoticeKind::Info => "button-show-info",
                NoticeKind::Warning => "button-show-warning",
                NoticeKind::Error => "button-show-error",
            };
            row.push(button(Text::new(i18n.tr(key))).on_press(Message::ShowNotice(kind)))
        },
    );

    let burst_count = BURST_SIZE.to_string();
    let stack_buttons = Row::new()
        .spacing(spacing::XS)
        .push(
            button(Text::new(
                i18n.tr_with_args("button-show-burst", &[("count", burst_count.as_str())]),
            ))
            .on_press(Message::ShowBurst),
        )
        .push(button(Text::new(i18n.tr("button-close-all"))).on_press(Message::CloseAll))
        .push(
            button(Text::new(i18n.tr("button-export-diagnostics")))
                .on_press(Message::ExportDiagnostics),
        );

    let language = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(i18n.tr("label-language")))
        .push(pick_list(
            i18n.available_locales(),
            Some(i18n.current_locale().clone()),
            Message::LanguageSelected,
        ));

    let visible = stack.on_screen_count().to_string();
    let queued = stack.queued_count().to_string();
    let status = Text::new(i18n.tr_with_args(
        "status-stack",
        &[("visible", visible.as_str()), ("queued", queued.as_str())],
    ))
    .size(typography::CAPTION);

    let content = Column::new()
        .spacing(spacing::MD)
        .push(Text::new(i18n.tr("window-title")).size(typography::TITLE_MD))
        .push(show_buttons)
        .push(stack_buttons)
        .push(language)
        .push(status);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(alignment::Vertical::Bottom)
        .padding(spacing::LG)
        .into()
}
