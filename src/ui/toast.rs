// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering the notice stack.
//!
//! Each notice is drawn as a fixed-width card with a kind-colored accent,
//! placed at the position and opacity sampled by the coordinator on the
//! last tick. The cards are layered in an [`iced::widget::Stack`] so they
//! never push the page content around.

use crate::i18n::fluent::I18n;
use crate::stack::{Notice, NoticeId, NoticeKind};
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, spacing, typography};
use iced::widget::{button, container, text, Column, Container, Row, Stack, Text};
use iced::{alignment, Color, Element, Length, Padding, Theme};

/// Interactions raised by a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Dismiss(NoticeId),
}

/// Accent color of a notice kind.
#[must_use]
pub fn accent_color(kind: NoticeKind) -> Color {
    match kind {
        NoticeKind::Info => palette::INFO_500,
        NoticeKind::Warning => palette::WARNING_500,
        NoticeKind::Error => palette::ERROR_500,
    }
}

/// Scales the alpha channel of `color` by the notice opacity.
fn faded(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha.clamp(opacity::TRANSPARENT, opacity::OPAQUE),
        ..color
    }
}

pub struct Toast;

impl Toast {
    /// Renders one notice card.
    pub fn view<'a>(notice: &'a Notice, i18n: &I18n) -> Element<'a, Message> {
        let alpha = notice.opacity();
        let accent = accent_color(notice.kind());
        let title = notice
            .title()
            .map_or_else(|| i18n.tr(notice.kind().i18n_key()), str::to_string);

        let title_widget = Text::new(title)
            .size(typography::BODY_LG)
            .style(move |_theme: &Theme| text::Style {
                color: Some(faded(accent, alpha)),
            });

        let body_widget = Text::new(notice.text())
            .size(typography::BODY)
            .style(move |theme: &Theme| text::Style {
                color: Some(faded(theme.palette().text, alpha)),
            });

        let dismiss_button = button(Text::new("×").size(typography::BODY_LG))
            .on_press(Message::Dismiss(notice.id()))
            .padding(spacing::XXS)
            .style(move |theme: &Theme, status| dismiss_button_style(theme, status, alpha));

        let header = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(title_widget).width(Length::Fill))
            .push(dismiss_button);

        let content = Column::new()
            .spacing(spacing::XXS)
            .push(header)
            .push(body_widget);

        let size = notice.size();
        Container::new(content)
            .width(Length::Fixed(size.width))
            .height(Length::Fixed(size.height))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent, alpha))
            .into()
    }

    /// Renders every on-screen notice at its sampled position.
    ///
    /// Queued notices are skipped. Cards partly above the window are pinned
    /// to the top edge; they are nearly transparent at that point of the
    /// entry or exit.
    pub fn view_overlay<'a>(
        notices: impl Iterator<Item = &'a Notice>,
        i18n: &I18n,
    ) -> Element<'a, Message> {
        let layers = notices.filter(|n| n.is_on_screen()).map(|notice| {
            let position = notice.position();
            let layer: Element<'a, Message> = Container::new(Self::view(notice, i18n))
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(Padding {
                    top: position.y.max(0.0),
                    left: position.x.max(0.0),
                    right: 0.0,
                    bottom: 0.0,
                })
                .into();
            layer
        });

        Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, accent: Color, alpha: f32) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(faded(
            bg_color,
            opacity::SURFACE * alpha,
        ))),
        border: iced::Border {
            color: faded(accent, alpha),
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: iced::Shadow {
            color: faded(shadow::MD.color, opacity::OVERLAY_MEDIUM * alpha),
            ..shadow::MD
        },
        text_color: Some(faded(theme.palette().text, alpha)),
        ..Default::default()
    }
}

/// Style function for the dismiss button.
fn dismiss_button_style(theme: &Theme, status: button::Status, alpha: f32) -> button::Style {
    let base = theme.extended_palette().background.base;
    let hover_fill = |level: f32| {
        Some(iced::Background::Color(faded(
            Color {
                a: level,
                ..palette::GRAY_400
            },
            alpha,
        )))
    };

    let background = match status {
        button::Status::Active | button::Status::Disabled => None,
        button::Status::Hovered => hover_fill(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => hover_fill(opacity::OVERLAY_MEDIUM),
    };

    button::Style {
        background,
        text_color: faded(base.text, alpha),
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
