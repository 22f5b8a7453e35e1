// SPDX-License-Identifier: MPL-2.0
//! Top and bottom bars shown over the full-screen pager.

use crate::config::ChromeConfig;
use iced::widget::{button, container, Container, Row, Space, Text};
use iced::{alignment::Vertical, Background, Color, Element, Length, Theme};

/// Bar background, translucent so the page stays visible underneath.
const BAR_BACKGROUND: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    GridButton,
    ActionButton,
    Back,
    NextPage,
    PreviousPage,
}

/// Everything the bars need to render.
pub struct BarContext<'a> {
    pub chrome: &'a ChromeConfig,
    pub enable_grid: bool,
    pub index: usize,
    pub count: usize,
    pub caption: Option<&'a str>,
}

/// Top bar title: the item caption, else the position in the list.
#[must_use]
pub fn title(index: usize, count: usize, caption: Option<&str>) -> String {
    match caption {
        Some(caption) if !caption.is_empty() => caption.to_string(),
        _ => format!("{} of {}", index + 1, count),
    }
}

fn bar_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(BAR_BACKGROUND)),
        text_color: Some(Color::WHITE),
        ..Default::default()
    }
}

fn bar_button<'a>(label: &'a str, message: Option<Message>) -> Element<'a, Message> {
    button(Text::new(label).size(18))
        .padding(8)
        .style(button::text)
        .on_press_maybe(message)
        .into()
}

pub fn top_bar<'a>(ctx: &BarContext<'a>) -> Element<'a, Message> {
    let mut row = Row::new()
        .spacing(8)
        .padding(8)
        .align_y(Vertical::Center);

    if ctx.chrome.display_back_button {
        row = row.push(bar_button("‹ Back", Some(Message::Back)));
    }
    row = row
        .push(Space::new().width(Length::Fill))
        .push(Text::new(title(ctx.index, ctx.count, ctx.caption)).size(16))
        .push(Space::new().width(Length::Fill));

    Container::new(row)
        .width(Length::Fill)
        .style(bar_style)
        .into()
}

pub fn bottom_bar<'a>(ctx: &BarContext<'a>) -> Element<'a, Message> {
    let mut row = Row::new()
        .spacing(8)
        .padding(8)
        .align_y(Vertical::Center);

    if ctx.enable_grid {
        row = row.push(bar_button("▦", Some(Message::GridButton)));
    }
    row = row.push(Space::new().width(Length::Fill));

    if ctx.chrome.display_nav_arrows {
        let has_previous = ctx.index > 0;
        let has_next = ctx.index + 1 < ctx.count;
        row = row
            .push(bar_button("◀", has_previous.then_some(Message::PreviousPage)))
            .push(bar_button("▶", has_next.then_some(Message::NextPage)));
    }
    row = row.push(Space::new().width(Length::Fill));

    if let Some(label) = ctx.chrome.custom_bottom_bar_label.as_deref() {
        row = row.push(Text::new(label).size(16));
    }
    if ctx.chrome.display_action_button {
        row = row.push(bar_button("⇪", Some(Message::ActionButton)));
    }

    Container::new(row)
        .width(Length::Fill)
        .style(bar_style)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_shows_position_without_caption() {
        assert_eq!(title(0, 5, None), "1 of 5");
        assert_eq!(title(4, 5, Some("")), "5 of 5");
    }

    #[test]
    fn title_prefers_caption() {
        assert_eq!(title(2, 5, Some("Harbour at dusk")), "Harbour at dusk");
    }
}
