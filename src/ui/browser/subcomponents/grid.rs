// SPDX-License-Identifier: MPL-2.0
//! Thumbnail grid sub-component.

use crate::config::{LayoutConfig, ITEM_MARGIN};
use crate::domain::media::MediaItem;
use crate::domain::ui::ItemsPerRow;
use crate::error::{Error, Result};
use iced::widget::{button, image, mouse_area, Column, Container, Row, Scrollable, Space, Stack, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    widget::responsive,
    Element, Length, Padding, Size,
};

/// Cell geometry for one available width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    /// Edge of a square thumbnail, margins excluded.
    pub cell_size: f32,
    /// Shift applied to the whole grid.
    pub left_margin: f32,
}

impl GridLayout {
    /// Cell size is `(available - offset) / columns - 2 * ITEM_MARGIN`,
    /// floored at zero.
    #[must_use]
    pub fn compute(available_width: f32, offset: f32, per_row: ItemsPerRow) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let columns = per_row.value() as f32;
        let usable = if available_width.is_finite() {
            available_width - offset
        } else {
            0.0
        };
        let cell_size = (usable / columns - 2.0 * ITEM_MARGIN).max(0.0);
        Self {
            columns: per_row.as_usize(),
            cell_size,
            left_margin: offset / 2.0,
        }
    }

    #[must_use]
    pub fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }

    #[must_use]
    pub fn column_of(&self, index: usize) -> usize {
        index % self.columns
    }

    #[must_use]
    pub fn row_count(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.columns)
    }
}

#[derive(Debug, Clone)]
pub struct State {
    per_row: ItemsPerRow,
    offset: f32,
    display_selection_buttons: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    CellTapped(usize),
    SelectionToggled { index: usize, selected: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Switch to the pager at this index.
    OpenPager(usize),
    SelectionToggled { index: usize, selected: bool },
}

impl State {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a zero column count.
    pub fn new(layout: &LayoutConfig) -> Result<Self> {
        Ok(Self {
            per_row: ItemsPerRow::try_new(layout.items_per_row)?,
            offset: layout.grid_offset,
            display_selection_buttons: layout.display_selection_buttons,
        })
    }

    pub fn handle(&mut self, msg: Message, item_count: usize) -> Effect {
        match msg {
            Message::CellTapped(index) if index < item_count => Effect::OpenPager(index),
            Message::SelectionToggled { index, selected } if index < item_count => {
                Effect::SelectionToggled { index, selected }
            }
            Message::CellTapped(index) | Message::SelectionToggled { index, .. } => {
                let err = Error::IndexOutOfRange {
                    index,
                    len: item_count,
                };
                tracing::warn!(%err, "ignoring grid interaction");
                Effect::None
            }
        }
    }

    #[must_use]
    pub fn layout(&self, available_width: f32) -> GridLayout {
        GridLayout::compute(available_width, self.offset, self.per_row)
    }

    pub fn view<'a>(&'a self, items: &'a [MediaItem]) -> Element<'a, Message> {
        responsive(move |size: Size| self.view_sized(items, size.width)).into()
    }

    fn view_sized<'a>(&'a self, items: &'a [MediaItem], width: f32) -> Element<'a, Message> {
        let layout = self.layout(width);
        let mut rows = Column::new();

        for (row_index, chunk) in items.chunks(layout.columns).enumerate() {
            let mut row = Row::new();
            for (column, item) in chunk.iter().enumerate() {
                let index = row_index * layout.columns + column;
                row = row.push(self.cell(item, index, layout.cell_size));
            }
            rows = rows.push(row);
        }

        let shifted = Container::new(rows).padding(Padding {
            left: layout.left_margin,
            ..Padding::ZERO
        });

        Scrollable::new(shifted)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn cell<'a>(&self, item: &'a MediaItem, index: usize, size: f32) -> Element<'a, Message> {
        // iced decodes thumbnails itself; only local paths are supported here.
        let uri = item.display_uri();
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        let thumbnail = image(image::Handle::from_path(path))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .content_fit(iced::ContentFit::Cover);

        let tappable = mouse_area(thumbnail).on_release(Message::CellTapped(index));

        let mut stack = Stack::new().push(tappable);
        if self.display_selection_buttons {
            let glyph = if item.selected { "☑" } else { "☐" };
            let toggle = button(Text::new(glyph))
                .padding(2)
                .style(button::text)
                .on_press(Message::SelectionToggled {
                    index,
                    selected: !item.selected,
                });
            stack = stack.push(
                Container::new(toggle)
                    .width(Length::Fixed(size))
                    .height(Length::Fixed(size))
                    .align_x(Horizontal::Right)
                    .align_y(Vertical::Bottom),
            );
        }

        Container::new(stack)
            .padding(ITEM_MARGIN)
            .into()
    }
}

/// Placeholder shown instead of the grid when the list is empty.
pub fn empty<'a, M: 'a>() -> Element<'a, M> {
    Space::new().width(Length::Fill).height(Length::Fill).into()
}
