// SPDX-License-Identifier: MPL-2.0
//! Keyboard shortcuts for the demo application.
//!
//! Arrow keys page through the pager, `G` returns to the grid and `H`
//! toggles the host bar. Keys captured by a widget are left alone.

use super::Message;
use crate::ui::browser::{self, bars};
use iced::keyboard::{self, key, Key};
use iced::{event, Subscription};

pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| {
        if status == event::Status::Captured {
            return None;
        }
        match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => shortcut(&key),
            _ => None,
        }
    })
}

fn shortcut(key: &Key) -> Option<Message> {
    let bar = |msg| Some(Message::Browser(browser::Message::Bar(msg)));
    match key.as_ref() {
        Key::Named(key::Named::ArrowRight) => bar(bars::Message::NextPage),
        Key::Named(key::Named::ArrowLeft) => bar(bars::Message::PreviousPage),
        Key::Character("g") => bar(bars::Message::GridButton),
        Key::Character("h") => Some(Message::ToggleHostBar),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_page_the_browser() {
        let next = shortcut(&Key::Named(key::Named::ArrowRight));
        assert!(matches!(
            next,
            Some(Message::Browser(browser::Message::Bar(bars::Message::NextPage)))
        ));
        let previous = shortcut(&Key::Named(key::Named::ArrowLeft));
        assert!(matches!(
            previous,
            Some(Message::Browser(browser::Message::Bar(
                bars::Message::PreviousPage
            )))
        ));
    }

    #[test]
    fn letters_map_to_grid_and_host_bar() {
        assert!(matches!(
            shortcut(&Key::Character("g".into())),
            Some(Message::Browser(browser::Message::Bar(bars::Message::GridButton)))
        ));
        assert!(matches!(
            shortcut(&Key::Character("h".into())),
            Some(Message::ToggleHostBar)
        ));
        assert!(shortcut(&Key::Character("x".into())).is_none());
    }
}
