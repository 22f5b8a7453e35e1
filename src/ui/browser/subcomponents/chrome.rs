// SPDX-License-Identifier: MPL-2.0
//! Chrome visibility sub-component for the top and bottom bars.

use crate::config::ChromeConfig;

/// Bar visibility state.
#[derive(Debug, Clone)]
pub struct State {
    /// Whether the bars are currently shown in full screen.
    visible: bool,
    /// Taps never hide the bars.
    always_show: bool,
    /// Configured default visibility.
    display_top_bar: bool,
    /// Keep the status bar even when bars are hidden.
    always_display_status_bar: bool,
    /// Floating grid controls, hidden while in full screen.
    grid_controls_visible: bool,
}

/// Messages for the chrome sub-component.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    /// Single tap on the full-screen page.
    Tapped,
    /// Switched from the grid to the pager.
    EnteredFullScreen,
    /// Switched back to the grid.
    EnteredGrid,
    /// The pager committed a new index.
    IndexChanged,
}

/// Effects produced by chrome visibility changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Visibility changed; the host is told the new value.
    VisibilityChanged(bool),
}

impl State {
    #[must_use]
    pub fn new(config: &ChromeConfig) -> Self {
        Self {
            visible: config.display_top_bar,
            always_show: config.always_show_controls,
            display_top_bar: config.display_top_bar,
            always_display_status_bar: config.always_display_status_bar,
            grid_controls_visible: true,
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Tapped => self.toggle(),
            Message::EnteredFullScreen => {
                self.grid_controls_visible = false;
                Effect::VisibilityChanged(self.visible)
            }
            Message::EnteredGrid => {
                self.grid_controls_visible = true;
                Effect::None
            }
            Message::IndexChanged => {
                // Only shown-but-not-wanted is corrected; hidden-but-wanted
                // stays hidden until the next tap.
                if self.visible && !self.display_top_bar {
                    self.toggle()
                } else {
                    Effect::None
                }
            }
        }
    }

    fn toggle(&mut self) -> Effect {
        if self.always_show {
            return Effect::None;
        }
        self.visible = !self.visible;
        tracing::debug!(visible = self.visible, "chrome toggled");
        Effect::VisibilityChanged(self.visible)
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn grid_controls_visible(&self) -> bool {
        self.grid_controls_visible
    }

    /// The status bar hides only together with the bars, and never when it
    /// is pinned.
    #[must_use]
    pub fn status_bar_hidden(&self) -> bool {
        !self.always_display_status_bar && !self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(always_show: bool, display_top_bar: bool) -> ChromeConfig {
        ChromeConfig {
            always_show_controls: always_show,
            display_top_bar,
            ..ChromeConfig::default()
        }
    }

    #[test]
    fn seeded_from_display_top_bar() {
        assert!(State::new(&config(false, true)).is_visible());
        assert!(!State::new(&config(false, false)).is_visible());
    }

    #[test]
    fn tap_toggles_visibility() {
        let mut state = State::new(&config(false, true));
        assert_eq!(state.handle(Message::Tapped), Effect::VisibilityChanged(false));
        assert_eq!(state.handle(Message::Tapped), Effect::VisibilityChanged(true));
    }

    #[test]
    fn always_show_controls_suppresses_toggles() {
        let mut state = State::new(&config(true, true));
        for _ in 0..3 {
            assert_eq!(state.handle(Message::Tapped), Effect::None);
            assert!(state.is_visible());
        }
    }

    #[test]
    fn index_change_hides_unwanted_chrome() {
        let mut state = State::new(&config(false, false));
        state.handle(Message::Tapped);
        assert!(state.is_visible());

        assert_eq!(
            state.handle(Message::IndexChanged),
            Effect::VisibilityChanged(false)
        );
        // Already hidden: nothing to correct
        assert_eq!(state.handle(Message::IndexChanged), Effect::None);
    }

    #[test]
    fn index_change_leaves_hidden_wanted_chrome_alone() {
        let mut state = State::new(&config(false, true));
        state.handle(Message::Tapped);
        assert!(!state.is_visible());

        assert_eq!(state.handle(Message::IndexChanged), Effect::None);
        assert!(!state.is_visible());
    }

    #[test]
    fn index_change_correction_respects_always_show() {
        let mut state = State::new(&config(true, false));
        // Pinned controls never toggle, so nothing is shown to correct.
        assert_eq!(state.handle(Message::IndexChanged), Effect::None);
    }

    #[test]
    fn entering_full_screen_hides_grid_controls_and_reports_chrome() {
        let mut state = State::new(&config(false, true));
        assert!(state.grid_controls_visible());

        assert_eq!(
            state.handle(Message::EnteredFullScreen),
            Effect::VisibilityChanged(true)
        );
        assert!(!state.grid_controls_visible());

        assert_eq!(state.handle(Message::EnteredGrid), Effect::None);
        assert!(state.grid_controls_visible());
    }

    #[test]
    fn status_bar_follows_chrome_unless_pinned() {
        let mut state = State::new(&config(false, true));
        assert!(!state.status_bar_hidden());
        state.handle(Message::Tapped);
        assert!(state.status_bar_hidden());

        let mut pinned = State::new(&ChromeConfig {
            always_display_status_bar: true,
            ..ChromeConfig::default()
        });
        pinned.handle(Message::Tapped);
        assert!(!pinned.status_bar_hidden());
    }
}
