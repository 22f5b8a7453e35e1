// SPDX-License-Identifier: MPL-2.0
//! Photo browser coordinator.
//!
//! Owns the grid/full-screen mode, the cosmetic transition between them and
//! the item list, and relays index and chrome state between the grid, the
//! pager and the bars. Sub-components never talk to each other directly:
//! their effects come back here and are turned into browser [`Effect`]s.
//! Effects meant for the host are wrapped in [`Effect::Notify`].

use super::bars::{self, BarContext};
use super::subcomponents::deferred::RetryTicket;
use super::subcomponents::transition::Transition;
use super::subcomponents::{chrome, grid, pager};
use crate::application::port::media::LoadFailure;
use crate::config::BrowserConfig;
use crate::domain::media::{ensure_unique_keys, MediaItem, MediaKey};
use crate::domain::ui::TransitionProgress;
use crate::error::Result;
use iced::widget::{container, Column, Container, Space, Stack};
use iced::{time, Background, Color, Element, Length, Subscription, Theme};
use std::time::{Duration, Instant};

/// Poll interval for settle detection while a gesture is in flight.
const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Frame interval of the mode transition.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Presentation mode. Rendering is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Grid,
    FullScreen,
}

/// Notifications for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ActionButton { item: MediaItem, index: usize },
    PhotoLongPress { item: MediaItem, index: usize },
    MediaSelection {
        item: MediaItem,
        index: usize,
        selected: bool,
    },
    GridButtonTap,
    /// The bars were shown or hidden.
    ChromeVisibilityChanged(bool),
    /// Host chrome outside the widget should be shown (`true`) or hidden.
    HostChromeRequested(bool),
    IndexChanged(usize),
    ModeChanged(Mode),
    Back,
    LoadFailed { index: usize, failure: LoadFailure },
}

/// Work requested by the browser.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify(Event),
    SeekTo { index: usize, animated: bool },
    Resolve {
        slot: usize,
        key: MediaKey,
        uri: String,
    },
    ScheduleRetry {
        index: usize,
        ticket: RetryTicket,
        delay: Duration,
    },
    CancelRetries,
}

#[derive(Debug, Clone)]
pub enum Message {
    Grid(grid::Message),
    Pager(pager::Message),
    Bar(bars::Message),
    AnimationTick,
}

#[derive(Debug, Clone)]
pub struct State {
    config: BrowserConfig,
    items: Vec<MediaItem>,
    mode: Mode,
    current_index: usize,
    transition: Transition,
    grid: grid::State,
    pager: pager::State,
    chrome: chrome::State,
}

impl State {
    /// Builds a browser over `items`. An empty list is valid and renders
    /// nothing.
    ///
    /// Returns the effects of the initial presentation (opening the pager
    /// when not starting on the grid).
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or duplicate item keys.
    pub fn new(items: Vec<MediaItem>, config: BrowserConfig) -> Result<(Self, Vec<Effect>)> {
        config.validate()?;
        ensure_unique_keys(&items)?;

        let grid = grid::State::new(&config.layout)?;
        let pager = pager::State::new(&config, &items);
        let mut chrome = chrome::State::new(&config.chrome);

        let mode = if config.starts_on_grid() {
            Mode::Grid
        } else {
            Mode::FullScreen
        };
        let progress = match mode {
            Mode::Grid => TransitionProgress::GRID,
            Mode::FullScreen => TransitionProgress::FULL_SCREEN,
        };
        let transition = Transition::at_rest(progress, config.transition_duration());

        if mode == Mode::FullScreen {
            // Initial state, not a change the host needs to hear about.
            chrome.handle(chrome::Message::EnteredFullScreen);
        }

        let mut state = Self {
            current_index: pager.current_index(),
            config,
            items,
            mode,
            transition,
            grid,
            pager,
            chrome,
        };

        let effects = if mode == Mode::FullScreen {
            let index = state.current_index;
            let opened = state.pager.open(index, &state.items);
            state.absorb(opened)
        } else {
            Vec::new()
        };

        tracing::debug!(
            items = state.items.len(),
            mode = ?state.mode,
            index = state.current_index,
            "photo browser created"
        );
        Ok((state, effects))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    #[must_use]
    pub fn transition_progress(&self) -> TransitionProgress {
        self.transition.progress()
    }

    /// Target the transition is heading to.
    #[must_use]
    pub fn transition_target(&self) -> TransitionProgress {
        self.transition.target()
    }

    #[must_use]
    pub fn chrome_visible(&self) -> bool {
        self.chrome.is_visible()
    }

    #[must_use]
    pub fn status_bar_hidden(&self) -> bool {
        self.chrome.status_bar_hidden()
    }

    #[must_use]
    pub fn pager(&self) -> &pager::State {
        &self.pager
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    pub fn handle(&mut self, msg: Message) -> Vec<Effect> {
        match msg {
            Message::Grid(msg) => {
                if self.mode != Mode::Grid {
                    return Vec::new();
                }
                match self.grid.handle(msg, self.items.len()) {
                    grid::Effect::OpenPager(index) => self.enter_full_screen(index),
                    grid::Effect::SelectionToggled { index, selected } => {
                        self.select(index, selected)
                    }
                    grid::Effect::None => Vec::new(),
                }
            }
            Message::Pager(msg) => {
                let effects = self.pager.handle(msg, &self.items);
                self.absorb(effects)
            }
            Message::Bar(msg) => self.handle_bar(msg),
            Message::AnimationTick => {
                self.transition.tick(Instant::now());
                Vec::new()
            }
        }
    }

    fn handle_bar(&mut self, msg: bars::Message) -> Vec<Effect> {
        if self.mode != Mode::FullScreen || self.items.is_empty() {
            return Vec::new();
        }
        match msg {
            bars::Message::GridButton if self.config.layout.enable_grid => self.enter_grid(),
            bars::Message::GridButton => Vec::new(),
            bars::Message::ActionButton => self
                .items
                .get(self.current_index)
                .map(|item| {
                    Effect::Notify(Event::ActionButton {
                        item: item.clone(),
                        index: self.current_index,
                    })
                })
                .into_iter()
                .collect(),
            bars::Message::Back => vec![Effect::Notify(Event::Back)],
            bars::Message::NextPage => self.handle(Message::Pager(pager::Message::NextPage)),
            bars::Message::PreviousPage => {
                self.handle(Message::Pager(pager::Message::PreviousPage))
            }
        }
    }

    /// Grid to full screen at `index`.
    fn enter_full_screen(&mut self, index: usize) -> Vec<Effect> {
        self.current_index = index;
        self.mode = Mode::FullScreen;
        self.transition
            .start(TransitionProgress::FULL_SCREEN, Instant::now());

        let mut effects = vec![
            Effect::Notify(Event::ModeChanged(Mode::FullScreen)),
            Effect::Notify(Event::HostChromeRequested(false)),
        ];
        if let chrome::Effect::VisibilityChanged(visible) =
            self.chrome.handle(chrome::Message::EnteredFullScreen)
        {
            effects.push(Effect::Notify(Event::ChromeVisibilityChanged(visible)));
        }
        let opened = self.pager.open(index, &self.items);
        effects.extend(self.absorb(opened));
        effects
    }

    /// Full screen back to the grid.
    fn enter_grid(&mut self) -> Vec<Effect> {
        self.mode = Mode::Grid;
        self.transition.start(TransitionProgress::GRID, Instant::now());
        self.pager.detach();
        self.chrome.handle(chrome::Message::EnteredGrid);

        vec![
            Effect::Notify(Event::ModeChanged(Mode::Grid)),
            Effect::Notify(Event::HostChromeRequested(true)),
            Effect::Notify(Event::GridButtonTap),
        ]
    }

    /// Updates the local selection flag and reports it.
    fn select(&mut self, index: usize, selected: bool) -> Vec<Effect> {
        let Some(item) = self.items.get_mut(index) else {
            return Vec::new();
        };
        item.selected = selected;
        vec![Effect::Notify(Event::MediaSelection {
            item: item.clone(),
            index,
            selected,
        })]
    }

    /// Turns pager effects into browser effects.
    fn absorb(&mut self, effects: Vec<pager::Effect>) -> Vec<Effect> {
        let mut out = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                pager::Effect::SeekTo { index, animated } => {
                    out.push(Effect::SeekTo { index, animated });
                }
                pager::Effect::ScheduleRetry {
                    index,
                    ticket,
                    delay,
                } => {
                    out.push(Effect::ScheduleRetry {
                        index,
                        ticket,
                        delay,
                    });
                }
                pager::Effect::CancelRetries => out.push(Effect::CancelRetries),
                pager::Effect::Resolve { slot, key, uri } => {
                    out.push(Effect::Resolve { slot, key, uri });
                }
                pager::Effect::IndexChanged(index) => {
                    self.current_index = index;
                    out.push(Effect::Notify(Event::IndexChanged(index)));
                    if let chrome::Effect::VisibilityChanged(visible) =
                        self.chrome.handle(chrome::Message::IndexChanged)
                    {
                        out.push(Effect::Notify(Event::ChromeVisibilityChanged(visible)));
                    }
                }
                pager::Effect::LoadFailed { index, failure } => {
                    out.push(Effect::Notify(Event::LoadFailed { index, failure }));
                }
                pager::Effect::Tapped => {
                    if let chrome::Effect::VisibilityChanged(visible) =
                        self.chrome.handle(chrome::Message::Tapped)
                    {
                        out.push(Effect::Notify(Event::ChromeVisibilityChanged(visible)));
                    }
                }
                pager::Effect::LongPressed(index) => {
                    if let Some(item) = self.items.get(index) {
                        out.push(Effect::Notify(Event::PhotoLongPress {
                            item: item.clone(),
                            index,
                        }));
                    }
                }
                pager::Effect::SelectionToggled { index, selected } => {
                    out.extend(self.select(index, selected));
                }
            }
        }
        out
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Replaces the item list. The current index is clamped, pending
    /// retries are cancelled and pages showing a different item reload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::DuplicateMediaKey`] and keeps the old
    /// list when keys collide.
    pub fn set_items(&mut self, items: Vec<MediaItem>) -> Result<Vec<Effect>> {
        ensure_unique_keys(&items)?;
        self.items = items;
        let effects = self.pager.set_items(&self.items);
        self.current_index = self.pager.current_index();
        Ok(self.absorb(effects))
    }

    /// Cancels outstanding retries and drops all page state. The returned
    /// effects stop the armed retry timers.
    pub fn teardown(&mut self) -> Vec<Effect> {
        let effects = self.pager.teardown();
        tracing::debug!("photo browser torn down");
        self.absorb(effects)
    }

    // -------------------------------------------------------------------------
    // Subscription / View
    // -------------------------------------------------------------------------

    pub fn subscription(&self) -> Subscription<Message> {
        let settle = if self.pager.is_gesture_in_flight() {
            time::every(SETTLE_POLL_INTERVAL).map(|_| Message::Pager(pager::Message::SettleTick))
        } else {
            Subscription::none()
        };
        let animation = if self.transition.is_running() {
            time::every(ANIMATION_FRAME).map(|_| Message::AnimationTick)
        } else {
            Subscription::none()
        };
        Subscription::batch([settle, animation])
    }

    pub fn view(&self) -> Element<'_, Message> {
        if self.items.is_empty() {
            return grid::empty();
        }

        match self.mode {
            Mode::Grid => self.grid.view(&self.items).map(Message::Grid),
            Mode::FullScreen => self.full_screen_view(),
        }
    }

    fn full_screen_view(&self) -> Element<'_, Message> {
        let pager = self
            .pager
            .view(&self.items, self.config.layout.display_selection_buttons)
            .map(Message::Pager);

        let mut stack = Stack::new().push(pager);

        if self.chrome.is_visible() {
            let ctx = BarContext {
                chrome: &self.config.chrome,
                enable_grid: self.config.layout.enable_grid,
                index: self.current_index,
                count: self.items.len(),
                caption: self
                    .items
                    .get(self.current_index)
                    .and_then(|item| item.caption.as_deref()),
            };
            let mut overlay = Column::new().width(Length::Fill).height(Length::Fill);
            if self.config.chrome.display_top_bar {
                overlay = overlay.push(bars::top_bar(&ctx).map(Message::Bar));
            }
            overlay = overlay
                .push(Space::new().height(Length::Fill))
                .push(bars::bottom_bar(&ctx).map(Message::Bar));
            stack = stack.push(overlay);
        }

        // Fade in from black while the transition runs.
        let progress = self.transition.progress().value();
        if progress < 1.0 {
            let veil = Color::from_rgba(0.0, 0.0, 0.0, 1.0 - progress);
            stack = stack.push(
                Container::new(Space::new())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(move |_theme: &Theme| container::Style {
                        background: Some(Background::Color(veil)),
                        ..Default::default()
                    }),
            );
        }

        stack.into()
    }
}
