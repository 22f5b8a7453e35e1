// SPDX-License-Identifier: MPL-2.0
//! Demo host embedding the photo browser in a window.
//!
//! The `App` owns one [`browser::State`], forwards messages to it and runs
//! the effects it returns. Host notifications are reacted to here: the
//! host bar follows `HostChromeRequested` and everything else is logged
//! and summarized in the status line.

mod message;
mod subscription;

pub use message::{Flags, Message};

use crate::config::{self, BrowserConfig};
use crate::directory_scanner;
use crate::domain::media::MediaItem;
use crate::infrastructure::FsMediaResolver;
use crate::ui::browser::{self, Event, Mode, RetryTimers, SharedResolver};
use iced::widget::{column, container, text, Container, Row, Space};
use iced::{window, Background, Color, Element, Length, Subscription, Task, Theme};
use std::fmt;
use std::sync::Arc;

pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 320;
pub const MIN_WINDOW_WIDTH: u32 = 320;

/// Longest edge of decoded pages; keeps large photos cheap to upload.
const MAX_PAGE_DIMENSION: u32 = 4096;

const APP_TITLE: &str = "Iced Photo Browser";

/// Root Iced application state.
pub struct App {
    browser: Option<browser::State>,
    resolver: SharedResolver,
    timers: RetryTimers,
    host_bar_visible: bool,
    status: String,
    title: String,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("has_browser", &self.browser.is_some())
            .field("host_bar_visible", &self.host_bar_visible)
            .field("status", &self.status)
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot, but the flags are consumed once.
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

/// Applies command-line overrides on top of the loaded configuration.
pub fn apply_flags(mut config: BrowserConfig, flags: &Flags) -> BrowserConfig {
    if let Some(per_row) = flags.items_per_row {
        config.layout.items_per_row = per_row;
    }
    if flags.start_on_grid {
        config.layout.start_on_grid = true;
    }
    if let Some(index) = flags.initial_index {
        config.layout.initial_index = index;
    }
    config
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load_with_override(flags.config_dir.clone());
        let config = apply_flags(config, &flags);

        let resolver: SharedResolver =
            Arc::new(FsMediaResolver::new().with_max_dimension(MAX_PAGE_DIMENSION));

        let mut app = App {
            browser: None,
            resolver,
            timers: RetryTimers::new(),
            host_bar_visible: true,
            status: config_warning.unwrap_or_default(),
            title: APP_TITLE.to_string(),
        };

        let (items, config) = match &flags.path {
            Some(path) => {
                app.title = format!("{APP_TITLE} - {}", path.display());
                match directory_scanner::scan(path) {
                    // A file argument opens on that file unless an index was given.
                    Ok(scan) if flags.initial_index.is_none() && !path.is_dir() => {
                        (scan.items, with_index(config, scan.initial_index))
                    }
                    Ok(scan) => (scan.items, config),
                    Err(err) => {
                        tracing::error!(path = %path.display(), %err, "cannot scan directory");
                        app.status = err.to_string();
                        (Vec::new(), config)
                    }
                }
            }
            None => (Vec::new(), config),
        };

        app.boot(items, config)
    }

    fn boot(mut self, items: Vec<MediaItem>, config: BrowserConfig) -> (Self, Task<Message>) {
        match browser::State::new(items, config) {
            Ok((state, effects)) => {
                self.browser = Some(state);
                let task = self.perform(effects);
                (self, task)
            }
            Err(err) => {
                tracing::error!(%err, "cannot start browser");
                self.status = err.to_string();
                (self, Task::none())
            }
        }
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Browser(msg) => {
                let Some(browser) = self.browser.as_mut() else {
                    return Task::none();
                };
                let effects = browser.handle(msg);
                self.perform(effects)
            }
            Message::ToggleHostBar => {
                self.host_bar_visible = !self.host_bar_visible;
                Task::none()
            }
        }
    }

    /// Runs browser effects and reacts to the notifications among them.
    fn perform(&mut self, effects: Vec<browser::Effect>) -> Task<Message> {
        let Some(browser) = self.browser.as_ref() else {
            return Task::none();
        };
        let (events, task) = browser::perform(
            effects,
            browser.items().len(),
            &self.resolver,
            &mut self.timers,
        );
        for event in events {
            self.on_event(event);
        }
        task.map(Message::Browser)
    }

    fn on_event(&mut self, event: Event) {
        tracing::debug!(?event, "browser event");
        match event {
            Event::HostChromeRequested(visible) => self.host_bar_visible = visible,
            Event::IndexChanged(index) => {
                let count = self.browser.as_ref().map_or(0, |b| b.items().len());
                self.status = format!("{} of {count}", index + 1);
            }
            Event::ModeChanged(Mode::Grid) => self.status = "Grid".into(),
            Event::ModeChanged(Mode::FullScreen) => {}
            Event::ActionButton { item, .. } => {
                tracing::info!(uri = %item.uri, "action requested");
                self.status = format!("Action: {}", item.display_uri());
            }
            Event::PhotoLongPress { item, .. } => {
                self.status = format!("Long press: {}", item.display_uri());
            }
            Event::MediaSelection { index, selected, .. } => {
                let verb = if selected { "Selected" } else { "Deselected" };
                self.status = format!("{verb} {}", index + 1);
            }
            Event::LoadFailed { index, failure } => {
                self.status = format!("Page {} failed: {failure}", index + 1);
            }
            Event::Back => {
                tracing::info!("back requested");
                self.status = "Back".into();
            }
            Event::GridButtonTap | Event::ChromeVisibilityChanged(_) => {}
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match &self.browser {
            Some(browser) if !browser.items().is_empty() => browser.view().map(Message::Browser),
            _ => Container::new(text(self.empty_message()))
                .center(Length::Fill)
                .into(),
        };

        if !self.host_bar_visible {
            return body;
        }

        let host_bar = Container::new(
            Row::new()
                .push(text(APP_TITLE).size(16))
                .push(Space::new().width(Length::Fill))
                .push(text(self.status.as_str()).size(14))
                .spacing(8)
                .padding(8),
        )
        .width(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(Color::from_rgb(0.12, 0.12, 0.14))),
            text_color: Some(Color::WHITE),
            ..Default::default()
        });

        column![host_bar, body].into()
    }

    fn empty_message(&self) -> String {
        if self.status.is_empty() {
            "No images to show. Pass a directory on the command line.".into()
        } else {
            self.status.clone()
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let browser = self
            .browser
            .as_ref()
            .map_or_else(Subscription::none, |b| b.subscription().map(Message::Browser));
        Subscription::batch([browser, subscription::create_event_subscription()])
    }
}

fn with_index(mut config: BrowserConfig, index: usize) -> BrowserConfig {
    config.layout.initial_index = index;
    config
}
