// SPDX-License-Identifier: MPL-2.0
use iced_photo_browser::config::{self, BrowserConfig};
use iced_photo_browser::directory_scanner;
use iced_photo_browser::domain::media::{MediaItem, RawImage};
use iced_photo_browser::ui::browser::subcomponents::load_tracker::LoadStatus;
use iced_photo_browser::ui::browser::subcomponents::page_resolver::resolve_page;
use iced_photo_browser::ui::browser::subcomponents::pager::{self, GestureSample, Phase};
use iced_photo_browser::ui::browser::subcomponents::grid;
use iced_photo_browser::ui::browser::{Effect, Event, Message, Mode, State};
use std::fs;
use tempfile::tempdir;

const WIDTH: f32 = 400.0;
const HEIGHT: f32 = 300.0;

fn items(count: usize) -> Vec<MediaItem> {
    (0..count)
        .map(|i| MediaItem::new(format!("photo-{i}.jpg")))
        .collect()
}

fn viewport_at(page: usize) -> Message {
    Message::Pager(pager::Message::ViewportChanged {
        absolute_x: page as f32 * WIDTH,
        width: WIDTH,
        height: HEIGHT,
    })
}

fn gesture(offset_x: f32, phase: Phase) -> Message {
    Message::Pager(pager::Message::Gesture(GestureSample {
        offset_x,
        velocity_x: 0.0,
        phase,
    }))
}

/// The ticket of the single retry scheduled among `effects`.
fn scheduled_retry(effects: &[Effect]) -> Message {
    let ticket = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ScheduleRetry { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("a retry should be scheduled");
    Message::Pager(pager::Message::RetryElapsed(ticket))
}

fn full_screen_at(index: usize, count: usize) -> State {
    let mut config = BrowserConfig::default();
    config.layout.initial_index = index;
    let (mut state, _) = State::new(items(count), config).expect("valid browser");
    state.handle(viewport_at(index));
    state
}

#[test]
fn tapping_a_grid_cell_opens_the_pager_there() {
    let mut config = BrowserConfig::default();
    config.layout.start_on_grid = true;
    let (mut state, effects) = State::new(items(5), config).expect("valid browser");
    assert_eq!(state.mode(), Mode::Grid);
    assert!(effects.is_empty());

    let effects = state.handle(Message::Grid(grid::Message::CellTapped(3)));

    assert_eq!(state.mode(), Mode::FullScreen);
    assert_eq!(state.current_index(), 3);
    assert!(effects.contains(&Effect::SeekTo {
        index: 3,
        animated: false
    }));
    assert!(effects.contains(&Effect::Notify(Event::ModeChanged(Mode::FullScreen))));
    assert!(effects.contains(&Effect::Notify(Event::HostChromeRequested(false))));
    assert!(state.pager().is_retry_pending(3));
}

#[test]
fn deferred_load_runs_once_the_page_mounts() {
    let mut config = BrowserConfig::default();
    config.layout.start_on_grid = true;
    let (mut state, _) = State::new(items(5), config).expect("valid browser");

    let effects = state.handle(Message::Grid(grid::Message::CellTapped(3)));
    assert!(!state.pager().is_mounted(3));

    // Two checks while the seek has not landed yet.
    let effects = state.handle(scheduled_retry(&effects));
    assert!(!effects.iter().any(|e| matches!(e, Effect::Resolve { .. })));
    let effects = state.handle(scheduled_retry(&effects));
    assert!(!effects.iter().any(|e| matches!(e, Effect::Resolve { .. })));

    // The pager is laid out on page 3.
    state.handle(viewport_at(3));
    assert!(state.pager().is_mounted(3));

    let effects = state.handle(scheduled_retry(&effects));
    let resolve = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Resolve { slot, key, uri } => Some((*slot, key.clone(), uri.clone())),
            _ => None,
        })
        .expect("third check should load the page");
    assert_eq!(resolve.0, 3);
    assert_eq!(resolve.2, "photo-3.jpg");
    assert_eq!(state.pager().load_status(3), Some(LoadStatus::Loading));
    assert!(!state.pager().is_retry_pending(3));

    let effects = state.handle(Message::Pager(pager::Message::Resolved {
        slot: resolve.0,
        key: resolve.1,
        result: Ok(RawImage::from_rgba(2, 1, vec![0; 8])),
    }));
    assert!(effects.is_empty());
    assert_eq!(state.pager().load_status(3), Some(LoadStatus::Loaded));
}

#[test]
fn swipe_past_half_a_page_commits_the_next_index() {
    let mut state = full_screen_at(2, 5);

    state.handle(gesture(0.0, Phase::Began));
    state.handle(gesture(300.0, Phase::Moved));
    let effects = state.handle(gesture(1.2 * WIDTH, Phase::Ended));

    assert_eq!(state.current_index(), 3);
    assert!(effects.contains(&Effect::Notify(Event::IndexChanged(3))));
    assert!(effects.contains(&Effect::SeekTo {
        index: 3,
        animated: true
    }));
}

#[test]
fn short_swipe_snaps_back() {
    let mut state = full_screen_at(2, 5);

    state.handle(gesture(0.0, Phase::Began));
    let effects = state.handle(gesture(-0.4 * WIDTH, Phase::Ended));

    assert_eq!(state.current_index(), 2);
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::Notify(Event::IndexChanged(_)))));
    assert!(effects.contains(&Effect::SeekTo {
        index: 2,
        animated: true
    }));
}

#[test]
fn current_page_loads_again_after_a_long_drag_back() {
    let (mut state, effects) =
        State::new(items(5), BrowserConfig::default()).expect("valid browser");
    let key = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Resolve { slot: 0, key, .. } => Some(key.clone()),
            _ => None,
        })
        .expect("first page loads on open");
    state.handle(viewport_at(0));
    state.handle(Message::Pager(pager::Message::Resolved {
        slot: 0,
        key: key.clone(),
        result: Ok(RawImage::from_rgba(2, 1, vec![0; 8])),
    }));
    assert_eq!(state.pager().load_status(0), Some(LoadStatus::Loaded));

    // Drag well past the mount window, then back short of half a page.
    for x in [1.2, 2.6, 1.1, 0.2] {
        state.handle(Message::Pager(pager::Message::ViewportChanged {
            absolute_x: x * WIDTH,
            width: WIDTH,
            height: HEIGHT,
        }));
    }
    assert_eq!(state.pager().load_status(0), Some(LoadStatus::Idle));

    let effects = state.handle(gesture(0.2 * WIDTH, Phase::Ended));
    assert_eq!(state.current_index(), 0);
    assert!(effects.contains(&Effect::Resolve {
        slot: 0,
        key: key.clone(),
        uri: "photo-0.jpg".into(),
    }));

    state.handle(Message::Pager(pager::Message::Resolved {
        slot: 0,
        key,
        result: Ok(RawImage::from_rgba(2, 1, vec![0; 8])),
    }));
    assert_eq!(state.pager().load_status(0), Some(LoadStatus::Loaded));
}

#[test]
fn resolver_clamps_at_both_ends() {
    assert_eq!(resolve_page(2, WIDTH, 1.2 * WIDTH, 5), 3);
    assert_eq!(resolve_page(2, WIDTH, -1.6 * WIDTH, 5), 0);
    assert_eq!(resolve_page(0, WIDTH, -3.0 * WIDTH, 5), 0);
    assert_eq!(resolve_page(4, WIDTH, 2.0 * WIDTH, 5), 4);
    assert_eq!(resolve_page(1, 0.0, 2.0 * WIDTH, 5), 1);
}

#[test]
fn taps_toggle_bars_unless_always_shown() {
    let mut state = full_screen_at(0, 3);
    assert!(state.chrome_visible());

    state.handle(Message::Pager(pager::Message::PressStarted));
    let effects = state.handle(Message::Pager(pager::Message::PressReleased));
    assert!(!state.chrome_visible());
    assert!(effects.contains(&Effect::Notify(Event::ChromeVisibilityChanged(false))));

    let mut config = BrowserConfig::default();
    config.chrome.always_show_controls = true;
    let (mut state, _) = State::new(items(3), config).expect("valid browser");
    state.handle(Message::Pager(pager::Message::PressStarted));
    let effects = state.handle(Message::Pager(pager::Message::PressReleased));
    assert!(state.chrome_visible());
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::Notify(Event::ChromeVisibilityChanged(_)))));
}

#[test]
fn config_is_loaded_from_override_directory() {
    let dir = tempdir().expect("failed to create temp dir");
    fs::write(
        dir.path().join("browser.toml"),
        "[layout]\nitems_per_row = 4\nstart_on_grid = true\n\n[chrome]\nalways_show_controls = true\n",
    )
    .expect("failed to write config");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(config.layout.items_per_row, 4);
    assert!(config.starts_on_grid());
    assert!(config.chrome.always_show_controls);
}

#[test]
fn invalid_config_falls_back_to_defaults_with_warning() {
    let dir = tempdir().expect("failed to create temp dir");
    fs::write(
        dir.path().join("browser.toml"),
        "[layout]\nitems_per_row = 0\n",
    )
    .expect("failed to write config");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_some());
    assert_eq!(config, BrowserConfig::default());
}

#[test]
fn scanned_directory_feeds_the_browser() {
    let dir = tempdir().expect("failed to create temp dir");
    for name in ["b.png", "a.jpg", "notes.txt", "c.webp"] {
        fs::write(dir.path().join(name), b"fake").expect("failed to write file");
    }

    let scan = directory_scanner::scan(dir.path()).expect("failed to scan");
    let (state, effects) =
        State::new(scan.items, BrowserConfig::default()).expect("valid browser");

    assert_eq!(state.items().len(), 3);
    assert_eq!(state.items()[0].caption.as_deref(), Some("a.jpg"));
    assert!(effects.contains(&Effect::SeekTo {
        index: 0,
        animated: false
    }));
}
