// SPDX-License-Identifier: MPL-2.0
//! Full-screen pager sub-component.
//!
//! Lays every item out as a page one viewport wide inside a horizontal
//! scrollable. The pager owns the committed index. Scroll reports are only
//! tracked while a gesture is in flight; the index is resolved once, when the
//! gesture settles, and the scrollable is then snapped to the committed page.
//!
//! Pages within `mount_buffer` of the page under the viewport are mounted and
//! carry a load state. Content is loaded only for the page that becomes
//! current, through the deferred trigger, because that page may not be
//! mounted yet when it is requested.

use super::deferred::{DeferredTrigger, RetryTicket, TriggerOutcome};
use super::load_tracker::{Completion, LoadStatus, MediaLoadTracker, PageLoadState};
use super::page_resolver::{offset_from_absolute, page_under_viewport, resolve_page_change};
use crate::application::port::media::LoadFailure;
use crate::config::BrowserConfig;
use crate::domain::media::{MediaItem, MediaKey, RawImage};
use crate::error::Error;
use iced::widget::scrollable::{Direction, Scrollbar, Viewport};
use iced::widget::{
    button, image, mouse_area, responsive, Column, Container, Id, Row, Scrollable, Space, Stack,
    Text,
};
use iced::{
    alignment::{Horizontal, Vertical},
    Element, Length, Size,
};
use std::time::{Duration, Instant};

/// Widget id of the pager scrollable, target of seek operations.
pub const SCROLLABLE_ID: &str = "photo-browser-pager";

/// Distance (px) under which a viewport report counts as landing on a seek
/// target, or as being at rest.
const SEEK_TOLERANCE: f32 = 1.0;

/// Size changes smaller than this (px) are layout noise.
const RESIZE_TOLERANCE: f32 = 0.5;

// =============================================================================
// Loaded pages
// =============================================================================

/// Decoded content of a page, sized to fit the viewport.
#[derive(Debug, Clone)]
pub struct LoadedPage {
    handle: image::Handle,
    natural: Size,
    fitted: Size,
}

impl LoadedPage {
    fn new(raw: &RawImage, viewport: Size) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let natural = Size::new(raw.width() as f32, raw.height() as f32);
        Self {
            handle: image::Handle::from_rgba(raw.width(), raw.height(), raw.to_rgba_vec()),
            natural,
            fitted: fit_contain(natural, viewport),
        }
    }

    fn relayout(&mut self, viewport: Size) {
        self.fitted = fit_contain(self.natural, viewport);
    }

    #[must_use]
    pub fn fitted(&self) -> Size {
        self.fitted
    }
}

/// Largest size with the aspect ratio of `natural` that fits `viewport`.
/// Falls back to `natural` while the viewport is unknown.
fn fit_contain(natural: Size, viewport: Size) -> Size {
    if natural.width <= 0.0
        || natural.height <= 0.0
        || viewport.width <= 0.0
        || viewport.height <= 0.0
    {
        return natural;
    }
    let scale = (viewport.width / natural.width).min(viewport.height / natural.height);
    Size::new(natural.width * scale, natural.height * scale)
}

// =============================================================================
// Gestures
// =============================================================================

/// Phase of a horizontal gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Began,
    Moved,
    /// Drag released.
    Ended,
    /// Momentum scrolling stopped.
    MomentumEnded,
}

/// One instantaneous gesture report. `offset_x` is the displacement from
/// the committed page's origin, positive when content moved left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub offset_x: f32,
    pub velocity_x: f32,
    pub phase: Phase,
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    offset: f32,
    velocity: f32,
    last_move: Instant,
}

// =============================================================================
// State / Message / Effect
// =============================================================================

#[derive(Debug, Clone)]
pub struct State {
    item_count: usize,
    current_index: usize,
    viewport: Size,
    pages: MediaLoadTracker<LoadedPage>,
    trigger: DeferredTrigger,
    gesture: Option<Gesture>,
    /// Page a programmatic seek is heading to.
    pending_seek: Option<usize>,
    mount_buffer: usize,
    settle_delay: Duration,
    long_press: Duration,
    pressed_at: Option<Instant>,
    moved_since_press: bool,
    /// Bumped on every relayout.
    layout_epoch: u64,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Explicit gesture report, for hosts that see drag and momentum phases.
    Gesture(GestureSample),
    /// Scroll position or size of the pager viewport changed.
    ViewportChanged {
        absolute_x: f32,
        width: f32,
        height: f32,
    },
    /// Polls whether an in-flight gesture went quiet.
    SettleTick,
    RetryElapsed(RetryTicket),
    Resolved {
        slot: usize,
        key: MediaKey,
        result: Result<RawImage, LoadFailure>,
    },
    PressStarted,
    PressReleased,
    /// Selection button of the current page.
    SelectionToggled(bool),
    NextPage,
    PreviousPage,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Scroll the pager to `index`.
    SeekTo { index: usize, animated: bool },
    /// Report [`Message::RetryElapsed`] with `ticket` after `delay`.
    /// A newer timer for the same `index` replaces the older one.
    ScheduleRetry {
        index: usize,
        ticket: RetryTicket,
        delay: Duration,
    },
    /// Stop every armed retry timer.
    CancelRetries,
    /// Resolve `uri` and report [`Message::Resolved`].
    Resolve {
        slot: usize,
        key: MediaKey,
        uri: String,
    },
    IndexChanged(usize),
    LoadFailed { index: usize, failure: LoadFailure },
    /// Short press on the current page.
    Tapped,
    LongPressed(usize),
    SelectionToggled { index: usize, selected: bool },
}

impl State {
    /// Creates a pager resting on the configured initial index, with the
    /// pages around it mounted.
    #[must_use]
    pub fn new(config: &BrowserConfig, items: &[MediaItem]) -> Self {
        let mut state = Self {
            item_count: items.len(),
            current_index: 0,
            viewport: Size::ZERO,
            pages: MediaLoadTracker::new(),
            trigger: DeferredTrigger::new(config.retry_delay(), config.max_slot_retries()),
            gesture: None,
            pending_seek: None,
            mount_buffer: config.timing.mount_buffer,
            settle_delay: config.settle_delay(),
            long_press: config.delay_long_press(),
            pressed_at: None,
            moved_since_press: false,
            layout_epoch: 0,
        };
        state.current_index = state.clamp_index(config.layout.initial_index);
        state.remount_around(state.current_index, items);
        state
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[must_use]
    pub fn is_mounted(&self, slot: usize) -> bool {
        self.pages.is_mounted(slot)
    }

    #[must_use]
    pub fn mounted_slots(&self) -> Vec<usize> {
        self.pages.mounted_slots()
    }

    #[must_use]
    pub fn load_status(&self, slot: usize) -> Option<LoadStatus> {
        self.pages.status(slot)
    }

    /// Fitted size of a loaded page.
    #[must_use]
    pub fn fitted_size(&self, slot: usize) -> Option<Size> {
        match self.pages.state(slot) {
            Some(PageLoadState::Loaded(page)) => Some(page.fitted()),
            _ => None,
        }
    }

    /// Whether a gesture is waiting to settle.
    #[must_use]
    pub fn is_gesture_in_flight(&self) -> bool {
        self.gesture.is_some()
    }

    #[must_use]
    pub fn pending_retries(&self) -> usize {
        self.trigger.pending_count()
    }

    #[must_use]
    pub fn is_retry_pending(&self, index: usize) -> bool {
        self.trigger.is_pending(index)
    }

    #[must_use]
    pub fn pending_seek(&self) -> Option<usize> {
        self.pending_seek
    }

    #[must_use]
    pub fn layout_epoch(&self) -> u64 {
        self.layout_epoch
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Shows `index` without a paging animation and loads it.
    pub fn open(&mut self, index: usize, items: &[MediaItem]) -> Vec<Effect> {
        if self.item_count == 0 {
            return Vec::new();
        }
        if index >= self.item_count {
            let err = Error::IndexOutOfRange {
                index,
                len: self.item_count,
            };
            tracing::warn!(%err, "clamping pager index");
        }
        let index = self.clamp_index(index);
        self.current_index = index;
        self.gesture = None;

        let mut effects = vec![self.seek(index, false)];
        effects.extend(self.trigger_load(index, items));
        effects
    }

    /// Adopts a replaced item list: clamps the index, cancels pending
    /// retries and remounts the pages around the current one.
    pub fn set_items(&mut self, items: &[MediaItem]) -> Vec<Effect> {
        self.trigger.cancel_all();
        self.gesture = None;
        self.item_count = items.len();

        if items.is_empty() {
            self.pages.clear();
            self.current_index = 0;
            self.pending_seek = None;
            return vec![Effect::CancelRetries];
        }

        self.current_index = self.clamp_index(self.current_index);
        let current = self.current_index;
        self.remount_around(current, items);

        let mut effects = vec![Effect::CancelRetries, self.seek(current, false)];
        effects.extend(self.trigger_load(current, items));
        effects
    }

    /// Cancels pending work and drops every page.
    pub fn teardown(&mut self) -> Vec<Effect> {
        self.trigger.cancel_all();
        self.pages.clear();
        self.gesture = None;
        self.pending_seek = None;
        self.pressed_at = None;
        vec![Effect::CancelRetries]
    }

    /// Forgets the viewport once the scrollable leaves the widget tree, so
    /// the next report is handled as a resize.
    pub fn detach(&mut self) {
        self.viewport = Size::ZERO;
        self.gesture = None;
        self.pressed_at = None;
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message, items: &[MediaItem]) -> Vec<Effect> {
        if self.item_count == 0 {
            return Vec::new();
        }
        match msg {
            Message::Gesture(sample) => self.on_gesture(sample, items),
            Message::ViewportChanged {
                absolute_x,
                width,
                height,
            } => self.on_viewport(absolute_x, Size::new(width, height), items),
            Message::SettleTick => match self.gesture {
                Some(gesture) if gesture.last_move.elapsed() >= self.settle_delay => {
                    self.settle(gesture.offset, items)
                }
                _ => Vec::new(),
            },
            Message::RetryElapsed(ticket) => {
                let pages = &self.pages;
                let outcome = self.trigger.on_elapsed(ticket, |slot| pages.is_mounted(slot));
                self.follow(outcome, items)
            }
            Message::Resolved { slot, key, result } => self.on_resolved(slot, &key, result),
            Message::PressStarted => {
                self.pressed_at = Some(Instant::now());
                self.moved_since_press = false;
                Vec::new()
            }
            Message::PressReleased => {
                let Some(pressed_at) = self.pressed_at.take() else {
                    return Vec::new();
                };
                if self.moved_since_press {
                    return Vec::new();
                }
                if pressed_at.elapsed() >= self.long_press {
                    vec![Effect::LongPressed(self.current_index)]
                } else {
                    vec![Effect::Tapped]
                }
            }
            Message::SelectionToggled(selected) => vec![Effect::SelectionToggled {
                index: self.current_index,
                selected,
            }],
            Message::NextPage => {
                let next = self.current_index + 1;
                if next < self.item_count {
                    self.navigate(next, items)
                } else {
                    Vec::new()
                }
            }
            Message::PreviousPage => match self.current_index.checked_sub(1) {
                Some(previous) => self.navigate(previous, items),
                None => Vec::new(),
            },
        }
    }

    fn on_gesture(&mut self, sample: GestureSample, items: &[MediaItem]) -> Vec<Effect> {
        match sample.phase {
            Phase::Began => {
                self.pending_seek = None;
                self.moved_since_press = true;
                self.gesture = Some(Gesture {
                    offset: sample.offset_x,
                    velocity: sample.velocity_x,
                    last_move: Instant::now(),
                });
                Vec::new()
            }
            Phase::Moved => {
                self.track(sample.offset_x, Some(sample.velocity_x));
                Vec::new()
            }
            Phase::Ended | Phase::MomentumEnded => self.settle(sample.offset_x, items),
        }
    }

    fn on_viewport(&mut self, absolute_x: f32, size: Size, items: &[MediaItem]) -> Vec<Effect> {
        let resized = (size.width - self.viewport.width).abs() > RESIZE_TOLERANCE
            || (size.height - self.viewport.height).abs() > RESIZE_TOLERANCE;
        if resized {
            self.viewport = size;
            return self.relayout(absolute_x, items);
        }

        if let Some(target) = self.pending_seek.take() {
            if (absolute_x - self.origin_of(target)).abs() <= SEEK_TOLERANCE {
                self.remount_around(target, items);
                return Vec::new();
            }
            // Anything else means the user took over from the seek.
        }

        let offset = offset_from_absolute(absolute_x, self.current_index, self.viewport.width);
        if self.gesture.is_none() && offset.abs() <= SEEK_TOLERANCE {
            return Vec::new();
        }

        self.track(offset, None);
        let under = page_under_viewport(absolute_x, self.viewport.width, self.item_count);
        self.remount_around(under, items);
        Vec::new()
    }

    /// Records movement of the in-flight gesture, starting one if needed.
    fn track(&mut self, offset: f32, velocity: Option<f32>) {
        let now = Instant::now();
        self.moved_since_press = true;
        match &mut self.gesture {
            Some(gesture) => {
                let elapsed = now.saturating_duration_since(gesture.last_move).as_secs_f32();
                gesture.velocity = velocity.unwrap_or(if elapsed > 0.0 {
                    (offset - gesture.offset) / elapsed
                } else {
                    gesture.velocity
                });
                gesture.offset = offset;
                gesture.last_move = now;
            }
            None => {
                self.gesture = Some(Gesture {
                    offset,
                    velocity: velocity.unwrap_or(0.0),
                    last_move: now,
                });
            }
        }
    }

    /// Resolves the terminal offset of a gesture and snaps to the result.
    fn settle(&mut self, offset: f32, items: &[MediaItem]) -> Vec<Effect> {
        let velocity = self.gesture.take().map_or(0.0, |g| g.velocity);
        let mut effects = Vec::new();

        if let Some(index) =
            resolve_page_change(self.current_index, self.viewport.width, offset, self.item_count)
        {
            tracing::debug!(from = self.current_index, to = index, offset, velocity, "page committed");
            effects.extend(self.commit_index(index, items));
        } else if self.needs_load(self.current_index) {
            // The slot may have been recycled while the drag wandered off.
            effects.extend(self.trigger_load(self.current_index, items));
        }
        effects.push(self.seek(self.current_index, true));
        effects
    }

    /// Whether `index` has no content, no load in flight and no retry armed.
    fn needs_load(&self, index: usize) -> bool {
        matches!(self.pages.status(index), None | Some(LoadStatus::Idle))
            && !self.trigger.is_pending(index)
    }

    fn navigate(&mut self, index: usize, items: &[MediaItem]) -> Vec<Effect> {
        self.gesture = None;
        let mut effects = self.commit_index(index, items);
        effects.push(self.seek(index, true));
        effects
    }

    fn commit_index(&mut self, index: usize, items: &[MediaItem]) -> Vec<Effect> {
        self.current_index = index;
        let mut effects = vec![Effect::IndexChanged(index)];
        effects.extend(self.trigger_load(index, items));
        effects
    }

    /// Re-seeks to the current page and refits every loaded page.
    fn relayout(&mut self, absolute_x: f32, items: &[MediaItem]) -> Vec<Effect> {
        self.layout_epoch += 1;
        self.gesture = None;
        let viewport = self.viewport;
        for (_, page) in self.pages.loaded_mut() {
            page.relayout(viewport);
        }
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            epoch = self.layout_epoch,
            "pager relayout"
        );

        let current = self.current_index;
        if (absolute_x - self.origin_of(current)).abs() <= SEEK_TOLERANCE {
            self.pending_seek = None;
            self.remount_around(current, items);
            return Vec::new();
        }
        let under = page_under_viewport(absolute_x, viewport.width, self.item_count);
        self.remount_around(under, items);
        vec![self.seek(current, false)]
    }

    fn seek(&mut self, index: usize, animated: bool) -> Effect {
        self.pending_seek = Some(index);
        Effect::SeekTo { index, animated }
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    fn trigger_load(&mut self, index: usize, items: &[MediaItem]) -> Vec<Effect> {
        let ready = self.pages.is_mounted(index);
        let outcome = self.trigger.request(index, ready);
        self.follow(outcome, items)
    }

    fn follow(&mut self, outcome: TriggerOutcome, items: &[MediaItem]) -> Vec<Effect> {
        match outcome {
            TriggerOutcome::Ready(slot) => self.start_load(slot, items).into_iter().collect(),
            TriggerOutcome::Scheduled {
                index,
                ticket,
                delay,
            } => {
                vec![Effect::ScheduleRetry {
                    index,
                    ticket,
                    delay,
                }]
            }
            TriggerOutcome::Exhausted { .. } | TriggerOutcome::Stale => Vec::new(),
        }
    }

    fn start_load(&mut self, slot: usize, items: &[MediaItem]) -> Option<Effect> {
        let item = items.get(slot)?;
        if !self.pages.load(slot) {
            return None;
        }
        Some(Effect::Resolve {
            slot,
            key: item.key(),
            uri: item.uri.clone(),
        })
    }

    fn on_resolved(
        &mut self,
        slot: usize,
        key: &MediaKey,
        result: Result<RawImage, LoadFailure>,
    ) -> Vec<Effect> {
        let viewport = self.viewport;
        let outcome = result.map(|raw| LoadedPage::new(&raw, viewport));
        let failure = outcome.as_ref().err().cloned();

        match self.pages.complete(slot, key, outcome) {
            Completion::Applied => match failure {
                Some(failure) => {
                    tracing::warn!(slot, %key, %failure, "page failed to load");
                    vec![Effect::LoadFailed {
                        index: slot,
                        failure,
                    }]
                }
                None => Vec::new(),
            },
            Completion::Discarded => {
                tracing::debug!(slot, %key, "discarding stale load result");
                Vec::new()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn clamp_index(&self, index: usize) -> usize {
        index.min(self.item_count.saturating_sub(1))
    }

    fn origin_of(&self, index: usize) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let index = index as f32;
        index * self.viewport.width
    }

    fn remount_around(&mut self, center: usize, items: &[MediaItem]) {
        let Some(last) = items.len().checked_sub(1) else {
            self.pages.clear();
            return;
        };
        let center = center.min(last);
        let start = center.saturating_sub(self.mount_buffer);
        let end = (center + self.mount_buffer).min(last);

        self.pages.retain_slots(|slot| (start..=end).contains(&slot));
        for (slot, item) in items.iter().enumerate().take(end + 1).skip(start) {
            self.pages.mount(slot, item.key());
        }
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    pub fn view<'a>(
        &'a self,
        items: &'a [MediaItem],
        display_selection_buttons: bool,
    ) -> Element<'a, Message> {
        responsive(move |size: Size| self.view_sized(items, size, display_selection_buttons))
            .into()
    }

    fn view_sized<'a>(
        &'a self,
        items: &'a [MediaItem],
        size: Size,
        display_selection_buttons: bool,
    ) -> Element<'a, Message> {
        let mut row = Row::new().height(Length::Fill);
        for (slot, item) in items.iter().enumerate() {
            row = row.push(self.page(slot, item, size, display_selection_buttons));
        }

        let scrollable = Scrollable::new(row)
            .id(Id::new(SCROLLABLE_ID))
            .width(Length::Fill)
            .height(Length::Fill)
            .direction(Direction::Horizontal(Scrollbar::hidden()))
            .on_scroll(|viewport: Viewport| {
                let bounds = viewport.bounds();
                Message::ViewportChanged {
                    absolute_x: viewport.absolute_offset().x,
                    width: bounds.width,
                    height: bounds.height,
                }
            });

        mouse_area(scrollable)
            .on_press(Message::PressStarted)
            .on_release(Message::PressReleased)
            .into()
    }

    fn page<'a>(
        &'a self,
        slot: usize,
        item: &'a MediaItem,
        size: Size,
        display_selection_buttons: bool,
    ) -> Element<'a, Message> {
        let content: Element<'a, Message> = match self.pages.state(slot) {
            None => {
                return Space::new()
                    .width(Length::Fixed(size.width))
                    .height(Length::Fill)
                    .into();
            }
            Some(PageLoadState::Loaded(page)) => image(page.handle.clone())
                .width(Length::Fixed(page.fitted.width))
                .height(Length::Fixed(page.fitted.height))
                .into(),
            Some(PageLoadState::Error(failure)) => Column::new()
                .align_x(Horizontal::Center)
                .spacing(8)
                .push(Text::new("⚠").size(32))
                .push(Text::new(failure.to_string()))
                .into(),
            Some(PageLoadState::Idle | PageLoadState::Loading) => Text::new("Loading…").into(),
        };

        let framed = Container::new(content)
            .width(Length::Fixed(size.width))
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center);

        let mut stack = Stack::new().push(framed);
        if display_selection_buttons && slot == self.current_index {
            let glyph = if item.selected { "☑" } else { "☐" };
            let toggle = button(Text::new(glyph).size(24))
                .style(button::text)
                .on_press(Message::SelectionToggled(!item.selected));
            stack = stack.push(
                Container::new(toggle)
                    .width(Length::Fixed(size.width))
                    .height(Length::Fill)
                    .padding(16)
                    .align_x(Horizontal::Right)
                    .align_y(Vertical::Bottom),
            );
        }
        stack.into()
    }
}
