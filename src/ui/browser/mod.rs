// SPDX-License-Identifier: MPL-2.0
//! Embeddable photo browser: a thumbnail grid and a full-screen pager over
//! one list of [`MediaItem`](crate::domain::media::MediaItem)s.
//!
//! The host owns a [`State`], forwards its [`Message`]s, and runs returned
//! [`Effect`]s through [`runtime::perform`], which yields the [`Event`]s
//! addressed to the host and a task for everything else.

pub mod bars;
pub mod component;
pub mod runtime;
pub mod subcomponents;

pub use component::{Effect, Event, Message, Mode, State};
pub use runtime::{perform, RetryTimers, SharedResolver};
