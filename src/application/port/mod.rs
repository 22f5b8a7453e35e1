// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`media`]: Content resolution for pager slots
//!
//! # Design Notes
//!
//! - Traits use domain types only (no Iced handles)
//! - Traits are `Send + Sync` so they can be shared with blocking workers
//! - No `async fn` - the browser runtime wraps calls in `Task::perform`

pub mod media;

// Re-export main types for convenience
pub use media::{LoadFailure, MediaResolver};
