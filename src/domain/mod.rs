// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with no presentation dependencies.
//!
//! This module contains pure domain types and value objects. It depends on
//! nothing but `std` and the crate error type, which keeps it testable
//! without a window or an async runtime.
//!
//! # Modules
//!
//! - [`media`]: Media types ([`MediaItem`](media::MediaItem), [`MediaKey`](media::MediaKey),
//!   [`RawImage`](media::RawImage))
//! - [`ui`]: UI value objects ([`ItemsPerRow`](ui::newtypes::ItemsPerRow),
//!   [`TransitionProgress`](ui::newtypes::TransitionProgress),
//!   [`MaxSlotRetries`](ui::newtypes::MaxSlotRetries))

pub mod media;
pub mod ui;
