// SPDX-License-Identifier: MPL-2.0
//! Nested TEA sub-components for the photo browser.
//!
//! Stateful sub-components have their own State, Message, Effect and
//! `handle()`; the coordinator in `component.rs` relays between them.
//!
//! ## Architecture
//!
//! ```text
//! component.rs (coordinator)
//!     ├── grid          - Thumbnail grid, tap to open
//!     ├── pager         - Full-screen pages, committed index
//!     │   ├── page_resolver - Settle offset to index
//!     │   ├── load_tracker  - Per-slot load state
//!     │   └── deferred      - Bounded retry for unmounted slots
//!     ├── chrome        - Bar visibility
//!     └── transition    - Grid/full-screen crossfade
//! ```

pub mod chrome;
pub mod deferred;
pub mod grid;
pub mod load_tracker;
pub mod page_resolver;
pub mod pager;
pub mod transition;
