// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports the browser depends on.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer (the browser widget) consumes the ports through
//!   `iced::Task`s, never directly from `update`

pub mod port;

// Re-export main types for convenience
pub use port::{LoadFailure, MediaResolver};
