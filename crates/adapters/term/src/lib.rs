//! # bbdash-adapter-term
//!
//! Terminal adapter — implements the [`DashboardView`] rendering port with
//! `crossterm` and maps raw key presses to controller events.
//!
//! The renderer is generic over [`std::io::Write`]: the binary hands it
//! stdout, tests hand it a byte buffer and assert on the captured output.
//!
//! ## Dependency rule
//! Depends on `bbdash-app` (for the ports) and `bbdash-domain`. Never
//! imported by either.
//!
//! [`DashboardView`]: bbdash_app::ports::view::DashboardView

pub mod input;
pub mod view;

pub use input::{InputSignal, map_key, spawn_input_reader};
pub use view::{TermView, TerminalGuard};
