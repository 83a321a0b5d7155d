//! # bbdash-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the outbound ports adapters implement:
//!   [`ports::device_api::DeviceApi`] (the firmware's REST surface) and
//!   [`ports::view::DashboardView`] (the rendering surface)
//! - Own all UI state in [`controller::DashboardController`] — active panel,
//!   form buffers, field focus — and map device failures to surfaced,
//!   operation-scoped errors
//! - Drive the recurring status poll ([`poller::StatusPoller`])
//! - Shape status snapshots into display strings ([`readout::MetricsReadout`])
//!
//! ## Dependency rule
//! Depends on `bbdash-domain` only (plus `tokio` for tasks/timers and
//! `parking_lot` for the shared view). Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod controller;
pub mod poller;
pub mod ports;
pub mod readout;
