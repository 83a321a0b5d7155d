//! # bbdash-domain
//!
//! Pure domain model for the bbdash dashboard console — a terminal client
//! for the BlueBrain vibration-monitoring device.
//!
//! ## Responsibilities
//! - Wire types for the device API: [`status::StatusSnapshot`],
//!   [`config::DeviceConfig`], [`command::DeviceCommand`]
//! - Fault classification and display colors ([`fault`])
//! - Form buffers and type coercion for configuration editing ([`form`])
//! - Error conventions ([`error`])
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod command;
pub mod config;
pub mod error;
pub mod fault;
pub mod form;
pub mod status;
pub mod time;
