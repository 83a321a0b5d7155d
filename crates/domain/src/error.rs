//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`DashError`]
//! at the port boundary.

/// Boxed source error crossing a port boundary.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    /// A form buffer could not be coerced into a configuration value.
    #[error("invalid form input")]
    Form(#[from] FormError),

    /// A status poll cycle failed (transport, HTTP status, or decode).
    ///
    /// Recovered locally by the poller: only the connection indicator
    /// changes, previously rendered readings stay on screen.
    #[error("status poll failed")]
    Poll(#[source] BoxedError),

    /// Loading the device configuration failed.
    #[error("failed to load device configuration")]
    ConfigFetch(#[source] BoxedError),

    /// Saving the device configuration failed.
    #[error("failed to save device configuration")]
    ConfigSave(#[source] BoxedError),

    /// A device command (restart, time sync, training) failed.
    #[error("device command failed")]
    Command(#[source] BoxedError),
}

/// Why a form buffer failed coercion, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The buffer does not hold a valid integer.
    #[error("{field} must be an integer, got {value:?}")]
    InvalidInteger {
        /// Field label as shown on the form.
        field: &'static str,
        /// The rejected buffer contents.
        value: String,
    },

    /// The buffer does not hold a valid number.
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber {
        /// Field label as shown on the form.
        field: &'static str,
        /// The rejected buffer contents.
        value: String,
    },
}
