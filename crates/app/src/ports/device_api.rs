//! Device API port — the firmware's REST surface as seen by the app.

use std::future::Future;

use bbdash_domain::command::DeviceCommand;
use bbdash_domain::config::DeviceConfig;
use bbdash_domain::error::BoxedError;
use bbdash_domain::status::StatusSnapshot;

/// Errors crossing the device API port.
///
/// Transport-neutral: adapters map their client library's failures into
/// these variants, and the controller scopes them to the operation that
/// failed ([`DashError`](bbdash_domain::error::DashError)).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (connect, DNS, IO).
    #[error("transport error")]
    Transport(#[source] BoxedError),

    /// The device answered with a non-success HTTP status.
    #[error("device returned HTTP {status}")]
    Status {
        /// The HTTP status code received.
        status: u16,
    },

    /// The response body did not parse as the expected shape.
    #[error("failed to decode device response")]
    Decode(#[source] BoxedError),
}

/// The device's REST API.
///
/// One implementation talks HTTP to real firmware; tests substitute
/// in-memory fakes.
pub trait DeviceApi: Send + Sync {
    /// `GET /api/v1/status` — fetch the current telemetry snapshot.
    fn fetch_status(&self) -> impl Future<Output = Result<StatusSnapshot, ApiError>> + Send;

    /// `GET /api/v1/config` — fetch the stored configuration.
    ///
    /// The password field is never present in the response.
    fn fetch_config(&self) -> impl Future<Output = Result<DeviceConfig, ApiError>> + Send;

    /// `POST /api/v1/config` — store a configuration update.
    ///
    /// The payload may omit the password field to leave the stored secret
    /// unchanged. The response body is not interpreted.
    fn save_config(&self, config: &DeviceConfig)
    -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST /api/v1/restart` — reboot the device.
    fn restart(&self) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST /api/v1/time` — push the given Unix time to the device clock.
    fn sync_time(&self, epoch_secs: i64) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST /api/v1/command` — send a training command.
    fn send_command(
        &self,
        command: &DeviceCommand,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `GET /download_dataset` — fetch the on-device training dataset (CSV).
    fn download_dataset(&self) -> impl Future<Output = Result<Vec<u8>, ApiError>> + Send;
}
