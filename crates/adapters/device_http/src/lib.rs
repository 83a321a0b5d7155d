//! # bbdash-adapter-device-http
//!
//! HTTP adapter — implements the [`DeviceApi`] port against the BlueBrain
//! firmware's REST endpoints (`/api/v1/*` plus the dataset download).
//!
//! ## Dependency rule
//! Depends on `bbdash-app` (for the port) and `bbdash-domain` (for the wire
//! types). Never imported by either.

use bbdash_app::ports::device_api::{ApiError, DeviceApi};
use bbdash_domain::command::DeviceCommand;
use bbdash_domain::config::DeviceConfig;
use bbdash_domain::status::StatusSnapshot;

/// [`DeviceApi`] implementation backed by `reqwest`.
///
/// No client-side timeout is configured; the polling cadence is the only
/// pacing and the transport's own limits bound a hung request.
pub struct HttpDeviceApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDeviceApi {
    /// Create a client for the device at `base_url`
    /// (e.g. `http://192.168.4.1`). A trailing slash is tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport)?;
        check_status(resp)
    }

    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        check_status(resp).map(drop)
    }
}

impl DeviceApi for HttpDeviceApi {
    async fn fetch_status(&self) -> Result<StatusSnapshot, ApiError> {
        self.get("/api/v1/status").await?.json().await.map_err(decode)
    }

    async fn fetch_config(&self) -> Result<DeviceConfig, ApiError> {
        self.get("/api/v1/config").await?.json().await.map_err(decode)
    }

    async fn save_config(&self, config: &DeviceConfig) -> Result<(), ApiError> {
        self.post_json("/api/v1/config", config).await
    }

    async fn restart(&self) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url("/api/v1/restart"))
            .send()
            .await
            .map_err(transport)?;
        check_status(resp).map(drop)
    }

    async fn sync_time(&self, epoch_secs: i64) -> Result<(), ApiError> {
        self.post_json("/api/v1/time", &serde_json::json!({ "epoch": epoch_secs }))
            .await
    }

    async fn send_command(&self, command: &DeviceCommand) -> Result<(), ApiError> {
        self.post_json("/api/v1/command", command).await
    }

    async fn download_dataset(&self) -> Result<Vec<u8>, ApiError> {
        let resp = self.get("/download_dataset").await?;
        Ok(resp.bytes().await.map_err(transport)?.to_vec())
    }
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(ApiError::Status {
            status: resp.status().as_u16(),
        })
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(Box::new(err))
}

fn decode(err: reqwest::Error) -> ApiError {
    ApiError::Decode(Box::new(err))
}
