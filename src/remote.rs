use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::TransportError;
use crate::model::{ClipId, DeviceSettings, RawClip, RemoteConfig, SettingValue};

mod http_client;

mod types;
pub use self::types::*;
mod clips;
mod events;
mod settings;

/// Blocking client for the remote clip/settings store.
///
/// Every call performs exactly one request and never retries; retry policy
/// belongs to whoever drives the client.
pub struct RemoteClient {
    remote: RemoteConfig,
    token: String,
    client: reqwest::blocking::Client,

    // The live event stream stays open indefinitely, so it gets a client
    // without the per-request timeout.
    stream_client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(remote: RemoteConfig, token: String) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("clipwatch")
            .timeout(remote.request_timeout())
            .build()
            .map_err(|err| TransportError::request("build http client", err))?;
        let stream_client = reqwest::blocking::Client::builder()
            .user_agent("clipwatch")
            .timeout(None)
            .build()
            .map_err(|err| TransportError::request("build stream client", err))?;
        Ok(Self {
            remote,
            token,
            client,
            stream_client,
        })
    }

    pub fn remote(&self) -> &RemoteConfig {
        &self.remote
    }
}
