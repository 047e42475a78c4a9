//! DTOs and payload types for remote API requests/responses.

use crate::model::{DeviceSettings, Sensitivity};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SettingsResponse {
    #[serde(rename = "isArmed", default)]
    pub is_armed: bool,

    #[serde(default)]
    pub motion_sensitivity: Option<Sensitivity>,

    #[serde(rename = "sendNotification", default)]
    pub send_notification: bool,
}

impl From<SettingsResponse> for DeviceSettings {
    fn from(resp: SettingsResponse) -> Self {
        DeviceSettings {
            armed: resp.is_armed,
            sensitivity: resp.motion_sensitivity.unwrap_or_default(),
            notification: resp.send_notification,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub(super) struct ToggleModeRequest {
    #[serde(rename = "isArmed")]
    pub(super) is_armed: bool,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub(super) struct SensitivityRequest {
    pub(super) sensitivity: Sensitivity,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub(super) struct NotificationRequest {
    #[serde(rename = "sendNotification")]
    pub(super) send_notification: bool,
}

/// Acknowledgment body returned by mutating endpoints.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of a delete request the remote store acknowledged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteAck {
    Deleted,
    /// The remote store had no such clip; absence is confirmed all the same.
    AlreadyAbsent,
}
