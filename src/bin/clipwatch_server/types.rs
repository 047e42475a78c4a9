/// A stored clip, in the field layout the capture backend writes.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(super) struct ClipRecord {
    pub(super) id: String,

    // Stored verbatim; the dashboard owns timestamp validation.
    pub(super) timestamp: String,

    #[serde(default)]
    pub(super) image_filename: String,

    #[serde(default)]
    pub(super) video_filename: String,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct RecordClipRequest {
    #[serde(default)]
    pub(super) id: Option<String>,

    #[serde(default)]
    pub(super) timestamp: Option<String>,

    #[serde(default)]
    pub(super) image_filename: Option<String>,

    #[serde(default)]
    pub(super) video_filename: Option<String>,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub(super) struct SettingsBody {
    #[serde(rename = "isArmed")]
    pub(super) is_armed: bool,

    pub(super) motion_sensitivity: u8,

    #[serde(rename = "sendNotification")]
    pub(super) send_notification: bool,
}

impl Default for SettingsBody {
    fn default() -> Self {
        Self {
            is_armed: false,
            motion_sensitivity: 3,
            send_notification: false,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct ToggleModeRequest {
    #[serde(rename = "isArmed")]
    pub(super) is_armed: bool,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct SensitivityRequest {
    pub(super) sensitivity: i64,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct NotificationRequest {
    #[serde(rename = "sendNotification")]
    pub(super) send_notification: bool,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct AckBody {
    pub(super) message: String,
}
