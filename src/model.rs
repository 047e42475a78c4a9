mod clip;
mod config;
mod settings;
mod timestamp;

pub use self::clip::{Clip, ClipId, RawClip};
pub use self::config::{ClientConfig, ClientState, DEFAULT_REQUEST_TIMEOUT_SECS, RemoteConfig};
pub use self::settings::{DeviceSettings, Sensitivity, Setting, SettingValue};
pub use self::timestamp::ClipTimestamp;
