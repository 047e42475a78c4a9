use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidSettingValue;

/// A remote-owned device setting tracked by the control store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    Armed,
    Sensitivity,
    Notification,
}

impl Setting {
    pub const ALL: [Setting; 3] = [Setting::Armed, Setting::Sensitivity, Setting::Notification];

    pub fn label(self) -> &'static str {
        match self {
            Setting::Armed => "armed",
            Setting::Sensitivity => "sensitivity",
            Setting::Notification => "notification",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Motion sensitivity, bounded to `MIN..=MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Sensitivity(u8);

impl Sensitivity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: i64) -> Result<Self, InvalidSettingValue> {
        if level < i64::from(Self::MIN) || level > i64::from(Self::MAX) {
            return Err(InvalidSettingValue::SensitivityOutOfRange {
                got: level,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(level as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// One step up, saturating at `MAX`.
    pub fn raised(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX))
    }

    /// One step down, saturating at `MIN`.
    pub fn lowered(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN))
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self(3)
    }
}

impl<'de> Deserialize<'de> for Sensitivity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let level = i64::deserialize(deserializer)?;
        Sensitivity::new(level).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Sensitivity {
    type Err = InvalidSettingValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level: i64 = s
            .trim()
            .parse()
            .map_err(|_| InvalidSettingValue::Unparseable(s.to_string()))?;
        Sensitivity::new(level)
    }
}

/// A value for one specific setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "setting", content = "value", rename_all = "snake_case")]
pub enum SettingValue {
    Armed(bool),
    Sensitivity(Sensitivity),
    Notification(bool),
}

impl SettingValue {
    pub fn setting(self) -> Setting {
        match self {
            SettingValue::Armed(_) => Setting::Armed,
            SettingValue::Sensitivity(_) => Setting::Sensitivity,
            SettingValue::Notification(_) => Setting::Notification,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Armed(true) => f.write_str("armed"),
            SettingValue::Armed(false) => f.write_str("disarmed"),
            SettingValue::Sensitivity(level) => write!(f, "{}", level),
            SettingValue::Notification(true) => f.write_str("on"),
            SettingValue::Notification(false) => f.write_str("off"),
        }
    }
}

/// The full set of device settings as acknowledged by the remote store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSettings {
    pub armed: bool,
    pub sensitivity: Sensitivity,
    pub notification: bool,
}

impl DeviceSettings {
    pub fn value_of(&self, setting: Setting) -> SettingValue {
        match setting {
            Setting::Armed => SettingValue::Armed(self.armed),
            Setting::Sensitivity => SettingValue::Sensitivity(self.sensitivity),
            Setting::Notification => SettingValue::Notification(self.notification),
        }
    }

    pub fn apply(&mut self, value: SettingValue) {
        match value {
            SettingValue::Armed(v) => self.armed = v,
            SettingValue::Sensitivity(v) => self.sensitivity = v,
            SettingValue::Notification(v) => self.notification = v,
        }
    }
}
