//! Optimistic control-state engine for remote-owned device settings.

mod state;
mod sync;

pub use self::state::{AckOutcome, ChangeTicket, ControlSnapshot, ControlStateStore, SettingState};
pub use self::sync::{PendingChange, SettingsRemote, SettingsSync, SharedControl};
