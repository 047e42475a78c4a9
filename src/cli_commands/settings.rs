use clap::{Subcommand, ValueEnum};

use clipwatch::model::Sensitivity;

#[derive(Subcommand)]
pub(crate) enum SettingsCommands {
    /// Show the device settings
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Arm motion capture
    Arm,
    /// Disarm motion capture
    Disarm,
    /// Set motion sensitivity
    Sensitivity {
        #[arg(value_name = "LEVEL")]
        level: Sensitivity,
    },
    /// Turn notifications on or off
    Notify {
        #[arg(value_enum)]
        state: Toggle,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub(crate) fn enabled(self) -> bool {
        matches!(self, Toggle::On)
    }
}
